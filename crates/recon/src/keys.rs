use std::fmt;

use crate::model::{ImdbEntry, LetterboxdEntry};
use crate::normalize::normalize_title;

// ---------------------------------------------------------------------------
// Title + year
// ---------------------------------------------------------------------------

/// `"<normalized title>|<year>"`. Only constructible when both parts exist,
/// so an unknown title or year can never collide with another unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TitleYearKey(String);

impl TitleYearKey {
    /// Uses `title` when non-blank, else `fallback`.
    pub fn new(title: &str, fallback: &str, year: i32) -> Option<Self> {
        let mut candidate = title.trim();
        if candidate.is_empty() {
            candidate = fallback.trim();
        }
        if candidate.is_empty() || year <= 0 {
            return None;
        }
        let normalized = normalize_title(candidate);
        if normalized.is_empty() {
            return None;
        }
        Some(Self(format!("{normalized}|{year}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleYearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Item identity
// ---------------------------------------------------------------------------

/// Canonical per-entry identity used for matched-set membership and dedup.
///
/// Variants are listed in precedence order. Distinct variants never compare
/// equal, so a title that happens to spell a URI cannot collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKey {
    Imdb(String),
    Uri(String),
    Slug(String),
    TitleYear(TitleYearKey),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imdb(id) => write!(f, "imdb:{id}"),
            Self::Uri(uri) => write!(f, "uri:{uri}"),
            Self::Slug(slug) => write!(f, "id:{slug}"),
            Self::TitleYear(key) => write!(f, "title:{key}"),
        }
    }
}

/// Identity derivation for one side of the diff.
pub trait Identity {
    /// Stable cross-catalog ID (IMDb `tt…`), if known.
    fn external_id(&self) -> Option<&str>;

    /// Precedence-ordered identity; `None` means the entry can never be
    /// matched or deduplicated.
    fn item_key(&self) -> Option<ItemKey>;

    /// Keys this entry is filed under in the title+year index.
    fn index_keys(&self) -> Vec<TitleYearKey>;

    /// Key used to look up suggestions on the opposite side.
    fn lookup_key(&self) -> Option<TitleYearKey>;

    /// Dedup key for suggestion lists. Never the title.
    fn suggestion_key(&self) -> Option<ItemKey>;
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl Identity for ImdbEntry {
    fn external_id(&self) -> Option<&str> {
        non_empty(&self.imdb_id)
    }

    fn item_key(&self) -> Option<ItemKey> {
        if let Some(id) = self.external_id() {
            return Some(ItemKey::Imdb(id.to_string()));
        }
        self.lookup_key().map(ItemKey::TitleYear)
    }

    fn index_keys(&self) -> Vec<TitleYearKey> {
        let mut keys = Vec::with_capacity(2);
        keys.extend(TitleYearKey::new(&self.title, "", self.year));
        if !self.original_title.is_empty() && self.original_title != self.title {
            keys.extend(TitleYearKey::new(&self.original_title, "", self.year));
        }
        keys
    }

    fn lookup_key(&self) -> Option<TitleYearKey> {
        TitleYearKey::new(&self.title, &self.original_title, self.year)
    }

    fn suggestion_key(&self) -> Option<ItemKey> {
        self.external_id().map(|id| ItemKey::Imdb(id.to_string()))
    }
}

impl Identity for LetterboxdEntry {
    fn external_id(&self) -> Option<&str> {
        non_empty(&self.imdb_id)
    }

    fn item_key(&self) -> Option<ItemKey> {
        self.suggestion_key().or_else(|| self.lookup_key().map(ItemKey::TitleYear))
    }

    fn index_keys(&self) -> Vec<TitleYearKey> {
        self.lookup_key().into_iter().collect()
    }

    fn lookup_key(&self) -> Option<TitleYearKey> {
        TitleYearKey::new(&self.name, "", self.year)
    }

    fn suggestion_key(&self) -> Option<ItemKey> {
        if let Some(id) = self.external_id() {
            return Some(ItemKey::Imdb(id.to_string()));
        }
        if let Some(uri) = non_empty(&self.letterboxd_uri) {
            return Some(ItemKey::Uri(uri.to_string()));
        }
        non_empty(&self.letterboxd_id).map(|slug| ItemKey::Slug(slug.to_string()))
    }
}
