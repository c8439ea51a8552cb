use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One row of an IMDb ratings export.
///
/// Empty strings mean "unknown"; `year <= 0` means unknown; `my_rating == 0`
/// means unrated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImdbEntry {
    pub imdb_id: String,
    pub title: String,
    pub original_title: String,
    pub year: i32,
    pub url: String,
    /// 1-10 scale.
    pub my_rating: i32,
}

/// One row of a Letterboxd watched / diary export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LetterboxdEntry {
    pub name: String,
    pub year: i32,
    /// Site-local slug (last path segment of the URI).
    pub letterboxd_id: String,
    pub letterboxd_uri: String,
    /// Only present once backfilled from a URI mapping.
    pub imdb_id: String,
    /// 0.5-5 half-step scale.
    pub rating: f64,
}

/// Pre-loaded catalogs plus the optional `letterboxd_uri -> imdb_id` overlay.
#[derive(Debug, Clone, Default)]
pub struct DiffInput {
    pub imdb: Vec<ImdbEntry>,
    pub letterboxd: Vec<LetterboxdEntry>,
    pub uri_mapping: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A single catalog entry as shown in a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffMatch {
    pub title: String,
    pub year: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub imdb_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub imdb_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub letterboxd_uri: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub imdb_rating: i32,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub letterboxd_rating: f64,
}

/// An entry present on one side only, with same title+year candidates
/// from the other side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffItem {
    #[serde(flatten)]
    pub entry: DiffMatch,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fuzzy_matches: Vec<DiffMatch>,
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub imdb_only: usize,
    pub letterboxd_only: usize,
    pub resolved_title_year: usize,
    pub imdb_only_with_fuzzy: usize,
    pub letterboxd_only_with_fuzzy: usize,
}

impl DiffStats {
    /// Derive counts from the finished "only" lists.
    pub fn from_lists(
        imdb_only: &[DiffItem],
        letterboxd_only: &[DiffItem],
        resolved_title_year: usize,
    ) -> Self {
        let with_fuzzy =
            |items: &[DiffItem]| items.iter().filter(|i| !i.fuzzy_matches.is_empty()).count();
        Self {
            imdb_only: imdb_only.len(),
            letterboxd_only: letterboxd_only.len(),
            resolved_title_year,
            imdb_only_with_fuzzy: with_fuzzy(imdb_only),
            letterboxd_only_with_fuzzy: with_fuzzy(letterboxd_only),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub generated_at: String,
    pub imdb_entries: usize,
    pub letterboxd_entries: usize,
    /// Letterboxd entries that received an IMDb ID from the URI mapping.
    pub mapped_ids: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub meta: ReportMeta,
    pub stats: DiffStats,
    pub imdb_only: Vec<DiffItem>,
    pub letterboxd_only: Vec<DiffItem>,
}

impl DiffReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

pub const IMDB_TITLE_BASE: &str = "https://www.imdb.com/title/";

/// First non-blank of primary, fallback, identifier; "Untitled" otherwise.
pub fn display_title(primary: &str, fallback: &str, identifier: &str) -> String {
    let primary = primary.trim();
    if !primary.is_empty() {
        return primary.to_string();
    }
    let fallback = fallback.trim();
    if !fallback.is_empty() {
        return fallback.to_string();
    }
    if !identifier.is_empty() {
        return identifier.to_string();
    }
    "Untitled".to_string()
}

/// Existing URL wins; otherwise build one from the IMDb ID.
pub fn imdb_url(imdb_id: &str, existing: &str) -> String {
    if !existing.is_empty() {
        return existing.to_string();
    }
    if imdb_id.is_empty() {
        return String::new();
    }
    format!("{IMDB_TITLE_BASE}{imdb_id}/")
}

impl From<&ImdbEntry> for DiffMatch {
    fn from(e: &ImdbEntry) -> Self {
        Self {
            title: display_title(&e.title, &e.original_title, &e.imdb_id),
            year: e.year,
            imdb_id: e.imdb_id.clone(),
            imdb_url: imdb_url(&e.imdb_id, &e.url),
            letterboxd_uri: String::new(),
            imdb_rating: e.my_rating,
            letterboxd_rating: 0.0,
        }
    }
}

impl From<&LetterboxdEntry> for DiffMatch {
    fn from(e: &LetterboxdEntry) -> Self {
        Self {
            title: display_title(&e.name, "", &e.letterboxd_id),
            year: e.year,
            imdb_id: e.imdb_id.clone(),
            imdb_url: imdb_url(&e.imdb_id, ""),
            letterboxd_uri: e.letterboxd_uri.clone(),
            imdb_rating: 0,
            letterboxd_rating: e.rating,
        }
    }
}
