use std::cmp::Ordering;
use std::collections::HashSet;

use crate::index::CatalogIndex;
use crate::keys::{Identity, ItemKey};
use crate::model::{DiffItem, DiffMatch};

/// Build the "only on this side" list.
///
/// An entry is unmatched when its item key is absent from `matched` or it has
/// no item key at all. Suggestions come from the opposite side's raw bucket
/// under the entry's own title+year key. Because the title+year pass consumes
/// every key present on both sides, that bucket is non-empty only when none
/// of its entries could be keyed.
pub fn build_only_items<T, U>(
    entries: &[T],
    matched: &HashSet<ItemKey>,
    opposite: &CatalogIndex<'_, U>,
) -> Vec<DiffItem>
where
    T: Identity,
    U: Identity,
    for<'a> DiffMatch: From<&'a T> + From<&'a U>,
{
    let mut items: Vec<DiffItem> = entries
        .iter()
        .filter(|e| !e.item_key().is_some_and(|k| matched.contains(&k)))
        .map(|e| {
            let fuzzy_matches = match e.lookup_key() {
                Some(key) => build_suggestions(opposite.bucket(&key)),
                None => Vec::new(),
            };
            DiffItem {
                entry: DiffMatch::from(e),
                fuzzy_matches,
            }
        })
        .collect();

    sort_items(&mut items);
    items
}

/// Convert a bucket to suggestions, deduplicated by ID / URI / slug.
/// Candidates with none of those are all kept.
pub fn build_suggestions<U>(bucket: &[&U]) -> Vec<DiffMatch>
where
    U: Identity,
    for<'a> DiffMatch: From<&'a U>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(bucket.len());
    for &candidate in bucket {
        if let Some(key) = candidate.suggestion_key() {
            if !seen.insert(key) {
                continue;
            }
        }
        out.push(DiffMatch::from(candidate));
    }
    sort_matches(&mut out);
    out
}

/// Case-insensitive title, then year. Remaining fields break ties so that
/// only field-for-field identical entries compare equal.
pub fn compare_matches(a: &DiffMatch, b: &DiffMatch) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then(a.year.cmp(&b.year))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.imdb_id.cmp(&b.imdb_id))
        .then_with(|| a.letterboxd_uri.cmp(&b.letterboxd_uri))
        .then_with(|| a.imdb_url.cmp(&b.imdb_url))
        .then_with(|| a.imdb_rating.cmp(&b.imdb_rating))
        .then_with(|| a.letterboxd_rating.total_cmp(&b.letterboxd_rating))
}

pub fn sort_matches(matches: &mut [DiffMatch]) {
    matches.sort_by(compare_matches);
}

pub fn sort_items(items: &mut [DiffItem]) {
    items.sort_by(|a, b| compare_matches(&a.entry, &b.entry));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImdbEntry, LetterboxdEntry};

    fn imdb(id: &str, title: &str, year: i32) -> ImdbEntry {
        ImdbEntry {
            imdb_id: id.into(),
            title: title.into(),
            year,
            ..Default::default()
        }
    }

    fn lb(name: &str, year: i32, slug: &str, uri: &str) -> LetterboxdEntry {
        LetterboxdEntry {
            name: name.into(),
            year,
            letterboxd_id: slug.into(),
            letterboxd_uri: uri.into(),
            ..Default::default()
        }
    }

    #[test]
    fn unmatched_sorted_case_insensitive_then_year() {
        let entries = vec![
            imdb("tt3", "zodiac", 2007),
            imdb("tt2", "Alien", 1979),
            imdb("tt1", "alien", 1978),
            imdb("tt4", "Brazil", 1985),
        ];
        let opposite: Vec<LetterboxdEntry> = Vec::new();
        let idx = CatalogIndex::build(&opposite);
        let items = build_only_items(&entries, &HashSet::new(), &idx);
        let got: Vec<(&str, i32)> =
            items.iter().map(|i| (i.entry.title.as_str(), i.entry.year)).collect();
        assert_eq!(got, vec![("alien", 1978), ("Alien", 1979), ("Brazil", 1985), ("zodiac", 2007)]);
    }

    #[test]
    fn matched_entries_are_excluded() {
        let entries = vec![imdb("tt1", "Heat", 1995), imdb("tt2", "Ran", 1985)];
        let matched: HashSet<ItemKey> = [ItemKey::Imdb("tt1".into())].into_iter().collect();
        let opposite: Vec<LetterboxdEntry> = Vec::new();
        let items = build_only_items(&entries, &matched, &CatalogIndex::build(&opposite));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entry.imdb_id, "tt2");
    }

    #[test]
    fn keyless_entry_always_listed() {
        let entries = vec![imdb("", "", 0)];
        let opposite: Vec<LetterboxdEntry> = Vec::new();
        let items = build_only_items(&entries, &HashSet::new(), &CatalogIndex::build(&opposite));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entry.title, "Untitled");
        assert!(items[0].fuzzy_matches.is_empty());
    }

    #[test]
    fn suggestions_dedup_by_identifier_not_title() {
        let a = lb("Heat", 1995, "heat", "u1");
        let a_again = lb("Heat", 1995, "heat", "u1");
        let b = lb("Heat", 1995, "heat-1995", "u2");
        let bare = lb("Heat", 1995, "", "");
        let bare_again = lb("Heat", 1995, "", "");
        let out = build_suggestions(&[&a, &a_again, &b, &bare, &bare_again]);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn suggestions_pulled_from_keyless_opposite_bucket() {
        // Primary title normalizes to nothing, so the IMDb entry has no item
        // key, yet it is still filed under its original title.
        let left = vec![ImdbEntry {
            title: "?!".into(),
            original_title: "Heat".into(),
            year: 1995,
            ..Default::default()
        }];
        let right = vec![lb("Heat", 1995, "heat", "u1")];
        let left_idx = CatalogIndex::build(&left);

        let items = build_only_items(&right, &HashSet::new(), &left_idx);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].fuzzy_matches.len(), 1);
        assert_eq!(items[0].fuzzy_matches[0].title, "?!");
    }

    #[test]
    fn compare_is_total_for_distinct_entries() {
        let a = DiffMatch::from(&imdb("tt1", "Heat", 1995));
        let b = DiffMatch::from(&imdb("tt2", "Heat", 1995));
        assert_eq!(compare_matches(&a, &b), Ordering::Less);
        assert_eq!(compare_matches(&b, &a), Ordering::Greater);
        assert_eq!(compare_matches(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn entries_differing_only_by_rating_have_fixed_order() {
        let rated = |stars: f64| LetterboxdEntry { rating: stars, ..lb("Heat", 1995, "", "u1") };
        let high = DiffMatch::from(&rated(4.0));
        let low = DiffMatch::from(&rated(2.0));
        assert_eq!(compare_matches(&low, &high), Ordering::Less);

        let mut forward = vec![high.clone(), low.clone()];
        let mut backward = vec![low, high];
        sort_matches(&mut forward);
        sort_matches(&mut backward);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].letterboxd_rating, 2.0);

        let a = DiffMatch { imdb_rating: 9, ..DiffMatch::from(&imdb("tt1", "Heat", 1995)) };
        let b = DiffMatch { imdb_rating: 6, ..a.clone() };
        assert_eq!(compare_matches(&b, &a), Ordering::Less);
    }
}
