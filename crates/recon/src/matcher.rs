use std::collections::HashSet;

use crate::index::{unique_by_item_key, CatalogIndex};
use crate::keys::{Identity, ItemKey};

/// Matched item keys per side, plus counters.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub matched_left: HashSet<ItemKey>,
    pub matched_right: HashSet<ItemKey>,
    /// Title+year groups where both sides had at least one keyed entry.
    pub resolved_title_year: usize,
    /// IDs present on both sides (informational).
    pub matched_by_id: usize,
}

impl MatchOutcome {
    pub fn is_left_matched<T: Identity>(&self, entry: &T) -> bool {
        entry.item_key().is_some_and(|k| self.matched_left.contains(&k))
    }

    pub fn is_right_matched<T: Identity>(&self, entry: &T) -> bool {
        entry.item_key().is_some_and(|k| self.matched_right.contains(&k))
    }
}

/// Run both matching passes: exact external ID, then title+year collision.
///
/// Every unique candidate in a colliding title+year bucket is accepted; there
/// is no best-match ranking. A bucket whose entries all lack an item key on
/// either side is skipped without credit.
pub fn resolve_matches<L, R>(left: &CatalogIndex<'_, L>, right: &CatalogIndex<'_, R>) -> MatchOutcome
where
    L: Identity,
    R: Identity,
{
    let mut out = MatchOutcome::default();

    // Pass 1: exact ID
    for (id, left_entry) in &left.by_id {
        let Some(right_entry) = right.by_id.get(*id) else {
            continue;
        };
        out.matched_by_id += 1;
        if let Some(k) = left_entry.item_key() {
            out.matched_left.insert(k);
        }
        if let Some(k) = right_entry.item_key() {
            out.matched_right.insert(k);
        }
    }

    // Pass 2: title + year. Buckets already touched by pass 1 are revisited on
    // purpose: one key can hold several distinct entries.
    for (key, left_bucket) in &left.by_title_year {
        let Some(right_bucket) = right.by_title_year.get(key) else {
            continue;
        };
        let left_unique = unique_by_item_key(left_bucket);
        let right_unique = unique_by_item_key(right_bucket);
        if left_unique.is_empty() || right_unique.is_empty() {
            log::debug!("title+year group {key} skipped: no keyed entries on one side");
            continue;
        }
        out.resolved_title_year += 1;
        out.matched_left.extend(left_unique.into_iter().map(|(k, _)| k));
        out.matched_right.extend(right_unique.into_iter().map(|(k, _)| k));
    }

    out
}
