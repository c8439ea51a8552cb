use std::collections::{BTreeMap, HashSet};

use crate::keys::{Identity, ItemKey, TitleYearKey};

/// Lookup tables for one catalog, borrowed from the caller's entries.
///
/// Title+year buckets keep input order and accumulate; one key may hold
/// several distinct entries (or the same entry twice via an alternate title).
#[derive(Debug)]
pub struct CatalogIndex<'a, T> {
    pub by_id: BTreeMap<&'a str, &'a T>,
    pub by_title_year: BTreeMap<TitleYearKey, Vec<&'a T>>,
}

impl<'a, T: Identity> CatalogIndex<'a, T> {
    pub fn build(entries: &'a [T]) -> Self {
        let mut by_id = BTreeMap::new();
        let mut by_title_year: BTreeMap<TitleYearKey, Vec<&'a T>> = BTreeMap::new();

        for entry in entries {
            if let Some(id) = entry.external_id() {
                by_id.entry(id).or_insert(entry);
            }
            for key in entry.index_keys() {
                by_title_year.entry(key).or_default().push(entry);
            }
        }

        Self { by_id, by_title_year }
    }

    /// Raw bucket for a key; empty when the key is absent.
    pub fn bucket(&self, key: &TitleYearKey) -> &[&'a T] {
        self.by_title_year.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Keep the first entry per item key, in order. Entries without an item
/// key are dropped from the reduced view.
pub fn unique_by_item_key<'a, T: Identity>(entries: &[&'a T]) -> Vec<(ItemKey, &'a T)> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(entries.len());
    for &entry in entries {
        let Some(key) = entry.item_key() else {
            continue;
        };
        if seen.insert(key.clone()) {
            unique.push((key, entry));
        }
    }
    unique
}
