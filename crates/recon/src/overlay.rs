use std::collections::HashMap;

use crate::model::LetterboxdEntry;

/// Backfill IMDb IDs onto Letterboxd entries from a `uri -> imdb_id` map.
///
/// Only entries with a blank IMDb ID and a non-blank URI are touched; an
/// existing ID is never overwritten. Returns how many entries were filled.
pub fn apply_uri_mapping(
    entries: &mut [LetterboxdEntry],
    mapping: &HashMap<String, String>,
) -> usize {
    if mapping.is_empty() {
        return 0;
    }
    let mut applied = 0;
    for entry in entries.iter_mut() {
        if !entry.imdb_id.trim().is_empty() || entry.letterboxd_uri.trim().is_empty() {
            continue;
        }
        if let Some(imdb_id) = mapping.get(&entry.letterboxd_uri) {
            if imdb_id.trim().is_empty() {
                continue;
            }
            entry.imdb_id = imdb_id.clone();
            applied += 1;
        }
    }
    applied
}
