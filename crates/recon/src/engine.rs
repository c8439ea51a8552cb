use chrono::{DateTime, Utc};

use crate::index::CatalogIndex;
use crate::matcher::resolve_matches;
use crate::model::{DiffInput, DiffItem, DiffReport, DiffStats, ImdbEntry, LetterboxdEntry, ReportMeta};
use crate::overlay::apply_uri_mapping;
use crate::unmatched::build_only_items;

/// Result of diffing two catalogs, before report metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDiff {
    pub imdb_only: Vec<DiffItem>,
    pub letterboxd_only: Vec<DiffItem>,
    pub resolved_title_year: usize,
}

/// Diff two fully loaded catalogs. Pure: no IO, inputs untouched.
pub fn diff_catalogs(imdb: &[ImdbEntry], letterboxd: &[LetterboxdEntry]) -> CatalogDiff {
    let imdb_index = CatalogIndex::build(imdb);
    let letterboxd_index = CatalogIndex::build(letterboxd);

    let outcome = resolve_matches(&imdb_index, &letterboxd_index);
    log::debug!(
        "matched {} by IMDb ID, {} title+year groups",
        outcome.matched_by_id,
        outcome.resolved_title_year
    );

    CatalogDiff {
        imdb_only: build_only_items(imdb, &outcome.matched_left, &letterboxd_index),
        letterboxd_only: build_only_items(letterboxd, &outcome.matched_right, &imdb_index),
        resolved_title_year: outcome.resolved_title_year,
    }
}

/// Apply the URI mapping, diff, and derive stats.
pub fn run(input: DiffInput) -> DiffReport {
    run_at(input, Utc::now())
}

/// As [`run`], with an explicit generation timestamp.
pub fn run_at(input: DiffInput, now: DateTime<Utc>) -> DiffReport {
    let DiffInput {
        imdb,
        mut letterboxd,
        uri_mapping,
    } = input;

    let mapped_ids = apply_uri_mapping(&mut letterboxd, &uri_mapping);
    if mapped_ids > 0 {
        log::info!("backfilled {mapped_ids} IMDb IDs from the URI mapping");
    }

    let diff = diff_catalogs(&imdb, &letterboxd);
    let stats = DiffStats::from_lists(&diff.imdb_only, &diff.letterboxd_only, diff.resolved_title_year);

    log::info!(
        "diff summary: imdb_only={} letterboxd_only={} resolved_title_year={}",
        stats.imdb_only,
        stats.letterboxd_only,
        stats.resolved_title_year
    );

    DiffReport {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: now.to_rfc3339(),
            imdb_entries: imdb.len(),
            letterboxd_entries: letterboxd.len(),
            mapped_ids,
        },
        stats,
        imdb_only: diff.imdb_only,
        letterboxd_only: diff.letterboxd_only,
    }
}
