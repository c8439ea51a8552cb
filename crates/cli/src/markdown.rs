//! Markdown checklist report for `reeldiff run --markdown`.

use std::fmt::Write as _;

use chrono::NaiveDate;
use reeldiff_recon::rating::{to_half_step_scale, to_ten_scale};
use reeldiff_recon::{DiffItem, DiffMatch, DiffReport};

const TITLE: &str = "IMDb vs Letterboxd Diff";
const TAGS: [&str; 3] = ["diff/imdb-letterboxd", "movies", "report"];

/// Paths shown in the report header, as given in the config.
pub struct ReportSources<'a> {
    pub imdb: &'a str,
    pub letterboxd: &'a str,
    pub mapping: Option<&'a str>,
}

pub fn render(report: &DiffReport, sources: &ReportSources<'_>, date: NaiveDate) -> String {
    let mut out = String::new();
    let stats = &report.stats;
    let date = date.format("%Y-%m-%d");

    // Frontmatter
    out.push_str("---\n");
    let _ = writeln!(out, "title: {TITLE}");
    let _ = writeln!(out, "date: {date}");
    let _ = writeln!(out, "imdb_only: {}", stats.imdb_only);
    let _ = writeln!(out, "letterboxd_only: {}", stats.letterboxd_only);
    let _ = writeln!(out, "resolved_title_year: {}", stats.resolved_title_year);
    let _ = writeln!(out, "imdb_only_with_fuzzy: {}", stats.imdb_only_with_fuzzy);
    let _ = writeln!(out, "letterboxd_only_with_fuzzy: {}", stats.letterboxd_only_with_fuzzy);
    out.push_str("tags:\n");
    for tag in TAGS {
        let _ = writeln!(out, "  - {tag}");
    }
    out.push_str("---\n\n");

    let _ = writeln!(out, "# {TITLE} ({date})\n");
    out.push_str("This report compares an IMDb ratings export with a Letterboxd export.\n\n");
    let _ = writeln!(out, "- IMDb export: `{}`", sources.imdb);
    let _ = writeln!(out, "- Letterboxd export: `{}`", sources.letterboxd);
    if let Some(mapping) = sources.mapping {
        let _ = writeln!(out, "- URI mapping: `{mapping}`");
    }
    out.push_str("- Matching: IMDb ID, then auto-resolved title+year, then title+year suggestions\n");
    let _ = writeln!(out, "- Auto-resolved title+year matches: {}\n", stats.resolved_title_year);

    write_section(&mut out, "IMDb-only (missing from Letterboxd)", &report.imdb_only);
    write_section(&mut out, "Letterboxd-only (missing from IMDb)", &report.letterboxd_only);

    out
}

fn write_section(out: &mut String, heading: &str, items: &[DiffItem]) {
    let _ = writeln!(out, "## {heading}\n");
    if items.is_empty() {
        out.push_str("_None found._\n\n");
        return;
    }
    for item in items {
        let _ = writeln!(out, "- [ ] {}", format_line(&item.entry));
        if !item.fuzzy_matches.is_empty() {
            out.push_str("  - Possible matches (title + year):\n");
            for m in &item.fuzzy_matches {
                let _ = writeln!(out, "    - {}", format_line(m));
            }
        }
    }
    out.push('\n');
}

fn format_line(m: &DiffMatch) -> String {
    let mut parts = vec![if m.year > 0 {
        format!("{} ({})", m.title, m.year)
    } else {
        m.title.clone()
    }];
    if !m.imdb_id.is_empty() {
        parts.push(format!("IMDb {}", m.imdb_id));
    }
    if !m.imdb_url.is_empty() {
        parts.push(m.imdb_url.clone());
    }
    if !m.letterboxd_uri.is_empty() {
        parts.push(m.letterboxd_uri.clone());
    }
    if m.imdb_rating > 0 {
        parts.push(format!(
            "IMDb rating {}/10 (~{:.1}/5)",
            m.imdb_rating,
            to_half_step_scale(m.imdb_rating)
        ));
    }
    // Values above 5 are site-wide averages from enrichment, not the user's stars.
    if has_user_stars(m.letterboxd_rating) {
        parts.push(format!(
            "Letterboxd rating {:.1}/5 (~{}/10)",
            m.letterboxd_rating,
            to_ten_scale(m.letterboxd_rating)
        ));
    }
    parts.join(" — ")
}

fn has_user_stars(rating: f64) -> bool {
    rating > 0.0 && rating <= 5.0
}
