//! CSV ingestion for the two exports and the URI mapping.
//!
//! Cells are trimmed. Blank years and ratings become 0 ("unknown"); cells
//! that do not parse fail the load unless the source sets `skip_invalid`.

use std::collections::HashMap;

use csv::StringRecord;

use crate::config::{ImdbSource, LetterboxdSource};
use crate::error::ReconError;
use crate::model::{ImdbEntry, LetterboxdEntry};

const IMDB: &str = "imdb";
const LETTERBOXD: &str = "letterboxd";
const MAPPING: &str = "mapping";

fn open_reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes())
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, ReconError> {
    let headers = reader.headers()?;
    Ok(headers.iter().map(|h| h.trim_start_matches('\u{feff}').to_string()).collect())
}

fn column(headers: &[String], source: &str, name: &str) -> Result<usize, ReconError> {
    headers.iter().position(|h| h == name).ok_or_else(|| ReconError::MissingColumn {
        source: source.into(),
        column: name.into(),
    })
}

fn cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

/// Parse a numeric cell. Blank is 0; garbage is an error or, with
/// `skip_invalid`, a logged 0.
fn parse_number<T>(
    raw: &str,
    source: &str,
    row: usize,
    field: &str,
    skip_invalid: bool,
) -> Result<T, ReconError>
where
    T: std::str::FromStr + Default,
{
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Ok(T::default());
    }
    match raw.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) if skip_invalid => {
            log::warn!("{source} row {row}: invalid {field} '{raw}', treating as unknown");
            Ok(T::default())
        }
        Err(_) => Err(ReconError::FieldParse {
            source: source.into(),
            row,
            field: field.into(),
            value: raw.into(),
        }),
    }
}

/// Load an IMDb ratings export, keeping only the configured title types.
pub fn load_imdb_csv(csv_data: &str, source: &ImdbSource) -> Result<Vec<ImdbEntry>, ReconError> {
    let mut reader = open_reader(csv_data);
    let headers = read_headers(&mut reader)?;
    let col = &source.columns;
    let skip = source.skip_invalid;

    let id_idx = column(&headers, IMDB, &col.imdb_id)?;
    let title_idx = column(&headers, IMDB, &col.title)?;
    let year_idx = column(&headers, IMDB, &col.year)?;
    // Older exports lack these; treat as blank.
    let original_idx = headers.iter().position(|h| *h == col.original_title);
    let url_idx = headers.iter().position(|h| *h == col.url);
    let rating_idx = headers.iter().position(|h| *h == col.rating);
    let type_idx = if source.title_types.is_empty() {
        None
    } else {
        Some(column(&headers, IMDB, &col.title_type)?)
    };

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 2;

        if type_idx.is_some() {
            let kind = cell(&record, type_idx);
            if !source.title_types.iter().any(|t| t.eq_ignore_ascii_case(kind)) {
                skipped += 1;
                continue;
            }
        }

        entries.push(ImdbEntry {
            imdb_id: cell(&record, Some(id_idx)).to_string(),
            title: cell(&record, Some(title_idx)).to_string(),
            original_title: cell(&record, original_idx).to_string(),
            year: parse_number(cell(&record, Some(year_idx)), IMDB, row, "year", skip)?,
            url: cell(&record, url_idx).to_string(),
            my_rating: parse_number(cell(&record, rating_idx), IMDB, row, "rating", skip)?,
        });
    }

    log::info!("loaded {} IMDb entries ({skipped} skipped by title type)", entries.len());
    Ok(entries)
}

/// Last non-empty path segment of a Letterboxd URI.
pub fn slug_from_uri(uri: &str) -> &str {
    uri.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Load a Letterboxd watched / diary / ratings export.
pub fn load_letterboxd_csv(
    csv_data: &str,
    source: &LetterboxdSource,
) -> Result<Vec<LetterboxdEntry>, ReconError> {
    let mut reader = open_reader(csv_data);
    let headers = read_headers(&mut reader)?;
    let col = &source.columns;
    let skip = source.skip_invalid;

    let name_idx = column(&headers, LETTERBOXD, &col.name)?;
    let year_idx = column(&headers, LETTERBOXD, &col.year)?;
    let uri_idx = column(&headers, LETTERBOXD, &col.uri)?;
    let rating_idx = headers.iter().position(|h| *h == col.rating);
    let imdb_idx = headers.iter().position(|h| *h == col.imdb_id);

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 2;
        let uri = cell(&record, Some(uri_idx));

        entries.push(LetterboxdEntry {
            name: cell(&record, Some(name_idx)).to_string(),
            year: parse_number(cell(&record, Some(year_idx)), LETTERBOXD, row, "year", skip)?,
            letterboxd_id: slug_from_uri(uri).to_string(),
            letterboxd_uri: uri.to_string(),
            imdb_id: cell(&record, imdb_idx).to_string(),
            rating: parse_number(cell(&record, rating_idx), LETTERBOXD, row, "rating", skip)?,
        });
    }

    log::info!("loaded {} Letterboxd entries", entries.len());
    Ok(entries)
}

/// Load a `letterboxd_uri,imdb_id` mapping. Rows with a blank side are
/// ignored; later rows win on duplicate URIs.
pub fn load_uri_mapping_csv(csv_data: &str) -> Result<HashMap<String, String>, ReconError> {
    let mut reader = open_reader(csv_data);
    let headers = read_headers(&mut reader)?;
    let uri_idx = column(&headers, MAPPING, "letterboxd_uri")?;
    let id_idx = column(&headers, MAPPING, "imdb_id")?;

    let mut mapping = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let uri = cell(&record, Some(uri_idx));
        let imdb_id = cell(&record, Some(id_idx));
        if uri.is_empty() || imdb_id.is_empty() {
            continue;
        }
        mapping.insert(uri.to_string(), imdb_id.to_string());
    }

    log::info!("loaded {} Letterboxd URI mappings", mapping.len());
    Ok(mapping)
}
