use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A `.diff.toml` file: where the two exports live and where results go.
/// File paths are relative to the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiffConfig {
    pub name: String,
    pub imdb: ImdbSource,
    pub letterboxd: LetterboxdSource,
    #[serde(default)]
    pub mapping: Option<MappingSource>,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImdbSource {
    pub file: String,
    /// Title types to keep (case-insensitive). Empty keeps every row.
    #[serde(default = "default_title_types")]
    pub title_types: Vec<String>,
    /// Coerce unparsable year/rating cells to 0 instead of failing.
    #[serde(default)]
    pub skip_invalid: bool,
    #[serde(default)]
    pub columns: ImdbColumns,
}

fn default_title_types() -> Vec<String> {
    vec!["movie".into()]
}

impl ImdbSource {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title_types: default_title_types(),
            skip_invalid: false,
            columns: ImdbColumns::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImdbColumns {
    pub imdb_id: String,
    pub title: String,
    pub original_title: String,
    pub year: String,
    pub url: String,
    pub rating: String,
    pub title_type: String,
}

impl Default for ImdbColumns {
    fn default() -> Self {
        Self {
            imdb_id: "Const".into(),
            title: "Title".into(),
            original_title: "Original Title".into(),
            year: "Year".into(),
            url: "URL".into(),
            rating: "Your Rating".into(),
            title_type: "Title Type".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LetterboxdSource {
    pub file: String,
    #[serde(default)]
    pub skip_invalid: bool,
    #[serde(default)]
    pub columns: LetterboxdColumns,
}

impl LetterboxdSource {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            skip_invalid: false,
            columns: LetterboxdColumns::default(),
        }
    }
}

/// `imdb_id` is optional in the export; the other columns are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LetterboxdColumns {
    pub name: String,
    pub year: String,
    pub uri: String,
    pub rating: String,
    pub imdb_id: String,
}

impl Default for LetterboxdColumns {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            year: "Year".into(),
            uri: "Letterboxd URI".into(),
            rating: "Rating".into(),
            imdb_id: "IMDb ID".into(),
        }
    }
}

/// Pre-resolved `letterboxd_uri,imdb_id` CSV.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingSource {
    pub file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl DiffConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: DiffConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be blank".into()));
        }
        require_file("imdb", &self.imdb.file)?;
        require_file("letterboxd", &self.letterboxd.file)?;
        if let Some(ref mapping) = self.mapping {
            require_file("mapping", &mapping.file)?;
        }

        let c = &self.imdb.columns;
        for (field, value) in [
            ("imdb_id", &c.imdb_id),
            ("title", &c.title),
            ("original_title", &c.original_title),
            ("year", &c.year),
            ("url", &c.url),
            ("rating", &c.rating),
            ("title_type", &c.title_type),
        ] {
            require_column("imdb", field, value)?;
        }

        let c = &self.letterboxd.columns;
        for (field, value) in [
            ("name", &c.name),
            ("year", &c.year),
            ("uri", &c.uri),
            ("rating", &c.rating),
            ("imdb_id", &c.imdb_id),
        ] {
            require_column("letterboxd", field, value)?;
        }

        if self.imdb.title_types.iter().any(|t| t.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "imdb.title_types must not contain blank entries".into(),
            ));
        }

        Ok(())
    }
}

fn require_file(section: &str, file: &str) -> Result<(), ReconError> {
    if file.trim().is_empty() {
        return Err(ReconError::ConfigValidation(format!("{section}.file must not be blank")));
    }
    Ok(())
}

fn require_column(section: &str, field: &str, value: &str) -> Result<(), ReconError> {
    if value.trim().is_empty() {
        return Err(ReconError::ConfigValidation(format!(
            "{section}.columns.{field} must not be blank"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name = "Movies"

[imdb]
file = "ratings.csv"

[letterboxd]
file = "watched.csv"
"#;

    #[test]
    fn parse_minimal_uses_export_defaults() {
        let config = DiffConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.name, "Movies");
        assert_eq!(config.imdb.title_types, vec!["movie"]);
        assert!(!config.imdb.skip_invalid);
        assert_eq!(config.imdb.columns.imdb_id, "Const");
        assert_eq!(config.imdb.columns.rating, "Your Rating");
        assert_eq!(config.letterboxd.columns.uri, "Letterboxd URI");
        assert!(config.mapping.is_none());
        assert!(config.output.json.is_none());
    }

    #[test]
    fn parse_full() {
        let input = r#"
name = "Full"

[imdb]
file = "imdb.csv"
title_types = ["movie", "tvMovie"]
skip_invalid = true
[imdb.columns]
title = "Primary Title"

[letterboxd]
file = "diary.csv"
[letterboxd.columns]
name = "Film"

[mapping]
file = "mapping.csv"

[output]
json = "out/diff.json"
markdown = "out/diff.md"
"#;
        let config = DiffConfig::from_toml(input).unwrap();
        assert_eq!(config.imdb.title_types.len(), 2);
        assert!(config.imdb.skip_invalid);
        assert_eq!(config.imdb.columns.title, "Primary Title");
        assert_eq!(config.imdb.columns.year, "Year", "unset overrides keep defaults");
        assert_eq!(config.letterboxd.columns.name, "Film");
        assert_eq!(config.mapping.unwrap().file, "mapping.csv");
        assert_eq!(config.output.markdown.as_deref(), Some("out/diff.md"));
    }

    #[test]
    fn reject_missing_section() {
        let input = r#"
name = "Broken"
[imdb]
file = "ratings.csv"
"#;
        assert!(matches!(DiffConfig::from_toml(input), Err(ReconError::ConfigParse(_))));
    }

    #[test]
    fn reject_unknown_key() {
        let input = format!("{MINIMAL}\n[output]\nhtml = \"x.html\"\n");
        assert!(matches!(DiffConfig::from_toml(&input), Err(ReconError::ConfigParse(_))));
    }

    #[test]
    fn reject_blank_file() {
        let input = MINIMAL.replace("watched.csv", " ");
        let err = DiffConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("letterboxd.file"), "got: {err}");
    }

    #[test]
    fn reject_blank_column_override() {
        let input = format!("{MINIMAL}\n[letterboxd.columns]\nuri = \"\"\n");
        let err = DiffConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
        assert!(err.to_string().contains("letterboxd.columns.uri"));
    }

    #[test]
    fn reject_blank_name() {
        let input = MINIMAL.replace("\"Movies\"", "\"  \"");
        assert!(matches!(DiffConfig::from_toml(&input), Err(ReconError::ConfigValidation(_))));
    }
}
