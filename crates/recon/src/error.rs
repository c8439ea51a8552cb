use std::fmt;

/// Errors raised around the engine: config parsing and CSV ingestion.
///
/// Matching itself is total and never produces one of these.
#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (blank file path, blank column override, etc.).
    ConfigValidation(String),
    /// Missing required column in an export's header row.
    MissingColumn { source: String, column: String },
    /// A year or rating cell that cannot be coerced to a number.
    FieldParse {
        source: String,
        row: usize,
        field: String,
        value: String,
    },
    /// IO / CSV reader error.
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source} export: missing column '{column}'")
            }
            Self::FieldParse { source, row, field, value } => {
                write!(f, "{source} export, row {row}: cannot parse {field} '{value}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<csv::Error> for ReconError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}
