//! `reeldiff-recon`: IMDb vs Letterboxd catalog reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded entries, returns the entries missing
//! from each side. CSV loading lives in [`load`] for callers that want it.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod keys;
pub mod load;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod overlay;
pub mod rating;
pub mod unmatched;

pub use config::DiffConfig;
pub use engine::{diff_catalogs, run};
pub use error::ReconError;
pub use model::{DiffInput, DiffItem, DiffMatch, DiffReport, DiffStats, ImdbEntry, LetterboxdEntry};
