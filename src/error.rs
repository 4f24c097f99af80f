//! Error type shared by the loaders and configuration.
//!
//! Only load-time and configuration problems are errors. Processing a request
//! never fails: unmatched or empty input simply yields no results.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn {
        source_name: &'static str,
        column: &'static str,
    },

    #[error("{source_name}: invalid symptom identifier '{value}' on row {row}")]
    InvalidIdentifier {
        source_name: &'static str,
        row: usize,
        value: String,
    },

    #[error("lexicon: invalid frequency on line {line}: {content}")]
    InvalidFrequency { line: usize, content: String },

    #[error("catalog is empty after joining symptoms with tips")]
    EmptyCatalog,

    #[error("lexicon is empty")]
    EmptyLexicon,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
