use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors. Only the outer surfaces (config loading, input decoding,
/// pool construction) produce these; analysis itself never aborts.
#[derive(Error, Debug)]
pub enum CiteMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No papers provided")]
    NoPapersProvided,

    #[error("Invalid paper '{citekey}': {reason}")]
    InvalidPaper { citekey: String, reason: String },

    #[error("Duplicate citekey in batch: {0}")]
    DuplicateCitekey(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Which input field was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    RawText,
    ReferenceBlock,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::RawText => write!(f, "raw_text"),
            InputField::ReferenceBlock => write!(f, "reference_block"),
        }
    }
}

/// Non-fatal conditions collected alongside a result.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("{citekey}: reference #{reference_index} has no usable author/year")]
    MalformedReferenceEntry {
        citekey: String,
        reference_index: usize,
        raw_text: String,
    },

    #[error("{citekey}: citation '{raw_match}' matches {} references, using the first", .candidates.len())]
    AmbiguousMatch {
        citekey: String,
        citation_index: usize,
        raw_match: String,
        candidates: Vec<usize>,
    },

    #[error("{citekey}: {field} is empty")]
    EmptyInput { citekey: String, field: InputField },

    #[error("{citekey}: no publication year, excluded from lineage")]
    UnorderablePaper { citekey: String },

    #[error("{citekey}: analysis failed: {reason}")]
    PaperFailed { citekey: String, reason: String },
}

impl Diagnostic {
    pub fn citekey(&self) -> &str {
        match self {
            Diagnostic::MalformedReferenceEntry { citekey, .. }
            | Diagnostic::AmbiguousMatch { citekey, .. }
            | Diagnostic::EmptyInput { citekey, .. }
            | Diagnostic::UnorderablePaper { citekey }
            | Diagnostic::PaperFailed { citekey, .. } => citekey,
        }
    }
}
