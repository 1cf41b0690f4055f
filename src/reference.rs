//! Bibliography entries: parsing, key normalization, and citation matching.

pub mod matcher;
pub mod normalize;
pub mod parser;

pub use matcher::match_citations;
pub use normalize::{author_tokens, first_author, fold, is_name_particle, reference_key, surname, title_fragment, ReferenceKey};
pub use parser::{parse_references, split_entries};

use serde::{Deserialize, Serialize};

/// One parsed bibliography entry.
///
/// Fields the parser could not extract stay `None`; the entry is still kept
/// so totals count it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Position in the paper's reference list, 0-based.
    pub index: usize,
    /// Leading number when the block is numbered (`[3]`, `3.`).
    pub number: Option<u32>,
    pub raw_text: String,
    pub parsed_authors: Option<String>,
    pub parsed_year: Option<i32>,
    pub parsed_title: Option<String>,
    /// Citekey of the paper whose reference block this came from.
    pub source_paper: String,
}

impl Reference {
    /// Normalized (first author surname, year) key, if both are known.
    pub fn key(&self) -> Option<ReferenceKey> {
        reference_key(self.parsed_authors.as_deref()?, self.parsed_year?)
    }

    /// Author tokens with "et al." collapsed, for overlap matching.
    pub fn author_tokens(&self) -> Vec<String> {
        self.parsed_authors.as_deref().map(author_tokens).unwrap_or_default()
    }

    pub fn is_malformed(&self) -> bool {
        self.parsed_authors.is_none() || self.parsed_year.is_none()
    }
}
