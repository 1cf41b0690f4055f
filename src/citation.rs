//! In-text citations: detection, context, and purpose.

pub mod context;
pub mod detector;
pub mod purpose;

pub use context::{detect_sections, extract_context, SectionHeading};
pub use detector::detect_citations;
pub use purpose::{classify_purpose, PurposeRule, PURPOSE_RULES, SUPPORTING_PHRASES};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Surface format of an in-text citation, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    NumericRange,
    NumericList,
    Numeric,
    AuthorYear,
}

impl FormatKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, FormatKind::AuthorYear)
    }
}

/// Rhetorical purpose of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    SupportingEvidence,
    ContrastingView,
    MethodologySource,
    BackgroundContext,
    Comparison,
    GeneralReference,
}

impl Purpose {
    pub const ALL: [Purpose; 6] = [
        Purpose::SupportingEvidence,
        Purpose::ContrastingView,
        Purpose::MethodologySource,
        Purpose::BackgroundContext,
        Purpose::Comparison,
        Purpose::GeneralReference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::SupportingEvidence => "supporting_evidence",
            Purpose::ContrastingView => "contrasting_view",
            Purpose::MethodologySource => "methodology_source",
            Purpose::BackgroundContext => "background_context",
            Purpose::Comparison => "comparison",
            Purpose::GeneralReference => "general_reference",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document section a citation falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    Unknown,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::Methods => "methods",
            Section::Results => "results",
            Section::Discussion => "discussion",
            Section::Conclusion => "conclusion",
            Section::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-text citation occurrence.
///
/// Created by the detector with the span fields set; context, section,
/// purpose and the matched references are filled in by later stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub raw_match: String,
    pub format_kind: FormatKind,
    /// Byte offset of the match in the paper's raw text.
    pub offset: usize,
    /// Exclusive end of the match.
    pub end: usize,
    /// Reference numbers named by a numeric citation, ranges expanded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cited_numbers: Vec<u32>,
    pub context_window: String,
    pub section: Section,
    pub purpose: Purpose,
    /// Index into the paper's reference list of the primary match.
    pub matched_reference: Option<usize>,
    /// Every resolved reference, primary first.
    #[serde(default)]
    pub matched_references: Vec<usize>,
    /// Set when more than one reference tied and the first one was taken.
    #[serde(default)]
    pub ambiguous: bool,
}

impl Citation {
    pub fn new(raw_match: impl Into<String>, format_kind: FormatKind, offset: usize, end: usize) -> Self {
        Self {
            raw_match: raw_match.into(),
            format_kind,
            offset,
            end,
            cited_numbers: Vec::new(),
            context_window: String::new(),
            section: Section::Unknown,
            purpose: Purpose::GeneralReference,
            matched_reference: None,
            matched_references: Vec::new(),
            ambiguous: false,
        }
    }

    pub fn with_numbers(mut self, numbers: Vec<u32>) -> Self {
        self.cited_numbers = numbers;
        self
    }

    pub fn is_matched(&self) -> bool {
        self.matched_reference.is_some()
    }

    /// Record the resolved references; the first becomes the primary match.
    pub fn set_matches(&mut self, references: Vec<usize>) {
        let mut unique: Vec<usize> = Vec::with_capacity(references.len());
        for idx in references {
            if !unique.contains(&idx) {
                unique.push(idx);
            }
        }
        self.matched_reference = unique.first().copied();
        self.matched_references = unique;
    }
}
