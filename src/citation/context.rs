use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::citation::{Citation, Section};

// Optional "2." / "2.1" / "IV." numbering, then the heading word.
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:\d+(?:\.\d+)*|[ivx]+)\.?\s+)?([a-z][a-z ]*)")
        .expect("Invalid section heading regex pattern")
});

const MAX_HEADING_LEN: usize = 60;
const MAX_HEADING_WORDS: usize = 5;
/// Lowercase words allowed after the heading word ("Results and Discussion").
const HEADING_CONNECTORS: &[&str] = &["and", "of", "for", "in", "on", "the", "&"];

/// Ordered heading table; the first prefix that matches names the section.
const SECTION_RULES: &[(&str, Section)] = &[
    ("introduction", Section::Introduction),
    ("background", Section::Introduction),
    ("materials and methods", Section::Methods),
    ("methodology", Section::Methods),
    ("methods", Section::Methods),
    ("method", Section::Methods),
    ("experimental", Section::Methods),
    ("results", Section::Results),
    ("result", Section::Results),
    ("findings", Section::Results),
    ("discussion", Section::Discussion),
    ("conclusions", Section::Conclusion),
    ("conclusion", Section::Conclusion),
    ("concluding remarks", Section::Conclusion),
];

/// A recognised heading line and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub offset: usize,
    pub section: Section,
}

/// Scan `text` line by line for headings from the controlled vocabulary.
pub fn detect_sections(text: &str) -> Vec<SectionHeading> {
    let mut headings = Vec::new();
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        if let Some(section) = classify_heading(line) {
            headings.push(SectionHeading {
                offset: line_start,
                section,
            });
        }
        line_start += line.len();
    }
    headings
}

fn classify_heading(line: &str) -> Option<Section> {
    let line = line.trim();
    if line.is_empty() || line.len() > MAX_HEADING_LEN {
        return None;
    }
    if line.ends_with(['.', ',', ';', ':']) || line.split_whitespace().count() > MAX_HEADING_WORDS {
        return None;
    }
    // Headings are capitalised; wrapped body lines usually are not.
    if !line
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_uppercase)
    {
        return None;
    }
    let caps = HEADING_REGEX.captures(line)?;
    let word_match = caps.get(1)?;
    let words = word_match.as_str().to_ascii_lowercase();
    // The heading word must end at a word boundary.
    let (prefix, section) = SECTION_RULES.iter().find(|(prefix, _)| {
        words
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    })?;
    // Anything after it reads as title case: "Results from prior trials" is prose.
    let qualifier = line.get(word_match.start() + prefix.len()..).unwrap_or("");
    let title_case = qualifier.split_whitespace().all(|word| {
        HEADING_CONNECTORS.contains(&word)
            || word
                .chars()
                .find(|c| c.is_alphabetic())
                .map_or(true, char::is_uppercase)
    });
    title_case.then_some(*section)
}

/// Section whose heading most closely precedes `offset`.
pub fn section_at(headings: &[SectionHeading], offset: usize) -> Section {
    headings
        .iter()
        .take_while(|h| h.offset <= offset)
        .last()
        .map(|h| h.section)
        .unwrap_or(Section::Unknown)
}

/// Fill `context_window` and `section` on a detected citation.
pub fn extract_context(citation: &mut Citation, text: &str, headings: &[SectionHeading], width: usize) {
    let half = width / 2;
    let mut start = citation.offset.saturating_sub(half);
    let mut end = (citation.offset + half).min(text.len());
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    citation.context_window = text[start..end].to_string();
    citation.section = section_at(headings, citation.offset);
}
