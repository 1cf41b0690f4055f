//! Pure string → canonical key functions shared by matching and grouping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static ET_AL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bet\.?\s*al\b").expect("Invalid et al regex pattern"));
static AUTHOR_SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+and\s+|\s*&\s*|;").expect("Invalid author split regex pattern"));
static PARTICLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}$", NAME_PARTICLE_PATTERN)).expect("Invalid name particle regex pattern")
});

/// Lowercase surname prefixes: "van der Berg", "de Souza".
pub const NAME_PARTICLE_PATTERN: &str = "(?:van|von|de|der|den|del|da|das|di|dos|du|la|le|ten|ter)";

const FILLER_TOKENS: &[&str] = &["and", "et", "al", "others"];

/// Normalized identity of a bibliographic work: first author surname and year.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceKey {
    pub author: String,
    pub year: i32,
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.author, self.year)
    }
}

/// Lowercase, strip diacritics, turn punctuation into spaces, collapse whitespace.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Drop everything from "et al." on.
pub fn strip_et_al(authors: &str) -> &str {
    match ET_AL_REGEX.find(authors) {
        Some(m) => &authors[..m.start()],
        None => authors,
    }
}

pub fn is_name_particle(word: &str) -> bool {
    PARTICLE_REGEX.is_match(word)
}

/// The first author of an author list: "Smith, J., Doe, A." gives "Smith".
pub fn first_author(authors: &str) -> &str {
    let first = AUTHOR_SPLIT_REGEX.split(authors).next().unwrap_or(authors);
    first.split(',').next().unwrap_or(first)
}

/// Folded author tokens for overlap tests. Initials, fillers and name
/// particles are dropped; "et al." collapses the list to the first author.
pub fn author_tokens(authors: &str) -> Vec<String> {
    let listed = match ET_AL_REGEX.find(authors) {
        Some(m) => first_author(&authors[..m.start()]),
        None => authors,
    };
    let folded = fold(listed);
    let words: Vec<&str> = folded.split_whitespace().collect();
    let mut tokens: Vec<String> = Vec::new();
    for (i, &token) in words.iter().enumerate() {
        if token.chars().count() < 2 || token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        // "van der berg" keeps "berg"; a bare "le" or "du" is a surname.
        let particle = is_name_particle(token)
            && words
                .get(i + 1)
                .is_some_and(|next| next.chars().count() > 1 && !FILLER_TOKENS.contains(next));
        if particle || FILLER_TOKENS.contains(&token) || tokens.iter().any(|t| t == token) {
            continue;
        }
        tokens.push(token.to_string());
    }
    tokens
}

/// Surname of the first author in an author string.
///
/// Handles "Smith, J.", "J. Smith", "Smith J", "van der Berg, A." and
/// "Smith et al.".
pub fn surname(authors: &str) -> Option<String> {
    let segment = first_author(strip_et_al(authors).trim());

    let words: Vec<&str> = segment.split_whitespace().collect();
    let name_words: Vec<&str> = words.iter().copied().filter(|w| !is_initials(w)).collect();
    let candidate = name_words.last().or(words.last())?;

    let folded = fold(candidate);
    let token = folded.split_whitespace().last()?;
    if token.chars().count() < 2 {
        return None;
    }
    Some(token.to_string())
}

// "J", "J.", "JA", "J.-P."
fn is_initials(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty() && letters.len() <= 3 && letters.iter().all(|c| c.is_uppercase())
        || word.ends_with('.') && letters.len() == 1
}

/// Key used to group references across papers.
pub fn reference_key(authors: &str, year: i32) -> Option<ReferenceKey> {
    Some(ReferenceKey {
        author: surname(authors)?,
        year,
    })
}

/// Up to three significant (longer than three letters) words of a title.
pub fn title_fragment(title: &str) -> Vec<String> {
    fold(title)
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(3)
        .map(|s| s.to_string())
        .collect()
}
