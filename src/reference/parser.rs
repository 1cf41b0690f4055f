use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::reference::normalize::{is_name_particle, NAME_PARTICLE_PATTERN};
use crate::reference::Reference;

static NUMBERED_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\[(\d{1,3})\]|(\d{1,3})[.)])\s+").expect("Invalid numbered marker regex pattern")
});
static BULLET_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-•*–]\s+").expect("Invalid bullet marker regex pattern"));
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:references?|bibliography|works\s+cited|literature\s+cited)\s*:?\s*$")
        .expect("Invalid references heading regex pattern")
});
// "Surname, " or "van der Surname, " at line start: a new unnumbered entry.
static AUTHOR_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:{}\s+)*\p{{Lu}}[\p{{L}}'’-]+,\s", NAME_PARTICLE_PATTERN))
        .expect("Invalid author start regex pattern")
});
static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\b(1[5-9]\d{2}|20\d{2})[a-z]?\b\)?").expect("Invalid year regex pattern"));
static QUOTED_TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["“]([^"”]{3,})["”]"#).expect("Invalid quoted title regex pattern"));

/// One entry as split from the block: optional leading number and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub number: Option<u32>,
    pub text: String,
}

/// Split a reference block into entries.
///
/// Entries start at numbering (`[1]`, `1.`, `1)`) or bullet markers when the
/// block has any; otherwise at blank lines. A single unmarked paragraph falls
/// back to one entry per "Surname, ..." line.
pub fn split_entries(block: &str) -> Vec<RawEntry> {
    let lines: Vec<&str> = block
        .lines()
        .filter(|line| !HEADING_REGEX.is_match(line))
        .collect();

    let marked = lines
        .iter()
        .any(|l| NUMBERED_MARKER_REGEX.is_match(l) || BULLET_MARKER_REGEX.is_match(l));
    if marked {
        return split_on_markers(&lines);
    }

    let paragraphs = split_on_blank_lines(&lines);
    if paragraphs.len() == 1 && lines.iter().filter(|l| !l.trim().is_empty()).count() > 1 {
        return split_on_author_lines(&lines);
    }
    paragraphs
}

fn split_on_markers(lines: &[&str]) -> Vec<RawEntry> {
    let mut entries: Vec<RawEntry> = Vec::new();
    let mut current: Option<RawEntry> = None;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(caps) = NUMBERED_MARKER_REGEX.captures(line) {
            entries.extend(current.take());
            let number = caps
                .get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse().ok());
            let text = line[caps.get(0).map_or(0, |m| m.end())..].trim().to_string();
            current = Some(RawEntry { number, text });
        } else if let Some(m) = BULLET_MARKER_REGEX.find(line) {
            entries.extend(current.take());
            current = Some(RawEntry {
                number: None,
                text: line[m.end()..].trim().to_string(),
            });
        } else if let Some(entry) = current.as_mut() {
            append_line(&mut entry.text, trimmed);
        }
        // Lines before the first marker are preamble and ignored.
    }
    entries.extend(current);
    entries
}

fn split_on_blank_lines(lines: &[&str]) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut text = String::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !text.is_empty() {
                entries.push(RawEntry {
                    number: None,
                    text: std::mem::take(&mut text),
                });
            }
        } else {
            append_line(&mut text, trimmed);
        }
    }
    if !text.is_empty() {
        entries.push(RawEntry { number: None, text });
    }
    entries
}

fn split_on_author_lines(lines: &[&str]) -> Vec<RawEntry> {
    let mut entries: Vec<RawEntry> = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match entries.last_mut() {
            Some(entry) if !AUTHOR_START_REGEX.is_match(trimmed) => append_line(&mut entry.text, trimmed),
            _ => entries.push(RawEntry {
                number: None,
                text: trimmed.to_string(),
            }),
        }
    }
    entries
}

fn append_line(text: &mut String, line: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(line);
}

/// Parse a reference block into entries owned by `source_paper`.
pub fn parse_references(block: &str, source_paper: &str) -> Vec<Reference> {
    let references: Vec<Reference> = split_entries(block)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry, source_paper))
        .collect();
    debug!("Parsed {} references for {}", references.len(), source_paper);
    references
}

fn parse_entry(index: usize, entry: RawEntry, source_paper: &str) -> Reference {
    let text = entry.text;
    let year_match = YEAR_REGEX.captures(&text).and_then(|caps| {
        let whole = caps.get(0)?;
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        Some((whole.start(), whole.end(), year))
    });

    // Authors end at the year or at the first full stop, whichever comes first.
    let sentence_break = first_sentence_break(&text);
    let author_end = match (year_match, sentence_break) {
        (Some((start, _, _)), Some(brk)) => start.min(brk),
        (Some((start, _, _)), None) => start,
        (None, brk) => brk.unwrap_or(text.len()),
    };
    let parsed_authors = clean_fragment(&text[..author_end]).filter(|a| looks_like_authors(a));

    let parsed_title = QUOTED_TITLE_REGEX
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean_fragment(m.as_str()))
        .or_else(|| {
            // "Smith J, Doe A. Title. Journal. 2020" puts the title right after the authors.
            sentence_break
                .filter(|&brk| brk == author_end && parsed_authors.is_some())
                .and_then(|brk| capitalized_phrase(&text[brk + 1..]))
        })
        .or_else(|| {
            let (_, end, _) = year_match?;
            capitalized_phrase(&text[end..])
        });

    Reference {
        index,
        number: entry.number,
        raw_text: text.clone(),
        parsed_authors,
        parsed_year: year_match.map(|(_, _, year)| year),
        parsed_title,
        source_paper: source_paper.to_string(),
    }
}

/// The first non-particle word must be capitalised: "van der Berg, A." passes,
/// "see the supplementary notes" does not.
fn looks_like_authors(authors: &str) -> bool {
    authors
        .split_whitespace()
        .find(|w| !is_name_particle(w))
        .and_then(|w| w.chars().find(|c| c.is_alphabetic()))
        .is_some_and(char::is_uppercase)
}

/// Byte index of the first ". " that ends a sentence rather than an initial.
///
/// "Smith, J. A." and "J. Smith" hold initials. In "Smith J, Doe A. Title"
/// the bare "A" follows a surname, so its period closes the author list.
fn first_sentence_break(text: &str) -> Option<usize> {
    text.match_indices(". ")
        .map(|(idx, _)| idx)
        .find(|&idx| !ends_with_initial(&text[..idx]))
}

fn ends_with_initial(before: &str) -> bool {
    let mut chars = before.chars();
    let Some(letter) = chars.next_back() else {
        return false;
    };
    if !letter.is_alphabetic() {
        return false;
    }
    let head = chars.as_str();
    match head.chars().next_back() {
        None => true,
        Some(c) if c.is_alphabetic() => false,
        Some(c) if c.is_whitespace() => {
            let head = head.trim_end();
            match head.chars().next_back() {
                None | Some(',') | Some('&') => true,
                Some('.') => ends_with_initial(&head[..head.len() - 1]),
                _ => head.ends_with(" and"),
            }
        }
        // "J.-P." or "J.A."
        Some(_) => true,
    }
}

/// The leading sentence of `rest`, if it reads as a capitalised phrase.
fn capitalized_phrase(rest: &str) -> Option<String> {
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || ".,;:)]".contains(c));
    let end = first_sentence_break(rest)
        .or_else(|| rest.find(". "))
        .unwrap_or(rest.len());
    let phrase = clean_fragment(&rest[..end])?;
    if phrase.chars().next().is_some_and(char::is_uppercase) && phrase.chars().count() >= 3 {
        Some(phrase)
    } else {
        None
    }
}

fn clean_fragment(fragment: &str) -> Option<String> {
    let cleaned = fragment
        .trim()
        .trim_matches(|c: char| c.is_whitespace() || ",.;:([".contains(c))
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
