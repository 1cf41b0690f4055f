use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::citation::{Citation, FormatKind};
use crate::config::AnalysisConfig;
use crate::reference::normalize::NAME_PARTICLE_PATTERN;

const YEAR: &str = r"(1[5-9]\d{2}|20\d{2})[a-z]?";

// A capitalised surname, possibly behind lowercase particles ("van der Berg").
static SURNAME: Lazy<String> =
    Lazy::new(|| format!(r"\b(?:{}\s+)*\p{{Lu}}[\p{{L}}'’-]+", NAME_PARTICLE_PATTERN));
// One or more surnames joined by commas / "and" / "&", optionally "et al."
static NAME: Lazy<String> = Lazy::new(|| {
    format!(
        r"{s}(?:(?:,\s+|,?\s+and\s+|\s*&\s*){s})*(?:,?\s+et\s+al\.?)?",
        s = SURNAME.as_str()
    )
});

static NUMERIC_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*(\d{1,3})\s*[-–—]\s*(\d{1,3})\s*\]").expect("Invalid numeric range regex pattern")
});
static NUMERIC_LIST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*\d{1,3}(?:\s*[-–—]\s*\d{1,3})?(?:\s*,\s*\d{1,3}(?:\s*[-–—]\s*\d{1,3})?)+\s*\]")
        .expect("Invalid numeric list regex pattern")
});
static NUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(\d{1,3})\s*\]").expect("Invalid numeric regex pattern"));
static NUMBER_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,3})(?:\s*[-–—]\s*(\d{1,3}))?").expect("Invalid number item regex pattern")
});
// Smith (2020), Smith et al. (2019), Smith (2020, p. 5), Smith (2019, 2020)
static NARRATIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"({name})\s*\({y}(?:\s*[,;]\s*{y})*(?:,[^();]*)?\)",
        name = NAME.as_str(),
        y = YEAR
    ))
    .expect("Invalid narrative citation regex pattern")
});
// (Smith 2020; Jones et al., 2019)
static PARENTHETICAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]{4,300})\)").expect("Invalid parenthetical regex pattern"));
static AUTHOR_YEAR_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({name}),?\s+{y}(?:\s*,\s*{y})*", name = NAME.as_str(), y = YEAR))
        .expect("Invalid author-year item regex pattern")
});
static NAME_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Lu}[\p{L}'’-]+").expect("Invalid name word regex pattern"));
static PARTICLE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{}\s+)+$", NAME_PARTICLE_PATTERN)).expect("Invalid particle run regex pattern")
});

/// Capitalised words that precede a year without naming an author.
const NON_AUTHOR_WORDS: &[&str] = &[
    "also", "appendix", "chapter", "eq", "equation", "experiment", "fig", "figure", "finally",
    "furthermore", "however", "in", "indeed", "moreover", "notably", "phase", "recently", "section",
    "see", "similarly", "since", "step", "study", "supplementary", "table", "the", "therefore", "thus",
    "until", "version", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december", "spring", "summer", "autumn", "fall", "winter",
];

/// Find every citation in `text`, left to right.
///
/// Format classes are scanned in priority order (range, list, single number,
/// author-year); a span taken by a higher class is invisible to the lower ones,
/// so no two citations overlap. Bracket expressions that do not parse into a
/// sensible set of reference numbers are dropped.
pub fn detect_citations(text: &str, config: &AnalysisConfig) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::new();
    let mut consumed: Vec<(usize, usize)> = Vec::new();

    for m in NUMERIC_RANGE_REGEX.find_iter(text) {
        if overlaps(&consumed, m.start(), m.end()) {
            continue;
        }
        match parse_numbers(m.as_str(), config.max_numeric_range) {
            Some(numbers) => push(&mut citations, &mut consumed, m, FormatKind::NumericRange, numbers),
            None => debug!("Dropping unparseable range {:?} at {}", m.as_str(), m.start()),
        }
    }

    for m in NUMERIC_LIST_REGEX.find_iter(text) {
        if overlaps(&consumed, m.start(), m.end()) {
            continue;
        }
        match parse_numbers(m.as_str(), config.max_numeric_range) {
            Some(numbers) => push(&mut citations, &mut consumed, m, FormatKind::NumericList, numbers),
            None => debug!("Dropping unparseable list {:?} at {}", m.as_str(), m.start()),
        }
    }

    for m in NUMERIC_REGEX.find_iter(text) {
        if overlaps(&consumed, m.start(), m.end()) {
            continue;
        }
        match parse_numbers(m.as_str(), config.max_numeric_range) {
            Some(numbers) => push(&mut citations, &mut consumed, m, FormatKind::Numeric, numbers),
            None => debug!("Dropping bracket {:?} at {}", m.as_str(), m.start()),
        }
    }

    for caps in NARRATIVE_REGEX.captures_iter(text) {
        let (Some(m), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(skip) = author_start(name.as_str()) else {
            continue;
        };
        let start = m.start() + skip;
        if overlaps(&consumed, start, m.end()) {
            continue;
        }
        consumed.push((start, m.end()));
        citations.push(Citation::new(&text[start..m.end()], FormatKind::AuthorYear, start, m.end()));
    }

    for caps in PARENTHETICAL_REGEX.captures_iter(text) {
        let Some(inner) = caps.get(1) else {
            continue;
        };
        // Each ';'-separated part may carry its own author-year item.
        let mut part_start = inner.start();
        for part in inner.as_str().split(';') {
            for item in AUTHOR_YEAR_ITEM_REGEX.captures_iter(part) {
                let (Some(m), Some(name)) = (item.get(0), item.get(1)) else {
                    continue;
                };
                let Some(skip) = author_start(name.as_str()) else {
                    continue;
                };
                let start = part_start + m.start() + skip;
                let end = part_start + m.end();
                if overlaps(&consumed, start, end) {
                    continue;
                }
                consumed.push((start, end));
                citations.push(Citation::new(&text[start..end], FormatKind::AuthorYear, start, end));
            }
            part_start += part.len() + 1;
        }
    }

    citations.sort_by_key(|c| c.offset);
    debug!("Detected {} citations", citations.len());
    citations
}

fn push(
    citations: &mut Vec<Citation>,
    consumed: &mut Vec<(usize, usize)>,
    m: regex::Match<'_>,
    kind: FormatKind,
    numbers: Vec<u32>,
) {
    consumed.push((m.start(), m.end()));
    citations.push(Citation::new(m.as_str(), kind, m.start(), m.end()).with_numbers(numbers));
}

fn overlaps(consumed: &[(usize, usize)], start: usize, end: usize) -> bool {
    consumed.iter().any(|&(s, e)| start < e && s < end)
}

/// Offset in `name` where the author names begin.
///
/// "However, Smith" starts at "Smith", "van der Berg" at "van"; "Figure"
/// alone names nobody.
fn author_start(name: &str) -> Option<usize> {
    let word = NAME_WORD_REGEX
        .find_iter(name)
        .find(|w| !NON_AUTHOR_WORDS.contains(&w.as_str().to_lowercase().as_str()))?;
    let start = PARTICLE_RUN_REGEX
        .find(&name[..word.start()])
        .map_or(word.start(), |m| m.start());
    Some(start)
}

/// Expand a bracket expression into reference numbers, ranges inclusive.
///
/// Returns `None` for zero, reversed ranges, or ranges wider than `max_range`.
pub fn parse_numbers(expr: &str, max_range: u32) -> Option<Vec<u32>> {
    let mut numbers: Vec<u32> = Vec::new();
    for caps in NUMBER_ITEM_REGEX.captures_iter(expr) {
        let start: u32 = caps.get(1)?.as_str().parse().ok()?;
        let end: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => start,
        };
        if start == 0 || end < start || end - start + 1 > max_range {
            return None;
        }
        for n in start..=end {
            if !numbers.contains(&n) {
                numbers.push(n);
            }
        }
    }
    if numbers.is_empty() {
        None
    } else {
        Some(numbers)
    }
}
