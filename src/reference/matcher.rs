use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::citation::Citation;
use crate::error::Diagnostic;
use crate::reference::normalize::author_tokens;
use crate::reference::Reference;

static CITATION_YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(1[5-9]\d{2}|20\d{2})[a-z]?\b").expect("Invalid citation year regex pattern")
});

/// Author tokens and every year of an author-year citation.
///
/// "Smith (2019, 2020)" gives `(["smith"], [2019, 2020])`; a page locator
/// such as "p. 5" is not a year.
pub fn citation_author_year(raw_match: &str) -> Option<(Vec<String>, Vec<i32>)> {
    let first = CITATION_YEAR_REGEX.find(raw_match)?;
    let tokens = author_tokens(&raw_match[..first.start()]);
    if tokens.is_empty() {
        return None;
    }
    let mut years: Vec<i32> = Vec::new();
    for caps in CITATION_YEAR_REGEX.captures_iter(&raw_match[first.start()..]) {
        if let Some(year) = caps.get(1).and_then(|y| y.as_str().parse().ok()) {
            if !years.contains(&year) {
                years.push(year);
            }
        }
    }
    Some((tokens, years))
}

/// Link citations to references of the same paper.
///
/// Author-year citations need an equal year and at least one shared author
/// token; a citation naming several years resolves each one. Numeric citations resolve by the entry's own number, or by ordinal
/// position when the list is unnumbered. Ties go to the first reference in
/// list order and are reported as `AmbiguousMatch`.
pub fn match_citations(
    citations: &mut [Citation],
    references: &[Reference],
    citekey: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if references.is_empty() {
        return;
    }

    let reference_tokens: Vec<(Vec<String>, Option<i32>)> = references
        .iter()
        .map(|r| (r.author_tokens(), r.parsed_year))
        .collect();
    let numbered = references.iter().any(|r| r.number.is_some());

    for (citation_index, citation) in citations.iter_mut().enumerate() {
        if citation.format_kind.is_numeric() {
            let matched: Vec<usize> = citation
                .cited_numbers
                .iter()
                .filter_map(|&n| resolve_number(references, n, numbered))
                .collect();
            citation.set_matches(matched);
            continue;
        }

        let Some((tokens, years)) = citation_author_year(&citation.raw_match) else {
            continue;
        };
        let mut matched = Vec::new();
        for year in years {
            let candidates: Vec<usize> = reference_tokens
                .iter()
                .enumerate()
                .filter(|(_, (ref_tokens, ref_year))| {
                    *ref_year == Some(year) && ref_tokens.iter().any(|t| tokens.contains(t))
                })
                .map(|(idx, _)| idx)
                .collect();

            if candidates.len() > 1 {
                debug!(
                    "Ambiguous match for {:?} ({}) in {}: {:?}",
                    citation.raw_match, year, citekey, candidates
                );
                citation.ambiguous = true;
                diagnostics.push(Diagnostic::AmbiguousMatch {
                    citekey: citekey.to_string(),
                    citation_index,
                    raw_match: citation.raw_match.clone(),
                    candidates: candidates.clone(),
                });
            }
            matched.extend(candidates.first().copied());
        }
        citation.set_matches(matched);
    }
}

fn resolve_number(references: &[Reference], n: u32, numbered: bool) -> Option<usize> {
    if numbered {
        if let Some(r) = references.iter().find(|r| r.number == Some(n)) {
            return Some(r.index);
        }
    }
    let idx = usize::try_from(n).ok()?.checked_sub(1)?;
    references.get(idx).map(|r| r.index)
}
