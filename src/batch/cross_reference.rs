use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::analysis::PaperCitationResult;
use crate::batch::CitationMatrix;
use crate::model::PaperInfo;
use crate::reference::{fold, surname, title_fragment, Reference};

/// Citation relation between two papers of the same collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceRecord {
    pub paper1: PaperInfo,
    pub paper2: PaperInfo,
    pub paper1_cites_paper2: bool,
    pub paper2_cites_paper1: bool,
    pub bidirectional: bool,
}

impl CrossReferenceRecord {
    pub fn new(paper1: PaperInfo, paper2: PaperInfo, paper1_cites_paper2: bool, paper2_cites_paper1: bool) -> Self {
        Self {
            paper1,
            paper2,
            paper1_cites_paper2,
            paper2_cites_paper1,
            bidirectional: paper1_cites_paper2 && paper2_cites_paper1,
        }
    }

    /// The same relation seen from the other side.
    pub fn reversed(&self) -> Self {
        Self::new(
            self.paper2.clone(),
            self.paper1.clone(),
            self.paper2_cites_paper1,
            self.paper1_cites_paper2,
        )
    }

    pub fn is_connected(&self) -> bool {
        self.paper1_cites_paper2 || self.paper2_cites_paper1
    }
}

/// Whether `citing` lists `cited` in its references.
///
/// A reference matches when its year equals the cited paper's year, one of
/// its author tokens is a surname of the cited paper's authors, and every word
/// of the cited title's fragment occurs in the reference text.
pub fn paper_cites(citing: &PaperCitationResult, cited: &PaperInfo) -> bool {
    let Some(year) = cited.year else {
        return false;
    };
    let surnames: Vec<String> = cited.authors.iter().filter_map(|a| surname(a)).collect();
    if surnames.is_empty() {
        return false;
    }
    let fragment = title_fragment(&cited.title);
    citing
        .references
        .iter()
        .any(|r| reference_matches(r, year, &surnames, &fragment))
}

fn reference_matches(reference: &Reference, year: i32, surnames: &[String], fragment: &[String]) -> bool {
    if reference.parsed_year != Some(year) {
        return false;
    }
    if !reference.author_tokens().iter().any(|t| surnames.contains(t)) {
        return false;
    }
    if fragment.is_empty() {
        return true;
    }
    let mut text = reference.raw_text.clone();
    if let Some(title) = &reference.parsed_title {
        text.push(' ');
        text.push_str(title);
    }
    let folded = fold(&text);
    let words: HashSet<&str> = folded.split_whitespace().collect();
    fragment.iter().all(|w| words.contains(w.as_str()))
}

/// Record for the pair (a, b), computed directly.
pub fn analyze_pair(a: &PaperCitationResult, b: &PaperCitationResult) -> CrossReferenceRecord {
    CrossReferenceRecord::new(
        a.paper.clone(),
        b.paper.clone(),
        paper_cites(a, &b.paper),
        paper_cites(b, &a.paper),
    )
}

/// Every unordered pair with at least one citation between them.
pub fn cross_references(results: &[PaperCitationResult], matrix: &CitationMatrix) -> Vec<CrossReferenceRecord> {
    let mut records = Vec::new();
    for i in 0..results.len() {
        for j in (i + 1)..results.len() {
            let record = CrossReferenceRecord::new(
                results[i].paper.clone(),
                results[j].paper.clone(),
                matrix.cites(i, j),
                matrix.cites(j, i),
            );
            if record.is_connected() {
                records.push(record);
            }
        }
    }
    records
}
