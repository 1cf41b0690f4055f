use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::PaperCitationResult;
use crate::batch::CitationMatrix;
use crate::config::AnalysisConfig;
use crate::error::Diagnostic;
use crate::model::PaperInfo;

/// An older paper of the collection cited by enough newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundationalWork {
    pub paper: PaperInfo,
    pub cited_by_count: usize,
    pub cited_by: Vec<String>,
}

/// Citations from newer papers needed to count as foundational.
///
/// The smaller of the fixed minimum and the configured share of papers with
/// a later year, never below one.
pub fn required_citations(later_papers: usize, config: &AnalysisConfig) -> usize {
    let share = (config.foundational_fraction * later_papers as f64).ceil() as usize;
    config.foundational_min_citations.min(share).max(1)
}

/// Papers with an unknown year are skipped and reported as `UnorderablePaper`.
pub fn foundational_works(
    results: &[PaperCitationResult],
    matrix: &CitationMatrix,
    config: &AnalysisConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<FoundationalWork> {
    let mut works = Vec::new();

    for (cited_idx, cited) in results.iter().enumerate() {
        let Some(year) = cited.paper.year else {
            diagnostics.push(Diagnostic::UnorderablePaper {
                citekey: cited.citekey().to_string(),
            });
            continue;
        };

        let later: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(idx, r)| *idx != cited_idx && r.paper.year.is_some_and(|y| y > year))
            .map(|(idx, _)| idx)
            .collect();
        let cited_by: Vec<String> = later
            .iter()
            .filter(|&&citing_idx| matrix.cites(citing_idx, cited_idx))
            .map(|&citing_idx| results[citing_idx].citekey().to_string())
            .collect();

        let required = required_citations(later.len(), config);
        debug!(
            "{}: cited by {}/{} newer papers, {} required",
            cited.citekey(),
            cited_by.len(),
            later.len(),
            required
        );
        if !cited_by.is_empty() && cited_by.len() >= required {
            works.push(FoundationalWork {
                paper: cited.paper.clone(),
                cited_by_count: cited_by.len(),
                cited_by,
            });
        }
    }

    works.sort_by(|a, b| {
        b.cited_by_count
            .cmp(&a.cited_by_count)
            .then(a.paper.year.cmp(&b.paper.year))
            .then_with(|| a.paper.citekey.cmp(&b.paper.citekey))
    });
    works
}
