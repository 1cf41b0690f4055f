//! Batch analysis over a collection of papers.
//!
//! Papers are analyzed independently on a bounded rayon pool, then the
//! collection-level analyzers run over the results in citekey order.

pub mod collection;
pub mod common_sources;
pub mod cross_reference;
pub mod lineage;

pub use collection::{collection_network, top_cited, CollectionNetwork, CrossCitationEdge, PaperNode, TopCitedPaper};
pub use common_sources::{common_sources, CommonSource};
pub use cross_reference::{analyze_pair, cross_references, paper_cites, CrossReferenceRecord};
pub use lineage::{foundational_works, required_citations, FoundationalWork};

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use crate::analysis::{analyze_paper, PaperCitationResult};
use crate::config::AnalysisConfig;
use crate::error::{CiteMapError, Diagnostic};
use crate::model::Paper;
use crate::stats::CitationStatistics;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_papers: usize,
    pub processed_papers: usize,
    pub failed_papers: usize,
    pub total_references: usize,
    pub total_citations: usize,
}

/// A paper that produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPaper {
    pub citekey: String,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub summary: BatchSummary,
    /// Successful results ordered by citekey.
    pub papers: Vec<PaperCitationResult>,
    pub failed: Vec<FailedPaper>,
    pub cross_references: Vec<CrossReferenceRecord>,
    pub common_sources: Vec<CommonSource>,
    pub foundational_works: Vec<FoundationalWork>,
    pub top_cited: Vec<TopCitedPaper>,
    pub collection_network: CollectionNetwork,
    pub statistics: CitationStatistics,
    /// Collection-level diagnostics. Per-paper diagnostics stay on each result.
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchAnalysis {
    pub fn paper(&self, citekey: &str) -> Option<&PaperCitationResult> {
        self.papers.iter().find(|p| p.citekey() == citekey)
    }
}

/// `cites(i, j)`: paper `i` lists paper `j` in its references.
#[derive(Debug, Clone, Default)]
pub struct CitationMatrix {
    rows: Vec<Vec<bool>>,
}

impl CitationMatrix {
    pub fn build(results: &[PaperCitationResult]) -> Self {
        let rows = results
            .par_iter()
            .enumerate()
            .map(|(i, citing)| {
                results
                    .iter()
                    .enumerate()
                    .map(|(j, cited)| i != j && paper_cites(citing, &cited.paper))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn cites(&self, citing: usize, cited: usize) -> bool {
        self.rows
            .get(citing)
            .and_then(|row| row.get(cited))
            .copied()
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Analyze a collection of papers.
///
/// A paper that fails (duplicate citekey, missing citekey, panic) is recorded
/// in `failed` and the rest of the batch carries on.
pub fn analyze_batch(papers: &[Paper], config: &AnalysisConfig) -> Result<BatchAnalysis, CiteMapError> {
    if papers.is_empty() {
        return Err(CiteMapError::NoPapersProvided);
    }

    let mut failed = Vec::new();
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(papers.len());
    for paper in papers {
        let citekey = paper.citekey.trim();
        if !citekey.is_empty() && !seen.insert(citekey.to_string()) {
            warn!("Skipping duplicate citekey {}", citekey);
            failed.push(FailedPaper {
                citekey: citekey.to_string(),
                title: paper.title.clone(),
                reason: CiteMapError::DuplicateCitekey(citekey.to_string()).to_string(),
            });
            continue;
        }
        jobs.push(paper);
    }

    let workers = config.worker_count();
    info!("Analyzing {} papers with {} workers", jobs.len(), workers);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

    let outcomes: Vec<(&Paper, Result<PaperCitationResult, String>)> = pool.install(|| {
        jobs.par_iter()
            .map(|paper| (*paper, analyze_isolated(paper, config)))
            .collect()
    });

    let mut ordered = BTreeMap::new();
    for (paper, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                ordered.insert(result.citekey().to_string(), result);
            }
            Err(reason) => {
                warn!("Failed to analyze {}: {}", paper.citekey, reason);
                failed.push(FailedPaper {
                    citekey: paper.citekey.trim().to_string(),
                    title: paper.title.clone(),
                    reason,
                });
            }
        }
    }
    failed.sort_by(|a, b| a.citekey.cmp(&b.citekey).then_with(|| a.title.cmp(&b.title)));
    let results: Vec<PaperCitationResult> = ordered.into_values().collect();

    let mut diagnostics: Vec<Diagnostic> = failed
        .iter()
        .map(|f| Diagnostic::PaperFailed {
            citekey: f.citekey.clone(),
            reason: f.reason.clone(),
        })
        .collect();

    let matrix = pool.install(|| CitationMatrix::build(&results));
    let cross_references = cross_references(&results, &matrix);
    let common_sources = common_sources(&results);
    let foundational_works = foundational_works(&results, &matrix, config, &mut diagnostics);
    let top_cited = top_cited(&results, &matrix, config.top_cited_limit);
    let collection_network = collection_network(&results, &matrix);
    let statistics = CitationStatistics::aggregate(
        results.iter().map(|r| &r.statistics),
        collection_network.nodes.len(),
        collection_network.edges.len(),
    );

    let summary = BatchSummary {
        total_papers: papers.len(),
        processed_papers: results.len(),
        failed_papers: failed.len(),
        total_references: results.iter().map(|r| r.references.len()).sum(),
        total_citations: results.iter().map(|r| r.citations.len()).sum(),
    };
    info!(
        "Batch done: {}/{} papers, {} cross-references, {} common sources, {} foundational works",
        summary.processed_papers,
        summary.total_papers,
        cross_references.len(),
        common_sources.len(),
        foundational_works.len()
    );

    Ok(BatchAnalysis {
        summary,
        papers: results,
        failed,
        cross_references,
        common_sources,
        foundational_works,
        top_cited,
        collection_network,
        statistics,
        diagnostics,
    })
}

fn analyze_isolated(paper: &Paper, config: &AnalysisConfig) -> Result<PaperCitationResult, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| analyze_paper(paper, config))) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("analysis panicked: {}", message))
        }
    }
}
