//! Single-paper pipeline: detect, contextualise, classify, parse, match, graph.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::citation::{classify_purpose, detect_citations, detect_sections, extract_context, Citation};
use crate::config::AnalysisConfig;
use crate::error::{CiteMapError, Diagnostic, InputField};
use crate::model::{Paper, PaperInfo};
use crate::network::CitationNetwork;
use crate::reference::{match_citations, parse_references, Reference};
use crate::stats::CitationStatistics;

/// Everything derived from one paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperCitationResult {
    pub paper: PaperInfo,
    pub citations: Vec<Citation>,
    pub references: Vec<Reference>,
    pub network: CitationNetwork,
    pub statistics: CitationStatistics,
    pub diagnostics: Vec<Diagnostic>,
}

impl PaperCitationResult {
    pub fn citekey(&self) -> &str {
        &self.paper.citekey
    }

    pub fn matched_citations(&self) -> impl Iterator<Item = &Citation> {
        self.citations.iter().filter(|c| c.is_matched())
    }
}

/// Analyze one paper.
///
/// Fails only when the paper has no citekey; every other problem is reported
/// through `diagnostics`.
pub fn analyze_paper(paper: &Paper, config: &AnalysisConfig) -> Result<PaperCitationResult, CiteMapError> {
    let citekey = paper.citekey.trim();
    if citekey.is_empty() {
        return Err(CiteMapError::InvalidPaper {
            citekey: String::new(),
            reason: format!("paper '{}' has no citekey", paper.title),
        });
    }
    info!("Analyzing citations for {}", citekey);

    let mut diagnostics = Vec::new();
    if paper.raw_text.trim().is_empty() {
        diagnostics.push(Diagnostic::EmptyInput {
            citekey: citekey.to_string(),
            field: InputField::RawText,
        });
    }
    if paper.reference_block.trim().is_empty() {
        diagnostics.push(Diagnostic::EmptyInput {
            citekey: citekey.to_string(),
            field: InputField::ReferenceBlock,
        });
    }

    let mut citations = detect_citations(&paper.raw_text, config);
    let headings = detect_sections(&paper.raw_text);
    debug!("{}: {} section headings", citekey, headings.len());
    for citation in citations.iter_mut() {
        extract_context(citation, &paper.raw_text, &headings, config.context_width);
        citation.purpose = classify_purpose(&citation.context_window);
    }

    let references = parse_references(&paper.reference_block, citekey);
    for reference in references.iter().filter(|r| r.is_malformed()) {
        diagnostics.push(Diagnostic::MalformedReferenceEntry {
            citekey: citekey.to_string(),
            reference_index: reference.index,
            raw_text: reference.raw_text.clone(),
        });
    }

    match_citations(&mut citations, &references, citekey, &mut diagnostics);

    let network = CitationNetwork::build(&citations, &references);
    let statistics = CitationStatistics::compute(&citations, references.len(), &network);
    info!(
        "{}: {} citations, {} references, {} matched",
        citekey, statistics.total_citations, statistics.reference_count, statistics.matched_citations
    );

    let mut paper_info = paper.info();
    paper_info.citekey = citekey.to_string();

    Ok(PaperCitationResult {
        paper: paper_info,
        citations,
        references,
        network,
        statistics,
        diagnostics,
    })
}
