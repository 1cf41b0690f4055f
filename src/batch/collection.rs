use serde::{Deserialize, Serialize};

use crate::analysis::PaperCitationResult;
use crate::batch::CitationMatrix;
use crate::model::PaperInfo;

const LABEL_LEN: usize = 50;

/// A collection paper ranked by how many other collection papers cite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCitedPaper {
    pub paper: PaperInfo,
    pub citation_count: usize,
    pub cited_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperNode {
    pub id: String,
    pub label: String,
    pub year: Option<i32>,
    pub authors: Vec<String>,
    /// In-text citations found in this paper.
    pub citation_count: usize,
    /// Entries in this paper's reference block.
    pub reference_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCitationEdge {
    pub source: String,
    pub target: String,
}

/// Paper-to-paper graph over the analyzed collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNetwork {
    pub nodes: Vec<PaperNode>,
    pub edges: Vec<CrossCitationEdge>,
}

pub fn collection_network(results: &[PaperCitationResult], matrix: &CitationMatrix) -> CollectionNetwork {
    let nodes = results
        .iter()
        .map(|r| PaperNode {
            id: r.citekey().to_string(),
            label: truncate_label(&r.paper.title),
            year: r.paper.year,
            authors: r.paper.authors.clone(),
            citation_count: r.citations.len(),
            reference_count: r.references.len(),
        })
        .collect();

    let mut edges = Vec::new();
    for (citing, citing_result) in results.iter().enumerate() {
        for (cited, cited_result) in results.iter().enumerate() {
            if matrix.cites(citing, cited) {
                edges.push(CrossCitationEdge {
                    source: citing_result.citekey().to_string(),
                    target: cited_result.citekey().to_string(),
                });
            }
        }
    }

    CollectionNetwork { nodes, edges }
}

/// Most cited papers first; uncited papers are left out.
pub fn top_cited(results: &[PaperCitationResult], matrix: &CitationMatrix, limit: usize) -> Vec<TopCitedPaper> {
    let mut ranked: Vec<TopCitedPaper> = results
        .iter()
        .enumerate()
        .map(|(cited, result)| {
            let cited_by: Vec<String> = (0..results.len())
                .filter(|&citing| matrix.cites(citing, cited))
                .map(|citing| results[citing].citekey().to_string())
                .collect();
            TopCitedPaper {
                paper: result.paper.clone(),
                citation_count: cited_by.len(),
                cited_by,
            }
        })
        .filter(|t| t.citation_count > 0)
        .collect();
    ranked.sort_by(|a, b| {
        b.citation_count
            .cmp(&a.citation_count)
            .then_with(|| a.paper.citekey.cmp(&b.paper.citekey))
    });
    ranked.truncate(limit);
    ranked
}

fn truncate_label(title: &str) -> String {
    if title.chars().count() <= LABEL_LEN {
        return title.to_string();
    }
    let mut label: String = title.chars().take(LABEL_LEN).collect();
    label.push_str("...");
    label
}
