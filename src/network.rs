//! Per-paper reference graph as a plain node arena plus edge list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::citation::{Citation, Purpose, Section};
use crate::reference::Reference;

pub const CURRENT_PAPER_ID: &str = "current_paper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    CurrentPaper,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Index into the paper's reference list; `None` for the current paper.
    pub reference_index: Option<usize>,
    pub year: Option<i32>,
    pub title: Option<String>,
}

/// `source` cites `target` for `purpose`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub purpose: Purpose,
    pub section: Section,
    /// Index of the citation that produced this edge.
    pub citation_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    /// Node ids grouped by the purpose of the edges pointing at them.
    pub clusters: BTreeMap<Purpose, Vec<String>>,
}

impl CitationNetwork {
    /// Build the graph from matched citations.
    ///
    /// One node per distinct matched reference (in reference-list order) plus
    /// the current paper; one edge per (citation, matched reference) pair.
    /// Unmatched citations contribute nothing.
    pub fn build(citations: &[Citation], references: &[Reference]) -> Self {
        let mut network = CitationNetwork::default();
        network.nodes.push(NetworkNode {
            id: CURRENT_PAPER_ID.to_string(),
            label: "Current Paper".to_string(),
            kind: NodeKind::CurrentPaper,
            reference_index: None,
            year: None,
            title: None,
        });

        let mut cited: Vec<usize> = citations
            .iter()
            .flat_map(|c| c.matched_references.iter().copied())
            .filter(|&idx| idx < references.len())
            .collect();
        cited.sort_unstable();
        cited.dedup();

        for idx in cited {
            let reference = &references[idx];
            network.nodes.push(NetworkNode {
                id: reference_node_id(idx),
                label: reference
                    .parsed_authors
                    .clone()
                    .unwrap_or_else(|| format!("Reference {}", idx + 1)),
                kind: NodeKind::Reference,
                reference_index: Some(idx),
                year: reference.parsed_year,
                title: reference.parsed_title.clone(),
            });
        }

        for (citation_index, citation) in citations.iter().enumerate() {
            for &idx in citation.matched_references.iter().filter(|&&idx| idx < references.len()) {
                let target = reference_node_id(idx);
                let cluster = network.clusters.entry(citation.purpose).or_default();
                if !cluster.contains(&target) {
                    cluster.push(target.clone());
                }
                network.edges.push(NetworkEdge {
                    source: CURRENT_PAPER_ID.to_string(),
                    target,
                    purpose: citation.purpose,
                    section: citation.section,
                    citation_index,
                });
            }
        }

        network
    }

    pub fn reference_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Reference).count()
    }

    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

pub fn reference_node_id(index: usize) -> String {
    format!("ref_{}", index + 1)
}
