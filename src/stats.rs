//! Counts, densities and distribution tables. Everything here is pure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::citation::{Citation, Purpose, Section};
use crate::network::CitationNetwork;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub count: usize,
    /// Share of all citations, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationStatistics {
    pub total_citations: usize,
    pub matched_citations: usize,
    pub unmatched_citations: usize,
    /// Parsed bibliography entries, matched or not.
    pub reference_count: usize,
    /// Distinct references reached by at least one citation.
    pub unique_references: usize,
    pub citation_density: f64,
    pub node_count: usize,
    pub edge_count: usize,
    pub network_density: f64,
    pub purpose_counts: BTreeMap<Purpose, usize>,
    pub section_counts: BTreeMap<Section, usize>,
    pub purpose_distribution: BTreeMap<Purpose, DistributionEntry>,
    pub section_distribution: BTreeMap<Section, DistributionEntry>,
}

impl CitationStatistics {
    /// Statistics for one paper.
    pub fn compute(citations: &[Citation], reference_count: usize, network: &CitationNetwork) -> Self {
        let total_citations = citations.len();
        let matched_citations = citations.iter().filter(|c| c.is_matched()).count();
        let unique_references = network.reference_node_count();

        let mut purpose_counts = BTreeMap::new();
        let mut section_counts = BTreeMap::new();
        for citation in citations {
            *purpose_counts.entry(citation.purpose).or_insert(0) += 1;
            *section_counts.entry(citation.section).or_insert(0) += 1;
        }

        Self {
            total_citations,
            matched_citations,
            unmatched_citations: total_citations - matched_citations,
            reference_count,
            unique_references,
            citation_density: citation_density(total_citations, unique_references),
            node_count: network.nodes.len(),
            edge_count: network.edges.len(),
            network_density: network_density(network.nodes.len(), network.edges.len()),
            purpose_distribution: distribution(&purpose_counts, total_citations),
            section_distribution: distribution(&section_counts, total_citations),
            purpose_counts,
            section_counts,
        }
    }

    /// Sum per-paper statistics into a batch aggregate. Network figures
    /// describe the collection graph given by `node_count` and `edge_count`.
    pub fn aggregate<'a, I>(parts: I, node_count: usize, edge_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a CitationStatistics>,
    {
        let mut total = CitationStatistics::default();
        for part in parts {
            total.total_citations += part.total_citations;
            total.matched_citations += part.matched_citations;
            total.unmatched_citations += part.unmatched_citations;
            total.reference_count += part.reference_count;
            total.unique_references += part.unique_references;
            for (purpose, count) in &part.purpose_counts {
                *total.purpose_counts.entry(*purpose).or_insert(0) += count;
            }
            for (section, count) in &part.section_counts {
                *total.section_counts.entry(*section).or_insert(0) += count;
            }
        }
        total.citation_density = citation_density(total.total_citations, total.unique_references);
        total.node_count = node_count;
        total.edge_count = edge_count;
        total.network_density = network_density(node_count, edge_count);
        total.purpose_distribution = distribution(&total.purpose_counts, total.total_citations);
        total.section_distribution = distribution(&total.section_counts, total.total_citations);
        total
    }
}

/// Citations per distinct reference; 0 when nothing was matched.
pub fn citation_density(total_citations: usize, unique_references: usize) -> f64 {
    if unique_references == 0 {
        return 0.0;
    }
    total_citations as f64 / unique_references as f64
}

/// Edges over ordered node pairs; 0 for graphs with fewer than two nodes.
pub fn network_density(nodes: usize, edges: usize) -> f64 {
    if nodes <= 1 {
        return 0.0;
    }
    edges as f64 / (nodes * (nodes - 1)) as f64
}

pub fn distribution<K: Ord + Copy>(counts: &BTreeMap<K, usize>, total: usize) -> BTreeMap<K, DistributionEntry> {
    counts
        .iter()
        .map(|(key, &count)| {
            let percentage = if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64 * 1000.0).round() / 10.0
            };
            (*key, DistributionEntry { count, percentage })
        })
        .collect()
}
