use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::PaperCitationResult;
use crate::reference::ReferenceKey;

/// A work listed in the reference blocks of two or more papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSource {
    pub key: ReferenceKey,
    /// Author string as first seen.
    pub author: String,
    pub year: i32,
    pub title: Option<String>,
    /// Always `cited_by.len()`.
    pub citation_count: usize,
    /// Distinct citekeys, in collection order.
    pub cited_by: Vec<String>,
}

/// Group every reference of the collection by (surname, year) and keep the
/// groups shared by at least two papers.
///
/// Ordered by citation count (descending), then year, then author.
pub fn common_sources(results: &[PaperCitationResult]) -> Vec<CommonSource> {
    let mut groups: BTreeMap<ReferenceKey, CommonSource> = BTreeMap::new();

    for result in results {
        for reference in &result.references {
            let Some(key) = reference.key() else {
                continue;
            };
            let group = groups.entry(key.clone()).or_insert_with(|| CommonSource {
                key: key.clone(),
                author: reference.parsed_authors.clone().unwrap_or_default(),
                year: key.year,
                title: None,
                citation_count: 0,
                cited_by: Vec::new(),
            });
            if group.title.is_none() {
                group.title = reference.parsed_title.clone();
            }
            let citekey = result.citekey();
            if !group.cited_by.iter().any(|c| c == citekey) {
                group.cited_by.push(citekey.to_string());
                group.citation_count = group.cited_by.len();
            }
        }
    }

    let mut sources: Vec<CommonSource> = groups.into_values().filter(|g| g.citation_count >= 2).collect();
    sources.sort_by(|a, b| {
        b.citation_count
            .cmp(&a.citation_count)
            .then(a.year.cmp(&b.year))
            .then_with(|| a.key.author.cmp(&b.key.author))
    });
    sources
}
