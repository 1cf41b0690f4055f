use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CiteMapError;

/// Tunables for a single-paper or batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width in bytes of the context window around each citation.
    pub context_width: usize,
    /// Worker threads for the batch fan-out. 0 means one per available core.
    pub workers: usize,
    /// A foundational paper must be cited by at least this many newer papers...
    pub foundational_min_citations: usize,
    /// ...or by this fraction of the papers with a later year, whichever is smaller.
    pub foundational_fraction: f64,
    /// How many entries the top-cited table keeps.
    pub top_cited_limit: usize,
    /// Bracket ranges spanning more numbers than this are treated as noise.
    pub max_numeric_range: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            context_width: 200,
            workers: 0,
            foundational_min_citations: 2,
            foundational_fraction: 0.25,
            top_cited_limit: 5,
            max_numeric_range: 100,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, CiteMapError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, CiteMapError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `CITEMAP_WORKERS` and `CITEMAP_CONTEXT_WIDTH` if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(workers) = env_usize("CITEMAP_WORKERS") {
            self.workers = workers;
        }
        if let Some(width) = env_usize("CITEMAP_CONTEXT_WIDTH") {
            self.context_width = width;
        }
        self
    }

    /// Effective worker count for the fan-out pool.
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

fn env_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a non-negative integer", name, value);
            None
        }
    }
}
