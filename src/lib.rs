//! Citation analysis for academic papers.
//!
//! Finds in-text citations, places them in their section and surrounding
//! text, guesses why each source was cited, resolves citations against the
//! paper's reference list and builds a citation graph. Collections of papers
//! are additionally cross-referenced against each other.

pub mod analysis;
pub mod batch;
pub mod citation;
pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod reference;
pub mod stats;

pub use analysis::{analyze_paper, PaperCitationResult};
pub use batch::{analyze_batch, BatchAnalysis, BatchSummary, FailedPaper};
pub use citation::{Citation, FormatKind, Purpose, Section};
pub use config::AnalysisConfig;
pub use error::{CiteMapError, Diagnostic, InputField};
pub use model::{generate_citekey, Paper, PaperBuilder, PaperInfo};
pub use network::CitationNetwork;
pub use reference::Reference;
pub use stats::CitationStatistics;
