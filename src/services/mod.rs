// Service exports
pub mod analyzer;
pub mod documents;
pub mod enrichment;
pub mod http_analyzer;

pub use analyzer::{Analyzer, AnalyzerError, SimulatedAnalyzer};
pub use documents::transfer_draft;
pub use enrichment::{Enrichment, EnrichmentStats, Ensure};
pub use http_analyzer::HttpAnalyzer;
