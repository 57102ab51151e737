//! Data types exchanged with the analysis backend.

mod confidence;
mod document;

pub use confidence::{ConfidenceLevel, ConfidenceSummary, RatedMetric};
pub use document::{AnalysisResults, DocumentResult};
