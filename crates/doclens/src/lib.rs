//! doclens - text statistics and entity highlighting for analyzed documents.
//!
//! The analysis backend returns extracted text and an entity map. This crate
//! turns those into word statistics and an ordered list of plain and tagged
//! segments that a viewer can render, filter, and style.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{Error, InputError, Result};
pub use models::{AnalysisResults, DocumentResult};
pub use services::{
    compute_statistics, segment, EntityHighlighter, EntityMap, Segment, Segmentation,
    TextStatistics, TextStatisticsEngine,
};
