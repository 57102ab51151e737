//! Text statistics, entity parsing, highlighting, and report assembly.

pub mod entities;
pub mod highlight;
pub mod report;
pub mod stats;
pub mod styles;

pub use entities::{CategoryEntities, CategorySummary, EntityMap, EntityOccurrence, ParsedEntityMap};
pub use highlight::{segment, EntityHighlighter, OccurrenceSet, Segment, Segmentation};
pub use report::{CategoryReport, DocumentReport, ReportOptions};
pub use stats::{compute_statistics, TextStatistics, TextStatisticsEngine, WordFrequency};
pub use styles::{canonical_category, category_label, CategoryStyle, CategoryStyles};
