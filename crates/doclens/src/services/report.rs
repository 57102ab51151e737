//! Report assembly for one document result.
//!
//! Runs both engines over a `DocumentResult` and bundles their output with
//! the pass-through analysis sections, ready for rendering or serialization.

use serde::Serialize;
use serde_json::Value;

use crate::models::{ConfidenceSummary, DocumentResult};
use crate::services::entities::ParsedEntityMap;
use crate::services::highlight::{EntityHighlighter, Segmentation};
use crate::services::stats::{TextStatistics, TextStatisticsEngine, DEFAULT_TOP_WORDS_LIMIT};
use crate::services::styles::category_label;

/// Entries shown per category before "+N more".
pub const DEFAULT_SUMMARY_PREVIEW: usize = 3;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub top_words_limit: usize,
    pub summary_preview: usize,
    pub active_category: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_words_limit: DEFAULT_TOP_WORDS_LIMIT,
            summary_preview: DEFAULT_SUMMARY_PREVIEW,
            active_category: None,
        }
    }
}

/// Entity overview for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub label: String,
    pub style: String,
    /// Entries reported by the backend.
    pub entries: usize,
    /// Occurrences located in the text.
    pub occurrences: usize,
    pub preview: Vec<String>,
    pub remaining: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    pub file_size_mb: f64,
    pub statistics: TextStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_category: Option<String>,
    pub segments: Segmentation,
    pub filter_categories: Vec<String>,
    pub entities: Vec<CategoryReport>,
    /// Entity input problems that caused categories to be skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
}

impl DocumentReport {
    pub fn build(
        doc: &DocumentResult,
        highlighter: &EntityHighlighter,
        options: &ReportOptions,
    ) -> Self {
        let text = doc.text_content.as_str();
        let statistics = TextStatisticsEngine::new()
            .with_top_words_limit(options.top_words_limit)
            .compute(text);

        let mut rejected = Vec::new();
        let ParsedEntityMap {
            map,
            rejected: parse_rejected,
        } = match doc.entity_map() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Ignoring entities for {}: {}", doc.filename, e);
                rejected.push(e.to_string());
                ParsedEntityMap::default()
            }
        };
        rejected.extend(parse_rejected.iter().map(ToString::to_string));

        let occurrences = highlighter.occurrences(text, &map);
        rejected.extend(occurrences.rejected.iter().map(ToString::to_string));

        let entities = map
            .summaries(options.summary_preview)
            .into_iter()
            .map(|summary| CategoryReport {
                label: category_label(&summary.category),
                style: highlighter.styles().style_key(&summary.category),
                occurrences: occurrences.count_for(&summary.category),
                entries: summary.count,
                preview: summary.preview,
                remaining: summary.remaining,
                category: summary.category,
            })
            .collect();

        let segments = highlighter.segment(text, &map, options.active_category.as_deref());

        let results = doc.analysis_results.as_ref();
        let confidence = results
            .and_then(|r| r.confidence_metrics.as_ref())
            .map(|m| ConfidenceSummary::from_value(m, doc.is_ocr()));

        Self {
            filename: doc.filename.clone(),
            analysis_type: doc.analysis_type.clone(),
            file_size_mb: doc.size_mb(),
            statistics,
            active_category: options.active_category.clone(),
            segments,
            filter_categories: map
                .filter_categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            entities,
            rejected,
            confidence,
            sentiment: results.and_then(|r| r.sentiment.clone()),
            classification: results.and_then(|r| r.classification.clone()),
            summary: results.and_then(|r| r.summary.clone()),
        }
    }
}
