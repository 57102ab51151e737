//! Extraction confidence metrics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse bucket for a percentage confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Above 90 is high, above 75 medium, anything else low.
    pub fn from_percent(value: f64) -> Self {
        if value > 90.0 {
            ConfidenceLevel::High
        } else if value > 75.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

/// A metric value with its confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedMetric {
    pub value: f64,
    pub level: ConfidenceLevel,
}

impl RatedMetric {
    fn new(value: f64) -> Self {
        Self {
            value,
            level: ConfidenceLevel::from_percent(value),
        }
    }
}

/// Confidence metrics read from `analysis_results.confidence_metrics`.
///
/// Missing values read as zero. OCR confidence is only reported for OCR
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<RatedMetric>,
    pub extraction_accuracy: RatedMetric,
    /// Seconds.
    pub processing_time: f64,
}

impl ConfidenceSummary {
    pub fn from_value(metrics: &Value, is_ocr: bool) -> Self {
        let number = |key: &str| metrics.get(key).and_then(Value::as_f64).unwrap_or(0.0);

        Self {
            ocr_confidence: is_ocr.then(|| RatedMetric::new(number("ocr_confidence"))),
            extraction_accuracy: RatedMetric::new(number("extraction_accuracy")),
            processing_time: number("processing_time"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_levels() {
        assert_eq!(ConfidenceLevel::from_percent(95.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percent(90.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percent(80.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percent(75.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_percent(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_summary_from_value() {
        let metrics = json!({
            "ocr_confidence": 92.5,
            "extraction_accuracy": 80,
            "processing_time": 1.25,
        });
        let summary = ConfidenceSummary::from_value(&metrics, true);

        let ocr = summary.ocr_confidence.unwrap();
        assert_eq!(ocr.level, ConfidenceLevel::High);
        assert_eq!(summary.extraction_accuracy.value, 80.0);
        assert_eq!(summary.extraction_accuracy.level, ConfidenceLevel::Medium);
        assert_eq!(summary.processing_time, 1.25);
    }

    #[test]
    fn test_missing_values_default_to_zero() {
        let summary = ConfidenceSummary::from_value(&json!({}), false);
        assert!(summary.ocr_confidence.is_none());
        assert_eq!(summary.extraction_accuracy.value, 0.0);
        assert_eq!(summary.extraction_accuracy.level, ConfidenceLevel::Low);
        assert_eq!(summary.processing_time, 0.0);
    }
}
