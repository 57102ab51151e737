//! Document result returned by the analysis backend.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InputError;
use crate::services::entities::{EntityMap, ParsedEntityMap};

/// Upload result: extracted text plus optional analysis data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub text_content: String,
    /// `ocr` or `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_results: Option<AnalysisResults>,
}

/// AI analysis attached to a document.
///
/// Only `entities` is interpreted here; the other sections are rendered by
/// the host and passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_metrics: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Value>,
    /// Fields this client does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentResult {
    /// Wrap plain text that did not come from the backend.
    pub fn from_text(filename: impl Into<String>, text: impl Into<String>) -> Self {
        let text_content: String = text.into();
        Self {
            filename: filename.into(),
            file_size: text_content.len() as u64,
            text_content,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> crate::Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json(&contents)
    }

    pub fn is_ocr(&self) -> bool {
        self.analysis_type.as_deref() == Some("ocr")
    }

    /// Size in megabytes, as displayed next to the file name.
    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / 1024.0 / 1024.0
    }

    /// Parse `analysis_results.entities`. Missing entities yield an empty map.
    pub fn entity_map(&self) -> Result<ParsedEntityMap, InputError> {
        match self
            .analysis_results
            .as_ref()
            .and_then(|r| r.entities.as_ref())
        {
            None | Some(Value::Null) => Ok(ParsedEntityMap::default()),
            Some(value) => EntityMap::from_value(value),
        }
    }

    pub fn has_ai_results(&self) -> bool {
        self.analysis_results.as_ref().is_some_and(|r| {
            r.sentiment.is_some()
                || r.classification.is_some()
                || r.summary.is_some()
                || r.entities.is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_result() {
        let json = json!({
            "filename": "memo.pdf",
            "file_hash": "abc123",
            "file_size": 2097152,
            "content_type": "application/pdf",
            "text_content": "Alice met Bob.",
            "analysis_type": "ocr",
            "analysis_results": {
                "entities": {"entities": {"PERSON": ["Alice", "Bob"]}},
                "sentiment": {"label": "POSITIVE", "score": 0.9},
                "word_count": 3,
                "char_count": 14,
            },
        })
        .to_string();

        let doc = DocumentResult::from_json(&json).unwrap();
        assert_eq!(doc.filename, "memo.pdf");
        assert!(doc.is_ocr());
        assert!((doc.size_mb() - 2.0).abs() < f64::EPSILON);
        assert!(doc.has_ai_results());

        let results = doc.analysis_results.as_ref().unwrap();
        assert_eq!(results.extra.get("word_count"), Some(&json!(3)));

        let parsed = doc.entity_map().unwrap();
        assert_eq!(parsed.map.entity_count(), 2);
    }

    #[test]
    fn test_minimal_result() {
        let doc = DocumentResult::from_json(r#"{"text_content": "hello"}"#).unwrap();
        assert_eq!(doc.text_content, "hello");
        assert!(!doc.has_ai_results());
        assert!(doc.entity_map().unwrap().map.is_empty());
    }

    #[test]
    fn test_missing_text_is_error() {
        assert!(DocumentResult::from_json(r#"{"filename": "x.pdf"}"#).is_err());
    }

    #[test]
    fn test_string_encoded_entities_rejected() {
        let json = json!({
            "text_content": "Alice",
            "analysis_results": {"entities": "{\"entities\": {\"PERSON\": [\"Alice\"]}}"},
        })
        .to_string();
        let doc = DocumentResult::from_json(&json).unwrap();
        assert!(matches!(
            doc.entity_map(),
            Err(InputError::InvalidEntityMap(_))
        ));
    }

    #[test]
    fn test_from_text() {
        let doc = DocumentResult::from_text("notes.txt", "some text");
        assert_eq!(doc.file_size, 9);
        assert!(doc.analysis_results.is_none());
    }

    #[test]
    fn test_round_trip_keeps_unknown_fields() {
        let json = json!({
            "text_content": "x",
            "analysis_results": {"custom_model": {"score": 1}},
        });
        let doc: DocumentResult = serde_json::from_value(json.clone()).unwrap();
        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["analysis_results"]["custom_model"], json!({"score": 1}));
    }
}
