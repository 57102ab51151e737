//! Helper utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use console::{style, StyledObject};

use doclens::services::styles::DEFAULT_STYLE_KEY;
use doclens::{AnalysisResults, DocumentResult};

use super::commands::InputArgs;

/// Load a document: `.json` files are backend results, anything else is text.
pub async fn load_document(path: &Path) -> anyhow::Result<DocumentResult> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        return DocumentResult::load(path)
            .await
            .with_context(|| format!("Failed to load document result {}", path.display()));
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(DocumentResult::from_text(filename, text))
}

/// Load the input document, replacing its entities when `--entities` is given.
pub async fn load_input(args: &InputArgs) -> anyhow::Result<DocumentResult> {
    let mut doc = load_document(&args.input).await?;

    if let Some(path) = &args.entities {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read entity map {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid entity map JSON in {}", path.display()))?;

        doc.analysis_results
            .get_or_insert_with(AnalysisResults::default)
            .entities = Some(value);
    }

    Ok(doc)
}

/// 256-color terminal color for a style key.
pub fn style_color(style_key: &str) -> u8 {
    match style_key {
        "person" => 99,
        "organization" => 214,
        "location" => 42,
        "date" => 205,
        "email" => 44,
        "phone" => 141,
        "url" => 203,
        "money" => 35,
        DEFAULT_STYLE_KEY => 245,
        // Configured categories without a built-in terminal color
        _ => 75,
    }
}

/// Style text the way tagged spans of `style_key` are shown.
pub fn styled<D>(text: D, style_key: &str) -> StyledObject<D> {
    style(text).color256(style_color(style_key)).bold()
}

/// Format bytes as human-readable size.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Horizontal bar scaled against `max`.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value * width).div_ceil(max).min(width);
    "█".repeat(filled)
}
