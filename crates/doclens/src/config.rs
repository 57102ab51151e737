//! Configuration management for doclens using the prefer crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::services::report::{ReportOptions, DEFAULT_SUMMARY_PREVIEW};
use crate::services::stats::DEFAULT_TOP_WORDS_LIMIT;
use crate::services::styles::{CategoryStyle, CategoryStyles};

/// Environment variable overriding `top_words_limit`.
pub const TOP_WORDS_LIMIT_ENV: &str = "DOCLENS_TOP_WORDS_LIMIT";

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of top words reported in statistics.
    #[serde(default = "default_top_words_limit")]
    pub top_words_limit: usize,
    /// Entity values listed per category before "+N more".
    #[serde(default = "default_summary_preview")]
    pub summary_preview: usize,
    /// Additional or replacement category styles.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub styles: HashMap<String, CategoryStyle>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

fn default_top_words_limit() -> usize {
    DEFAULT_TOP_WORDS_LIMIT
}

fn default_summary_preview() -> usize {
    DEFAULT_SUMMARY_PREVIEW
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_words_limit: DEFAULT_TOP_WORDS_LIMIT,
            summary_preview: DEFAULT_SUMMARY_PREVIEW,
            styles: HashMap::new(),
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration, auto-discovering a `doclens.*` file.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        let config = match prefer::load("doclens").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                    tracing::warn!("{}; using defaults", e);
                    Self::default()
                }),
                None => Self::default(),
            },
            Err(_) => {
                tracing::debug!("No doclens config file found, using defaults");
                Self::default()
            }
        };
        config.with_env_overrides()
    }

    /// Load from an explicit path, falling back to defaults on failure.
    pub async fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load_from_path(path).await {
                Ok(config) => config.with_env_overrides(),
                Err(e) => {
                    tracing::warn!("{}; using defaults", e);
                    Self::default().with_env_overrides()
                }
            },
            None => Self::load().await,
        }
    }

    /// Load config from a specific file path. The format follows the extension.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse TOML config: {}", e)))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse YAML config: {}", e)))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse JSON config: {}", e)))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(TOP_WORDS_LIMIT_ENV) {
            match value.trim().parse() {
                Ok(limit) => self.top_words_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", TOP_WORDS_LIMIT_ENV, value),
            }
        }
        self
    }

    /// Style registry with configured styles layered over the built-in palette.
    pub fn category_styles(&self) -> CategoryStyles {
        let mut styles = CategoryStyles::new();
        for (category, style) in &self.styles {
            styles.insert(category, style.clone());
        }
        styles
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_words_limit: self.top_words_limit,
            summary_preview: self.summary_preview,
            active_category: None,
        }
    }

    /// Serialize to TOML for display.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
