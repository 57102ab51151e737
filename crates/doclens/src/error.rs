//! Error types for document result loading and entity map parsing.

use thiserror::Error;

/// Malformed input handed to the engines by the hosting layer.
///
/// The engines themselves never fail. These errors describe inputs whose
/// shape cannot be interpreted; callers skip the offending category rather
/// than aborting the whole computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid entities for category '{category}': {reason}")]
    InvalidCategory { category: String, reason: String },

    #[error("Invalid entity positions: {0}")]
    InvalidPositions(String),

    #[error("Invalid entity map: {0}")]
    InvalidEntityMap(String),
}

impl InputError {
    pub(crate) fn category(category: &str, reason: impl Into<String>) -> Self {
        InputError::InvalidCategory {
            category: category.to_string(),
            reason: reason.into(),
        }
    }

    /// Category this error applies to, if it is category-scoped.
    pub fn category_name(&self) -> Option<&str> {
        match self {
            InputError::InvalidCategory { category, .. } => Some(category.as_str()),
            _ => None,
        }
    }
}

/// Errors from loading documents and configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Invalid document result: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
