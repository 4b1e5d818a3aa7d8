//! Rule catalog errors.

use super::error_code::{self, QuillErrorCode};

/// Errors that can occur while building or loading a rule catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid rule {id}: {message}")]
    InvalidRule { id: String, message: String },

    #[error("Invalid phrase pattern in rule {id}: {message}")]
    InvalidPattern { id: String, message: String },

    #[error("Unknown section '{section}' in rule {id}")]
    UnknownSection { id: String, section: String },

    #[error("Unknown match mode '{mode}' in rule {id}")]
    UnknownMode { id: String, mode: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),
}

impl QuillErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            _ => error_code::CATALOG_ERROR,
        }
    }
}
