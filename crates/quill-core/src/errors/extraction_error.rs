//! Comment extraction errors.

use super::error_code::{self, QuillErrorCode};

/// Problems found while turning documentation markup into sections.
///
/// These are recorded next to the extracted sections rather than returned,
/// so one broken section never hides its siblings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("Malformed <{tag}> section{}: {message}", describe_key(.key))]
    MalformedSection {
        tag: String,
        key: Option<String>,
        message: String,
    },

    #[error("Invalid documentation markup: {0}")]
    InvalidDocument(String),
}

fn describe_key(key: &Option<String>) -> String {
    key.as_deref().map(|k| format!(" '{k}'")).unwrap_or_default()
}

impl QuillErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedSection { .. } => error_code::MALFORMED_SECTION,
            Self::InvalidDocument(_) => error_code::INVALID_DOCUMENT,
        }
    }
}
