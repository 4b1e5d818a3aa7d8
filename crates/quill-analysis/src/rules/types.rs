//! Core types for the rule dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::comments::{SectionKey, StructuredComment};

use super::symbol::Location;

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn parse_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub location: Location,
    /// Name of the analyzed symbol; empty for comment trivia.
    pub symbol: String,
    /// The offending section; `None` for comment trivia.
    pub section: Option<SectionKey>,
    pub message: String,
    pub proposal: String,
    /// Rewritten documentation markup, when fixes are pre-rendered.
    pub fix: Option<String>,
}

/// Result of a code-fix request: the whole rewritten comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutput {
    pub rule_id: String,
    pub section: Option<SectionKey>,
    pub comment: StructuredComment,
    /// `comment` rendered back to documentation markup.
    pub xml: String,
}
