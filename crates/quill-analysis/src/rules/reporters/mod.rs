//! Reporters: output formats for findings.

pub mod json;
pub mod sarif;

use super::types::Finding;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, findings: &[Finding]) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(json::JsonReporter)),
        "sarif" => Some(Box::new(sarif::SarifReporter::new())),
        _ => None,
    }
}

pub fn available_formats() -> &'static [&'static str] {
    &["json", "sarif"]
}
