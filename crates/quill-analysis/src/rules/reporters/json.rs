//! JSON reporter.

use serde_json::json;

use super::Reporter;
use crate::rules::types::{Finding, Severity};

/// Machine-readable findings.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, findings: &[Finding]) -> Result<String, String> {
        let items: Vec<serde_json::Value> = findings
            .iter()
            .map(|f| {
                json!({
                    "rule_id": f.rule_id,
                    "severity": format!("{}", f.severity),
                    "file": f.location.file,
                    "line": f.location.line,
                    "column": f.location.column,
                    "symbol": f.symbol,
                    "section": f.section.as_ref().map(|k| k.to_string()),
                    "message": f.message,
                    "proposal": f.proposal,
                    "fix": f.fix,
                })
            })
            .collect();

        let count = |severity: Severity| findings.iter().filter(|f| f.severity == severity).count();
        let output = json!({
            "total_findings": findings.len(),
            "errors": count(Severity::Error),
            "warnings": count(Severity::Warning),
            "findings": items,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::SectionKey;
    use crate::rules::symbol::Location;

    #[test]
    fn test_json_shape() {
        let finding = Finding {
            rule_id: "QL2012".into(),
            severity: Severity::Warning,
            location: Location::new("Widget.cs", 12, 5),
            symbol: "Count".into(),
            section: Some(SectionKey::summary()),
            message: "m".into(),
            proposal: "Gets ".into(),
            fix: None,
        };
        let out = JsonReporter.generate(&[finding]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_findings"], 1);
        assert_eq!(value["warnings"], 1);
        assert_eq!(value["findings"][0]["section"], "summary");
        assert_eq!(value["findings"][0]["severity"], "warning");
    }
}
