//! SARIF 2.1.0 reporter.

use rustc_hash::FxHashSet;
use serde_json::{json, Value};

use super::Reporter;
use crate::rules::types::{Finding, Severity};

pub struct SarifReporter {
    pub tool_name: String,
    pub tool_version: String,
}

impl SarifReporter {
    pub fn new() -> Self {
        Self {
            tool_name: "quill".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn level(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info | Severity::Hint => "note",
        }
    }

    fn build_results(&self, findings: &[Finding]) -> Vec<Value> {
        findings
            .iter()
            .map(|f| {
                let mut result = json!({
                    "ruleId": f.rule_id,
                    "level": Self::level(f.severity),
                    "message": { "text": f.message },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": {
                                "uri": f.location.file,
                                "uriBaseId": "%SRCROOT%"
                            },
                            "region": {
                                "startLine": f.location.line.max(1),
                                "startColumn": f.location.column.max(1)
                            }
                        }
                    }]
                });
                if let Some(section) = &f.section {
                    result["properties"] = json!({ "section": section.to_string() });
                }
                if let Some(fix) = &f.fix {
                    result["fixes"] = json!([{
                        "description": { "text": format!("Use '{}'", f.proposal) },
                        "replacement": fix,
                    }]);
                }
                result
            })
            .collect()
    }

    fn build_rules(&self, findings: &[Finding]) -> Vec<Value> {
        let mut seen = FxHashSet::default();
        findings
            .iter()
            .filter(|f| seen.insert(f.rule_id.as_str()))
            .map(|f| {
                json!({
                    "id": f.rule_id,
                    "shortDescription": {
                        "text": f.message.chars().take(100).collect::<String>()
                    },
                    "defaultConfiguration": { "level": Self::level(f.severity) }
                })
            })
            .collect()
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SarifReporter {
    fn name(&self) -> &'static str {
        "sarif"
    }

    fn generate(&self, findings: &[Finding]) -> Result<String, String> {
        let sarif = json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "rules": self.build_rules(findings)
                    }
                },
                "results": self.build_results(findings)
            }]
        });

        serde_json::to_string_pretty(&sarif).map_err(|e| e.to_string())
    }
}
