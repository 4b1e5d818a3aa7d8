//! Diagnostic sinks: where the dispatcher reports findings.

use super::types::Finding;

/// Host-side receiver of findings, called once per finding in report order.
pub trait DiagnosticSink {
    fn report(&mut self, finding: Finding);
}

/// Keeps every finding in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Vec<Finding>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}

impl DiagnosticSink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}
