//! Inline suppression: `quill-ignore` comments.

/// Marker recognized in a comment on the line directly above a finding.
pub const SUPPRESSION_MARKER: &str = "quill-ignore";

/// Checks whether a finding is suppressed by a `// quill-ignore` directive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppressionChecker;

impl SuppressionChecker {
    pub fn new() -> Self {
        Self
    }

    /// Whether `line` (the source line above the finding) suppresses `rule_id`.
    ///
    /// Supports:
    /// - `// quill-ignore` suppresses every rule on the next line
    /// - `// quill-ignore QL4001` suppresses one rule
    /// - `// quill-ignore QL4001, QL2060` suppresses several
    pub fn line_suppresses(&self, line: &str, rule_id: &str) -> bool {
        match self.parse_directive(line) {
            Some(directive) => directive.applies_to(rule_id),
            None => false,
        }
    }

    /// Parse a suppression directive out of a comment line.
    pub fn parse_directive(&self, line: &str) -> Option<SuppressionDirective> {
        let trimmed = line.trim();
        let pos = trimmed.find(SUPPRESSION_MARKER)?;

        let before = &trimmed[..pos];
        if !before.contains("//") && !before.contains("/*") {
            return None;
        }

        let after = trimmed[pos + SUPPRESSION_MARKER.len()..]
            .trim()
            .trim_end_matches("*/")
            .trim();
        let rule_ids = if after.is_empty() {
            Vec::new()
        } else {
            after
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        Some(SuppressionDirective { rule_ids })
    }
}

/// A parsed suppression directive. No rule ids means every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    pub rule_ids: Vec<String>,
}

impl SuppressionDirective {
    pub fn applies_to(&self, rule_id: &str) -> bool {
        self.rule_ids.is_empty() || self.rule_ids.iter().any(|r| r == rule_id)
    }
}
