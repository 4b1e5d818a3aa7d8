//! Analysis configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LINK_SENTINEL, DEFAULT_PRERENDER_FIXES};

/// Configuration for rule selection and evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rule ids to run. Empty means every registered rule.
    #[serde(default)]
    pub enabled_rules: Vec<String>,
    /// Rule ids never to run. Applied after `enabled_rules`.
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// Per-rule severity overrides (`error`, `warning`, `info`, `hint`).
    #[serde(default)]
    pub severity_overrides: HashMap<String, String>,
    /// Rule ids whose phrase comparison ignores case.
    #[serde(default)]
    pub case_insensitive_rules: Vec<String>,
    /// Token that self-closing links flatten to in sentinel mode. Default: "§".
    pub link_sentinel: Option<String>,
    /// Attach a rewritten comment to each finding. Default: true.
    pub prerender_fixes: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective link sentinel.
    pub fn effective_link_sentinel(&self) -> &str {
        self.link_sentinel.as_deref().unwrap_or(DEFAULT_LINK_SENTINEL)
    }

    /// Returns whether findings should carry a pre-rendered fix.
    pub fn effective_prerender_fixes(&self) -> bool {
        self.prerender_fixes.unwrap_or(DEFAULT_PRERENDER_FIXES)
    }

    /// Whether the rule with the given id should run.
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        let allowed = self.enabled_rules.is_empty()
            || self.enabled_rules.iter().any(|r| r == rule_id);
        allowed && !self.disabled_rules.iter().any(|r| r == rule_id)
    }

    /// Whether the rule with the given id compares phrases ignoring case.
    pub fn is_case_insensitive(&self, rule_id: &str) -> bool {
        self.case_insensitive_rules.iter().any(|r| r == rule_id)
    }
}
