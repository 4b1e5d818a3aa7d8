//! Top-level quill configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, CatalogConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

const SEVERITIES: [&str; 4] = ["error", "warning", "info", "hint"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Host overrides (applied via `apply_host_overrides`)
/// 2. Environment variables (`QUILL_*`)
/// 3. Project config (`quill.toml` in project root)
/// 4. User config (`~/.quill/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuillConfig {
    pub analysis: AnalysisConfig,
    pub catalog: CatalogConfig,
}

/// Overrides supplied programmatically by the hosting analysis driver.
#[derive(Debug, Clone, Default)]
pub struct HostOverrides {
    pub disabled_rules: Vec<String>,
    pub link_sentinel: Option<String>,
    pub prerender_fixes: Option<bool>,
}

impl QuillConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&HostOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(host) = overrides {
            Self::apply_host_overrides(&mut config, host);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuillConfig) -> Result<(), ConfigError> {
        if let Some(sentinel) = &config.analysis.link_sentinel {
            if sentinel.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.link_sentinel".to_string(),
                    message: "must contain at least one non-whitespace character".to_string(),
                });
            }
        }
        for (rule, severity) in &config.analysis.severity_overrides {
            if !SEVERITIES.contains(&severity.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("analysis.severity_overrides.{rule}"),
                    message: format!("unknown severity '{severity}'"),
                });
            }
        }
        if let Some(rule) = config
            .analysis
            .enabled_rules
            .iter()
            .find(|r| config.analysis.disabled_rules.contains(r))
        {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.enabled_rules".to_string(),
                message: format!("rule {rule} is both enabled and disabled"),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.quill/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".quill").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut QuillConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuillConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it carries a value.
    fn merge(base: &mut QuillConfig, other: &QuillConfig) {
        // Analysis
        if !other.analysis.enabled_rules.is_empty() {
            base.analysis.enabled_rules = other.analysis.enabled_rules.clone();
        }
        if !other.analysis.disabled_rules.is_empty() {
            base.analysis.disabled_rules = other.analysis.disabled_rules.clone();
        }
        for (rule, severity) in &other.analysis.severity_overrides {
            base.analysis
                .severity_overrides
                .insert(rule.clone(), severity.clone());
        }
        if !other.analysis.case_insensitive_rules.is_empty() {
            base.analysis.case_insensitive_rules = other.analysis.case_insensitive_rules.clone();
        }
        if other.analysis.link_sentinel.is_some() {
            base.analysis.link_sentinel = other.analysis.link_sentinel.clone();
        }
        if other.analysis.prerender_fixes.is_some() {
            base.analysis.prerender_fixes = other.analysis.prerender_fixes;
        }

        // Catalog
        if !other.catalog.extra_catalogs.is_empty() {
            base.catalog.extra_catalogs = other.catalog.extra_catalogs.clone();
        }
        if other.catalog.skip_builtin.is_some() {
            base.catalog.skip_builtin = other.catalog.skip_builtin;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `QUILL_DISABLED_RULES=QL2001,QL2060`, `QUILL_LINK_SENTINEL`, ...
    fn apply_env_overrides(config: &mut QuillConfig) {
        if let Ok(val) = std::env::var("QUILL_ENABLED_RULES") {
            config.analysis.enabled_rules = split_list(&val);
        }
        if let Ok(val) = std::env::var("QUILL_DISABLED_RULES") {
            config.analysis.disabled_rules = split_list(&val);
        }
        if let Ok(val) = std::env::var("QUILL_LINK_SENTINEL") {
            config.analysis.link_sentinel = Some(val);
        }
        if let Ok(val) = std::env::var("QUILL_PRERENDER_FIXES") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.prerender_fixes = Some(v);
            }
        }
        if let Ok(val) = std::env::var("QUILL_SKIP_BUILTIN") {
            if let Ok(v) = val.parse::<bool>() {
                config.catalog.skip_builtin = Some(v);
            }
        }
    }

    /// Apply host overrides (highest priority).
    fn apply_host_overrides(config: &mut QuillConfig, host: &HostOverrides) {
        for rule in &host.disabled_rules {
            if !config.analysis.disabled_rules.contains(rule) {
                config.analysis.disabled_rules.push(rule.clone());
            }
            config.analysis.enabled_rules.retain(|r| r != rule);
        }
        if let Some(ref v) = host.link_sentinel {
            config.analysis.link_sentinel = Some(v.clone());
        }
        if let Some(v) = host.prerender_fixes {
            config.analysis.prerender_fixes = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
