//! Rule catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where additional declarative rule catalogs come from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Extra TOML catalogs loaded after the built-in rules.
    #[serde(default)]
    pub extra_catalogs: Vec<PathBuf>,
    /// Skip the built-in rules entirely. Default: false.
    pub skip_builtin: Option<bool>,
}

impl CatalogConfig {
    pub fn effective_skip_builtin(&self) -> bool {
        self.skip_builtin.unwrap_or(false)
    }
}
