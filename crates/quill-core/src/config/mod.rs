//! Configuration system for quill.
//! TOML-based, layered resolution: host > env > project > user > defaults.

pub mod analysis_config;
pub mod catalog_config;
pub mod quill_config;

pub use analysis_config::AnalysisConfig;
pub use catalog_config::CatalogConfig;
pub use quill_config::{HostOverrides, QuillConfig};
