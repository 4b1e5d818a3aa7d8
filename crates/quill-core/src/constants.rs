//! Shared constants for the quill analysis engine.

/// quill version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Token substituted for self-closing cross-references when a rule flattens
/// comment text in sentinel mode.
pub const DEFAULT_LINK_SENTINEL: &str = "§";

/// Whether findings carry a pre-rendered rewritten comment by default.
pub const DEFAULT_PRERENDER_FIXES: bool = true;

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "quill.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "QUILL_LOG";

/// Separator placed between merged duplicate sections.
pub const ALTERNATIVE_SEPARATOR: &str = "-or-";

/// Prefix that asynchronous member summaries start with.
pub const ASYNC_PREFIX: &str = "Asynchronously";
