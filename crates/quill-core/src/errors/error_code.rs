//! QuillErrorCode trait for structured error reporting to hosts.

/// Every error enum implements this to expose a stable, machine-readable
/// code next to its human-readable message.
pub trait QuillErrorCode {
    /// Returns the error code string (e.g., "CATALOG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_SECTION: &str = "MALFORMED_SECTION";
pub const INVALID_DOCUMENT: &str = "INVALID_DOCUMENT";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
