//! Error handling for quill.
//! One error enum per subsystem, `thiserror` only.

pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod extraction_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::QuillErrorCode;
pub use extraction_error::ExtractionError;
