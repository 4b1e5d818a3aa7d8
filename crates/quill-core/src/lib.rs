//! quill-core: errors, configuration, tracing, and shared types for the
//! quill documentation-comment analysis engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
