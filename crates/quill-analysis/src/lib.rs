//! quill-analysis: documentation-comment analysis engine.
//!
//! - `comments`: markup → structured comment → sections → plain text
//! - `linguistics`: verb, noun and sentence helpers, commented-out code heuristics
//! - `matching`: phrase rules and their evaluation
//! - `rewrite`: structural transformations on comment trees
//! - `rules`: rule catalog, dispatcher, findings and fixes

pub mod comments;
pub mod linguistics;
pub mod matching;
pub mod rewrite;
pub mod rules;

pub use comments::{parse_document, Sections, StructuredComment};
pub use matching::{evaluate, MatchResult, PhraseRule};
pub use rules::{Dispatcher, Finding, FixOutput, RuleCatalog, Symbol};
