//! Phrase matching engine.

pub mod duplicates;
pub mod engine;
pub mod rule;
pub mod template;
pub mod terms;

pub use duplicates::{duplicate_keys, DuplicateGroup};
pub use engine::{canonical_proposal, evaluate, leading_word, MatchResult};
pub use rule::{MatchMode, MatchOptions, PeriodPolicy, PhraseRule};
pub use template::{Candidates, PhraseTemplate, TemplateContext, TypeName};
pub use terms::{TermMatch, TermSet};
