//! Rule catalog and dispatcher.
//!
//! Symbols come in from the host, applicable rules run against their
//! documentation sections, and failures go out as findings. Fix requests
//! re-resolve the section and apply the rule's rewrite.

pub mod builtin;
pub mod catalog;
pub mod dispatcher;
pub mod loader;
pub mod predicate;
pub mod reporters;
pub mod sink;
pub mod suppression;
pub mod symbol;
pub mod types;

pub use catalog::{Check, FixStrategy, Rule, RuleCatalog, SectionSelector, Selected};
pub use dispatcher::{DispatchOptions, Dispatcher};
pub use loader::CatalogLoader;
pub use predicate::{ParamFilter, Predicate};
pub use reporters::{create_reporter, Reporter};
pub use sink::{CollectingSink, DiagnosticSink};
pub use suppression::{SuppressionChecker, SuppressionDirective};
pub use symbol::{
    Accessibility, CommentStyle, CommentTrivia, Location, Modifiers, ParameterInfo, RefKind,
    Symbol, SymbolKind, TypeKind, TypeRef,
};
pub use types::{Finding, FixOutput, Severity};
