//! Composable applicability predicates over symbols.

use std::fmt;
use std::sync::Arc;

use super::symbol::{ParameterInfo, RefKind, Symbol, SymbolKind};

/// A shareable `Fn(&Symbol) -> bool`, combined with `and` / `or` / `not`.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Symbol) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(&Symbol) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, symbol: &Symbol) -> bool {
        (self.0)(symbol)
    }

    pub fn any() -> Self {
        Self::new(|_| true)
    }

    pub fn kind(kind: SymbolKind) -> Self {
        Self::new(move |s| s.kind == kind)
    }

    pub fn kinds(kinds: &[SymbolKind]) -> Self {
        let kinds = kinds.to_vec();
        Self::new(move |s| kinds.contains(&s.kind))
    }

    pub fn name_starts_with(prefix: &str) -> Self {
        let prefix = prefix.to_string();
        Self::new(move |s| s.name.starts_with(&prefix))
    }

    pub fn name_ends_with(suffix: &str) -> Self {
        let suffix = suffix.to_string();
        Self::new(move |s| s.name.ends_with(&suffix))
    }

    pub fn returns_boolean() -> Self {
        Self::new(|s| s.return_type.as_ref().is_some_and(|t| t.is_boolean()))
    }

    pub fn returns_task() -> Self {
        Self::new(|s| s.return_type.as_ref().is_some_and(|t| t.is_task()))
    }

    pub fn containing_type_is_exception() -> Self {
        Self::new(|s| s.containing_type.as_ref().is_some_and(|t| t.is_exception()))
    }

    pub fn is_static() -> Self {
        Self::new(|s| s.modifiers.is_static)
    }

    pub fn is_readonly() -> Self {
        Self::new(|s| s.modifiers.is_readonly)
    }

    /// At least one parameter passes `filter`.
    pub fn has_parameter(filter: ParamFilter) -> Self {
        Self::new(move |s| s.parameters.iter().any(|p| filter.matches(p)))
    }

    pub fn and(self, other: Predicate) -> Self {
        Self::new(move |s| self.test(s) && other.test(s))
    }

    pub fn or(self, other: Predicate) -> Self {
        Self::new(move |s| self.test(s) || other.test(s))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |s| !self.test(s))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Which `<param>` sections a rule looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamFilter {
    All,
    Boolean,
    Enum,
    Out,
    Named(String),
    TypeNamed(String),
}

impl ParamFilter {
    pub fn matches(&self, parameter: &ParameterInfo) -> bool {
        match self {
            Self::All => true,
            Self::Boolean => parameter.ty.is_boolean(),
            Self::Enum => parameter.ty.is_enum(),
            Self::Out => parameter.ref_kind == RefKind::Out,
            Self::Named(name) => parameter.name == *name,
            Self::TypeNamed(name) => parameter.ty.name == *name || parameter.ty.full_name() == *name,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "all" => Self::All,
            "boolean" => Self::Boolean,
            "enum" => Self::Enum,
            "out" => Self::Out,
            other => {
                if let Some(name) = other.strip_prefix("named:") {
                    Self::Named(name.to_string())
                } else if let Some(name) = other.strip_prefix("type:") {
                    Self::TypeNamed(name.to_string())
                } else {
                    return None;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::symbol::TypeRef;

    fn try_get() -> Symbol {
        Symbol::new(SymbolKind::Method, "TryGetValue")
            .with_return_type(TypeRef::boolean())
            .with_parameter(ParameterInfo::new("value", TypeRef::new("", "T")).with_ref_kind(RefKind::Out))
    }

    #[test]
    fn test_combinators() {
        let p = Predicate::kind(SymbolKind::Method)
            .and(Predicate::name_starts_with("Try"))
            .and(Predicate::returns_boolean());
        assert!(p.test(&try_get()));
        assert!(!p.clone().not().test(&try_get()));
        let q = Predicate::kind(SymbolKind::Property).or(Predicate::name_ends_with("Value"));
        assert!(q.test(&try_get()));
    }

    #[test]
    fn test_param_filters() {
        let s = try_get();
        assert!(Predicate::has_parameter(ParamFilter::Out).test(&s));
        assert!(!Predicate::has_parameter(ParamFilter::Boolean).test(&s));
        assert_eq!(ParamFilter::parse("named:value"), Some(ParamFilter::Named("value".into())));
        assert_eq!(ParamFilter::parse("bogus"), None);
    }
}
