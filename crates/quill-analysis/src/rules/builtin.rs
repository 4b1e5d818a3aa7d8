//! Built-in rule table.
//!
//! Rules are data: each entry composes a predicate, a selector, a check and
//! a fix. Declaration order is finding order.

use quill_core::errors::CatalogError;

use crate::comments::{MarkupRendering, SectionTag};
use crate::matching::{MatchMode, PhraseRule, PhraseTemplate};
use crate::rewrite::ReplacementMap;

use super::catalog::{Check, FixStrategy, Rule, SectionSelector};
use super::predicate::{ParamFilter, Predicate};
use super::symbol::SymbolKind;
use super::types::Severity;

const TRUE_LANGWORD: &str = "<see langword=\"true\"/>";
const FALSE_LANGWORD: &str = "<see langword=\"false\"/>";

pub fn rules() -> Result<Vec<Rule>, CatalogError> {
    Ok(vec![
        Rule::phrase(
            "Event summary starts with 'Occurs'",
            PhraseRule::new("QL2001", MatchMode::StartsWith, ["Occurs "]),
        )
        .applies_to(Predicate::kind(SymbolKind::Event))
        .with_fix(FixStrategy::Prepend),
        Rule::phrase(
            "Property summary starts with 'Gets' or 'Sets'",
            PhraseRule::new(
                "QL2012",
                MatchMode::StartsWith,
                ["Gets ", "Gets or sets ", "Sets "],
            ),
        )
        .applies_to(Predicate::kinds(&[SymbolKind::Property, SymbolKind::Indexer]))
        .with_fix(FixStrategy::Prepend),
        Rule::phrase(
            "Dependency property field summary",
            PhraseRule::new(
                "QL2017",
                MatchMode::ExactlyOneOf,
                ["Identifies the {link} dependency property."],
            )
            .with_markup(MarkupRendering::Sentinel)
            .optional_period(),
        )
        .applies_to(
            Predicate::kind(SymbolKind::Field)
                .and(Predicate::is_static())
                .and(Predicate::is_readonly())
                .and(Predicate::name_ends_with("Property")),
        )
        .with_fix(FixStrategy::SpliceLink {
            before: PhraseTemplate::literal("Identifies the "),
            target: PhraseTemplate::literal("{containing_type}.{property}"),
            after: PhraseTemplate::literal(" dependency property."),
        }),
        Rule::phrase(
            "Boolean parameter documents both values",
            PhraseRule::paired(
                "QL2023",
                [format!("{TRUE_LANGWORD} to ")],
                [format!("otherwise, {FALSE_LANGWORD}.")],
            )
            .with_markup(MarkupRendering::Verbatim)
            .optional_period(),
        )
        .applies_to(Predicate::has_parameter(ParamFilter::Boolean))
        .on(SectionSelector::Params(ParamFilter::Boolean))
        .with_fix(FixStrategy::BooleanLangwords),
        Rule::phrase(
            "Boolean return documents both values",
            PhraseRule::paired(
                "QL2032",
                [format!("{TRUE_LANGWORD} if ")],
                [format!("; otherwise, {FALSE_LANGWORD}.")],
            )
            .with_markup(MarkupRendering::Verbatim)
            .optional_period(),
        )
        .applies_to(Predicate::kind(SymbolKind::Method).and(Predicate::returns_boolean()))
        .on(SectionSelector::Returns)
        .with_fix(FixStrategy::BooleanLangwords),
        Rule::phrase(
            "Summary does not start with 'Returns'",
            PhraseRule::new("QL2037", MatchMode::MustNotStartWith, ["Returns", "Return"])
                .with_proposal("Gets")
                .case_insensitive(),
        )
        .applies_to(Predicate::kinds(&[SymbolKind::Property, SymbolKind::Indexer]))
        .with_fix(FixStrategy::ReplaceLeadingWord {
            words: vec!["Returns".into(), "Return".into()],
        }),
        Rule::phrase(
            "Async method summary starts with 'Asynchronously'",
            PhraseRule::new("QL2040", MatchMode::StartsWith, ["Asynchronously "]),
        )
        .applies_to(Predicate::kind(SymbolKind::Method).and(Predicate::returns_task()))
        .with_severity(Severity::Info)
        .with_fix(FixStrategy::Prepend),
        Rule::phrase(
            "Serialization info parameter boilerplate",
            PhraseRule::new(
                "QL2050",
                MatchMode::ExactlyOneOf,
                ["The object that holds the serialized object data."],
            )
            .optional_period(),
        )
        .on(SectionSelector::Params(ParamFilter::TypeNamed(
            "System.Runtime.Serialization.SerializationInfo".into(),
        )))
        .with_fix(FixStrategy::ReplaceText),
        Rule::phrase(
            "Streaming context parameter boilerplate",
            PhraseRule::new(
                "QL2051",
                MatchMode::ExactlyOneOf,
                ["The contextual information about the source or destination."],
            )
            .optional_period(),
        )
        .on(SectionSelector::Params(ParamFilter::TypeNamed(
            "System.Runtime.Serialization.StreamingContext".into(),
        )))
        .with_fix(FixStrategy::ReplaceText),
        Rule::phrase(
            "Events are raised, not fired",
            PhraseRule::new(
                "QL2060",
                MatchMode::MustNotContainAnyOf,
                ["fire", "fired", "fires", "firing"],
            )
            .with_proposal("raise")
            .case_insensitive(),
        )
        .applies_to(Predicate::kind(SymbolKind::Event))
        .on(SectionSelector::AllSections)
        .with_fix(FixStrategy::ReplaceTerms(
            ReplacementMap::builder()
                .extend([
                    ("fire", "raise"),
                    ("fired", "raised"),
                    ("fires", "raises"),
                    ("firing", "raising"),
                ])
                .case_sensitive(false)
                .build()
                .map_err(|e| pattern_error("QL2060", e))?,
        )),
        Rule::phrase(
            "Try method summary starts with 'Attempts to'",
            PhraseRule::new("QL2070", MatchMode::StartsWith, ["Attempts to "]),
        )
        .applies_to(
            Predicate::kind(SymbolKind::Method)
                .and(Predicate::name_starts_with("Try"))
                .and(Predicate::returns_boolean()),
        )
        .with_fix(FixStrategy::Prepend),
        Rule::new(
            "QL2075",
            "Method summary starts with a third-person verb",
            Check::LeadingVerbForm,
        )
        .applies_to(Predicate::kinds(&[SymbolKind::Method, SymbolKind::Constructor]))
        .with_fix(FixStrategy::ThirdPersonVerb),
        Rule::phrase(
            "Enum parameter phrasing",
            PhraseRule::new(
                "QL2080",
                MatchMode::StartsWith,
                ["One of the enumeration members that specifies "],
            ),
        )
        .on(SectionSelector::Params(ParamFilter::Enum))
        .with_severity(Severity::Info),
        Rule::phrase(
            "Out parameter phrasing",
            PhraseRule::new("QL2085", MatchMode::StartsWith, ["On successful return, contains "]),
        )
        .on(SectionSelector::Params(ParamFilter::Out))
        .with_severity(Severity::Info),
        Rule::new(
            "QL2100",
            "Exception documented more than once",
            Check::DuplicateSections(SectionTag::Exception),
        )
        .on(SectionSelector::Exceptions)
        .with_fix(FixStrategy::MergeDuplicates),
        Rule::new("QL2200", "Blank lines inside documentation", Check::BlankLines)
            .on(SectionSelector::AllSections)
            .with_severity(Severity::Hint)
            .with_fix(FixStrategy::NormalizeBlankLines),
        Rule::phrase(
            "Write 'information', not 'info'",
            PhraseRule::new("QL2220", MatchMode::MustNotContainAnyOf, ["info"])
                .with_proposal("information"),
        )
        .on(SectionSelector::AllSections)
        .with_severity(Severity::Info)
        .with_fix(FixStrategy::ReplaceTerms(
            ReplacementMap::builder()
                .add("info", "information")
                .build()
                .map_err(|e| pattern_error("QL2220", e))?,
        )),
        Rule::new("QL4001", "Commented-out code", Check::CommentedOutCode),
    ])
}

pub(crate) fn pattern_error(id: &str, err: impl std::fmt::Display) -> CatalogError {
    CatalogError::InvalidPattern {
        id: id.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::catalog::RuleCatalog;

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert!(catalog.len() >= 15);
        assert!(catalog.get("QL2023").is_some());
        assert!(catalog.get("QL4001").is_some());
    }

    #[test]
    fn test_phrase_rules_share_rule_id() {
        for rule in rules().unwrap() {
            if let Check::Phrase(phrase) = &rule.check {
                assert_eq!(phrase.id, rule.id);
            }
        }
    }
}
