//! Rule records and the build-once rule catalog.
//!
//! A rule is plain composition: an applicability predicate, a section
//! selector, a check and a fix strategy. There is no per-rule type.

use quill_core::config::QuillConfig;
use quill_core::errors::CatalogError;
use quill_core::types::FxHashMap;

use crate::comments::{CommentSection, SectionTag, Sections};
use crate::matching::{PhraseRule, PhraseTemplate};
use crate::rewrite::ReplacementMap;

use super::loader::CatalogLoader;
use super::predicate::{ParamFilter, Predicate};
use super::symbol::{ParameterInfo, Symbol};
use super::types::Severity;

/// Which sections of a comment a rule inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSelector {
    Summary,
    Returns,
    Value,
    Remarks,
    Example,
    Params(ParamFilter),
    Exceptions,
    AllSections,
}

/// A selected section and, for `<param>`, the parameter it documents.
#[derive(Debug, Clone, Copy)]
pub struct Selected<'a> {
    pub section: &'a CommentSection,
    pub param: Option<&'a ParameterInfo>,
}

impl SectionSelector {
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "summary" => Self::Summary,
            "returns" => Self::Returns,
            "value" => Self::Value,
            "remarks" => Self::Remarks,
            "example" => Self::Example,
            "exception" | "exceptions" => Self::Exceptions,
            "all" => Self::AllSections,
            "param" => Self::Params(ParamFilter::All),
            other => Self::Params(ParamFilter::parse(other.strip_prefix("param:")?)?),
        })
    }

    /// Matching sections in document order.
    pub fn select<'a>(&self, sections: &'a Sections, symbol: &'a Symbol) -> Vec<Selected<'a>> {
        let tagged = |tag: SectionTag| -> Vec<Selected<'a>> {
            sections
                .iter()
                .filter(|s| s.key.tag == tag)
                .map(|section| Selected { section, param: None })
                .collect()
        };

        match self {
            Self::Summary => tagged(SectionTag::Summary),
            Self::Returns => tagged(SectionTag::Returns),
            Self::Value => tagged(SectionTag::Value),
            Self::Remarks => tagged(SectionTag::Remarks),
            Self::Example => tagged(SectionTag::Example),
            Self::Exceptions => tagged(SectionTag::Exception),
            Self::AllSections => sections
                .iter()
                .map(|section| Selected { section, param: None })
                .collect(),
            Self::Params(filter) => sections
                .with_tag(&SectionTag::Param)
                .filter_map(|section| {
                    let param = section.key.name.as_deref().and_then(|n| symbol.parameter(n));
                    match (param, filter) {
                        (Some(p), f) if f.matches(p) => Some(Selected { section, param: Some(p) }),
                        (None, ParamFilter::All) => Some(Selected { section, param: None }),
                        _ => None,
                    }
                })
                .collect(),
        }
    }
}

/// What a rule checks.
#[derive(Debug, Clone)]
pub enum Check {
    Phrase(PhraseRule),
    /// More than one section of the tag with the same key.
    DuplicateSections(SectionTag),
    /// Blank lines that should be `<para/>` or are formatting artifacts.
    BlankLines,
    /// The first word must be a third-person singular verb, not its base form.
    LeadingVerbForm,
    /// Plain `//` and `/* */` comments that contain code.
    CommentedOutCode,
}

/// How a failing section is rewritten.
#[derive(Debug, Clone)]
pub enum FixStrategy {
    None,
    /// Put the proposal in front; the old first word continues the sentence.
    Prepend,
    Append,
    /// Replace a leading word from `words` with the proposal.
    ReplaceLeadingWord { words: Vec<String> },
    ReplaceTerms(ReplacementMap),
    /// Literal `true`/`false`/`null` → `<see langword=".."/>`.
    BooleanLangwords,
    /// Rewrite the first sentence to `before` + link to `target` + `after`.
    SpliceLink {
        before: PhraseTemplate,
        target: PhraseTemplate,
        after: PhraseTemplate,
    },
    /// Replace the section text with the proposal.
    ReplaceText,
    MergeDuplicates,
    NormalizeBlankLines,
    ThirdPersonVerb,
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub applies: Predicate,
    pub selector: SectionSelector,
    pub check: Check,
    pub fix: FixStrategy,
}

impl Rule {
    pub fn new(id: &str, title: &str, check: Check) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            severity: Severity::Warning,
            applies: Predicate::any(),
            selector: SectionSelector::Summary,
            check,
            fix: FixStrategy::None,
        }
    }

    /// A rule around a phrase check; the phrase rule carries the same id.
    pub fn phrase(title: &str, phrase: PhraseRule) -> Self {
        let id = phrase.id.clone();
        Self::new(&id, title, Check::Phrase(phrase))
    }

    pub fn applies_to(mut self, predicate: Predicate) -> Self {
        self.applies = predicate;
        self
    }

    pub fn on(mut self, selector: SectionSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_fix(mut self, fix: FixStrategy) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Build-once, read-only rule set, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
    by_id: FxHashMap<String, usize>,
}

impl RuleCatalog {
    /// Rejects duplicate rule ids.
    pub fn new(rules: Vec<Rule>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        catalog.extend(rules)?;
        Ok(catalog)
    }

    /// The rules shipped with the engine.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(super::builtin::rules()?)
    }

    /// Built-in rules (unless skipped) plus extra TOML catalogs, filtered
    /// and adjusted by the analysis config.
    pub fn from_config(config: &QuillConfig) -> Result<Self, CatalogError> {
        let mut rules = if config.catalog.effective_skip_builtin() {
            Vec::new()
        } else {
            super::builtin::rules()?
        };
        for path in &config.catalog.extra_catalogs {
            rules.extend(CatalogLoader::load_from_file(path)?);
        }

        let analysis = &config.analysis;
        let rules = rules
            .into_iter()
            .filter(|r| analysis.is_rule_enabled(&r.id))
            .map(|mut rule| {
                if let Some(severity) = analysis
                    .severity_overrides
                    .get(&rule.id)
                    .and_then(|s| Severity::parse_str(s))
                {
                    rule.severity = severity;
                }
                if analysis.is_case_insensitive(&rule.id) {
                    if let Check::Phrase(phrase) = &mut rule.check {
                        *phrase = phrase.clone().case_insensitive();
                    }
                }
                rule
            })
            .collect();

        let catalog = Self::new(rules)?;
        tracing::debug!(rules = catalog.len(), "rule catalog built");
        Ok(catalog)
    }

    pub fn extend(&mut self, rules: Vec<Rule>) -> Result<(), CatalogError> {
        for rule in rules {
            if self.by_id.contains_key(&rule.id) {
                return Err(CatalogError::DuplicateRuleId(rule.id));
            }
            self.by_id.insert(rule.id.clone(), self.rules.len());
            self.rules.push(rule);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.by_id.get(id).map(|&i| &self.rules[i])
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::parse_document;
    use crate::matching::MatchMode;
    use crate::rules::symbol::{SymbolKind, TypeRef};

    fn phrase_rule(id: &str) -> Rule {
        Rule::phrase("t", PhraseRule::new(id, MatchMode::StartsWith, ["Gets "]))
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = RuleCatalog::new(vec![phrase_rule("A"), phrase_rule("A")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRuleId(id) if id == "A"));
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = RuleCatalog::new(vec![phrase_rule("B"), phrase_rule("A")]).unwrap();
        assert!(catalog.get("A").is_some());
        let ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_param_selector() {
        let xml = r#"<param name="flag">F</param><param name="count">C</param><param name="gone">G</param>"#;
        let sections = Sections::extract(&parse_document(xml).comment);
        let symbol = Symbol::new(SymbolKind::Method, "Run")
            .with_parameter(ParameterInfo::new("flag", TypeRef::boolean()))
            .with_parameter(ParameterInfo::new("count", TypeRef::new("System", "Int32")));

        let booleans = SectionSelector::Params(ParamFilter::Boolean).select(&sections, &symbol);
        assert_eq!(booleans.len(), 1);
        assert_eq!(booleans[0].param.unwrap().name, "flag");

        let all = SectionSelector::Params(ParamFilter::All).select(&sections, &symbol);
        assert_eq!(all.len(), 3);
        assert!(all[2].param.is_none());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(SectionSelector::parse("summary"), Some(SectionSelector::Summary));
        assert_eq!(
            SectionSelector::parse("param:boolean"),
            Some(SectionSelector::Params(ParamFilter::Boolean))
        );
        assert_eq!(SectionSelector::parse("nope"), None);
    }
}
