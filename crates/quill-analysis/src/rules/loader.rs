//! Declarative TOML rule catalogs, user-extensible without recompiling.
//!
//! ```toml
//! [[rules]]
//! id = "ACME001"
//! title = "Factory summary starts with 'Creates'"
//! applies_to = ["method"]
//! name_starts_with = "Create"
//! section = "summary"
//! mode = "starts_with"
//! phrases = ["Creates "]
//! fix = "prepend"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use quill_core::errors::CatalogError;

use crate::comments::{MarkupRendering, SectionTag};
use crate::matching::{MatchMode, PhraseRule, PhraseTemplate};
use crate::rewrite::ReplacementMap;

use super::builtin::pattern_error;
use super::catalog::{Check, FixStrategy, Rule, SectionSelector};
use super::predicate::Predicate;
use super::symbol::SymbolKind;
use super::types::Severity;

/// One `[[rules]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlRuleDef {
    pub id: String,
    pub title: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    /// `phrase` (default), `duplicate_sections`, `blank_lines`,
    /// `leading_verb_form` or `commented_out_code`.
    #[serde(default = "default_check")]
    pub check: String,
    #[serde(default)]
    pub applies_to: Vec<SymbolKind>,
    pub name_starts_with: Option<String>,
    pub name_ends_with: Option<String>,
    /// `boolean` or `task`.
    pub returns: Option<String>,
    #[serde(default = "default_section")]
    pub section: String,
    pub mode: Option<String>,
    #[serde(default)]
    pub phrases: Vec<PhraseTemplate>,
    #[serde(default)]
    pub ends: Vec<PhraseTemplate>,
    pub proposal: Option<String>,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub optional_period: bool,
    #[serde(default)]
    pub markup: MarkupRendering,
    #[serde(default = "default_fix")]
    pub fix: String,
    /// Ordered `[pattern, replacement]` pairs for `fix = "replace_terms"`.
    #[serde(default)]
    pub replacements: Vec<[String; 2]>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

fn default_severity() -> String {
    "warning".to_string()
}

fn default_check() -> String {
    "phrase".to_string()
}

fn default_section() -> String {
    "summary".to_string()
}

fn default_fix() -> String {
    "none".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlRuleFile {
    #[serde(default)]
    pub rules: Vec<TomlRuleDef>,
}

/// Loader for TOML rule catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load rules from a TOML string. Entries with `enabled = false` are skipped.
    pub fn load_from_str(toml_str: &str) -> Result<Vec<Rule>, CatalogError> {
        let file: TomlRuleFile = toml::from_str(toml_str)
            .map_err(|e| CatalogError::Parse(format!("TOML parse error: {e}")))?;

        let mut rules = Vec::new();
        for def in file.rules {
            if def.enabled == Some(false) {
                continue;
            }
            rules.push(Self::compile(def)?);
        }
        Ok(rules)
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<Rule>, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Parse(format!("failed to read {}: {e}", path.display())))?;
        Self::load_from_str(&content)
    }

    fn compile(def: TomlRuleDef) -> Result<Rule, CatalogError> {
        let severity = Severity::parse_str(&def.severity).ok_or_else(|| CatalogError::InvalidRule {
            id: def.id.clone(),
            message: format!("unknown severity '{}'", def.severity),
        })?;
        let selector = SectionSelector::parse(&def.section).ok_or_else(|| CatalogError::UnknownSection {
            id: def.id.clone(),
            section: def.section.clone(),
        })?;

        let check = match def.check.as_str() {
            "phrase" => Check::Phrase(Self::phrase_rule(&def)?),
            "duplicate_sections" => Check::DuplicateSections(match &selector {
                SectionSelector::Params(_) => SectionTag::Param,
                _ => SectionTag::Exception,
            }),
            "blank_lines" => Check::BlankLines,
            "leading_verb_form" => Check::LeadingVerbForm,
            "commented_out_code" => Check::CommentedOutCode,
            other => {
                return Err(CatalogError::InvalidRule {
                    id: def.id.clone(),
                    message: format!("unknown check '{other}'"),
                })
            }
        };

        let fix = Self::fix_strategy(&def)?;
        Ok(Rule::new(&def.id, &def.title, check)
            .with_severity(severity)
            .applies_to(Self::predicate(&def)?)
            .on(selector)
            .with_fix(fix))
    }

    fn phrase_rule(def: &TomlRuleDef) -> Result<PhraseRule, CatalogError> {
        if def.phrases.is_empty() {
            return Err(CatalogError::InvalidRule {
                id: def.id.clone(),
                message: "phrase rule without phrases".to_string(),
            });
        }
        let mode_name = def.mode.as_deref().unwrap_or("starts_with");
        let mode = match mode_name {
            "starts_with" => MatchMode::StartsWith,
            "ends_with" => MatchMode::EndsWith,
            "exactly_one_of" => MatchMode::ExactlyOneOf,
            "must_not_contain" => MatchMode::MustNotContainAnyOf,
            "must_not_start_with" => MatchMode::MustNotStartWith,
            "starts_and_ends_with" => {
                if def.ends.len() != def.phrases.len() {
                    return Err(CatalogError::InvalidRule {
                        id: def.id.clone(),
                        message: format!(
                            "{} start phrases but {} end phrases",
                            def.phrases.len(),
                            def.ends.len()
                        ),
                    });
                }
                MatchMode::StartsAndEndsWith { ends: def.ends.clone() }
            }
            other => {
                return Err(CatalogError::UnknownMode {
                    id: def.id.clone(),
                    mode: other.to_string(),
                })
            }
        };

        let mut rule = PhraseRule::new(def.id.clone(), mode, def.phrases.clone()).with_markup(def.markup);
        if !def.case_sensitive {
            rule = rule.case_insensitive();
        }
        if def.optional_period {
            rule = rule.optional_period();
        }
        if let Some(proposal) = &def.proposal {
            rule = rule.with_proposal(proposal.clone());
        }
        Ok(rule)
    }

    fn predicate(def: &TomlRuleDef) -> Result<Predicate, CatalogError> {
        let mut predicate = if def.applies_to.is_empty() {
            Predicate::any()
        } else {
            Predicate::kinds(&def.applies_to)
        };
        if let Some(prefix) = &def.name_starts_with {
            predicate = predicate.and(Predicate::name_starts_with(prefix));
        }
        if let Some(suffix) = &def.name_ends_with {
            predicate = predicate.and(Predicate::name_ends_with(suffix));
        }
        match def.returns.as_deref() {
            None => {}
            Some("boolean") => predicate = predicate.and(Predicate::returns_boolean()),
            Some("task") => predicate = predicate.and(Predicate::returns_task()),
            Some(other) => {
                return Err(CatalogError::InvalidRule {
                    id: def.id.clone(),
                    message: format!("unknown return filter '{other}'"),
                })
            }
        }
        Ok(predicate)
    }

    fn fix_strategy(def: &TomlRuleDef) -> Result<FixStrategy, CatalogError> {
        Ok(match def.fix.as_str() {
            "none" => FixStrategy::None,
            "prepend" => FixStrategy::Prepend,
            "append" => FixStrategy::Append,
            "replace_leading_word" => FixStrategy::ReplaceLeadingWord {
                words: def.phrases.iter().map(|p| p.text.trim().to_string()).collect(),
            },
            "replace_terms" => {
                let map = ReplacementMap::builder()
                    .extend(def.replacements.iter().map(|[p, r]| (p.clone(), r.clone())))
                    .case_sensitive(def.case_sensitive)
                    .build()
                    .map_err(|e| pattern_error(&def.id, e))?;
                FixStrategy::ReplaceTerms(map)
            }
            "boolean_langwords" => FixStrategy::BooleanLangwords,
            "replace_text" => FixStrategy::ReplaceText,
            "merge_duplicates" => FixStrategy::MergeDuplicates,
            "normalize_blank_lines" => FixStrategy::NormalizeBlankLines,
            "third_person_verb" => FixStrategy::ThirdPersonVerb,
            other => {
                return Err(CatalogError::InvalidRule {
                    id: def.id.clone(),
                    message: format!("unknown fix '{other}'"),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_phrase_rule() {
        let toml = r#"
[[rules]]
id = "ACME001"
title = "Factories create"
applies_to = ["method"]
name_starts_with = "Create"
mode = "starts_with"
phrases = ["Creates "]
fix = "prepend"

[[rules]]
id = "ACME002"
title = "off"
phrases = ["X"]
enabled = false
"#;
        let rules = CatalogLoader::load_from_str(toml).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "ACME001");
        assert!(matches!(rules[0].fix, FixStrategy::Prepend));
        assert!(matches!(&rules[0].check, Check::Phrase(p) if p.mode == MatchMode::StartsWith));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let toml = r#"
[[rules]]
id = "ACME003"
title = "bad"
mode = "sounds_like"
phrases = ["X"]
"#;
        let err = CatalogLoader::load_from_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownMode { mode, .. } if mode == "sounds_like"));
    }

    #[test]
    fn test_unpaired_ends_rejected() {
        let toml = r#"
[[rules]]
id = "ACME004"
title = "pairs"
mode = "starts_and_ends_with"
phrases = ["A", "B"]
ends = ["C"]
"#;
        assert!(matches!(
            CatalogLoader::load_from_str(toml),
            Err(CatalogError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_replacement_fix() {
        let toml = r#"
[[rules]]
id = "ACME005"
title = "spelling"
section = "all"
mode = "must_not_contain"
phrases = ["colour"]
fix = "replace_terms"
replacements = [["colour", "color"]]
"#;
        let rules = CatalogLoader::load_from_str(toml).unwrap();
        let FixStrategy::ReplaceTerms(map) = &rules[0].fix else {
            panic!("expected replace_terms");
        };
        assert_eq!(map.apply("the colour red"), "the color red");
        assert_eq!(rules[0].selector, SectionSelector::AllSections);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            CatalogLoader::load_from_str("[[rules]]\nid = 3"),
            Err(CatalogError::Parse(_))
        ));
    }
}
