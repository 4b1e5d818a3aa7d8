//! Evaluation of a [`PhraseRule`] against plain text.
//!
//! `evaluate` is a pure function of the rule, the text and the template
//! context. Alternatives are tried in declared order: the order never changes
//! pass/fail, but it decides which phrase is echoed back.

use crate::comments::{first_word, trim_punctuation};

use super::rule::{MatchMode, PeriodPolicy, PhraseRule};
use super::template::{PhraseTemplate, TemplateContext};
use super::terms::{is_bounded, TermSet};

/// Outcome of one rule on one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Pass {
        /// The phrase that satisfied the rule, if the mode has one.
        matched: Option<String>,
    },
    Fail {
        proposal: String,
        /// The offending text: first word, forbidden term, or whole text.
        found: Option<String>,
    },
}

impl MatchResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, MatchResult::Pass { .. })
    }

    pub fn proposal(&self) -> Option<&str> {
        match self {
            MatchResult::Fail { proposal, .. } => Some(proposal),
            MatchResult::Pass { .. } => None,
        }
    }
}

pub fn evaluate(rule: &PhraseRule, text: &str, ctx: &TemplateContext) -> MatchResult {
    let text = text.trim();
    let result = match &rule.mode {
        MatchMode::StartsWith => find_candidate(ctx, &rule.phrases, |c| starts_with(rule, text, c))
            .map(pass)
            .unwrap_or_else(|| fail(rule, ctx, first_word(text))),
        MatchMode::EndsWith => find_candidate(ctx, &rule.phrases, |c| ends_with(rule, text, c))
            .map(pass)
            .unwrap_or_else(|| fail(rule, ctx, last_word(text))),
        MatchMode::ExactlyOneOf => find_candidate(ctx, &rule.phrases, |c| equals(rule, text, c))
            .map(pass)
            .unwrap_or_else(|| fail(rule, ctx, Some(text))),
        MatchMode::MustNotContainAnyOf => match find_forbidden(rule, text, ctx) {
            Some(term) => fail(rule, ctx, Some(&term)),
            None => MatchResult::Pass { matched: None },
        },
        MatchMode::MustNotStartWith => {
            match find_candidate(ctx, &rule.phrases, |c| starts_with_word(rule, text, c)) {
                Some(found) => {
                    let found = text.get(..found.trim().len()).unwrap_or(&found).to_string();
                    fail(rule, ctx, Some(&found))
                }
                None => MatchResult::Pass { matched: None },
            }
        }
        MatchMode::StartsAndEndsWith { ends } => evaluate_paired(rule, ends, text, ctx),
    };

    tracing::trace!(rule = %rule.id, mode = rule.mode.name(), pass = result.is_pass(), "evaluated");
    result
}

fn pass(matched: String) -> MatchResult {
    MatchResult::Pass { matched: Some(matched) }
}

fn fail(rule: &PhraseRule, ctx: &TemplateContext, found: Option<&str>) -> MatchResult {
    MatchResult::Fail {
        proposal: canonical_proposal(rule, ctx),
        found: found.map(String::from),
    }
}

/// The explicit proposal, else the first instantiable phrase in declared order.
/// Paired rules propose `start…end`.
pub fn canonical_proposal(rule: &PhraseRule, ctx: &TemplateContext) -> String {
    if let Some(proposal) = &rule.proposal {
        return proposal.clone();
    }
    let start = first_instance(&rule.phrases, ctx);
    match &rule.mode {
        MatchMode::StartsAndEndsWith { ends } => {
            format!("{}...{}", start, first_instance(ends, ctx))
        }
        _ => start,
    }
}

fn first_instance(templates: &[PhraseTemplate], ctx: &TemplateContext) -> String {
    templates
        .iter()
        .find_map(|t| t.instantiate(ctx).into_iter().next())
        .or_else(|| templates.first().map(|t| t.text.clone()))
        .unwrap_or_default()
}

/// First candidate across `templates`, in declared order, accepted by `accept`.
fn find_candidate(
    ctx: &TemplateContext,
    templates: &[PhraseTemplate],
    mut accept: impl FnMut(&str) -> bool,
) -> Option<String> {
    templates
        .iter()
        .flat_map(|t| t.instantiate(ctx))
        .find(|c| accept(c))
}

fn evaluate_paired(
    rule: &PhraseRule,
    ends: &[PhraseTemplate],
    text: &str,
    ctx: &TemplateContext,
) -> MatchResult {
    for (start, end) in rule.phrases.iter().zip(ends) {
        let starts = start.instantiate(ctx);
        let ends = end.instantiate(ctx);
        for s in starts.iter().filter(|s| starts_with(rule, text, s)) {
            let rest = &text[s.len().min(text.len())..];
            if let Some(e) = ends.iter().find(|e| ends_with(rule, rest, e)) {
                return pass(format!("{s}...{e}"));
            }
        }
    }
    fail(rule, ctx, first_word(text))
}

fn find_forbidden(rule: &PhraseRule, text: &str, ctx: &TemplateContext) -> Option<String> {
    if let Some(set) = rule.literal_terms() {
        return set
            .find_first(text)
            .map(|m| text[m.start..m.end].to_string());
    }
    let terms: Vec<String> = rule.phrases.iter().flat_map(|t| t.instantiate(ctx)).collect();
    let set = TermSet::new(terms, rule.options.case_sensitive).ok()?;
    set.find_first(text).map(|m| text[m.start..m.end].to_string())
}

fn last_word(text: &str) -> Option<&str> {
    text.split_whitespace().next_back()
}

fn eq_prefix(text: &str, phrase: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.starts_with(phrase)
    } else {
        text.get(..phrase.len())
            .is_some_and(|head| head.to_lowercase() == phrase.to_lowercase())
    }
}

fn eq_suffix(text: &str, phrase: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        text.ends_with(phrase)
    } else {
        text.len()
            .checked_sub(phrase.len())
            .and_then(|at| text.get(at..))
            .is_some_and(|tail| tail.to_lowercase() == phrase.to_lowercase())
    }
}

fn starts_with(rule: &PhraseRule, text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && eq_prefix(text, phrase, rule.options.case_sensitive)
}

fn without_period(s: &str) -> &str {
    s.trim_end().strip_suffix('.').unwrap_or(s).trim_end()
}

fn ends_with(rule: &PhraseRule, text: &str, phrase: &str) -> bool {
    let (text, phrase) = match rule.options.trailing_period {
        PeriodPolicy::Exact => (text.trim_end(), phrase),
        PeriodPolicy::Optional => (without_period(text), without_period(phrase)),
    };
    !phrase.is_empty() && eq_suffix(text, phrase, rule.options.case_sensitive)
}

fn equals(rule: &PhraseRule, text: &str, phrase: &str) -> bool {
    let (text, phrase) = match rule.options.trailing_period {
        PeriodPolicy::Exact => (text, phrase.trim()),
        PeriodPolicy::Optional => (without_period(text), without_period(phrase.trim())),
    };
    if rule.options.case_sensitive {
        text == phrase
    } else {
        text.to_lowercase() == phrase.to_lowercase()
    }
}

/// Phrase at the very start, followed by a word boundary.
fn starts_with_word(rule: &PhraseRule, text: &str, phrase: &str) -> bool {
    let phrase = phrase.trim();
    starts_with(rule, text, phrase) && is_bounded(text, 0, phrase.len())
}

/// First word without trailing punctuation.
pub fn leading_word(text: &str) -> Option<&str> {
    first_word(text).map(trim_punctuation).filter(|w| !w.is_empty())
}
