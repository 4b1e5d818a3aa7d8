//! Phrase rule descriptors.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::comments::MarkupRendering;

use super::template::PhraseTemplate;
use super::terms::TermSet;

/// How a rule's phrases are checked against a section's plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchMode {
    StartsWith,
    EndsWith,
    ExactlyOneOf,
    MustNotContainAnyOf,
    /// The first word(s) must not be any of the phrases.
    MustNotStartWith,
    /// Start with `phrases[i]` and end with `ends[i]` for the same `i`.
    StartsAndEndsWith { ends: Vec<PhraseTemplate> },
}

impl MatchMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::ExactlyOneOf => "exactly_one_of",
            Self::MustNotContainAnyOf => "must_not_contain",
            Self::MustNotStartWith => "must_not_start_with",
            Self::StartsAndEndsWith { .. } => "starts_and_ends_with",
        }
    }
}

/// Whether a trailing period is significant when comparing ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPolicy {
    #[default]
    Exact,
    /// "… the value" and "… the value." compare equal.
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub trailing_period: PeriodPolicy,
    /// How the section is flattened before matching.
    pub markup: MarkupRendering,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trailing_period: PeriodPolicy::Exact,
            markup: MarkupRendering::Strip,
        }
    }
}

/// An immutable phrase check: the phrase catalog, the mode and its options.
///
/// Which symbols and sections a phrase rule applies to lives on the
/// enclosing catalog rule.
#[derive(Debug, Clone)]
pub struct PhraseRule {
    pub id: String,
    pub phrases: Vec<PhraseTemplate>,
    pub mode: MatchMode,
    pub options: MatchOptions,
    /// Suggestion shown on failure instead of the first phrase.
    pub proposal: Option<String>,
    terms: OnceLock<Option<TermSet>>,
}

impl PhraseRule {
    pub fn new<I, P>(id: impl Into<String>, mode: MatchMode, phrases: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PhraseTemplate>,
    {
        Self {
            id: id.into(),
            phrases: phrases.into_iter().map(Into::into).collect(),
            mode,
            options: MatchOptions::default(),
            proposal: None,
            terms: OnceLock::new(),
        }
    }

    /// Paired start/end rule.
    pub fn paired<S, P, E, Q>(id: impl Into<String>, starts: S, ends: E) -> Self
    where
        S: IntoIterator<Item = P>,
        P: Into<PhraseTemplate>,
        E: IntoIterator<Item = Q>,
        Q: Into<PhraseTemplate>,
    {
        let ends = ends.into_iter().map(Into::into).collect();
        Self::new(id, MatchMode::StartsAndEndsWith { ends }, starts)
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self.terms = OnceLock::new();
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.options.case_sensitive = false;
        self.terms = OnceLock::new();
        self
    }

    pub fn optional_period(mut self) -> Self {
        self.options.trailing_period = PeriodPolicy::Optional;
        self
    }

    pub fn with_markup(mut self, markup: MarkupRendering) -> Self {
        self.options.markup = markup;
        self
    }

    pub fn with_proposal(mut self, proposal: impl Into<String>) -> Self {
        self.proposal = Some(proposal.into());
        self
    }

    /// Precompiled forbidden-term automaton, when every phrase is a literal.
    pub(crate) fn literal_terms(&self) -> Option<&TermSet> {
        self.terms
            .get_or_init(|| {
                if !self.phrases.iter().all(PhraseTemplate::is_literal) {
                    return None;
                }
                let texts = self.phrases.iter().map(|p| p.text.clone());
                match TermSet::new(texts, self.options.case_sensitive) {
                    Ok(set) => Some(set),
                    Err(e) => {
                        tracing::warn!(rule = %self.id, error = %e, "term automaton not built");
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl PartialEq for PhraseRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.phrases == other.phrases
            && self.mode == other.mode
            && self.options == other.options
            && self.proposal == other.proposal
    }
}
