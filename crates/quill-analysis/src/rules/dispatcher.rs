//! Rule dispatcher: symbol → applicable rules → findings, and finding → fix.
//!
//! The dispatcher holds only the read-only catalog and its options. Every
//! call parses its own copy of the documentation, so calls for different
//! symbols can run concurrently without coordination.

use rayon::prelude::*;

use quill_core::config::{AnalysisConfig, QuillConfig};
use quill_core::constants::DEFAULT_LINK_SENTINEL;
use quill_core::errors::CatalogError;

use crate::comments::{
    flatten, parse_document, render, strip_async_prefix, Element, FlattenOptions, SectionKey,
    Sections, StructuredComment,
};
use crate::linguistics::{
    is_base_form_verb, is_third_person_singular_verb, match_first_letter_case,
    to_third_person_singular, CodeHeuristics,
};
use crate::matching::{duplicate_keys, evaluate, leading_word, MatchResult};
use crate::rewrite::{
    append_phrase, has_blank_line_artifacts, merge_duplicate_sections,
    normalize_section_blank_lines, prepend_sentence, replace_leading_word, replace_section_text,
    replace_terms_with_markup, splice_link_and_text,
};

use super::catalog::{Check, FixStrategy, Rule, RuleCatalog};
use super::sink::DiagnosticSink;
use super::suppression::SuppressionChecker;
use super::symbol::{CommentTrivia, Location, Symbol};
use super::types::{Finding, FixOutput};

/// Per-dispatcher settings, usually taken from [`AnalysisConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Token standing in for links when a rule matches with sentinel markup.
    pub link_sentinel: String,
    /// Attach the rewritten markup to each finding that has a fix.
    pub prerender_fixes: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            link_sentinel: DEFAULT_LINK_SENTINEL.to_string(),
            prerender_fixes: true,
        }
    }
}

impl DispatchOptions {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            link_sentinel: config.effective_link_sentinel().to_string(),
            prerender_fixes: config.effective_prerender_fixes(),
        }
    }
}

/// A failing section, before it becomes a [`Finding`].
#[derive(Debug, Clone)]
struct Violation {
    key: SectionKey,
    /// Node index of the offending section.
    index: usize,
    /// All node indices involved; more than one for duplicate sections.
    indices: Vec<usize>,
    proposal: String,
    found: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: RuleCatalog,
    options: DispatchOptions,
}

impl Dispatcher {
    pub fn new(catalog: RuleCatalog, options: DispatchOptions) -> Self {
        Self { catalog, options }
    }

    pub fn from_config(config: &QuillConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            RuleCatalog::from_config(config)?,
            DispatchOptions::from_config(&config.analysis),
        ))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Findings for one symbol, ordered by rule declaration order and then
    /// by section document order. Missing or unparseable documentation
    /// yields no findings.
    pub fn analyze(&self, symbol: &Symbol) -> Vec<Finding> {
        let Some(xml) = symbol.documentation.as_deref() else {
            return Vec::new();
        };
        let _span = tracing::debug_span!("analyze", symbol = %symbol.name).entered();

        let parsed = parse_document(xml);
        for error in &parsed.malformed {
            tracing::warn!(symbol = %symbol.name, %error, "skipping malformed documentation");
        }
        let comment = &parsed.comment;
        let sections = Sections::extract(comment);

        let mut findings = Vec::new();
        for rule in self.catalog.iter() {
            if matches!(rule.check, Check::CommentedOutCode) || !rule.applies.test(symbol) {
                continue;
            }
            for violation in self.violations(rule, symbol, &sections) {
                let fix = if self.options.prerender_fixes {
                    self.apply_fix(rule, symbol, comment, &sections, &violation)
                        .map(|c| render(&c))
                } else {
                    None
                };
                findings.push(Finding {
                    rule_id: rule.id.clone(),
                    severity: rule.severity,
                    location: symbol.location.clone(),
                    symbol: symbol.name.clone(),
                    message: message(rule, &violation),
                    section: Some(violation.key),
                    proposal: violation.proposal,
                    fix,
                });
            }
        }

        tracing::debug!(findings = findings.len(), "symbol analyzed");
        findings
    }

    pub fn analyze_into(&self, symbol: &Symbol, sink: &mut dyn DiagnosticSink) {
        for finding in self.analyze(symbol) {
            sink.report(finding);
        }
    }

    /// Analyze independent symbols in parallel; results keep input order.
    pub fn analyze_batch(&self, symbols: &[Symbol]) -> Vec<Vec<Finding>> {
        symbols.par_iter().map(|s| self.analyze(s)).collect()
    }

    /// Commented-out code in plain comments. A `quill-ignore` directive on
    /// the line above a comment suppresses its findings.
    pub fn analyze_trivia(&self, trivia: &[CommentTrivia], heuristics: &CodeHeuristics) -> Vec<Finding> {
        let suppression = SuppressionChecker::new();
        let mut findings = Vec::new();

        for rule in self
            .catalog
            .iter()
            .filter(|r| matches!(r.check, Check::CommentedOutCode))
        {
            for comment in trivia {
                let suppressed = comment
                    .preceding_line
                    .as_deref()
                    .is_some_and(|line| suppression.line_suppresses(line, &rule.id));
                if suppressed {
                    tracing::debug!(rule = %rule.id, file = %comment.location.file, "suppressed");
                    continue;
                }

                let Some((offset, line)) = comment
                    .text
                    .lines()
                    .enumerate()
                    .find(|(_, line)| heuristics.is_commented_out_code_line(line))
                else {
                    continue;
                };

                findings.push(Finding {
                    rule_id: rule.id.clone(),
                    severity: rule.severity,
                    location: Location {
                        line: comment.location.line + offset as u32,
                        ..comment.location.clone()
                    },
                    symbol: String::new(),
                    section: None,
                    message: format!("{} (found '{}')", rule.title, line.trim()),
                    proposal: "Remove the commented-out code".to_string(),
                    fix: None,
                });
            }
        }
        findings
    }

    /// Rewrite the comment for a previously reported finding.
    ///
    /// The documentation is re-parsed from the symbol snapshot and the rule
    /// is evaluated again, so a finding whose section already passes (for
    /// example because the fix was applied) yields `None`.
    pub fn fix(&self, symbol: &Symbol, finding: &Finding) -> Option<FixOutput> {
        let rule = self.catalog.get(&finding.rule_id)?;
        let key = finding.section.as_ref()?;
        let xml = symbol.documentation.as_deref()?;

        let parsed = parse_document(xml);
        let sections = Sections::extract(&parsed.comment);
        let violation = self
            .violations(rule, symbol, &sections)
            .into_iter()
            .find(|v| v.key.matches(key))?;

        let comment = self.apply_fix(rule, symbol, &parsed.comment, &sections, &violation)?;
        tracing::debug!(rule = %rule.id, section = %violation.key, "fix applied");
        Some(FixOutput {
            rule_id: rule.id.clone(),
            section: Some(violation.key),
            xml: render(&comment),
            comment,
        })
    }

    fn violations(&self, rule: &Rule, symbol: &Symbol, sections: &Sections) -> Vec<Violation> {
        let selected = rule.selector.select(sections, symbol);
        match &rule.check {
            Check::Phrase(phrase) => {
                let options = FlattenOptions::with_markup(phrase.options.markup, &self.options.link_sentinel);
                selected
                    .into_iter()
                    .filter_map(|sel| {
                        let text = flatten(&sel.section.element, &options);
                        if text.is_empty() {
                            return None;
                        }
                        let ctx = symbol.template_context(sel.param, &self.options.link_sentinel);
                        match evaluate(phrase, &text, &ctx) {
                            MatchResult::Pass { .. } => None,
                            MatchResult::Fail { proposal, found } => Some(Violation {
                                key: sel.section.key.clone(),
                                index: sel.section.index,
                                indices: vec![sel.section.index],
                                proposal,
                                found,
                            }),
                        }
                    })
                    .collect()
            }
            Check::DuplicateSections(tag) => duplicate_keys(sections, tag)
                .into_iter()
                .map(|group| Violation {
                    proposal: format!("Merge the {} <{}> sections into one", group.indices.len(), tag),
                    found: group.key.name.clone(),
                    index: group.indices[0],
                    key: group.key,
                    indices: group.indices,
                })
                .collect(),
            Check::BlankLines => selected
                .into_iter()
                .filter(|sel| has_blank_line_artifacts(&sel.section.element))
                .map(|sel| Violation {
                    key: sel.section.key.clone(),
                    index: sel.section.index,
                    indices: vec![sel.section.index],
                    proposal: "<para/>".to_string(),
                    found: None,
                })
                .collect(),
            Check::LeadingVerbForm => selected
                .into_iter()
                .filter_map(|sel| {
                    let text = flatten(&sel.section.element, &FlattenOptions::default());
                    let word = leading_word(strip_async_prefix(&text))?;
                    if !is_base_form_verb(word) || is_third_person_singular_verb(word) {
                        return None;
                    }
                    Some(Violation {
                        key: sel.section.key.clone(),
                        index: sel.section.index,
                        indices: vec![sel.section.index],
                        proposal: match_first_letter_case(word, &to_third_person_singular(word)),
                        found: Some(word.to_string()),
                    })
                })
                .collect(),
            Check::CommentedOutCode => Vec::new(),
        }
    }

    /// The rewritten comment, or `None` when the strategy has nothing to do.
    fn apply_fix(
        &self,
        rule: &Rule,
        symbol: &Symbol,
        comment: &StructuredComment,
        sections: &Sections,
        violation: &Violation,
    ) -> Option<StructuredComment> {
        let section = &sections.iter().find(|s| s.index == violation.index)?.element;
        let proposal = violation.proposal.as_str();

        let rewritten: Element = match &rule.fix {
            FixStrategy::None => return None,
            FixStrategy::Prepend => prepend_sentence(section, proposal),
            FixStrategy::Append => append_phrase(section, proposal),
            FixStrategy::ReplaceLeadingWord { words } => {
                let found = violation.found.as_deref()?;
                let old = words.iter().find(|w| w.eq_ignore_ascii_case(found))?;
                replace_leading_word(section, old, proposal)
            }
            FixStrategy::ThirdPersonVerb => {
                replace_leading_word(section, violation.found.as_deref()?, proposal)
            }
            FixStrategy::ReplaceTerms(map) => map.apply_to_element(section),
            FixStrategy::BooleanLangwords => replace_terms_with_markup(
                section,
                &[
                    ("true", Element::langword("true")),
                    ("false", Element::langword("false")),
                    ("null", Element::langword("null")),
                ],
                false,
            ),
            FixStrategy::SpliceLink { before, target, after } => {
                let ctx = symbol.template_context(None, &self.options.link_sentinel);
                let before = before.instantiate(&ctx).into_iter().next()?;
                let target = target.instantiate(&ctx).into_iter().last()?;
                let after = after.instantiate(&ctx).into_iter().next()?;
                splice_link_and_text(section, &before, &Element::cref(&target), &after)
            }
            FixStrategy::ReplaceText => replace_section_text(section, proposal),
            FixStrategy::NormalizeBlankLines => normalize_section_blank_lines(section),
            FixStrategy::MergeDuplicates => {
                let merged = merge_duplicate_sections(comment, &violation.indices);
                return (merged != *comment).then_some(merged);
            }
        };

        let out = comment.with_section(violation.index, rewritten);
        (out != *comment).then_some(out)
    }
}

fn message(rule: &Rule, violation: &Violation) -> String {
    match &violation.found {
        Some(found) => format!("{} (found '{found}', proposed '{}')", rule.title, violation.proposal),
        None => format!("{} (proposed '{}')", rule.title, violation.proposal),
    }
}
