//! Ordered batch find/replace over many patterns.

use aho_corasick::{AhoCorasick, BuildError, MatchKind};

use crate::comments::{Element, MarkupKind, Node};
use crate::linguistics::match_first_letter_case;
use crate::matching::terms::is_bounded;

use super::runs::normalize_element;

/// An explicitly ordered list of `(pattern, replacement)` pairs.
///
/// Selection is deterministic and does not depend on map iteration order:
/// the leftmost match wins; at the same position the longest pattern wins;
/// remaining ties go to the pattern declared first. Replaced text is never
/// rescanned. With word boundaries on, a match is only taken when it is
/// preceded by start/whitespace and followed by end/whitespace/punctuation;
/// a rejected match does not hide a shorter valid one at the same position.
#[derive(Debug, Clone)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
    case_sensitive: bool,
    word_boundaries: bool,
    automaton: AhoCorasick,
}

impl ReplacementMap {
    pub fn builder() -> ReplacementMapBuilder {
        ReplacementMapBuilder::default()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-overlapping selected matches as `(entry index, start, end)`.
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize, usize)> {
        let mut candidates: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(text)
            .map(|m| (m.pattern().as_usize(), m.start(), m.end()))
            .filter(|&(_, s, e)| s < e && (!self.word_boundaries || is_bounded(text, s, e)))
            .collect();
        candidates.sort_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)).then(a.0.cmp(&b.0)));

        let mut selected = Vec::new();
        let mut cursor = 0;
        for (entry, start, end) in candidates {
            if start >= cursor {
                selected.push((entry, start, end));
                cursor = end;
            }
        }
        selected
    }

    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for (entry, start, end) in self.find_matches(text) {
            out.push_str(&text[last..start]);
            let replacement = &self.entries[entry].1;
            if self.case_sensitive {
                out.push_str(replacement);
            } else {
                out.push_str(&match_first_letter_case(&text[start..end], replacement));
            }
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }

    /// Apply to every text run of `section`, skipping inline code and
    /// reference markup.
    pub fn apply_to_element(&self, section: &Element) -> Element {
        let mut out = section.clone();
        out.children = self.apply_to_nodes(&section.children);
        normalize_element(out)
    }

    fn apply_to_nodes(&self, nodes: &[Node]) -> Vec<Node> {
        nodes
            .iter()
            .map(|node| match node {
                Node::Text(text) => Node::Text(self.apply(text)),
                Node::Element(e) if e.kind() == MarkupKind::InlineCode || e.is_reference() => node.clone(),
                Node::Comment(_) => node.clone(),
                Node::Element(e) => {
                    let mut e = e.clone();
                    e.children = self.apply_to_nodes(&e.children);
                    Node::Element(e)
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ReplacementMapBuilder {
    entries: Vec<(String, String)>,
    case_sensitive: bool,
    word_boundaries: bool,
}

impl Default for ReplacementMapBuilder {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            case_sensitive: true,
            word_boundaries: true,
        }
    }
}

impl ReplacementMapBuilder {
    /// Add a pair. A pattern already present keeps its first replacement.
    pub fn add(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !pattern.is_empty() && !self.entries.iter().any(|(p, _)| *p == pattern) {
            self.entries.push((pattern, replacement.into()));
        }
        self
    }

    pub fn extend<I, P, R>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        pairs.into_iter().fold(self, |b, (p, r)| b.add(p, r))
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn word_boundaries(mut self, yes: bool) -> Self {
        self.word_boundaries = yes;
        self
    }

    pub fn build(self) -> Result<ReplacementMap, BuildError> {
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(!self.case_sensitive)
            .build(self.entries.iter().map(|(p, _)| p.as_str()))?;
        Ok(ReplacementMap {
            entries: self.entries,
            case_sensitive: self.case_sensitive,
            word_boundaries: self.word_boundaries,
            automaton,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_pattern_wins_at_position() {
        let map = ReplacementMap::builder()
            .add("fire", "raise")
            .add("fired", "raised")
            .add("fires", "raises")
            .build()
            .unwrap();
        assert_eq!(map.apply("Occurs when fired or when it fires."), "Occurs when raised or when it raises.");
    }

    #[test]
    fn test_first_declaration_wins_duplicate_pattern() {
        let map = ReplacementMap::builder()
            .add("info", "information")
            .add("info", "details")
            .build()
            .unwrap();
        assert_eq!(map.entries().len(), 1);
        assert_eq!(map.apply("More info."), "More information.");
    }

    #[test]
    fn test_boundary_rejection_keeps_shorter_match() {
        let map = ReplacementMap::builder()
            .add("a b", "X")
            .add("a", "Y")
            .build()
            .unwrap();
        // "a b" fails the trailing boundary ("a bc"), "a" still applies
        assert_eq!(map.apply("a bc"), "Y bc");
    }

    #[test]
    fn test_no_rescan_of_replacements() {
        let map = ReplacementMap::builder()
            .add("info", "information")
            .add("information", "info")
            .build()
            .unwrap();
        assert_eq!(map.apply("info information"), "information info");
    }

    #[test]
    fn test_case_insensitive_keeps_capital() {
        let map = ReplacementMap::builder()
            .add("fire", "raise")
            .case_sensitive(false)
            .build()
            .unwrap();
        assert_eq!(map.apply("Fire the event, then fire again."), "Raise the event, then raise again.");
    }

    #[test]
    fn test_without_boundaries() {
        let map = ReplacementMap::builder()
            .add("colour", "color")
            .word_boundaries(false)
            .build()
            .unwrap();
        assert_eq!(map.apply("colours"), "colors");
    }

    #[test]
    fn test_apply_to_element_skips_code() {
        let e = Element::new("summary").with_children(vec![
            Node::text("Raised on fire. "),
            Node::Element(Element::new("c").with_text("fire")),
        ]);
        let map = ReplacementMap::builder().add("fire", "raise").build().unwrap();
        let out = map.apply_to_element(&e);
        assert_eq!(out.children[0], Node::text("Raised on raise. "));
        assert_eq!(out.children[1].as_element().unwrap().text_content(), "fire");
    }
}
