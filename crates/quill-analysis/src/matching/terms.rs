//! Multi-term search with word boundaries.

use aho_corasick::{AhoCorasick, BuildError, MatchKind};

/// A boundary-respecting hit of one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch {
    /// Index into the term list the set was built from.
    pub term: usize,
    pub start: usize,
    pub end: usize,
}

/// A compiled set of terms searched in one pass.
///
/// A hit only counts when it starts at the beginning of the text or after
/// whitespace, and ends at the end of the text, before whitespace, or before
/// one of `. , ; : ? !`. That keeps "info" from matching inside "infos" or
/// "information" while still matching "info." at the end of a sentence.
#[derive(Debug, Clone)]
pub struct TermSet {
    automaton: AhoCorasick,
    terms: Vec<String>,
}

impl TermSet {
    pub fn new<I, S>(terms: I, case_sensitive: bool) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(!case_sensitive)
            .build(&terms)?;
        Ok(Self { automaton, terms })
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All boundary-respecting hits, ordered by start, longer hits first at a position.
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        let mut hits: Vec<TermMatch> = self
            .automaton
            .find_overlapping_iter(text)
            .map(|m| TermMatch {
                term: m.pattern().as_usize(),
                start: m.start(),
                end: m.end(),
            })
            .filter(|m| m.start < m.end && is_bounded(text, m.start, m.end))
            .collect();
        hits.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(a.term.cmp(&b.term))
        });
        hits
    }

    /// The leftmost hit; longest wins at a position, then earliest term.
    pub fn find_first(&self, text: &str) -> Option<TermMatch> {
        self.find_all(text).into_iter().next()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.find_first(text).is_some()
    }
}

pub(crate) fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '?' | '!'));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let set = TermSet::new(["info"], true).unwrap();
        assert!(set.contains_any("More info here."));
        assert!(set.contains_any("See info."));
        assert!(set.contains_any("info"));
        assert!(set.contains_any("details, info; more"));
        assert!(!set.contains_any("More information here."));
        assert!(!set.contains_any("Get infos"));
        assert!(!set.contains_any("userinfo"));
    }

    #[test]
    fn test_overlapping_terms_prefer_longest() {
        let set = TermSet::new(["fire", "fired", "fires"], true).unwrap();
        let hit = set.find_first("Raised when fired.").unwrap();
        assert_eq!(set.term(hit.term), Some("fired"));
        assert_eq!(set.find_all("fire and fires").len(), 2);
    }

    #[test]
    fn test_case_insensitive() {
        let set = TermSet::new(["fire"], false).unwrap();
        assert!(set.contains_any("Fire the event"));
        let exact = TermSet::new(["fire"], true).unwrap();
        assert!(!exact.contains_any("Fire the event"));
    }
}
