//! Word-level linguistic helpers used by phrase rules and fixes.
//!
//! Everything here is a pure function over `&str`; there is no shared state.

pub mod code;
pub mod nouns;
pub mod sentences;
pub mod verbs;
pub mod voice;

pub use code::CodeHeuristics;
pub use nouns::{is_plural, to_plural, to_singular};
pub use sentences::{ends_with_sentence_terminator, sentence_ends, split_sentences};
pub use verbs::{
    is_base_form_verb, is_third_person_singular_verb, to_gerund, to_infinitive,
    to_third_person_singular,
};
pub use voice::is_passive_voice_candidate;

pub(crate) fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Re-applies the capitalization of `original`'s first letter to `word`.
pub(crate) fn match_first_letter_case(original: &str, word: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
