//! Plural and singular noun forms.

use super::{is_vowel, match_first_letter_case};

/// (singular, plural) pairs that do not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("index", "indices"),
    ("datum", "data"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("vertex", "vertices"),
];

/// Singular nouns that end in `s`.
const SINGULAR_S_WORDS: &[&str] = &["alias", "bus", "canvas", "class", "process", "status", "this", "axis"];

pub fn to_plural(word: &str) -> String {
    if word.is_empty() || !word.is_ascii() {
        return word.to_string();
    }
    let lower = word.to_lowercase();

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_first_letter_case(word, plural);
    }

    let mut rev = lower.chars().rev();
    if let (Some('y'), Some(prev)) = (rev.next(), rev.next()) {
        if !is_vowel(prev) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

pub fn to_singular(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }
    let lower = word.to_lowercase();

    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return match_first_letter_case(word, singular);
    }
    if SINGULAR_S_WORDS.contains(&lower.as_str()) {
        return word.to_string();
    }
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if lower.ends_with("es") && SINGULAR_S_WORDS.contains(&&lower[..lower.len() - 2]) {
        return word[..word.len() - 2].to_string();
    }
    if ["sses", "xes", "zzes", "ches", "shes"].iter().any(|s| lower.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Heuristic check whether `word` is a plural noun.
pub fn is_plural(word: &str) -> bool {
    let lower = word.trim().to_lowercase();

    if IRREGULAR.iter().any(|(_, plural)| *plural == lower) {
        return true;
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == lower)
        || SINGULAR_S_WORDS.contains(&lower.as_str())
    {
        return false;
    }

    lower.len() > 2
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
}
