//! Verb conjugation: infinitive, third-person singular, and gerund forms.

use super::{is_vowel, match_first_letter_case};

/// (infinitive, third-person singular) pairs that do not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[("be", "is"), ("have", "has"), ("do", "does"), ("go", "goes")];

/// Third-person forms ending in `-ches` whose infinitive keeps the `e`.
const E_FINAL_CHES: &[&str] = &["aches", "caches", "niches", "headaches"];

/// Words ending in `s` that read like a verb suffix but are not verbs.
const NON_VERB_S_WORDS: &[&str] = &[
    "always", "as", "its", "was", "this", "thus", "towards", "news", "perhaps", "sometimes",
    "whereas", "besides", "unless", "yes", "less",
];

/// Base-form verbs that commonly open a documentation summary.
const COMMON_BASE_VERBS: &[&str] = &[
    "accept", "add", "allow", "apply", "build", "calculate", "call", "cancel", "check",
    "clear", "close", "compare", "compute", "contain", "convert", "copy", "create", "decide",
    "delete", "determine", "dispose", "enable", "ensure", "evaluate", "execute", "fetch",
    "find", "flush", "format", "generate", "get", "handle", "indicate", "initialize",
    "insert", "invoke", "load", "map", "merge", "move", "notify", "open", "parse", "perform",
    "process", "provide", "read", "register", "release", "remove", "render", "replace",
    "represent", "reset", "resolve", "retrieve", "return", "run", "save", "search", "send",
    "set", "start", "stop", "store", "try", "update", "validate", "verify", "write",
];

/// Converts an infinitive to its third-person singular form.
///
/// Rules, in order: irregular table, consonant + `y` -> `ies`,
/// sibilant endings (`s`, `x`, `z`, `ch`, `sh`) -> `+es`, otherwise `+s`.
pub fn to_third_person_singular(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if !word.is_ascii() {
        return format!("{word}s");
    }
    let lower = word.to_lowercase();

    if let Some((_, third)) = IRREGULAR.iter().find(|(base, _)| *base == lower) {
        return match_first_letter_case(word, third);
    }

    if ends_with_consonant_y(&lower) {
        return format!("{}ies", &word[..word.len() - 1]);
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

/// Converts a third-person singular verb back to its infinitive.
/// Words that do not look conjugated are returned unchanged.
pub fn to_infinitive(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }
    let lower = word.to_lowercase();

    if let Some((base, _)) = IRREGULAR.iter().find(|(_, third)| *third == lower) {
        return match_first_letter_case(word, base);
    }
    if E_FINAL_CHES.contains(&lower.as_str()) {
        return word[..word.len() - 1].to_string();
    }
    if lower.len() > 4 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if ["sses", "xes", "zzes", "ches", "shes"].iter().any(|s| lower.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    if lower.len() > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Converts an infinitive to its gerund (`-ing`) form.
pub fn to_gerund(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if !word.is_ascii() {
        return format!("{word}ing");
    }
    let lower = word.to_lowercase();

    if lower.len() > 2 && lower.ends_with("ie") {
        return format!("{}ying", &word[..word.len() - 2]);
    }

    if lower.len() > 2
        && lower.ends_with('e')
        && !["ee", "ye", "oe"].iter().any(|s| lower.ends_with(s))
    {
        return format!("{}ing", &word[..word.len() - 1]);
    }

    if is_short_closed_syllable(&lower) {
        let last = &word[word.len() - 1..];
        return format!("{word}{last}ing");
    }

    format!("{word}ing")
}

/// Heuristic check whether `word` is a verb in third-person singular form.
pub fn is_third_person_singular_verb(word: &str) -> bool {
    let lower = word.trim().to_lowercase();

    if IRREGULAR.iter().any(|(_, third)| *third == lower) {
        return true;
    }
    if NON_VERB_S_WORDS.contains(&lower.as_str()) || lower.len() < 3 {
        return false;
    }

    lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
}

/// Whether `word` is a well-known verb in its base (infinitive) form.
pub fn is_base_form_verb(word: &str) -> bool {
    let lower = word.trim().to_lowercase();
    COMMON_BASE_VERBS.contains(&lower.as_str())
}

fn ends_with_consonant_y(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(prev)) => !is_vowel(prev),
        _ => false,
    }
}

/// One vowel group ending in consonant-vowel-consonant, final consonant not w/x/y.
fn is_short_closed_syllable(lower: &str) -> bool {
    let chars: Vec<char> = lower.chars().collect();
    let n = chars.len();
    if n < 3 || !chars.iter().all(char::is_ascii_alphabetic) {
        return false;
    }

    let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
    let cvc = !is_vowel(c1) && is_vowel(v) && !is_vowel(c2) && !matches!(c2, 'w' | 'x' | 'y');

    let vowel_groups = chars
        .iter()
        .zip(std::iter::once(&' ').chain(chars.iter()))
        .filter(|(c, prev)| is_vowel(**c) && !is_vowel(**prev))
        .count();

    cvc && vowel_groups == 1
}
