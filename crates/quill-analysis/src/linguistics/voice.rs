//! Active vs. passive voice heuristics.

const BE_FORMS: &[&str] = &["is", "are", "was", "were", "be", "been", "being"];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "built", "caught", "chosen", "done", "found", "given", "held", "kept", "known", "left",
    "lost", "made", "read", "run", "said", "seen", "sent", "set", "shown", "thrown", "told",
    "thought", "written",
];

/// Whether `text` contains a form of *be* directly followed by a past
/// participle, e.g. "is created" or "was thrown".
pub fn is_passive_voice_candidate(text: &str) -> bool {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .collect();

    words.windows(2).any(|pair| {
        BE_FORMS.contains(&pair[0].as_str()) && is_past_participle(&pair[1])
    })
}

fn is_past_participle(word: &str) -> bool {
    if IRREGULAR_PARTICIPLES.contains(&word) {
        return true;
    }
    word.len() > 3 && (word.ends_with("ed") || word.ends_with("en"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_candidates() {
        assert!(is_passive_voice_candidate("The event is raised when done."));
        assert!(is_passive_voice_candidate("An exception was thrown."));
        assert!(is_passive_voice_candidate("The value has been written."));
        assert!(!is_passive_voice_candidate("Raises the event."));
        assert!(!is_passive_voice_candidate("The value is a number."));
    }
}
