//! Sentence boundary detection.

const ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "etc.", "vs.", "cf.", "approx.", "no."];

/// Whether the trimmed text ends with `.`, `!` or `?`.
pub fn ends_with_sentence_terminator(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?'])
}

/// Splits `text` into trimmed sentences.
///
/// A terminator ends a sentence only when it is followed by whitespace or the
/// end of input and does not close a known abbreviation.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for end in sentence_ends(text) {
        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Byte offsets just past each sentence terminator, by the rules of
/// [`split_sentences`].
pub fn sentence_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary && !(c == '.' && is_abbreviation(&text[..end])) {
            ends.push(end);
        }
    }
    ends
}

fn is_abbreviation(sentence_so_far: &str) -> bool {
    let last_word = sentence_so_far
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .to_lowercase();
    ABBREVIATIONS.contains(&last_word.trim_start_matches('('))
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
