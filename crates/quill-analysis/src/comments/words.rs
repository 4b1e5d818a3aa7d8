//! Word tokenization over flattened text.

use quill_core::constants::ASYNC_PREFIX;

/// Whitespace-separated tokens of `text`.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// The `n`th word, zero-based.
pub fn word_at(text: &str, n: usize) -> Option<&str> {
    text.split_whitespace().nth(n)
}

/// Text after a leading "Asynchronously", or the input when there is none.
pub fn strip_async_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.get(..ASYNC_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(ASYNC_PREFIX) => {
            let rest = &trimmed[ASYNC_PREFIX.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                trimmed
            }
        }
        _ => trimmed,
    }
}

/// A word without trailing sentence punctuation.
pub fn trim_punctuation(word: &str) -> &str {
    word.trim_end_matches(['.', ',', ';', ':', '?', '!'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let text = "  Gets   the value. ";
        assert_eq!(first_word(text), Some("Gets"));
        assert_eq!(word_at(text, 2), Some("value."));
        assert_eq!(word_at(text, 3), None);
        assert_eq!(words(text), vec!["Gets", "the", "value."]);
        assert_eq!(first_word(""), None);
    }

    #[test]
    fn test_async_prefix() {
        assert_eq!(strip_async_prefix("Asynchronously gets the value."), "gets the value.");
        assert_eq!(strip_async_prefix("asynchronously Gets"), "Gets");
        assert_eq!(strip_async_prefix("AsynchronouslyX"), "AsynchronouslyX");
        assert_eq!(strip_async_prefix("Gets the value."), "Gets the value.");
    }

    #[test]
    fn test_trim_punctuation() {
        assert_eq!(trim_punctuation("value.;"), "value");
        assert_eq!(trim_punctuation("value"), "value");
    }
}
