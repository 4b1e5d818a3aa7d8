//! Commented-out code detection.

use rustc_hash::FxHashSet;

/// Statement starters that only appear at the start of code.
const CODE_PREFIXES: &[&str] = &[
    "var ", "if(", "if (", "switch(", "switch (", "for(", "foreach(", "foreach (", "while(",
    "using(", "using (", "lock(", "catch(", "try{", "else{", "} else", "#region", "#endregion",
    "return;", "break;", "continue;", "throw new ",
];

/// Punctuation clusters that practically never occur in prose.
const CODE_CLUSTERS: &[&str] = &["();", ");", "){", ") {", "};", "=>", "!=", "==", "&&", "||", "++", "--;", "[]", "::"];

/// Markers that start explanatory comments rather than code.
const TASK_MARKERS: &[&str] = &["TODO", "FIXME", "HACK", "NOTE", "BUG", "REVIEW"];

/// Heuristics for spotting code that was commented out instead of deleted.
///
/// `known_types` holds type names from the compilation's referenced
/// assemblies; a line whose first token is one of them is treated as a
/// declaration.
#[derive(Debug, Clone, Default)]
pub struct CodeHeuristics {
    known_types: FxHashSet<String>,
}

impl CodeHeuristics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_types: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn known_type_count(&self) -> usize {
        self.known_types.len()
    }

    /// Whether a single comment line looks like commented-out code.
    /// Comment markers (`//`, `/*`, `*/`, `*`) are stripped first.
    pub fn is_commented_out_code_line(&self, line: &str) -> bool {
        let text = strip_comment_markers(line);
        if text.is_empty() || is_never_code(text) {
            return false;
        }

        if CODE_PREFIXES.iter().any(|p| text.starts_with(p)) {
            return true;
        }

        if matches!(text, "{" | "}" | "};" | "});") {
            return true;
        }

        if text.ends_with(';') && (text.contains('(') || text.contains(" = ") || !text.contains(' ')) {
            return true;
        }

        if CODE_CLUSTERS.iter().any(|c| text.contains(c)) && !looks_like_sentence(text) {
            return true;
        }

        self.starts_with_known_type(text) && !looks_like_sentence(text)
    }

    fn starts_with_known_type(&self, text: &str) -> bool {
        let mut tokens = text.split_whitespace();
        let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
            return false;
        };
        let type_name = first.split(['<', '[', '?']).next().unwrap_or(first);
        let is_identifier = second
            .trim_end_matches([';', '=', ','])
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
        self.known_types.contains(type_name) && is_identifier
    }
}

fn strip_comment_markers(line: &str) -> &str {
    let mut text = line.trim();
    for prefix in ["///", "//", "/*", "*"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start();
            break;
        }
    }
    text.strip_suffix("*/").unwrap_or(text).trim()
}

fn is_never_code(text: &str) -> bool {
    if text.contains("http://") || text.contains("https://") {
        return true;
    }
    let first = text
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default();
    TASK_MARKERS.contains(&first)
}

/// Prose ends with a period after a word, not after a closing bracket.
fn looks_like_sentence(text: &str) -> bool {
    let Some(body) = text.strip_suffix('.') else {
        return false;
    };
    body.chars().last().is_some_and(char::is_alphanumeric) && body.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heuristics() -> CodeHeuristics {
        CodeHeuristics::with_known_types(["StringBuilder", "List", "int", "string"])
    }

    #[test]
    fn test_statements_are_code() {
        let h = heuristics();
        assert!(h.is_commented_out_code_line("// var x = 5;"));
        assert!(h.is_commented_out_code_line("//if(x > 3)"));
        assert!(h.is_commented_out_code_line("// DoSomething();"));
        assert!(h.is_commented_out_code_line("// }"));
        assert!(h.is_commented_out_code_line("// return;"));
        assert!(h.is_commented_out_code_line("// items.Where(x => x.IsValid)"));
    }

    #[test]
    fn test_known_type_declarations_are_code() {
        let h = heuristics();
        assert!(h.is_commented_out_code_line("// StringBuilder sb"));
        assert!(h.is_commented_out_code_line("// List<int> values = GetValues()"));
        assert!(!h.is_commented_out_code_line("// List all the values here."));
    }

    #[test]
    fn test_prose_is_not_code() {
        let h = heuristics();
        assert!(!h.is_commented_out_code_line("// Calculates the total before returning."));
        assert!(!h.is_commented_out_code_line("// TODO: remove once the cache is gone();"));
        assert!(!h.is_commented_out_code_line("// see https://example.com/a==b"));
        assert!(!h.is_commented_out_code_line("//"));
        assert!(!h.is_commented_out_code_line("// The value is used twice"));
    }
}
