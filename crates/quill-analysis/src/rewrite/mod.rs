//! Structural rewriter.
//!
//! Transformations operate on the comment tree, never on flattened text, and
//! return new trees. Markup that a transformation does not target comes
//! through unchanged and in order; output runs are always normalized (no
//! empty or adjacent text runs).

pub mod markup;
pub mod replace;
pub mod runs;
pub mod text;

pub use markup::{
    has_blank_line_artifacts, merge_duplicate_sections, merge_sections, normalize_blank_lines,
    normalize_section_blank_lines, replace_terms_with_markup, splice_link_and_text,
};
pub use replace::{ReplacementMap, ReplacementMapBuilder};
pub use runs::{normalize_element, normalize_runs};
pub use text::{append_phrase, prepend_phrase, prepend_sentence, replace_leading_word, replace_section_text};
