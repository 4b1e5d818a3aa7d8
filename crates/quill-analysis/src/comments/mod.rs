//! Comment extraction: documentation markup → sections → plain text.

pub mod flatten;
pub mod model;
pub mod parser;
pub mod render;
pub mod sections;
pub mod words;

pub use flatten::{collapse_whitespace, flatten, flatten_nodes, FlattenOptions, MarkupRendering};
pub use model::{Element, MarkupKind, Node, StructuredComment};
pub use parser::{parse_document, parse_fragment, ParsedComment};
pub use render::{render, render_element, render_nodes};
pub use sections::{
    extract_sections, strip_doc_id_prefix, CommentSection, SectionKey, SectionTag, Sections,
};
pub use words::{first_word, strip_async_prefix, trim_punctuation, word_at, words};
