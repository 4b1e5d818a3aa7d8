//! Section → plain text.

use quill_core::constants::DEFAULT_LINK_SENTINEL;

use super::model::{Element, MarkupKind, Node};
use super::render::render_element;

/// How reference markup (links, `paramref`, `langword`) shows up in plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupRendering {
    /// Dropped. A link with inner text keeps that text.
    #[default]
    Strip,
    /// Replaced by the sentinel token so phrases can "see through" a link.
    Sentinel,
    /// Kept as canonical markup, e.g. `<see langword="true"/>`.
    Verbatim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    pub markup: MarkupRendering,
    pub sentinel: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            markup: MarkupRendering::Strip,
            sentinel: DEFAULT_LINK_SENTINEL.to_string(),
        }
    }
}

impl FlattenOptions {
    pub fn with_markup(markup: MarkupRendering, sentinel: &str) -> Self {
        Self {
            markup,
            sentinel: sentinel.to_string(),
        }
    }
}

/// Plain text of a section: markup removed per `options`, paragraph
/// markers removed, whitespace runs collapsed, trimmed.
///
/// Pure over the element; flattening the same tree twice gives the same string.
pub fn flatten(element: &Element, options: &FlattenOptions) -> String {
    flatten_nodes(&element.children, options)
}

pub fn flatten_nodes(nodes: &[Node], options: &FlattenOptions) -> String {
    let mut raw = String::new();
    write_nodes(nodes, options, &mut raw);
    collapse_whitespace(&raw)
}

fn write_nodes(nodes: &[Node], options: &FlattenOptions, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => write_element(element, options, out),
            Node::Comment(_) => {}
        }
    }
}

fn write_element(element: &Element, options: &FlattenOptions, out: &mut String) {
    match element.kind() {
        MarkupKind::ParagraphBreak => {
            out.push(' ');
            write_nodes(&element.children, options, out);
            out.push(' ');
        }
        MarkupKind::CrossReference | MarkupKind::ParameterReference | MarkupKind::Langword => {
            match options.markup {
                MarkupRendering::Strip => write_nodes(&element.children, options, out),
                MarkupRendering::Sentinel => out.push_str(&options.sentinel),
                MarkupRendering::Verbatim => out.push_str(&render_element(&canonical(element))),
            }
        }
        _ => write_nodes(&element.children, options, out),
    }
}

/// Reference markup without content is always written self-closing.
fn canonical(element: &Element) -> Element {
    let mut element = element.clone();
    element.self_closing = element.children.is_empty();
    element
}

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
