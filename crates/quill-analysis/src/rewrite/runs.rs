//! Text-run bookkeeping shared by the transformations.

use crate::comments::{Element, Node};

/// Merge adjacent text runs and drop empty ones, at every depth.
pub fn normalize_runs(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) if text.is_empty() => {}
            Node::Text(text) => match out.last_mut() {
                Some(Node::Text(prev)) => prev.push_str(&text),
                _ => out.push(Node::Text(text)),
            },
            Node::Element(element) => out.push(Node::Element(normalize_element(element))),
            comment @ Node::Comment(_) => out.push(comment),
        }
    }
    out
}

pub fn normalize_element(mut element: Element) -> Element {
    element.children = normalize_runs(std::mem::take(&mut element.children));
    element
}

/// Index of the first child that is text or markup.
pub(crate) fn first_content(children: &[Node]) -> Option<usize> {
    children.iter().position(Node::is_content)
}

/// Index of the last child that is text or markup.
pub(crate) fn last_content(children: &[Node]) -> Option<usize> {
    children.iter().rposition(Node::is_content)
}

/// `(leading whitespace, rest)`
pub(crate) fn split_leading_ws(text: &str) -> (&str, &str) {
    let body = text.trim_start();
    (&text[..text.len() - body.len()], body)
}

/// `(rest, trailing whitespace)`
pub(crate) fn split_trailing_ws(text: &str) -> (&str, &str) {
    let body = text.trim_end();
    (body, &text[body.len()..])
}

/// Whitespace that frames a section's content: `(leading, trailing)`.
pub(crate) fn framing_whitespace(children: &[Node]) -> (String, String) {
    let leading = children
        .iter()
        .take_while(|n| n.is_blank_text())
        .filter_map(Node::as_text)
        .collect::<String>();
    let leading = match first_content(children).and_then(|i| children[i].as_text()) {
        Some(text) => leading + split_leading_ws(text).0,
        None => leading,
    };

    let Some(last) = last_content(children) else {
        return (leading, String::new());
    };
    let mut trailing = match children[last].as_text() {
        Some(text) => split_trailing_ws(text).1.to_string(),
        None => String::new(),
    };
    trailing.extend(children[last + 1..].iter().filter_map(Node::as_text));
    (leading, trailing)
}
