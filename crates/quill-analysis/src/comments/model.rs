//! Structured comment tree: text runs and inline markup elements.
//!
//! Trees are values. Edits go through the `with_*` / `without_*` builders,
//! which return a new tree and leave the receiver untouched.

use super::sections::SectionTag;

/// One node of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
    /// `<!-- .. -->`, kept so rewrites write it back.
    Comment(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Whitespace-only text runs carry formatting, not content.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }

    /// Text or markup that a reader sees; blank runs and XML comments are not.
    pub fn is_content(&self) -> bool {
        !self.is_blank_text() && !matches!(self, Node::Comment(_))
    }
}

/// What an element means inside a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupKind {
    /// `<see cref=".."/>`, `<see href=".."/>`, `<seealso cref=".."/>`
    CrossReference,
    /// `<c>` and `<code>`
    InlineCode,
    /// `<para>` and `<br/>`
    ParagraphBreak,
    /// `<paramref>` and `<typeparamref>`
    ParameterReference,
    /// `<see langword=".."/>`
    Langword,
    Section(SectionTag),
    Other,
}

/// A markup element with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Written as `<name/>`. Only meaningful while `children` is empty.
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A self-closing element such as `<para/>`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            self_closing: true,
            ..Default::default()
        }
    }

    /// `<see langword="word"/>`
    pub fn langword(word: &str) -> Self {
        Self::empty("see").with_attribute("langword", word)
    }

    /// `<see cref="target"/>`
    pub fn cref(target: &str) -> Self {
        Self::empty("see").with_attribute("cref", target)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.self_closing = self.self_closing && children.is_empty();
        self.children = children;
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_children(vec![Node::Text(text.into())])
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn kind(&self) -> MarkupKind {
        match self.name.as_str() {
            "see" if self.attribute("langword").is_some() => MarkupKind::Langword,
            "see" | "seealso" if self.attribute("cref").is_some() || self.attribute("href").is_some() => {
                MarkupKind::CrossReference
            }
            "c" | "code" => MarkupKind::InlineCode,
            "para" | "br" => MarkupKind::ParagraphBreak,
            "paramref" | "typeparamref" => MarkupKind::ParameterReference,
            name => match SectionTag::known(name) {
                Some(tag) => MarkupKind::Section(tag),
                None => MarkupKind::Other,
            },
        }
    }

    /// Reference markup whose rendered form is decided by the reader:
    /// links, parameter references and language keywords.
    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind(),
            MarkupKind::CrossReference | MarkupKind::ParameterReference | MarkupKind::Langword
        )
    }

    /// Raw concatenation of every text descendant.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Whether the element holds anything other than whitespace.
    pub fn has_content(&self) -> bool {
        self.children.iter().any(Node::is_content)
    }

    /// Every element below this one, depth-first in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
            Node::Comment(_) => {}
        }
    }
}

fn collect_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(e) = node {
            out.push(e);
            collect_elements(&e.children, out);
        }
    }
}

/// A whole documentation comment: the children of its (implicit) root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredComment {
    pub nodes: Vec<Node>,
}

impl StructuredComment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        !self.nodes.iter().any(Node::is_content)
    }

    /// Top-level elements with their node index.
    pub fn elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_element().map(|e| (i, e)))
    }

    /// Every element in the tree, depth-first in document order.
    pub fn all_elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(&self.nodes, &mut out);
        out
    }

    /// Copy of the comment with the top-level node at `index` replaced.
    /// An out-of-range index returns an unchanged copy.
    pub fn with_section(&self, index: usize, element: Element) -> Self {
        let mut nodes = self.nodes.clone();
        if let Some(slot) = nodes.get_mut(index) {
            *slot = Node::Element(element);
        }
        Self { nodes }
    }

    /// Copy of the comment without the top-level nodes at `indices`.
    pub fn without_nodes(&self, indices: &[usize]) -> Self {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, n)| n.clone())
            .collect();
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Element::langword("true").kind(), MarkupKind::Langword);
        assert_eq!(Element::cref("T:System.String").kind(), MarkupKind::CrossReference);
        assert_eq!(Element::new("c").kind(), MarkupKind::InlineCode);
        assert_eq!(Element::empty("para").kind(), MarkupKind::ParagraphBreak);
        assert_eq!(
            Element::empty("paramref").with_attribute("name", "x").kind(),
            MarkupKind::ParameterReference
        );
        assert_eq!(
            Element::new("summary").kind(),
            MarkupKind::Section(SectionTag::Summary)
        );
        assert_eq!(Element::new("list").kind(), MarkupKind::Other);
    }

    #[test]
    fn test_with_section_is_copy_on_write() {
        let original = StructuredComment::new(vec![
            Node::Element(Element::new("summary").with_text("A")),
            Node::text("\n"),
        ]);
        let edited = original.with_section(0, Element::new("summary").with_text("B"));
        assert_eq!(original.nodes[0].as_element().unwrap().text_content(), "A");
        assert_eq!(edited.nodes[0].as_element().unwrap().text_content(), "B");
        assert_eq!(edited.nodes[1], Node::text("\n"));
    }

    #[test]
    fn test_without_nodes() {
        let comment = StructuredComment::new(vec![Node::text("a"), Node::text("b"), Node::text("c")]);
        assert_eq!(comment.without_nodes(&[1]).nodes, vec![Node::text("a"), Node::text("c")]);
    }

    #[test]
    fn test_with_children_clears_self_closing() {
        let e = Element::empty("para").with_text("-or-");
        assert!(!e.self_closing);
        assert!(e.has_content());
    }
}
