//! [`StructuredComment`] → documentation XML.

use quick_xml::escape::{escape, partial_escape};

use super::model::{Element, Node, StructuredComment};

pub fn render(comment: &StructuredComment) -> String {
    render_nodes(&comment.nodes)
}

pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

pub fn render_element(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Node::Element(element) => write_element(element, out),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if element.children.is_empty() && element.self_closing {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::parser::parse_document;

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let e = Element::new("summary")
            .with_children(vec![Node::text("a < b & c "), Node::Element(Element::cref("List<T>"))]);
        assert_eq!(
            render_element(&e),
            r#"<summary>a &lt; b &amp; c <see cref="List&lt;T&gt;"/></summary>"#
        );
    }

    #[test]
    fn test_render_parse_round_trip() {
        let xml = "<summary>Gets <see cref=\"T:Foo\"/> &amp; more.</summary>\n<param name=\"x\">The <c>x</c>.</param>";
        let first = parse_document(xml).comment;
        let second = parse_document(&render(&first)).comment;
        assert_eq!(first, second);
    }

    #[test]
    fn test_xml_comments_survive_round_trip() {
        let xml = "<summary>The <!-- keep --> count.</summary>";
        let comment = parse_document(xml).comment;
        let summary = comment.nodes[0].as_element().unwrap();
        assert_eq!(summary.children[1], Node::Comment(" keep ".into()));
        assert_eq!(summary.text_content(), "The  count.");
        assert_eq!(render(&comment), xml);
    }

    #[test]
    fn test_empty_non_self_closing_element() {
        assert_eq!(render_element(&Element::new("remarks")), "<remarks></remarks>");
    }
}
