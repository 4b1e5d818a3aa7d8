//! Markup-level rewrites: link splicing, section merging, paragraph breaks
//! and term → markup conversion.

use quill_core::constants::ALTERNATIVE_SEPARATOR;

use crate::comments::{strip_doc_id_prefix, Element, MarkupKind, Node, StructuredComment};
use crate::linguistics::sentence_ends;
use crate::matching::TermSet;

use super::runs::{framing_whitespace, normalize_element, normalize_runs, split_leading_ws};

/// Rewrite the first sentence of `section` to `before` + link + `after`.
///
/// A reference already present in that sentence pointing at the same target
/// (ignoring a documentation-id prefix) is reused instead of `link`. XML
/// comments in the sentence move in front of the new text. Any other markup
/// in the sentence leaves the section unchanged. Content after the first
/// sentence is kept as is.
pub fn splice_link_and_text(section: &Element, before: &str, link: &Element, after: &str) -> Element {
    let (leading, trailing) = framing_whitespace(&section.children);
    let (head, tail) = split_first_sentence(&section.children);

    let target = link_target(link);
    let mut existing: Option<&Element> = None;
    let mut comments = Vec::new();
    for node in &head {
        match node {
            Node::Element(e) if existing.is_none() && is_link_to(e, target) => existing = Some(e),
            Node::Element(_) => return normalize_element(section.clone()),
            Node::Comment(_) => comments.push(node.clone()),
            Node::Text(_) => {}
        }
    }
    let link = existing.unwrap_or(link).clone();

    let mut children = vec![Node::Text(leading)];
    children.extend(comments);
    children.extend([Node::text(before), Node::Element(link), Node::text(after)]);
    if tail.iter().any(|n| !n.is_blank_text()) {
        let mut tail = tail;
        if let Some(Node::Text(first)) = tail.first_mut() {
            *first = format!(" {}", first.trim_start());
        }
        if let Some(Node::Text(last)) = tail.last_mut() {
            *last = last.trim_end().to_string();
        }
        children.extend(tail);
    }
    children.push(Node::Text(trailing));

    let mut out = section.clone();
    out.children = children;
    normalize_element(out)
}

fn link_target(e: &Element) -> Option<&str> {
    e.attribute("cref").map(strip_doc_id_prefix)
}

fn is_link_to(e: &Element, target: Option<&str>) -> bool {
    e.kind() == MarkupKind::CrossReference && target.is_some() && link_target(e) == target
}

/// Split children at the end of the first sentence: a terminator followed by
/// whitespace with more content after it. Without one, everything is head.
fn split_first_sentence(children: &[Node]) -> (Vec<Node>, Vec<Node>) {
    for (i, node) in children.iter().enumerate() {
        let Node::Text(text) = node else { continue };
        let boundary = sentence_ends(text).into_iter().find(|&end| {
            let rest = &text[end..];
            let rest_has_content = !rest.trim().is_empty() || children[i + 1..].iter().any(Node::is_content);
            rest.starts_with(char::is_whitespace) && rest_has_content
        });
        if let Some(end) = boundary {
            let mut head = children[..i].to_vec();
            head.push(Node::text(&text[..end]));
            let mut tail = vec![Node::text(&text[end..])];
            tail.extend_from_slice(&children[i + 1..]);
            return (head, tail);
        }
    }
    (children.to_vec(), Vec::new())
}

/// Combine sections sharing a key into the first one, joining bodies with a
/// `<para>-or-</para>` separator. Framing whitespace of the later bodies is
/// dropped.
pub fn merge_sections(sections: &[&Element]) -> Option<Element> {
    let (first, rest) = sections.split_first()?;
    let mut merged = (*first).clone();
    let (_, trailing) = framing_whitespace(&merged.children);
    trim_trailing(&mut merged.children);

    for section in rest {
        merged
            .children
            .push(Node::Element(Element::new("para").with_text(ALTERNATIVE_SEPARATOR)));
        let mut body = section.children.clone();
        trim_leading(&mut body);
        trim_trailing(&mut body);
        merged.children.extend(body);
    }
    merged.children.push(Node::Text(trailing));
    Some(normalize_element(merged))
}

/// Merge the top-level sections at `indices` (first one survives) and remove
/// the others together with the blank text run that preceded each of them.
pub fn merge_duplicate_sections(comment: &StructuredComment, indices: &[usize]) -> StructuredComment {
    let elements: Vec<&Element> = indices
        .iter()
        .filter_map(|&i| comment.nodes.get(i).and_then(Node::as_element))
        .collect();
    let (Some(&first), Some(merged)) = (indices.first(), merge_sections(&elements)) else {
        return comment.clone();
    };
    if elements.len() < 2 {
        return comment.clone();
    }

    let mut removed = Vec::new();
    for &i in &indices[1..] {
        removed.push(i);
        if i > 0 && comment.nodes.get(i - 1).is_some_and(Node::is_blank_text) && !removed.contains(&(i - 1)) {
            removed.push(i - 1);
        }
    }

    let edited = comment.with_section(first, merged);
    StructuredComment::new(normalize_runs(edited.without_nodes(&removed).nodes))
}

fn trim_leading(nodes: &mut Vec<Node>) {
    while nodes.first().is_some_and(Node::is_blank_text) {
        nodes.remove(0);
    }
    if let Some(Node::Text(t)) = nodes.first_mut() {
        *t = t.trim_start().to_string();
    }
}

fn trim_trailing(nodes: &mut Vec<Node>) {
    while nodes.last().is_some_and(Node::is_blank_text) {
        nodes.pop();
    }
    if let Some(Node::Text(t)) = nodes.last_mut() {
        *t = t.trim_end().to_string();
    }
}

/// Turn interior blank lines into `<para/>` and trim blank lines directly
/// after the opening tag or before the closing tag.
pub fn normalize_section_blank_lines(section: &Element) -> Element {
    let mut children = normalize_runs(section.children.clone());

    if let Some(Node::Text(first)) = children.first_mut() {
        let (ws, body) = split_leading_ws(first);
        if ws.matches('\n').count() > 1 {
            let keep = from_last_line_break(ws);
            *first = format!("{keep}{body}");
        }
    }
    if let Some(Node::Text(last)) = children.last_mut() {
        let body = last.trim_end();
        let ws = &last[body.len()..];
        if ws.matches('\n').count() > 1 {
            let keep = from_last_line_break(ws);
            *last = format!("{body}{keep}");
        }
    }

    let mut out_children = Vec::with_capacity(children.len());
    let count = children.len();
    for (i, node) in children.into_iter().enumerate() {
        match node {
            Node::Text(text) => split_blank_lines(&text, i == 0, i + 1 == count, &mut out_children),
            other => out_children.push(other),
        }
    }

    let mut out = section.clone();
    out.children = out_children;
    normalize_element(out)
}

/// Whether [`normalize_section_blank_lines`] would change the section.
pub fn has_blank_line_artifacts(section: &Element) -> bool {
    normalize_section_blank_lines(section) != normalize_element(section.clone())
}

/// Apply [`normalize_section_blank_lines`] to every top-level section.
pub fn normalize_blank_lines(comment: &StructuredComment) -> StructuredComment {
    let nodes = comment
        .nodes
        .iter()
        .map(|n| match n {
            Node::Element(e) => Node::Element(normalize_section_blank_lines(e)),
            other => other.clone(),
        })
        .collect();
    StructuredComment::new(nodes)
}

/// Find blank lines (`\n`, optional spaces, `\n`...) inside `text` that are
/// not at the section edges and replace each with `<para/>`.
fn split_blank_lines(text: &str, is_first: bool, is_last: bool, out: &mut Vec<Node>) {
    let mut rest = text;
    let mut at_start = is_first;
    while let Some((start, end)) = find_blank_line(rest) {
        let before = &rest[..start];
        let after = &rest[end..];
        let leading_edge = at_start && before.trim().is_empty();
        let trailing_edge = is_last && after.trim().is_empty();
        if leading_edge || trailing_edge {
            break;
        }
        let indent = &rest[rest[..end].rfind('\n').map_or(start, |p| p + 1)..end];
        let eol = if rest[start..end].contains("\r\n") { "\r\n" } else { "\n" };
        out.push(Node::Text(format!("{before}{eol}{indent}")));
        out.push(Node::Element(Element::empty("para")));
        out.push(Node::Text(format!("{eol}{indent}")));
        rest = after;
        at_start = false;
    }
    out.push(Node::text(rest));
}

/// The tail of `ws` from its last line break, keeping a `\r` before the `\n`.
fn from_last_line_break(ws: &str) -> &str {
    match ws.rfind('\n') {
        Some(p) if ws[..p].ends_with('\r') => &ws[p - 1..],
        Some(p) => &ws[p..],
        None => ws,
    }
}

/// Byte range of the first blank-line run: from the first `\n` to the end of
/// the whitespace following the last `\n` in the run.
fn find_blank_line(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            let mut newlines = 1;
            let mut last_nl = i;
            while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t' || bytes[j] == b'\n' || bytes[j] == b'\r') {
                if bytes[j] == b'\n' {
                    newlines += 1;
                    last_nl = j;
                }
                j += 1;
            }
            if newlines > 1 {
                let start = text[..i].trim_end_matches([' ', '\t', '\r']).len();
                let end = last_nl + 1 + (text[last_nl + 1..j].len());
                return Some((start, end));
            }
            i = j;
        } else {
            i += 1;
        }
    }
    None
}

/// Replace whole-word occurrences of each term with a copy of its element,
/// e.g. `true` → `<see langword="true"/>`. Text inside inline code and
/// reference markup is left alone. The element is inserted as given, so a
/// case-insensitive match on `True` still yields the lowercase langword.
pub fn replace_terms_with_markup(section: &Element, terms: &[(&str, Element)], case_sensitive: bool) -> Element {
    let Ok(set) = TermSet::new(terms.iter().map(|(w, _)| *w), case_sensitive) else {
        return normalize_element(section.clone());
    };
    let mut out = section.clone();
    out.children = replace_in_nodes(&section.children, &set, terms);
    normalize_element(out)
}

fn replace_in_nodes(nodes: &[Node], set: &TermSet, terms: &[(&str, Element)]) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => {
                let mut last = 0;
                let mut cursor = 0;
                for hit in set.find_all(text) {
                    if hit.start < cursor {
                        continue;
                    }
                    out.push(Node::text(&text[last..hit.start]));
                    out.push(Node::Element(terms[hit.term].1.clone()));
                    last = hit.end;
                    cursor = hit.end;
                }
                out.push(Node::text(&text[last..]));
            }
            Node::Element(e) if e.kind() == MarkupKind::InlineCode || e.is_reference() => {
                out.push(node.clone());
            }
            Node::Comment(_) => out.push(node.clone()),
            Node::Element(e) => {
                let mut e = e.clone();
                e.children = replace_in_nodes(&e.children, set, terms);
                out.push(Node::Element(e));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{parse_document, render, render_element};

    fn first_section(xml: &str) -> Element {
        let parsed = parse_document(xml);
        let section = parsed.comment.elements().next().map(|(_, e)| e.clone()).unwrap();
        section
    }

    #[test]
    fn test_splice_creates_link() {
        let s = first_section("<summary>\n    The IsOpen property.\n    </summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:Acme.Widget.IsOpen"), " dependency property.");
        assert_eq!(
            render_element(&out),
            "<summary>\n    Identifies the <see cref=\"P:Acme.Widget.IsOpen\"/> dependency property.\n    </summary>"
        );
    }

    #[test]
    fn test_splice_reuses_existing_link() {
        let s = first_section("<summary>The <see cref=\"Acme.Widget.IsOpen\"/> property.</summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:Acme.Widget.IsOpen"), " dependency property.");
        let links: Vec<_> = out.descendants().into_iter().filter(|e| e.name == "see").collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attribute("cref"), Some("Acme.Widget.IsOpen"));
    }

    #[test]
    fn test_splice_keeps_later_sentences() {
        let s = first_section("<summary>The property. See <see cref=\"T:Other\"/>.</summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:X"), " dependency property.");
        assert_eq!(
            render_element(&out),
            "<summary>Identifies the <see cref=\"P:X\"/> dependency property. See <see cref=\"T:Other\"/>.</summary>"
        );
    }

    #[test]
    fn test_splice_leaves_foreign_markup_alone() {
        let s = first_section("<summary>The <c>IsOpen</c> flag of <see cref=\"T:Acme.Door\"/>.</summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:Acme.Widget.IsOpen"), " dependency property.");
        assert_eq!(out, s);
    }

    #[test]
    fn test_splice_keeps_xml_comment() {
        let s = first_section("<summary><!-- generated -->The IsOpen property.</summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:X"), " dependency property.");
        assert_eq!(
            render_element(&out),
            "<summary><!-- generated -->Identifies the <see cref=\"P:X\"/> dependency property.</summary>"
        );
    }

    #[test]
    fn test_splice_does_not_cut_at_abbreviation() {
        let s = first_section("<summary>The flag, e.g. for doors. Read only.</summary>");
        let out = splice_link_and_text(&s, "Identifies the ", &Element::cref("P:X"), " dependency property.");
        assert_eq!(
            render_element(&out),
            "<summary>Identifies the <see cref=\"P:X\"/> dependency property. Read only.</summary>"
        );
    }

    #[test]
    fn test_merge_duplicate_exceptions() {
        let xml = "<exception cref=\"T:System.InvalidOperationException\">A</exception>\n<exception cref=\"T:System.InvalidOperationException\">B</exception>";
        let comment = parse_document(xml).comment;
        assert_eq!(comment.nodes.len(), 3);
        let merged = merge_duplicate_sections(&comment, &[0, 2]);
        assert_eq!(merged.nodes.len(), 1);
        assert_eq!(
            render(&merged),
            "<exception cref=\"T:System.InvalidOperationException\">A<para>-or-</para>B</exception>"
        );
    }

    #[test]
    fn test_merge_needs_two_sections() {
        let comment = parse_document("<exception cref=\"T:X\">A</exception>").comment;
        assert_eq!(merge_duplicate_sections(&comment, &[0]), comment);
        assert_eq!(merge_duplicate_sections(&comment, &[]), comment);
    }

    #[test]
    fn test_merge_ignores_out_of_range_indices() {
        let xml = "<exception cref=\"T:X\">A</exception>\n<exception cref=\"T:X\">B</exception>";
        let comment = parse_document(xml).comment;
        let merged = merge_duplicate_sections(&comment, &[0, 2, 9]);
        assert_eq!(render(&merged), "<exception cref=\"T:X\">A<para>-or-</para>B</exception>");
    }

    #[test]
    fn test_blank_lines_become_paragraphs() {
        let s = first_section("<remarks>\n    First.\n\n    Second.\n    </remarks>");
        let out = normalize_section_blank_lines(&s);
        assert_eq!(
            render_element(&out),
            "<remarks>\n    First.\n    <para/>\n    Second.\n    </remarks>"
        );
        assert!(has_blank_line_artifacts(&s));
        assert!(!has_blank_line_artifacts(&out));
    }

    #[test]
    fn test_edge_blank_lines_are_trimmed() {
        let s = first_section("<remarks>\n\n    Only.\n\n    </remarks>");
        let out = normalize_section_blank_lines(&s);
        assert_eq!(render_element(&out), "<remarks>\n    Only.\n    </remarks>");
    }

    #[test]
    fn test_crlf_line_endings_are_kept() {
        let s = first_section("<remarks>\r\n\r\n    First.\r\n\r\n    Second.\r\n\r\n    </remarks>");
        let out = normalize_section_blank_lines(&s);
        assert_eq!(
            render_element(&out),
            "<remarks>\r\n    First.\r\n    <para/>\r\n    Second.\r\n    </remarks>"
        );
    }

    #[test]
    fn test_boolean_literals_become_langwords() {
        let s = first_section("<param name=\"enabled\">true to enable caching; otherwise, false.</param>");
        let terms = [("true", Element::langword("true")), ("false", Element::langword("false"))];
        let out = replace_terms_with_markup(&s, &terms, true);
        assert_eq!(
            render_element(&out),
            "<param name=\"enabled\"><see langword=\"true\"/> to enable caching; otherwise, <see langword=\"false\"/>.</param>"
        );
    }

    #[test]
    fn test_sentence_initial_literal_becomes_lowercase_langword() {
        let s = first_section("<param name=\"enabled\">True to enable caching; otherwise, False.</param>");
        let terms = [("true", Element::langword("true")), ("false", Element::langword("false"))];
        assert_eq!(replace_terms_with_markup(&s, &terms, true), s);
        let out = replace_terms_with_markup(&s, &terms, false);
        assert_eq!(
            render_element(&out),
            "<param name=\"enabled\"><see langword=\"true\"/> to enable caching; otherwise, <see langword=\"false\"/>.</param>"
        );
    }

    #[test]
    fn test_terms_inside_code_untouched() {
        let s = first_section("<summary>Use <c>true</c> or true.</summary>");
        let terms = [("true", Element::langword("true"))];
        let out = replace_terms_with_markup(&s, &terms, true);
        assert_eq!(render_element(&out), "<summary>Use <c>true</c> or <see langword=\"true\"/>.</summary>");
    }
}
