//! Documentation XML → [`StructuredComment`].
//!
//! The host hands us whatever the compiler produced: a full `<member>`
//! document, a bare run of `<summary>`/`<param>` elements without a root,
//! or something that does not parse at all. Every input yields a comment;
//! problems are reported as [`ExtractionError`] values next to it.

use std::sync::OnceLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use quill_core::errors::ExtractionError;

use super::model::{Element, Node, StructuredComment};
use super::sections::SectionTag;

const ROOT: &str = "quill-root";

/// Wrapper elements the compiler puts around the sections.
const WRAPPERS: &[&str] = &["doc", "members", "member"];

/// Result of parsing one documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub comment: StructuredComment,
    /// Sections that could not be read. Their siblings are still in `comment`.
    pub malformed: Vec<ExtractionError>,
}

/// Parse raw documentation markup. Never fails; empty input gives an empty comment.
pub fn parse_document(xml: &str) -> ParsedComment {
    let body = strip_declaration(xml);
    if body.trim().is_empty() {
        return ParsedComment::default();
    }

    match parse_nodes(body) {
        Ok(nodes) => ParsedComment {
            comment: StructuredComment::new(unwrap_wrappers(nodes)),
            malformed: Vec::new(),
        },
        Err(message) => {
            tracing::warn!(%message, "documentation markup does not parse, recovering per section");
            recover_sections(body, message)
        }
    }
}

/// Parse inline markup such as a rewrite phrase (`<see langword="true"/> to `).
/// Text that is not well-formed comes back as a single text run.
pub fn parse_fragment(text: &str) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    parse_nodes(text).unwrap_or_else(|_| vec![Node::Text(text.to_string())])
}

fn strip_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    xml
}

/// Parse `body` as the content of a synthetic root element.
fn parse_nodes(body: &str) -> Result<Vec<Node>, String> {
    let wrapped = format!("<{ROOT}>{body}</{ROOT}>");
    let mut reader = Reader::from_str(&wrapped);
    let mut stack: Vec<Element> = Vec::new();
    let mut finished: Option<Element> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let mut element = element_from(&start)?;
                element.self_closing = true;
                append(&mut stack, Node::Element(element))?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let element = stack.pop().ok_or_else(|| format!("unexpected </{name}>"))?;
                if element.name != name {
                    return Err(format!("expected </{}>, found </{name}>", element.name));
                }
                if stack.is_empty() {
                    finished = Some(element);
                } else {
                    append(&mut stack, Node::Element(element))?;
                }
            }
            Event::Text(text) => {
                let value = match text.unescape() {
                    Ok(v) => v.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                append_text(&mut stack, &value)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append_text(&mut stack, &value)?;
            }
            Event::Comment(text) => {
                let value = String::from_utf8_lossy(&text.into_inner()).into_owned();
                append(&mut stack, Node::Comment(value))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed <{}>", open.name));
    }
    finished
        .map(|root| root.children)
        .ok_or_else(|| "empty document".to_string())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn append(stack: &mut [Element], node: Node) -> Result<(), String> {
    let parent = stack.last_mut().ok_or("content outside the root element")?;
    parent.children.push(node);
    Ok(())
}

fn append_text(stack: &mut [Element], value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    let parent = stack.last_mut().ok_or("text outside the root element")?;
    match parent.children.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(value),
        _ => parent.children.push(Node::Text(value.to_string())),
    }
    Ok(())
}

/// Drop a single `<doc>`/`<member>` wrapper around the sections.
fn unwrap_wrappers(mut nodes: Vec<Node>) -> Vec<Node> {
    loop {
        let mut elements = nodes.iter().filter(|n| n.is_content());
        let only = match (elements.next(), elements.next()) {
            (Some(Node::Element(e)), None) if WRAPPERS.contains(&e.name.as_str()) => e.clone(),
            _ => return nodes,
        };
        nodes = only.children;
    }
}

fn section_open_tag() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"<(summary|param|typeparam|returns|value|exception|remarks|example|seealso)\b([^>]*?)(/?)>",
        )
        .ok()
    })
    .as_ref()
}

fn key_attribute() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\b(?:name|cref)\s*=\s*["']([^"']*)["']"#).ok())
        .as_ref()
}

/// Locate each known top-level section and parse it on its own.
fn recover_sections(body: &str, document_error: String) -> ParsedComment {
    let Some(open_re) = section_open_tag() else {
        return invalid(document_error);
    };

    let mut nodes = Vec::new();
    let mut malformed = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = open_re.captures_at(body, cursor) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let tag = tag.as_str();
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        let chunk_end = if self_closing {
            Some(whole.end())
        } else {
            let close = format!("</{tag}>");
            body[whole.end()..]
                .find(&close)
                .map(|offset| whole.end() + offset + close.len())
        };

        let Some(chunk_end) = chunk_end else {
            malformed.push(malformed_section(tag, attrs, format!("missing </{tag}>")));
            cursor = whole.end();
            continue;
        };

        let chunk = &body[whole.start()..chunk_end];
        match parse_nodes(chunk) {
            Ok(parsed) => {
                if !nodes.is_empty() {
                    nodes.push(Node::text("\n"));
                }
                nodes.extend(parsed.into_iter().filter(|n| !n.is_blank_text()));
            }
            Err(message) => {
                let error = malformed_section(tag, attrs, message);
                tracing::warn!(error = %error, "skipping malformed section");
                malformed.push(error);
            }
        }
        cursor = chunk_end;
    }

    if nodes.is_empty() && malformed.is_empty() {
        return invalid(document_error);
    }
    ParsedComment {
        comment: StructuredComment::new(nodes),
        malformed,
    }
}

fn malformed_section(tag: &str, attrs: &str, message: String) -> ExtractionError {
    let key = SectionTag::from_name(tag).key_attribute().and_then(|_| {
        key_attribute()
            .and_then(|re| re.captures(attrs))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    });
    ExtractionError::MalformedSection {
        tag: tag.to_string(),
        key,
        message,
    }
}

fn invalid(message: String) -> ParsedComment {
    ParsedComment {
        comment: StructuredComment::default(),
        malformed: vec![ExtractionError::InvalidDocument(message)],
    }
}
