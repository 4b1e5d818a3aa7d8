//! Logical sections of a documentation comment.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{Element, StructuredComment};

/// Top-level documentation tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionTag {
    Summary,
    Param,
    TypeParam,
    Returns,
    Value,
    Exception,
    Remarks,
    Example,
    SeeAlso,
    Other(String),
}

impl SectionTag {
    /// The tag for a known section name, `None` for anything else.
    pub fn known(name: &str) -> Option<Self> {
        Some(match name {
            "summary" => Self::Summary,
            "param" => Self::Param,
            "typeparam" => Self::TypeParam,
            "returns" => Self::Returns,
            "value" => Self::Value,
            "exception" => Self::Exception,
            "remarks" => Self::Remarks,
            "example" => Self::Example,
            "seealso" => Self::SeeAlso,
            _ => return None,
        })
    }

    pub fn from_name(name: &str) -> Self {
        Self::known(name).unwrap_or_else(|| Self::Other(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Summary => "summary",
            Self::Param => "param",
            Self::TypeParam => "typeparam",
            Self::Returns => "returns",
            Self::Value => "value",
            Self::Exception => "exception",
            Self::Remarks => "remarks",
            Self::Example => "example",
            Self::SeeAlso => "seealso",
            Self::Other(name) => name,
        }
    }

    /// Attribute carrying the secondary key, if the tag has one.
    pub fn key_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Param | Self::TypeParam => Some("name"),
            Self::Exception | Self::SeeAlso => Some("cref"),
            _ => None,
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(tag, optional secondary identifier)`, e.g. `Param["value"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub tag: SectionTag,
    pub name: Option<String>,
}

impl SectionKey {
    pub fn new(tag: SectionTag, name: Option<String>) -> Self {
        Self { tag, name }
    }

    pub fn summary() -> Self {
        Self::new(SectionTag::Summary, None)
    }

    pub fn param(name: &str) -> Self {
        Self::new(SectionTag::Param, Some(name.to_string()))
    }

    pub fn exception(cref: &str) -> Self {
        Self::new(SectionTag::Exception, Some(cref.to_string()))
    }

    /// Secondary key with any documentation-id prefix (`T:`, `M:`, `!:`) removed.
    pub fn normalized_name(&self) -> Option<&str> {
        self.name.as_deref().map(strip_doc_id_prefix)
    }

    /// Key equality where `T:System.X` and `System.X` are the same exception.
    pub fn matches(&self, other: &SectionKey) -> bool {
        self.tag == other.tag && self.normalized_name() == other.normalized_name()
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}[{name}]", self.tag),
            None => write!(f, "{}", self.tag),
        }
    }
}

pub fn strip_doc_id_prefix(id: &str) -> &str {
    let bytes = id.as_bytes();
    if bytes.len() > 2 && bytes[1] == b':' && (bytes[0].is_ascii_uppercase() || bytes[0] == b'!') {
        &id[2..]
    } else {
        id
    }
}

/// One top-level section element and its position in the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSection {
    pub key: SectionKey,
    /// Index into `StructuredComment::nodes`.
    pub index: usize,
    pub element: Element,
}

/// Document-ordered multimap of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: Vec<CommentSection>,
}

impl Sections {
    /// Walks the top level of `comment` once.
    pub fn extract(comment: &StructuredComment) -> Self {
        let sections = comment
            .elements()
            .map(|(index, element)| {
                let tag = SectionTag::from_name(&element.name);
                let name = tag
                    .key_attribute()
                    .and_then(|attr| element.attribute(attr))
                    .map(String::from);
                CommentSection {
                    key: SectionKey::new(tag, name),
                    index,
                    element: element.clone(),
                }
            })
            .collect();
        Self { sections }
    }

    /// First section with the given key.
    pub fn get(&self, key: &SectionKey) -> Option<&CommentSection> {
        self.sections.iter().find(|s| s.key.matches(key))
    }

    /// Every section with the given key, in document order.
    pub fn all(&self, key: &SectionKey) -> Vec<&CommentSection> {
        self.sections.iter().filter(|s| s.key.matches(key)).collect()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a SectionTag) -> impl Iterator<Item = &'a CommentSection> {
        self.sections.iter().filter(move |s| &s.key.tag == tag)
    }

    pub fn param(&self, name: &str) -> Option<&CommentSection> {
        self.get(&SectionKey::param(name))
    }

    pub fn summary(&self) -> Option<&CommentSection> {
        self.get(&SectionKey::summary())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Convenience wrapper for [`Sections::extract`].
pub fn extract_sections(comment: &StructuredComment) -> Sections {
    Sections::extract(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::model::Node;

    fn comment() -> StructuredComment {
        StructuredComment::new(vec![
            Node::Element(Element::new("summary").with_text("Does work.")),
            Node::text("\n"),
            Node::Element(Element::new("param").with_attribute("name", "count").with_text("The count.")),
            Node::text("\n"),
            Node::Element(
                Element::new("exception")
                    .with_attribute("cref", "T:System.ArgumentException")
                    .with_text("A"),
            ),
            Node::Element(
                Element::new("exception")
                    .with_attribute("cref", "System.ArgumentException")
                    .with_text("B"),
            ),
        ])
    }

    #[test]
    fn test_extract_keys_and_indices() {
        let sections = Sections::extract(&comment());
        assert_eq!(sections.len(), 4);
        assert_eq!(sections.summary().unwrap().index, 0);
        assert_eq!(sections.param("count").unwrap().index, 2);
        assert!(sections.param("missing").is_none());
    }

    #[test]
    fn test_exception_keys_ignore_doc_id_prefix() {
        let sections = Sections::extract(&comment());
        let all = sections.all(&SectionKey::exception("System.ArgumentException"));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].element.text_content(), "A");
    }

    #[test]
    fn test_strip_doc_id_prefix() {
        assert_eq!(strip_doc_id_prefix("T:System.String"), "System.String");
        assert_eq!(strip_doc_id_prefix("!:Foo"), "Foo");
        assert_eq!(strip_doc_id_prefix("System.String"), "System.String");
        assert_eq!(strip_doc_id_prefix("T:"), "T:");
    }

    #[test]
    fn test_display() {
        assert_eq!(SectionKey::param("value").to_string(), "param[value]");
        assert_eq!(SectionKey::summary().to_string(), "summary");
    }
}
