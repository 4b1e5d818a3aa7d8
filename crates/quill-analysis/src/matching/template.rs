//! Phrase templates with symbol placeholders.
//!
//! Placeholders: `{param}`, `{param_type}`, `{type}`, `{return_type}`,
//! `{containing_type}`, `{symbol}`, `{property}`, `{type_arg0}`..`{type_argN}`
//! and `{link}`. Type-valued placeholders expand to both the short and the
//! fully qualified name, so one template can produce several candidates.

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use quill_core::constants::DEFAULT_LINK_SENTINEL;
use quill_core::types::SmallVec2;

/// Candidate strings produced by one template; usually one or two.
pub type Candidates = SmallVec2<String>;

/// A type as it may be rendered in a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeName {
    pub short: String,
    pub full: String,
}

impl TypeName {
    pub fn new(short: impl Into<String>, full: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            full: full.into(),
        }
    }

    /// Short form first; a single entry when both forms coincide.
    fn forms(&self) -> Candidates {
        if self.short == self.full || self.full.is_empty() {
            smallvec![self.short.clone()]
        } else {
            smallvec![self.short.clone(), self.full.clone()]
        }
    }
}

/// Symbol data available to placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    pub symbol: Option<String>,
    pub param: Option<String>,
    pub param_type: Option<TypeName>,
    pub type_name: Option<TypeName>,
    pub return_type: Option<TypeName>,
    pub containing_type: Option<TypeName>,
    pub type_args: Vec<TypeName>,
    pub link: String,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self {
            symbol: None,
            param: None,
            param_type: None,
            type_name: None,
            return_type: None,
            containing_type: None,
            type_args: Vec::new(),
            link: DEFAULT_LINK_SENTINEL.to_string(),
        }
    }
}

impl TemplateContext {
    fn resolve(&self, placeholder: &str) -> Resolved {
        let single = |v: &Option<String>| match v {
            Some(s) => Resolved::Values(smallvec![s.clone()]),
            None => Resolved::Missing,
        };
        let typed = |v: &Option<TypeName>| match v {
            Some(t) => Resolved::Values(t.forms()),
            None => Resolved::Missing,
        };

        match placeholder {
            "symbol" => single(&self.symbol),
            "param" => single(&self.param),
            "property" => match &self.symbol {
                Some(name) => {
                    let base = name.strip_suffix("Property").filter(|b| !b.is_empty()).unwrap_or(name);
                    Resolved::Values(smallvec![base.to_string()])
                }
                None => Resolved::Missing,
            },
            "param_type" => typed(&self.param_type),
            "type" => typed(&self.type_name),
            "return_type" => typed(&self.return_type),
            "containing_type" => typed(&self.containing_type),
            "link" => Resolved::Values(smallvec![self.link.clone()]),
            other => match other.strip_prefix("type_arg").and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => match self.type_args.get(n) {
                    Some(t) => Resolved::Values(t.forms()),
                    None => Resolved::Missing,
                },
                None => Resolved::Unknown,
            },
        }
    }
}

enum Resolved {
    Values(Candidates),
    Missing,
    /// Not a placeholder; the braces are literal text.
    Unknown,
}

/// A phrase with optional placeholders and a simpler fallback used when the
/// symbol lacks data for a placeholder.
///
/// Deserializes from either a bare string or `{ text, fallback }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TemplateRepr")]
pub struct PhraseTemplate {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateRepr {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        fallback: Option<String>,
    },
}

impl From<TemplateRepr> for PhraseTemplate {
    fn from(repr: TemplateRepr) -> Self {
        match repr {
            TemplateRepr::Text(text) => Self::literal(text),
            TemplateRepr::Full { text, fallback } => Self { text, fallback },
        }
    }
}

impl PhraseTemplate {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(text: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: Some(fallback.into()),
        }
    }

    /// True when the text contains no known placeholder.
    pub fn is_literal(&self) -> bool {
        let ctx = TemplateContext::default();
        segments(&self.text).iter().all(|s| match s {
            Segment::Literal(_) => true,
            Segment::Placeholder(p) => matches!(ctx.resolve(p), Resolved::Unknown),
        })
    }

    /// Every string this template can stand for under `ctx`, in preference order.
    /// Empty when data is missing and there is no usable fallback.
    pub fn instantiate(&self, ctx: &TemplateContext) -> Candidates {
        if let Some(out) = expand(&self.text, ctx) {
            return out;
        }
        self.fallback
            .as_deref()
            .and_then(|f| expand(f, ctx))
            .unwrap_or_default()
    }
}

impl From<&str> for PhraseTemplate {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for PhraseTemplate {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        if open > 0 {
            out.push(Segment::Literal(&rest[..open]));
        }
        out.push(Segment::Placeholder(&rest[open + 1..close]));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

/// Cartesian expansion of all placeholder forms; `None` if any is missing.
fn expand(text: &str, ctx: &TemplateContext) -> Option<Candidates> {
    let mut results: Candidates = smallvec![String::new()];
    for segment in segments(text) {
        let values: Candidates = match segment {
            Segment::Literal(lit) => smallvec![lit.to_string()],
            Segment::Placeholder(name) => match ctx.resolve(name) {
                Resolved::Values(v) => v,
                Resolved::Missing => return None,
                Resolved::Unknown => smallvec![format!("{{{name}}}")],
            },
        };
        let values = &values;
        results = results
            .iter()
            .flat_map(|prefix| values.iter().map(move |v| format!("{prefix}{v}")))
            .collect();
    }
    results.dedup();
    Some(results)
}
