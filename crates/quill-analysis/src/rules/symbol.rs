//! Host-supplied symbol model.
//!
//! The compiler front end owns parsing and binding; it hands the engine
//! these plain values, one per declared symbol or comment.

use serde::{Deserialize, Serialize};

use crate::matching::{TemplateContext, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Method,
    Constructor,
    Property,
    Indexer,
    Field,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    Internal,
    ProtectedInternal,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_sealed: bool,
    pub is_const: bool,
    pub is_readonly: bool,
    pub is_async: bool,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    TypeParameter,
}

/// A type reference as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    #[serde(default)]
    pub kind: TypeKind,
    /// Fully qualified names of base types, nearest first.
    #[serde(default)]
    pub base_types: Vec<String>,
}

impl TypeRef {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            ..Default::default()
        }
    }

    pub fn boolean() -> Self {
        Self::new("System", "Boolean").with_kind(TypeKind::Struct)
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_type_args(mut self, args: Vec<TypeRef>) -> Self {
        self.type_args = args;
        self
    }

    pub fn with_base_types<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_types = bases.into_iter().map(Into::into).collect();
        self
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn type_name(&self) -> TypeName {
        TypeName::new(self.name.clone(), self.full_name())
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.full_name().as_str(), "System.Boolean" | "bool")
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_exception(&self) -> bool {
        self.full_name() == "System.Exception"
            || self.base_types.iter().any(|b| b == "System.Exception" || b == "Exception")
    }

    pub fn is_task(&self) -> bool {
        self.namespace.as_deref() == Some("System.Threading.Tasks")
            && matches!(self.name.as_str(), "Task" | "ValueTask")
    }

    pub fn is_void(&self) -> bool {
        matches!(self.full_name().as_str(), "System.Void" | "void")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
}

impl ParameterInfo {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            ref_kind: RefKind::None,
        }
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: &str, line: u32, column: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
        }
    }
}

/// One declared symbol and its raw documentation markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    #[serde(default)]
    pub containing_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    /// Return type for methods; declared type for properties, fields and events.
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub location: Location,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            containing_type: None,
            parameters: Vec::new(),
            return_type: None,
            type_parameters: Vec::new(),
            accessibility: Accessibility::Public,
            modifiers: Modifiers::default(),
            documentation: None,
            location: Location::default(),
        }
    }

    pub fn with_documentation(mut self, xml: &str) -> Self {
        self.documentation = Some(xml.to_string());
        self
    }

    pub fn with_containing_type(mut self, ty: TypeRef) -> Self {
        self.containing_type = Some(ty);
        self
    }

    pub fn with_return_type(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterInfo) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Placeholder values for templates; `param` is filled per section.
    pub fn template_context(&self, param: Option<&ParameterInfo>, link: &str) -> TemplateContext {
        let type_args = self
            .containing_type
            .as_ref()
            .map(|t| t.type_args.iter().map(TypeRef::type_name).collect())
            .unwrap_or_default();
        TemplateContext {
            symbol: Some(self.name.clone()),
            param: param.map(|p| p.name.clone()),
            param_type: param.map(|p| p.ty.type_name()),
            type_name: self.return_type.as_ref().map(TypeRef::type_name),
            return_type: self.return_type.as_ref().map(TypeRef::type_name),
            containing_type: self.containing_type.as_ref().map(TypeRef::type_name),
            type_args,
            link: link.to_string(),
        }
    }
}

/// Comment style of a non-documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A plain comment with its location, as found in the syntax tree trivia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTrivia {
    pub text: String,
    pub location: Location,
    pub style: CommentStyle,
    /// The source line directly above the comment, for suppression directives.
    #[serde(default)]
    pub preceding_line: Option<String>,
}

impl CommentTrivia {
    pub fn line(text: &str, location: Location) -> Self {
        Self {
            text: text.to_string(),
            location,
            style: CommentStyle::Line,
            preceding_line: None,
        }
    }

    pub fn block(text: &str, location: Location) -> Self {
        Self {
            text: text.to_string(),
            location,
            style: CommentStyle::Block,
            preceding_line: None,
        }
    }

    pub fn with_preceding_line(mut self, line: &str) -> Self {
        self.preceding_line = Some(line.to_string());
        self
    }
}
