//! Declaration Model
//!
//! Plain data types for every declaration kind extracted from a header:
//! enums, structs, classes and free functions, plus their members.
//!
//! Every declaration carries the same base data: a name, an [`Annotations`] set
//! (marker tags attached with `__attribute__((annotate("...")))`) and an optional
//! doc-comment summary.
//!
//! The [`Decl`] view is a closed sum over all declaration kinds so helpers can
//! match exhaustively instead of inspecting types at run time.

use serde::{Deserialize, Serialize};

/// Member access specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Protected => write!(f, "protected"),
            Access::Private => write!(f, "private"),
        }
    }
}

/// Ordered set of annotation markers.
///
/// Insertion order is kept for stable output; duplicates are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<String>);

impl Annotations {
    /// Create an empty annotation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker. Returns `false` if it was already present.
    pub fn insert(&mut self, marker: impl Into<String>) -> bool {
        let marker = marker.into();
        if self.contains(&marker) {
            return false;
        }
        self.0.push(marker);
        true
    }

    /// Check whether a marker is present
    pub fn contains(&self, marker: &str) -> bool {
        self.0.iter().any(|m| m == marker)
    }

    /// Return the remainder of the first marker starting with `prefix`.
    pub fn value_of(&self, prefix: &str) -> Option<&str> {
        self.0.iter().find_map(|m| m.strip_prefix(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Annotations {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut annotations = Annotations::new();
        for marker in iter {
            annotations.insert(marker);
        }
        annotations
    }
}

/// A single enumerator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumConstant {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    /// Explicit initializer, or previous value + 1 (0 for the first constant).
    pub value: i64,
}

/// An enum declaration. Constant order is declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    pub constants: Vec<EnumConstant>,
}

/// A data member of a struct or class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    /// Source spelling of the type.
    #[serde(rename = "type")]
    pub ty: String,
    pub access: Access,
}

/// A function or method parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    pub has_default_value: bool,
}

/// A free function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub return_comment: Option<String>,
}

/// A member function or constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub return_comment: Option<String>,
    pub access: Access,
    pub is_static: bool,
}

/// A `struct` declaration. Structs may carry methods as well as fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

/// A `class` declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub name: String,
    pub annotations: Annotations,
    pub comment: Option<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    /// Retained constructors; copy constructors are never listed.
    pub constructors: Vec<Method>,
    pub has_default_constructor: bool,
}

/// Everything extracted during one generation run.
///
/// Each list keeps file order, then in-file declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationModel {
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub functions: Vec<Function>,
    pub classes: Vec<Class>,
}

impl DeclarationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of top-level declarations
    pub fn len(&self) -> usize {
        self.enums.len() + self.structs.len() + self.functions.len() + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another model's declarations after this model's.
    ///
    /// Used to merge per-file results in file order.
    pub fn merge(&mut self, other: DeclarationModel) {
        self.enums.extend(other.enums);
        self.structs.extend(other.structs);
        self.functions.extend(other.functions);
        self.classes.extend(other.classes);
    }

    /// Iterate over all top-level declarations, kind by kind.
    pub fn declarations(&self) -> impl Iterator<Item = Decl<'_>> {
        self.enums
            .iter()
            .map(Decl::Enum)
            .chain(self.structs.iter().map(Decl::Struct))
            .chain(self.classes.iter().map(Decl::Class))
            .chain(self.functions.iter().map(Decl::Function))
    }

    /// Look up a struct by name
    pub fn find_struct(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// Borrowed view over any declaration kind.
#[derive(Debug, Clone, Copy)]
pub enum Decl<'a> {
    Enum(&'a Enum),
    EnumConstant(&'a EnumConstant),
    Struct(&'a Struct),
    Class(&'a Class),
    Function(&'a Function),
    Method(&'a Method),
    Field(&'a Field),
    Parameter(&'a Parameter),
}

impl<'a> Decl<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Decl::Enum(d) => &d.name,
            Decl::EnumConstant(d) => &d.name,
            Decl::Struct(d) => &d.name,
            Decl::Class(d) => &d.name,
            Decl::Function(d) => &d.name,
            Decl::Method(d) => &d.name,
            Decl::Field(d) => &d.name,
            Decl::Parameter(d) => &d.name,
        }
    }

    pub fn annotations(&self) -> &'a Annotations {
        match self {
            Decl::Enum(d) => &d.annotations,
            Decl::EnumConstant(d) => &d.annotations,
            Decl::Struct(d) => &d.annotations,
            Decl::Class(d) => &d.annotations,
            Decl::Function(d) => &d.annotations,
            Decl::Method(d) => &d.annotations,
            Decl::Field(d) => &d.annotations,
            Decl::Parameter(d) => &d.annotations,
        }
    }

    pub fn comment(&self) -> Option<&'a str> {
        match self {
            Decl::Enum(d) => d.comment.as_deref(),
            Decl::EnumConstant(d) => d.comment.as_deref(),
            Decl::Struct(d) => d.comment.as_deref(),
            Decl::Class(d) => d.comment.as_deref(),
            Decl::Function(d) => d.comment.as_deref(),
            Decl::Method(d) => d.comment.as_deref(),
            Decl::Field(d) => d.comment.as_deref(),
            Decl::Parameter(d) => d.comment.as_deref(),
        }
    }

    /// Short lowercase name of the declaration kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Decl::Enum(_) => "enum",
            Decl::EnumConstant(_) => "enum constant",
            Decl::Struct(_) => "struct",
            Decl::Class(_) => "class",
            Decl::Function(_) => "function",
            Decl::Method(_) => "method",
            Decl::Field(_) => "field",
            Decl::Parameter(_) => "parameter",
        }
    }
}
