//! Abstract syntax tree adapter.
//!
//! The walker never sees a concrete parser. A front end exposes its tree
//! through [`Cursor`], so a libclang binding, a serialized dump, or a
//! hand-built test tree can all feed the same extraction logic.

use serde::{Deserialize, Serialize};

use crate::model::Access;

/// Kind of a syntax tree node, as far as extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    EnumDecl,
    EnumConstantDecl,
    StructDecl,
    ClassDecl,
    FunctionDecl,
    FieldDecl,
    Method,
    Constructor,
    Destructor,
    ParmDecl,
    AnnotateAttr,
    TypeRef,
    NamespaceRef,
    TemplateRef,
    Expression,
    /// Any node kind the extractor does not model.
    #[serde(other)]
    Unexposed,
}

impl CursorKind {
    /// Whether a parameter child of this kind is only part of the type spelling.
    pub fn is_type_reference(self) -> bool {
        matches!(
            self,
            CursorKind::TypeRef | CursorKind::NamespaceRef | CursorKind::TemplateRef
        )
    }
}

/// Read access to one node of a front end's syntax tree.
///
/// Implementations are usually cheap handles (`Copy` cursors or shared
/// references), since children are returned by value.
pub trait Cursor: Sized {
    fn kind(&self) -> CursorKind;

    /// Declared name, or the annotation text for [`CursorKind::AnnotateAttr`].
    fn spelling(&self) -> String;

    /// Spelling of the declared type (fields, parameters).
    fn type_spelling(&self) -> String;

    /// Spelling of the return type (functions, methods).
    fn result_type_spelling(&self) -> String;

    /// Access specifier, when the front end reports one.
    fn access(&self) -> Option<Access>;

    fn is_static_method(&self) -> bool;

    /// True when a constructor can be invoked without arguments.
    fn is_default_constructor(&self) -> bool;

    /// Value of an explicit enumerator initializer. `None` when defaulted.
    fn enum_value(&self) -> Option<i64>;

    /// One-line summary already extracted by the front end.
    fn brief_comment(&self) -> Option<String>;

    /// Full comment text attached to the declaration.
    fn raw_comment(&self) -> Option<String>;

    fn children(&self) -> impl Iterator<Item = Self>;
}
