//! JSON syntax tree and its [`Cursor`] implementation
//!
//! ```json
//! {
//!   "path": "math.h",
//!   "diagnostics": [],
//!   "root": {
//!     "kind": "translation_unit",
//!     "children": [
//!       { "kind": "namespace", "spelling": "rpp", "children": [] }
//!     ]
//!   }
//! }
//! ```

use autobind_core::{Access, AutobindError, AutobindResult, Cursor, CursorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One node of a serialized syntax tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: CursorKind,

    #[serde(default)]
    pub spelling: String,

    /// Declared type spelling
    #[serde(default, rename = "type")]
    pub ty: String,

    /// Return type spelling
    #[serde(default)]
    pub result_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_default_constructor: bool,

    /// Explicit enumerator initializer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Create a node with no data besides its kind and name
    pub fn new(kind: CursorKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            ty: String::new(),
            result_type: String::new(),
            access: None,
            is_static: false,
            is_default_constructor: false,
            value: None,
            brief_comment: None,
            raw_comment: None,
            children: Vec::new(),
        }
    }

    /// Append a child node
    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(child);
        self
    }
}

impl<'a> Cursor for &'a AstNode {
    fn kind(&self) -> CursorKind {
        self.kind
    }

    fn spelling(&self) -> String {
        self.spelling.clone()
    }

    fn type_spelling(&self) -> String {
        self.ty.clone()
    }

    fn result_type_spelling(&self) -> String {
        self.result_type.clone()
    }

    fn access(&self) -> Option<Access> {
        self.access
    }

    fn is_static_method(&self) -> bool {
        self.is_static
    }

    fn is_default_constructor(&self) -> bool {
        self.is_default_constructor
    }

    fn enum_value(&self) -> Option<i64> {
        self.value
    }

    fn brief_comment(&self) -> Option<String> {
        self.brief_comment.clone()
    }

    fn raw_comment(&self) -> Option<String> {
        self.raw_comment.clone()
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let node: &'a AstNode = *self;
        node.children.iter()
    }
}

/// Diagnostic severity reported by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ignored,
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self >= Severity::Error
    }
}

/// One front-end diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// A parsed header: its tree plus whatever the front end complained about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    #[serde(default)]
    pub path: PathBuf,

    pub root: AstNode,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslationUnit {
    pub fn new(path: impl Into<PathBuf>, root: AstNode) -> Self {
        Self {
            path: path.into(),
            root,
            diagnostics: Vec::new(),
        }
    }

    /// Decode a serialized unit; an empty `path` field takes `source`
    pub fn from_json(source: &Path, json: &str) -> AutobindResult<Self> {
        let mut unit: TranslationUnit = serde_json::from_str(json).map_err(|e| {
            AutobindError::FrontEnd(format!(
                "malformed syntax tree for {}: {}",
                source.display(),
                e
            ))
        })?;

        if unit.path.as_os_str().is_empty() {
            unit.path = source.to_path_buf();
        }

        Ok(unit)
    }

    /// Fail when any diagnostic is an error or fatal
    ///
    /// The first such diagnostic becomes the error message.
    pub fn ensure_parsed(&self) -> AutobindResult<()> {
        match self.diagnostics.iter().find(|d| d.severity.is_error()) {
            Some(diagnostic) => {
                let message = match diagnostic.line {
                    Some(line) => format!("line {}: {}", line, diagnostic.message),
                    None => diagnostic.message.clone(),
                };
                Err(AutobindError::parse(&self.path, message))
            }
            None => Ok(()),
        }
    }

    /// Cursor over the root node
    pub fn cursor(&self) -> &AstNode {
        &self.root
    }
}
