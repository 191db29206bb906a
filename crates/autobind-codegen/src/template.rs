//! Template seam
//!
//! A [`Template`] turns a [`RenderContext`] into generated text. The built-in
//! targets are listed in [`BuiltinTemplate`] and are picked by name
//! (`cpp-binding`). Any other template is a file (`templates/bindings.j2`)
//! rendered as a [`FileTemplate`].

use std::path::Path;
use std::str::FromStr;

use autobind_core::{
    AutobindError, AutobindResult, Class, DeclarationModel, Enum, Function, GeneratorConfig,
    Struct,
};

use crate::file_template::FileTemplate;
use crate::helpers::Helpers;
use crate::targets;

/// Everything a template may read during one render
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    model: &'a DeclarationModel,
    helpers: Helpers<'a>,
}

impl<'a> RenderContext<'a> {
    pub fn new(model: &'a DeclarationModel, helpers: Helpers<'a>) -> Self {
        Self { model, helpers }
    }

    pub fn model(&self) -> &'a DeclarationModel {
        self.model
    }

    pub fn enums(&self) -> &'a [Enum] {
        &self.model.enums
    }

    pub fn structs(&self) -> &'a [Struct] {
        &self.model.structs
    }

    pub fn classes(&self) -> &'a [Class] {
        &self.model.classes
    }

    pub fn functions(&self) -> &'a [Function] {
        &self.model.functions
    }

    pub fn helpers(&self) -> &Helpers<'a> {
        &self.helpers
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.helpers.config()
    }
}

/// A code generation target
pub trait Template {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Render the whole output artifact
    fn render(&self, ctx: &RenderContext<'_>) -> AutobindResult<String>;
}

/// Targets shipped with autobind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTemplate {
    /// pybind11 module source
    CppBinding,
    /// Python `.pyi` stub module
    PyiStub,
    /// `ToString` / `FromString` specializations for json-marked structs
    JsonCodec,
    /// Python C-API shim for end-to-end test hooks
    NativeShim,
}

impl BuiltinTemplate {
    pub const ALL: [BuiltinTemplate; 4] = [
        BuiltinTemplate::CppBinding,
        BuiltinTemplate::PyiStub,
        BuiltinTemplate::JsonCodec,
        BuiltinTemplate::NativeShim,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinTemplate::CppBinding => "cpp-binding",
            BuiltinTemplate::PyiStub => "pyi-stub",
            BuiltinTemplate::JsonCodec => "json-codec",
            BuiltinTemplate::NativeShim => "native-shim",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BuiltinTemplate::CppBinding => "pybind11 module for declarations marked for binding",
            BuiltinTemplate::PyiStub => "Python stub (.pyi) module with docstrings",
            BuiltinTemplate::JsonCodec => "ToString/FromString specializations for json structs",
            BuiltinTemplate::NativeShim => "Python C-API shim for end-to-end test entry points",
        }
    }
}

/// Resolve a template given by built-in name or by file path
///
/// Names win over paths. A path must name a readable file that compiles as a
/// template.
pub fn resolve_template(spec: &str) -> AutobindResult<Box<dyn Template>> {
    let unknown = match spec.parse::<BuiltinTemplate>() {
        Ok(builtin) => return Ok(Box::new(builtin)),
        Err(e) => e,
    };

    let path = Path::new(spec);
    if path.is_file() {
        return Ok(Box::new(FileTemplate::load(path)?));
    }

    // A bare word is a mistyped built-in name.
    if path.extension().is_none() && path.components().count() == 1 {
        return Err(unknown);
    }
    Err(AutobindError::Template(format!(
        "template file not found: {}",
        path.display()
    )))
}

impl FromStr for BuiltinTemplate {
    type Err = AutobindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = BuiltinTemplate::ALL.iter().map(|t| t.as_str()).collect();
                AutobindError::Template(format!(
                    "unknown template '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for BuiltinTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Template for BuiltinTemplate {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn render(&self, ctx: &RenderContext<'_>) -> AutobindResult<String> {
        match self {
            BuiltinTemplate::CppBinding => targets::cpp_binding::render(ctx),
            BuiltinTemplate::PyiStub => targets::pyi_stub::render(ctx),
            BuiltinTemplate::JsonCodec => targets::json_codec::render(ctx),
            BuiltinTemplate::NativeShim => targets::native_shim::render(ctx),
        }
    }
}
