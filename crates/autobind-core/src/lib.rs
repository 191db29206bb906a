//! autobind-core - Declaration model and source analysis
//!
//! This crate turns a front end's syntax tree into a language-neutral model:
//! - [`Cursor`] trait a front end implements to expose its tree
//! - [`walk`] to extract one namespace into a [`DeclarationModel`]
//! - [`DocComment`] for mining `@param` / `@return` tags
//! - [`TypeMap`] for native-to-scripting type conversion
//! - [`GeneratorConfig`] for `autobind.toml` settings

mod ast;
mod config;
mod doc_comment;
mod error;
mod model;
pub mod type_map;
mod walker;

pub use ast::{Cursor, CursorKind};
pub use config::{CodegenConfig, GeneratorConfig, MarkerConfig, ParserConfig, TypeMappingEntry};
pub use doc_comment::{DocComment, ParamDoc};
pub use error::{AutobindError, AutobindResult};
pub use model::{
    Access, Annotations, Class, Decl, DeclarationModel, Enum, EnumConstant, Field, Function,
    Method, Parameter, Struct,
};
pub use type_map::TypeMap;
pub use walker::walk;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AutobindError, AutobindResult, Cursor, CursorKind, Decl, DeclarationModel,
        GeneratorConfig, TypeMap, walk,
    };
}
