//! autobind-codegen - Rendering declaration models into glue code
//!
//! This crate provides:
//! - [`Generator`] to parse inputs into one model and render it
//! - [`Template`] trait, the [`BuiltinTemplate`] targets and [`FileTemplate`]
//!   for template files
//! - [`Helpers`] with the marshalling rules templates share
//!
//! # Example
//!
//! ```ignore
//! use autobind_codegen::prelude::*;
//!
//! let mut generator = Generator::from_config(GeneratorConfig::default())?;
//! generator.parse_file(Path::new("math.json"))?;
//! let code = generator.render(&BuiltinTemplate::PyiStub)?;
//! ```

mod file_template;
mod generator;
mod helpers;
pub mod targets;
mod template;

#[cfg(test)]
mod test_support;

pub use file_template::FileTemplate;
pub use generator::{GenerateRequest, Generator};
pub use helpers::Helpers;
pub use template::{BuiltinTemplate, RenderContext, Template, resolve_template};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuiltinTemplate, FileTemplate, GenerateRequest, Generator, Helpers, RenderContext,
        Template, resolve_template,
    };
    pub use autobind_core::{AutobindError, AutobindResult, GeneratorConfig};
}
