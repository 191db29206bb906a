//! Template files
//!
//! A [`FileTemplate`] is Jinja-style text rendered with minijinja. The model's
//! four collections are bound as `enums`, `structs`, `functions` and
//! `classes`, and the [`Helpers`] are registered as global functions:
//!
//! ```jinja
//! {% for f in functions %}
//! m.def("{{ f.name }}", &{{ f.name }}); // ({{ param_types(f.parameters) }})
//! {% endfor %}
//! ```

use std::path::Path;
use std::sync::Arc;

use autobind_core::{
    Annotations, AutobindError, AutobindResult, Class, Decl, GeneratorConfig, Method, Parameter,
    TypeMap,
};
use minijinja::value::ViaDeserialize;
use minijinja::{Environment, Error, ErrorKind, Value};
use serde::Deserialize;

use crate::helpers::Helpers;
use crate::template::{RenderContext, Template};

/// A template loaded from disk
#[derive(Debug, Clone)]
pub struct FileTemplate {
    name: String,
    source: String,
}

impl FileTemplate {
    /// Read and compile-check a template file.
    pub fn load(path: &Path) -> AutobindResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AutobindError::Template(format!("cannot read template {}: {}", path.display(), e))
        })?;
        Self::from_source(&path.display().to_string(), source)
    }

    /// Compile-check in-memory template text.
    pub fn from_source(name: &str, source: impl Into<String>) -> AutobindResult<Self> {
        let source = source.into();
        Environment::new()
            .template_from_str(&source)
            .map_err(|e| AutobindError::Template(format!("{}: {}", name, e)))?;

        Ok(Self {
            name: name.to_string(),
            source,
        })
    }
}

impl Template for FileTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, ctx: &RenderContext<'_>) -> AutobindResult<String> {
        let mut env = Environment::new();
        register_helpers(&mut env, ctx);

        let bindings = minijinja::context! {
            enums => Value::from_serialize(ctx.enums()),
            structs => Value::from_serialize(ctx.structs()),
            functions => Value::from_serialize(ctx.functions()),
            classes => Value::from_serialize(ctx.classes()),
        };

        env.render_str(&self.source, bindings)
            .map_err(|e| render_error(&self.name, e))
    }
}

/// Any declaration value; predicates only read its annotations.
#[derive(Debug, Deserialize)]
struct Annotated {
    #[serde(default)]
    annotations: Annotations,
}

impl Annotated {
    fn as_class(&self) -> Class {
        Class {
            annotations: self.annotations.clone(),
            ..Default::default()
        }
    }
}

/// Owned copies of what [`Helpers`] borrows, shareable by every registered function.
#[derive(Clone)]
struct Bound {
    type_map: Arc<TypeMap>,
    config: Arc<GeneratorConfig>,
}

impl Bound {
    fn helpers(&self) -> Helpers<'_> {
        Helpers::new(&self.type_map, &self.config)
    }
}

fn register_helpers(env: &mut Environment<'_>, ctx: &RenderContext<'_>) {
    let bound = Bound {
        type_map: Arc::new(ctx.helpers().type_map().clone()),
        config: Arc::new(ctx.config().clone()),
    };

    let b = bound.clone();
    env.add_function("convert", move |ty: String| b.helpers().convert(&ty));

    let b = bound.clone();
    env.add_function(
        "is_singleton",
        move |owner: ViaDeserialize<Annotated>| {
            b.helpers().is_singleton(Decl::Class(&owner.as_class()))
        },
    );

    let b = bound.clone();
    env.add_function(
        "is_static",
        move |method: ViaDeserialize<Method>, owner: ViaDeserialize<Annotated>| {
            b.helpers()
                .is_static(&method, Decl::Class(&owner.as_class()))
        },
    );

    let b = bound.clone();
    env.add_function(
        "stub_params",
        move |params: ViaDeserialize<Vec<Parameter>>, is_static: Option<bool>| {
            b.helpers().stub_params(&params, is_static.unwrap_or(false))
        },
    );

    let b = bound.clone();
    env.add_function(
        "native_params",
        move |params: ViaDeserialize<Vec<Parameter>>| b.helpers().native_params(&params),
    );

    let b = bound.clone();
    env.add_function(
        "forward_args",
        move |params: ViaDeserialize<Vec<Parameter>>, convert_strings: Option<bool>| {
            b.helpers()
                .forward_args(&params, convert_strings.unwrap_or(true))
        },
    );

    let b = bound.clone();
    env.add_function(
        "param_types",
        move |params: ViaDeserialize<Vec<Parameter>>| b.helpers().param_types(&params),
    );

    let b = bound.clone();
    env.add_function("json_key", move |decl: ViaDeserialize<Annotated>| {
        b.helpers().json_key(&decl.annotations).to_string()
    });

    let b = bound.clone();
    env.add_function("format_tag", move |ty: String| -> Result<String, Error> {
        b.helpers()
            .format_tag(&ty)
            .map(str::to_string)
            .map_err(helper_error)
    });

    let b = bound.clone();
    env.add_function(
        "format_string",
        move |params: ViaDeserialize<Vec<Parameter>>| -> Result<String, Error> {
            b.helpers().format_string(&params).map_err(helper_error)
        },
    );

    let b = bound.clone();
    env.add_function("is_hidden", move |decl: ViaDeserialize<Annotated>| {
        b.helpers().is_hidden(Decl::Class(&decl.as_class()))
    });

    let b = bound;
    env.add_function(
        "is_bound",
        move |decl: ViaDeserialize<Annotated>, marker: String| {
            b.helpers().is_bound(Decl::Class(&decl.as_class()), &marker)
        },
    );

    let json_structs: Vec<String> = ctx
        .helpers()
        .json_structs(ctx.model())
        .into_iter()
        .map(String::from)
        .collect();
    env.add_function("json_structs", move || json_structs.clone());
}

fn helper_error(err: AutobindError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)
}

/// Surface a helper's own error when one caused the failure.
fn render_error(name: &str, err: Error) -> AutobindError {
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        if let Some(AutobindError::UnknownFormatType(ty)) = cause.downcast_ref::<AutobindError>() {
            return AutobindError::UnknownFormatType(ty.clone());
        }
        source = cause.source();
    }
    AutobindError::Template(format!("{}: {}", name, err))
}

#[cfg(test)]
#[path = "file_template/file_template_tests.rs"]
mod file_template_tests;
