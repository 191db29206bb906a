//! Generation driver
//!
//! [`Generator`] owns one run: it parses inputs through a [`FrontEnd`], folds
//! every translation unit into a single [`DeclarationModel`] and renders it
//! with a [`Template`].

use std::path::{Path, PathBuf};

use autobind_core::{
    AutobindError, AutobindResult, DeclarationModel, GeneratorConfig, TypeMap, walk,
};
use autobind_frontend::{FrontEnd, TranslationUnit};

use crate::helpers::Helpers;
use crate::template::{RenderContext, Template, resolve_template};

/// One `generate` invocation
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Inputs, parsed in this order
    pub inputs: Vec<PathBuf>,
    /// Built-in template name or template file path
    pub template: String,
    /// Destination of the rendered artifact
    pub output: PathBuf,
}

/// Parses headers into one model and renders it
pub struct Generator {
    front_end: Box<dyn FrontEnd>,
    config: GeneratorConfig,
    type_map: TypeMap,
    model: DeclarationModel,
}

impl Generator {
    /// Create a generator with the baseline and configured type mappings loaded.
    pub fn new(front_end: Box<dyn FrontEnd>, config: GeneratorConfig) -> AutobindResult<Self> {
        config.validate()?;
        let type_map = config.type_map()?;

        Ok(Self {
            front_end,
            config,
            type_map,
            model: DeclarationModel::new(),
        })
    }

    /// Create a generator using the front end named in the configuration.
    pub fn from_config(config: GeneratorConfig) -> AutobindResult<Self> {
        let front_end = autobind_frontend::from_config(&config.parser);
        Self::new(front_end, config)
    }

    /// Parse one file and append its declarations to the model.
    pub fn parse_file(&mut self, path: &Path) -> AutobindResult<()> {
        let unit = self.front_end.parse(path)?;
        self.absorb(unit)
    }

    /// Parse files in order; stops at the first failure.
    pub fn parse_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> AutobindResult<()> {
        for path in paths {
            self.parse_file(path.as_ref())?;
        }
        Ok(())
    }

    /// Parse in-memory content presented under `virtual_path`.
    pub fn parse_unsaved(&mut self, virtual_path: &Path, content: &str) -> AutobindResult<()> {
        let unit = self.front_end.parse_unsaved(virtual_path, content)?;
        self.absorb(unit)
    }

    fn absorb(&mut self, unit: TranslationUnit) -> AutobindResult<()> {
        unit.ensure_parsed()?;

        let before = self.model.len();
        let model = std::mem::take(&mut self.model);
        self.model = walk(unit.cursor(), &self.config.parser.namespace, model);

        tracing::info!(
            path = %unit.path.display(),
            declarations = self.model.len() - before,
            "Parsed translation unit"
        );
        Ok(())
    }

    /// Render the accumulated model.
    pub fn render(&self, template: &dyn Template) -> AutobindResult<String> {
        let ctx = RenderContext::new(&self.model, self.helpers());
        let code = template.render(&ctx)?;
        tracing::info!(template = template.name(), bytes = code.len(), "Rendered template");
        Ok(code)
    }

    pub fn model(&self) -> &DeclarationModel {
        &self.model
    }

    pub fn into_model(self) -> DeclarationModel {
        self.model
    }

    pub fn helpers(&self) -> Helpers<'_> {
        Helpers::new(&self.type_map, &self.config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parse every input, render once and write the output file.
    ///
    /// The template and the output directory are checked before any input is
    /// parsed. Returns the rendered text.
    pub fn generate(&mut self, request: &GenerateRequest) -> AutobindResult<String> {
        let template = resolve_template(&request.template)?;
        check_output(&request.output)?;

        self.parse_files(&request.inputs)?;
        let code = self.render(template.as_ref())?;

        std::fs::write(&request.output, &code)
            .map_err(|e| AutobindError::io(&request.output, e))?;
        tracing::info!(output = %request.output.display(), "Wrote generated file");
        Ok(code)
    }
}

fn check_output(output: &Path) -> AutobindResult<()> {
    let invalid = |message: String| AutobindError::Io {
        path: output.display().to_string(),
        message,
    };

    if output.as_os_str().is_empty() {
        return Err(invalid("output path is empty".to_string()));
    }
    if output.is_dir() {
        return Err(invalid("output path is a directory".to_string()));
    }

    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(invalid(
            format!("output directory does not exist: {}", parent.display()),
        )),
        _ => Ok(()),
    }
}
