//! autobind-frontend - Syntax trees produced outside the process
//!
//! This crate provides:
//! - [`AstNode`] and [`TranslationUnit`], the JSON form of a parsed header
//! - [`FrontEnd`] trait for turning a header into a translation unit
//! - [`DumpFrontEnd`] for pre-serialized trees and [`ProcessFrontEnd`] for an
//!   external parser executable

mod node;
mod process;

pub use node::{AstNode, Diagnostic, Severity, TranslationUnit};
pub use process::ProcessFrontEnd;

use autobind_core::{AutobindError, AutobindResult, ParserConfig};
use std::path::Path;

/// Produces a translation unit for one input
pub trait FrontEnd {
    /// Parse a file on disk
    fn parse(&self, path: &Path) -> AutobindResult<TranslationUnit>;

    /// Parse in-memory content presented under `virtual_path`
    fn parse_unsaved(&self, virtual_path: &Path, content: &str)
    -> AutobindResult<TranslationUnit>;
}

/// Reads translation units an external front end has already written as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpFrontEnd;

impl DumpFrontEnd {
    pub fn new() -> Self {
        Self
    }
}

impl FrontEnd for DumpFrontEnd {
    fn parse(&self, path: &Path) -> AutobindResult<TranslationUnit> {
        let content = std::fs::read_to_string(path).map_err(|e| AutobindError::io(path, e))?;
        TranslationUnit::from_json(path, &content)
    }

    fn parse_unsaved(
        &self,
        virtual_path: &Path,
        content: &str,
    ) -> AutobindResult<TranslationUnit> {
        TranslationUnit::from_json(virtual_path, content)
    }
}

/// Pick the front end a parser configuration asks for
///
/// An external executable when one is configured, dump files otherwise.
pub fn from_config(parser: &ParserConfig) -> Box<dyn FrontEnd> {
    match &parser.front_end {
        Some(program) => Box::new(ProcessFrontEnd::from_config(program, parser)),
        None => Box::new(DumpFrontEnd::new()),
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AstNode, DumpFrontEnd, FrontEnd, ProcessFrontEnd, TranslationUnit};
}
