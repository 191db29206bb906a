//! External front-end executable
//!
//! The executable is run once per header as
//! `<program> <args...> [-I<dir>...] <path>` and must print a JSON
//! [`TranslationUnit`] on stdout. In-memory headers are passed as
//! `--unsaved <virtual_path>` with the content on stdin.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use autobind_core::{AutobindError, AutobindResult, ParserConfig};
use tracing::debug;

use crate::FrontEnd;
use crate::node::TranslationUnit;

/// Runs an external parser and decodes its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFrontEnd {
    program: PathBuf,
    args: Vec<String>,
    include_dirs: Vec<PathBuf>,
}

impl ProcessFrontEnd {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            include_dirs: Vec::new(),
        }
    }

    /// Use the arguments and include directories of a parser configuration
    pub fn from_config(program: impl Into<PathBuf>, parser: &ParserConfig) -> Self {
        Self::new(program)
            .with_args(parser.args.iter().cloned())
            .with_include_dirs(parser.include_dirs.iter().cloned())
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn with_include_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.include_dirs.extend(dirs);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line without the trailing input arguments
    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for dir in &self.include_dirs {
            command.arg(format!("-I{}", dir.display()));
        }
        command
    }

    fn launch_error(&self, err: std::io::Error) -> AutobindError {
        AutobindError::FrontEnd(format!(
            "failed to run {}: {}",
            self.program.display(),
            err
        ))
    }

    fn decode(&self, path: &Path, output: Output) -> AutobindResult<TranslationUnit> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("front end exited with {}", output.status),
                text => text.to_string(),
            };
            return Err(AutobindError::parse(path, message));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            AutobindError::FrontEnd(format!("front end output is not UTF-8: {}", e))
        })?;
        TranslationUnit::from_json(path, &stdout)
    }
}

impl FrontEnd for ProcessFrontEnd {
    fn parse(&self, path: &Path) -> AutobindResult<TranslationUnit> {
        let mut command = self.command();
        command.arg(path);
        debug!(program = %self.program.display(), path = %path.display(), "running front end");

        let output = command.output().map_err(|e| self.launch_error(e))?;
        self.decode(path, output)
    }

    fn parse_unsaved(
        &self,
        virtual_path: &Path,
        content: &str,
    ) -> AutobindResult<TranslationUnit> {
        let mut command = self.command();
        command
            .arg("--unsaved")
            .arg(virtual_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!(
            program = %self.program.display(),
            path = %virtual_path.display(),
            "running front end on unsaved content"
        );

        let mut child = command.spawn().map_err(|e| self.launch_error(e))?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AutobindError::FrontEnd("front end stdin unavailable".into()))?;

        // Feed stdin from its own thread so a chatty child cannot fill stdout and stall.
        let content = content.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(content.as_bytes()));

        let output = child.wait_with_output().map_err(|e| self.launch_error(e))?;
        let unit = self.decode(virtual_path, output)?;

        match writer.join() {
            Ok(Ok(())) => Ok(unit),
            Ok(Err(e)) => Err(AutobindError::FrontEnd(format!(
                "failed to send unsaved content: {}",
                e
            ))),
            Err(_) => Err(AutobindError::FrontEnd(
                "stdin writer thread panicked".into(),
            )),
        }
    }
}
