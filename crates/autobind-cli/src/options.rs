//! Input and configuration options shared by parsing commands

use anyhow::{Context, Result};
use autobind_core::GeneratorConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input headers, or JSON syntax tree dumps when no front end is set
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Path to autobind.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// External front-end executable (overrides the configuration)
    #[arg(long)]
    pub front_end: Option<PathBuf>,

    /// Namespace to extract (overrides the configuration)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Extra include directory passed to the front end
    #[arg(short = 'I', long = "include")]
    pub include_dirs: Vec<PathBuf>,
}

impl InputArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(namespace) = &self.namespace {
            config.parser.namespace = namespace.clone();
        }
        if let Some(front_end) = &self.front_end {
            config.parser.front_end = Some(front_end.clone());
        }
        config
            .parser
            .include_dirs
            .extend(self.include_dirs.iter().cloned());

        tracing::debug!(
            namespace = %config.parser.namespace,
            front_end = ?config.parser.front_end,
            "Loaded configuration"
        );
        Ok(config)
    }
}
