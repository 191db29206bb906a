//! Dump-model command implementation

use anyhow::{Context, Result};
use autobind_codegen::Generator;
use std::path::Path;

use crate::options::InputArgs;

/// Parse every input and serialize the resulting model
pub fn model_json(input: &InputArgs) -> Result<String> {
    let config = input.load_config()?;
    let mut generator = Generator::from_config(config)?;
    generator.parse_files(&input.inputs)?;

    serde_json::to_string_pretty(generator.model()).context("Failed to serialize model")
}

pub fn run(input: &InputArgs, output: Option<&Path>) -> Result<()> {
    let json = model_json(input)?;

    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}
