//! Generate command implementation

use anyhow::{Context, Result};
use autobind_codegen::{GenerateRequest, Generator};
use std::path::Path;

use crate::options::InputArgs;

pub fn run(input: &InputArgs, template: &str, output: &Path) -> Result<()> {
    let config = input.load_config()?;
    let mut generator = Generator::from_config(config)?;

    let request = GenerateRequest {
        inputs: input.inputs.clone(),
        template: template.to_string(),
        output: output.to_path_buf(),
    };
    let code = generator
        .generate(&request)
        .with_context(|| format!("Failed to generate {}", output.display()))?;

    println!(
        "✓ Generated {} ({} bytes, {} declarations from {} input(s))",
        output.display(),
        code.len(),
        generator.model().len(),
        request.inputs.len()
    );

    Ok(())
}
