//! Check command implementation

use anyhow::{Context, Result};
use autobind_core::GeneratorConfig;
use std::path::Path;

/// Load and validate a configuration, compiling its type mappings
pub fn load(path: &Path) -> Result<GeneratorConfig> {
    let config = GeneratorConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;

    config.validate()?;
    config.type_map()?;

    Ok(config)
}

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.unwrap_or(Path::new("autobind.toml"));

    println!("Checking configuration: {}", path.display());

    let config = load(path)?;

    println!("✓ Namespace: {}", config.parser.namespace);
    match &config.parser.front_end {
        Some(front_end) => println!("✓ Front end: {}", front_end.display()),
        None => println!("✓ Front end: none (inputs are syntax tree dumps)"),
    }
    println!("✓ Module: {}", config.codegen.module_name);
    println!("✓ Type mappings: {}", config.type_mappings.len());
    println!("\nConfiguration is valid!");

    Ok(())
}
