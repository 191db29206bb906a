//! autobind CLI - Binding generator for annotated C++ headers
//!
//! Commands:
//! - `autobind generate` - Render one template from parsed headers
//! - `autobind dump-model` - Print the extracted declaration model as JSON
//! - `autobind check` - Validate an autobind.toml configuration
//! - `autobind targets` - List the built-in templates

use std::process::ExitCode;

use autobind_core::AutobindError;
use autobind_logging::LogLevel;
use clap::{Parser, Subcommand};

mod check;
mod dump_model;
mod generate;
mod options;
mod targets;

use options::InputArgs;

#[derive(Parser)]
#[command(name = "autobind")]
#[command(author, version, about = "Binding generator for annotated C++ headers", long_about = None)]
struct Cli {
    /// Diagnostics level on stderr (trace, debug, info, warn, error, off)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse headers and render one template
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Built-in template name or template file path
        #[arg(short, long)]
        template: String,

        /// Output file for the generated code
        #[arg(short, long)]
        output: std::path::PathBuf,
    },

    /// Parse headers and print the declaration model as JSON
    DumpModel {
        #[command(flatten)]
        input: InputArgs,

        /// Write the model to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Validate an autobind.toml configuration
    Check {
        /// Path to autobind.toml (default: ./autobind.toml)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// List the built-in templates
    Targets,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    autobind_logging::init_logging(cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            input,
            template,
            output,
        } => generate::run(&input, &template, &output),
        Commands::DumpModel { input, output } => dump_model::run(&input, output.as_deref()),
        Commands::Check { config } => check::run(config.as_deref()),
        Commands::Targets => {
            print!("{}", targets::listing());
            Ok(())
        }
    }
}

/// Exit code of the first [`AutobindError`] in the chain, 1 otherwise
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<AutobindError>())
        .and_then(|e| u8::try_from(e.error_code()).ok())
        .unwrap_or(1)
}
