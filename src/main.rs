mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing goes to stderr so stdout stays clean for command output.
    // Warnings only by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Command::Functions { file, skip_private } => {
            commands::cmd_functions(&file, skip_private, cli.json)
        }
        Command::Args { file } => commands::cmd_args(&file, cli.json),
        Command::Docstrings { file, skip_private } => {
            commands::cmd_docstrings(&file, skip_private, cli.json)
        }
        Command::Variables { file } => commands::cmd_variables(&file, cli.json),
        Command::Constants { file } => commands::cmd_constants(&file, cli.json),
        Command::Exceptions { file } => commands::cmd_exceptions(&file, cli.json),
        Command::ImportString { file, module } => {
            commands::cmd_import_string(&file, &module, cli.json)
        }
        Command::Outline { file } => commands::cmd_outline(&file, cli.json),
    }
}
