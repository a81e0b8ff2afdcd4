use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pysift")]
#[command(about = "Inspect Python source: functions, variables, docstrings, exception flow.")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List function names defined in a file
    Functions {
        /// Python file to inspect
        file: String,

        /// Skip functions whose name starts with a single underscore
        #[arg(long)]
        skip_private: bool,
    },

    /// List function arguments with annotations and defaults
    Args {
        /// Python file to inspect
        file: String,
    },

    /// List function docstrings
    Docstrings {
        /// Python file to inspect
        file: String,

        /// Skip functions whose name starts with a single underscore
        #[arg(long)]
        skip_private: bool,
    },

    /// List variable assignment targets
    Variables {
        /// Python file to inspect
        file: String,
    },

    /// List all-uppercase assignment targets
    Constants {
        /// Python file to inspect
        file: String,
    },

    /// Exception types raised and handled
    Exceptions {
        /// Python file to inspect
        file: String,
    },

    /// Render an import statement covering the file's functions
    ImportString {
        /// Python file to inspect
        file: String,

        /// Module name to import from
        #[arg(long)]
        module: String,
    },

    /// Functions with line spans and docstring summaries
    Outline {
        /// Python file to inspect
        file: String,
    },
}
