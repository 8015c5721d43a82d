//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Fancy Readme - Render a package readme from fragments and substitutions
#[derive(Parser, Debug)]
#[command(name = "fancy-readme")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the readme configured in pyproject.toml / hatch.toml
    Render(commands::render::RenderArgs),

    /// Check the readme configuration without rendering it
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Render(args) => commands::render::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
        }
    }
}
