//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the readme
//! configuration of a project without rendering it. File fragments are still
//! read, so missing files and unmatched boundaries are reported.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use fancy_readme::fragments::Fragment;
use std::path::PathBuf;

/// Validate the readme configuration of a project
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the pyproject.toml to validate
    #[arg(value_name = "PATH", default_value = "pyproject.toml")]
    pub pyproject: PathBuf,

    /// Path to an additional hatch.toml (default: auto-detect next to pyproject.toml)
    #[arg(long, value_name = "PATH")]
    pub hatch_toml: Option<PathBuf>,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs) -> Result<()> {
    let project = super::load_project(&args.pyproject, args.hatch_toml.as_deref())?;
    let hook = project.hook_config()?;
    let config = project.config()?;

    let files = config
        .fragments
        .iter()
        .filter(|f| matches!(f, Fragment::File(_)))
        .count();

    println!("Configuration is valid ({})", hook.location);
    println!("   Backend: {:?}", project.backend());
    println!("   Content type: {}", config.content_type);
    println!(
        "   Fragments: {} ({} from files)",
        config.fragments.len(),
        files
    );
    println!("   Substitutions: {}", config.substitutions.len());

    Ok(())
}
