//! Render command implementation
//!
//! Loads the project, validates its readme configuration and prints the
//! rendered text (or writes it to a file).

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the pyproject.toml to use for rendering
    #[arg(value_name = "PATH", default_value = "pyproject.toml")]
    pub pyproject: PathBuf,

    /// Path to an additional hatch.toml (default: auto-detect next to pyproject.toml)
    #[arg(long, value_name = "PATH")]
    pub hatch_toml: Option<PathBuf>,

    /// Target file for output (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let project = super::load_project(&args.pyproject, args.hatch_toml.as_deref())?;
    let readme = project.render()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", readme.text))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} readme to {}", readme.content_type, path.display());
        }
        None => println!("{}", readme.text),
    }

    Ok(())
}
