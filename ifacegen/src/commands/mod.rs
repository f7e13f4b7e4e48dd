mod check;
mod render;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use ifacegen_manifest::Manifest;
use render::RenderCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for ifacegen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Manifest location shared by every subcommand.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to the manifest (`.json` files are read as JSON)
    #[arg(short, long, default_value = "ifacegen.toml")]
    pub manifest: PathBuf,
}

impl ManifestArgs {
    /// Load and validate the manifest, exiting with a report on failure.
    pub fn load(&self) -> Manifest {
        Manifest::from_file(&self.manifest).unwrap_or_exit()
    }
}

#[derive(Parser)]
#[command(name = "ifacegen")]
#[command(version)]
#[command(about = "Generate Go interface declarations from a manifest")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated Go source to stdout
    Render(RenderCommand),

    /// Validate the manifest without generating code
    Check(CheckCommand),
}
