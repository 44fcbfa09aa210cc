use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::{env, path::PathBuf};

use crate::tracer::Compiler;

#[derive(Debug, Clone, Parser)]
#[command(name = "transitype")]
#[command(version)]
#[command(
    about = "Find devDependencies that leak into a library's exported types",
    long_about = None
)]
pub struct Config {
    /// List of TypeScript files to trace (skips discovery and prompts)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub files: Vec<String>,

    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Command used to run the TypeScript compiler
    #[arg(long, default_value = "npx tsc")]
    pub tsc: String,
}

impl Config {
    /// Initialize the config by resolving the root directory
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, using current directory");
            env::current_dir()?
        };
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    pub fn compiler(&self) -> Result<Compiler> {
        Compiler::from_command_line(&self.tsc)
    }
}
