//! Import command: add pattern templates to the store.

use crate::branding::{generate_hint, list_templates_hint, IMPORTER_BINARY_NAME};
use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::templates::TemplateStore;
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

/// Add SVG pattern templates to the template store
///
/// Reads the SVG from --file, or from standard input until EOF. Input holding
/// several <svg>...</svg> documents is saved as one template per document.
#[derive(Debug, Clone, Parser)]
#[command(name = IMPORTER_BINARY_NAME, version)]
pub struct ImportArgs {
    /// Template name (slugified into the file name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// SVG file to import (default: read standard input)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Template directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Refuse to replace templates that already exist
    #[arg(long)]
    pub no_clobber: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self) -> CliResult<()> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                CliError::usage(format!(
                    "Missing required: --name \"my-template-name\" (see {IMPORTER_BINARY_NAME} --help)"
                ))
            })?;

        let mut config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        config.apply_overrides(self.templates_dir.as_deref(), None, None);
        let store = TemplateStore::new(config.templates_dir());

        let source = self.read_source()?;
        let saved = store.import(name, &source, self.no_clobber)?;

        if let [single] = saved.as_slice() {
            println!("✓ Saved template: {}", single.display());
        } else {
            println!("✓ Saved {} templates:", saved.len());
            for path in &saved {
                println!("  - {}", path.display());
            }
        }

        if let Some(first) = saved.first().and_then(|p| p.file_name()) {
            println!("Next:");
            println!("  {}", list_templates_hint());
            println!("  {}", generate_hint(&first.to_string_lossy()));
        }

        Ok(())
    }

    fn read_source(&self) -> CliResult<String> {
        if let Some(file) = &self.file {
            return fs::read_to_string(file).map_err(|e| {
                CliError::io(format!("Failed to read {}: {e}", file.display()))
            });
        }

        let mut stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!("Paste SVG template, then press Ctrl-D to finish.");
        }

        let mut source = String::new();
        stdin
            .read_to_string(&mut source)
            .map_err(|e| CliError::io(format!("Failed to read standard input: {e}")))?;
        Ok(source)
    }
}
