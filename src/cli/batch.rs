//! Batch command: write a pattern cover into every post of a content tree.

use crate::batch::{run_batch, BatchOptions, PostOutcome};
use crate::branding::BATCH_BINARY_NAME;
use crate::cli::common::{CliError, CliResult, PathArgs, PatternArgs};
use crate::constants::{DEFAULT_COVER_NAME, DEFAULT_PRESET};
use crate::presets::PresetBook;
use crate::render::render_background;
use crate::templates::TemplateStore;
use clap::Parser;
use std::path::PathBuf;

/// Write a text-free pattern cover for every post and link it in front matter
#[derive(Debug, Clone, Parser)]
#[command(name = BATCH_BINARY_NAME, version)]
pub struct BatchArgs {
    /// Content directory containing posts/<slug>/index.md
    #[arg(long, value_name = "DIR", default_value = "content")]
    pub content_dir: PathBuf,

    /// Cover file name written next to each index.md
    #[arg(long, value_name = "FILE", default_value = DEFAULT_COVER_NAME)]
    pub cover_name: String,

    /// Overwrite existing covers
    #[arg(long)]
    pub force: bool,

    /// Show what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub pattern: PatternArgs,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self) -> CliResult<()> {
        if self.cover_name.contains(['/', '\\']) || self.cover_name.trim().is_empty() {
            return Err(CliError::usage(format!(
                "--cover-name must be a plain file name, got \"{}\"",
                self.cover_name
            )));
        }
        self.pattern.validate_canvas()?;

        let config = self.paths.load_config()?;
        let store = TemplateStore::new(config.templates_dir());
        let presets = PresetBook::load_or_empty(&config.presets_file());

        let preset_name = self.pattern.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let preset = presets.resolve(Some(preset_name));
        let loaded = self.pattern.load_pattern(&store, &preset)?;
        let svg = render_background(self.pattern.width, self.pattern.height, &loaded.pattern);

        let options = BatchOptions {
            content_dir: self.content_dir.clone(),
            cover_name: self.cover_name.clone(),
            force: self.force,
            dry_run: self.dry_run,
        };
        let report = run_batch(&options, &svg).map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("Found {} posts", report.posts.len());
        println!("Template: {}", loaded.template_path.display());
        if self.dry_run {
            println!("Dry run: no files will be modified");
        }
        println!();

        for (post, outcome) in &report.posts {
            println!("{post}");
            match outcome {
                PostOutcome::Skipped => println!(
                    "  skipped: {} exists (use --force to overwrite)",
                    self.cover_name
                ),
                PostOutcome::WouldWrite { front_matter } => {
                    println!("  would write: {}", self.cover_name);
                    if *front_matter {
                        println!("  would update: index.md");
                    }
                }
                PostOutcome::Written { front_matter: true } => {
                    println!("  ✓ wrote: {}", self.cover_name);
                    println!("  ✓ updated: index.md");
                }
                PostOutcome::Written { front_matter: false } => {
                    println!("  ✓ wrote: {}", self.cover_name);
                    println!("  front matter not updated (missing or already set)");
                }
                PostOutcome::Failed(message) => println!("  ✗ {message}"),
            }
        }

        println!();
        println!(
            "Done: {} updated, {} skipped, {} errors",
            report.updated(),
            report.skipped(),
            report.errors()
        );

        if report.errors() > 0 {
            return Err(CliError::io(format!(
                "{} post(s) could not be updated",
                report.errors()
            )));
        }

        Ok(())
    }
}
