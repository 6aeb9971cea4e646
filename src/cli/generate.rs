//! Generate command: render one cover from a template and a title.

use crate::branding::{APP_BINARY_NAME, APP_DESCRIPTION, IMPORTER_BINARY_NAME};
use crate::cli::common::{write_output, CliError, CliResult, PathArgs, PatternArgs};
use crate::config::Config;
use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_PRESET, DEFAULT_SUBTITLE_SIZE, DEFAULT_TEXT_BG,
    DEFAULT_TEXT_BG_OPACITY, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_X, DEFAULT_TEXT_Y,
    DEFAULT_TITLE_SIZE, OUTPUT_SLUG_MAX_LEN,
};
use crate::presets::{Preset, PresetBook};
use crate::render::{render_cover, CoverRequest, TextStyle};
use crate::slug::slugify_or_timestamp;
use crate::templates::TemplateStore;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Generate an SVG cover from a pattern template with a title overlay
#[derive(Debug, Clone, Parser)]
#[command(name = APP_BINARY_NAME, version, about = APP_DESCRIPTION, long_about = None)]
pub struct GenerateArgs {
    /// Cover title (required unless listing)
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Subtitle shown below the title
    #[arg(long, value_name = "TEXT")]
    pub subtitle: Option<String>,

    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Title and subtitle color
    #[arg(long = "textColor", value_name = "COLOR")]
    pub text_color: Option<String>,

    /// Readability panel color
    #[arg(long = "textBg", value_name = "COLOR")]
    pub text_bg: Option<String>,

    /// Readability panel opacity (0.0 to 1.0)
    #[arg(long = "textBgOpacity", value_name = "N")]
    pub text_bg_opacity: Option<f64>,

    /// Title font size
    #[arg(long = "titleSize", value_name = "N")]
    pub title_size: Option<f64>,

    /// Subtitle font size
    #[arg(long = "subtitleSize", value_name = "N")]
    pub subtitle_size: Option<f64>,

    /// Font family stack
    #[arg(long = "fontFamily", value_name = "FONTS")]
    pub font_family: Option<String>,

    /// Horizontal text anchor (percentage or coordinate)
    #[arg(long = "textX", value_name = "POS", default_value = DEFAULT_TEXT_X)]
    pub text_x: String,

    /// Vertical text anchor (percentage or coordinate)
    #[arg(long = "textY", value_name = "POS", default_value = DEFAULT_TEXT_Y)]
    pub text_y: String,

    /// Output file (default: <output dir>/<title slug>.svg)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// List available templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// List available presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Print listings as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Template listing for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct TemplateListResponse {
    /// Template file names
    pub templates: Vec<String>,
    /// Total number of templates
    pub count: usize,
    /// Template directory
    pub directory: String,
}

/// Preset listing for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct PresetListResponse {
    /// Preset names
    pub presets: Vec<String>,
    /// Total number of presets
    pub count: usize,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.paths.load_config()?;
        let store = TemplateStore::new(config.templates_dir());
        let presets = PresetBook::load_or_empty(&config.presets_file());

        if self.list_templates {
            return self.list_templates(&store);
        }
        if self.list_presets {
            return self.list_presets(&presets);
        }

        let title = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CliError::usage("Missing required: --title \"Article Title\""))?;

        self.pattern.validate_canvas()?;

        let preset_name = self.pattern.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let preset = presets.resolve(Some(preset_name));
        let loaded = self.pattern.load_pattern(&store, &preset)?;

        let request = CoverRequest {
            width: self.pattern.width,
            height: self.pattern.height,
            pattern: loaded.pattern,
            title: title.to_string(),
            subtitle: self.subtitle.clone().filter(|s| !s.is_empty()),
            style: self.text_style(&preset),
        };
        let svg = render_cover(&request).map_err(|e| CliError::usage(e.to_string()))?;

        let out = self.output_path(&config, title);
        write_output(&out, &svg)?;

        println!("✓ Generated: {}", out.display());
        println!("  template: {}", loaded.template_path.display());
        println!("  preset: {}", preset_name);

        Ok(())
    }

    /// Text styling: flag, then preset, then built-in default.
    fn text_style(&self, preset: &Preset) -> TextStyle {
        TextStyle {
            color: self
                .text_color
                .clone()
                .or_else(|| preset.text_color.clone())
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            title_size: self
                .title_size
                .or(preset.title_size)
                .unwrap_or(DEFAULT_TITLE_SIZE),
            subtitle_size: self
                .subtitle_size
                .or(preset.subtitle_size)
                .unwrap_or(DEFAULT_SUBTITLE_SIZE),
            panel_color: self
                .text_bg
                .clone()
                .or_else(|| preset.text_bg.clone())
                .unwrap_or_else(|| DEFAULT_TEXT_BG.to_string()),
            panel_opacity: self
                .text_bg_opacity
                .or(preset.text_bg_opacity)
                .unwrap_or(DEFAULT_TEXT_BG_OPACITY),
            x: self.text_x.clone(),
            y: self.text_y.clone(),
        }
    }

    fn output_path(&self, config: &Config, title: &str) -> PathBuf {
        match &self.out {
            Some(out) => out.clone(),
            None => config.output_dir().join(format!(
                "{}.svg",
                slugify_or_timestamp(title, OUTPUT_SLUG_MAX_LEN, "cover")
            )),
        }
    }

    fn list_templates(&self, store: &TemplateStore) -> CliResult<()> {
        let templates = store
            .list()
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.json {
            let response = TemplateListResponse {
                count: templates.len(),
                templates,
                directory: store.dir().display().to_string(),
            };
            print_json(&response)?;
        } else if templates.is_empty() {
            println!("(no templates found)");
            println!("Add one with: {} --name \"my-pattern\"", IMPORTER_BINARY_NAME);
        } else {
            for template in &templates {
                println!("{template}");
            }
        }

        Ok(())
    }

    fn list_presets(&self, presets: &PresetBook) -> CliResult<()> {
        let names: Vec<String> = presets.names().map(str::to_string).collect();

        if self.json {
            let response = PresetListResponse {
                count: names.len(),
                presets: names,
            };
            print_json(&response)?;
        } else if names.is_empty() {
            println!("(no presets found)");
        } else {
            for name in &names {
                println!("{name}");
            }
        }

        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
