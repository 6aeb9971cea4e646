//! Shared CLI plumbing: exit codes, errors, logging setup and the argument
//! groups used by more than one binary.

use crate::config::Config;
use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, PLACEHOLDER_ACCENT, PLACEHOLDER_BACKGROUND,
    PLACEHOLDER_PRIMARY,
};
use crate::pattern::{extract_first_pattern, normalize_pattern, PatternOverrides};
use crate::presets::Preset;
use crate::templates::{ImportError, TemplateStore};
use clap::Args;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Process exit codes shared by all binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Finished normally
    Success = 0,
    /// Unexpected runtime failure (filesystem, config)
    Failure = 1,
    /// Missing argument, unusable template or rejected input
    Usage = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process ends with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// A required argument is missing or malformed.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Usage,
            message: message.into(),
        }
    }

    /// Input was understood but is unusable (missing template, bad SVG).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Usage,
            message: message.into(),
        }
    }

    /// Unexpected I/O or configuration failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Failure,
            message: message.into(),
        }
    }

    /// Prints the error and returns the exit code for `main`.
    #[must_use]
    pub fn report(&self) -> std::process::ExitCode {
        eprintln!("Error: {}", self.message);
        self.code.into()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ImportError> for CliError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Io(_) => Self::io(e.to_string()),
            _ => Self::validation(e.to_string()),
        }
    }
}

/// Turns a handler result into the process exit code.
pub fn finish(result: CliResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => e.report(),
    }
}

/// Initializes tracing to stderr.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Directory overrides accepted by the generator and batch binaries.
#[derive(Debug, Clone, Default, Args)]
pub struct PathArgs {
    /// Template directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Preset JSON file (overrides config)
    #[arg(long = "presets", value_name = "FILE")]
    pub presets_file: Option<PathBuf>,

    /// Default output directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl PathArgs {
    /// Loads the config file and applies these overrides.
    pub fn load_config(&self) -> CliResult<Config> {
        let mut config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        config.apply_overrides(
            self.templates_dir.as_deref(),
            self.output_dir.as_deref(),
            self.presets_file.as_deref(),
        );
        Ok(config)
    }
}

/// Template choice, canvas size and pattern overrides.
#[derive(Debug, Clone, Args)]
pub struct PatternArgs {
    /// Template name in the store, or a path to an SVG file (random if omitted)
    #[arg(long, value_name = "NAME|PATH")]
    pub template: Option<String>,

    /// Preset name (falls back to "default")
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Canvas width
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WIDTH)]
    pub width: f64,

    /// Canvas height
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_HEIGHT)]
    pub height: f64,

    /// Background color (replaces #2b2b31)
    #[arg(long, value_name = "COLOR")]
    pub bg: Option<String>,

    /// Primary color (replaces #ecc94b)
    #[arg(long, value_name = "COLOR")]
    pub primary: Option<String>,

    /// Accent color (replaces #f44034)
    #[arg(long, value_name = "COLOR")]
    pub accent: Option<String>,

    /// Pattern tile width
    #[arg(long = "tileW", value_name = "N")]
    pub tile_width: Option<f64>,

    /// Pattern tile height
    #[arg(long = "tileH", value_name = "N")]
    pub tile_height: Option<f64>,

    /// Pattern scale factor
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Pattern rotation in degrees
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub rotate: Option<f64>,
}

/// A template resolved and reduced to its normalized pattern.
#[derive(Debug, Clone)]
pub struct LoadedPattern {
    /// Template file the pattern came from
    pub template_path: PathBuf,
    /// Normalized `<pattern>` block
    pub pattern: String,
}

impl PatternArgs {
    /// Checks the canvas size.
    pub fn validate_canvas(&self) -> CliResult<()> {
        for (flag, value) in [("--width", self.width), ("--height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CliError::usage(format!(
                    "{flag} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Overrides for the normalizer: flag, then preset, then placeholder.
    #[must_use]
    pub fn overrides(&self, preset: &Preset) -> PatternOverrides {
        let pick = |flag: &Option<String>, preset: &Option<String>, default: &str| {
            Some(
                flag.clone()
                    .or_else(|| preset.clone())
                    .unwrap_or_else(|| default.to_string()),
            )
        };

        PatternOverrides {
            background: pick(&self.bg, &preset.bg, PLACEHOLDER_BACKGROUND),
            primary: pick(&self.primary, &preset.primary, PLACEHOLDER_PRIMARY),
            accent: pick(&self.accent, &preset.accent, PLACEHOLDER_ACCENT),
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            scale: self.scale,
            rotate: self.rotate,
        }
    }

    /// Finds the template file: the named one, or a random one from the store.
    pub fn resolve_template(&self, store: &TemplateStore) -> CliResult<PathBuf> {
        if let Some(name) = self.template.as_deref().filter(|n| !n.is_empty()) {
            return store.resolve(name).ok_or_else(|| {
                CliError::validation(format!(
                    "Template not found: {name} (looked in {})",
                    store.dir().display()
                ))
            });
        }

        store
            .pick_random()
            .map_err(|e| CliError::io(format!("{e:#}")))?
            .ok_or_else(|| {
                CliError::validation(format!(
                    "No templates found in: {}",
                    store.dir().display()
                ))
            })
    }

    /// Resolves, reads, extracts and normalizes the template's pattern.
    pub fn load_pattern(&self, store: &TemplateStore, preset: &Preset) -> CliResult<LoadedPattern> {
        let template_path = self.resolve_template(store)?;
        tracing::debug!(path = %template_path.display(), "using template");

        let pattern = read_pattern(&template_path, &self.overrides(preset))?;
        Ok(LoadedPattern {
            template_path,
            pattern,
        })
    }
}

/// Reads a template file and returns its normalized first pattern.
pub fn read_pattern(path: &Path, overrides: &PatternOverrides) -> CliResult<String> {
    let svg = fs::read_to_string(path).map_err(|e| {
        CliError::io(format!("Failed to read template {}: {e}", path.display()))
    })?;

    let raw = extract_first_pattern(&svg).ok_or_else(|| {
        CliError::validation(format!(
            "Template does not contain <pattern>: {}",
            path.display()
        ))
    })?;

    Ok(normalize_pattern(raw, overrides))
}

/// Creates the parent directory of `path` and writes `content`.
pub fn write_output(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::io(format!(
                "Failed to create output directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        pattern: PatternArgs,
    }

    fn parse(args: &[&str]) -> PatternArgs {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .pattern
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::usage("x").code, ExitCode::Usage);
        assert_eq!(CliError::validation("x").code, ExitCode::Usage);
        assert_eq!(CliError::io("x").code, ExitCode::Failure);
        assert_eq!(ExitCode::Usage as u8, 2);
    }

    #[test]
    fn test_import_error_mapping() {
        let invalid = CliError::from(ImportError::Invalid { index: 2, reason: "Missing \"<svg\"" });
        assert_eq!(invalid.code, ExitCode::Usage);
        assert!(invalid.message.contains("#2"));

        let io = CliError::from(ImportError::Io(anyhow::anyhow!("disk full")));
        assert_eq!(io.code, ExitCode::Failure);
    }

    #[test]
    fn test_camel_case_flags() {
        let args = parse(&["--tileW", "40", "--tileH", "20", "--rotate", "-15"]);
        assert_eq!(args.tile_width, Some(40.0));
        assert_eq!(args.tile_height, Some(20.0));
        assert_eq!(args.rotate, Some(-15.0));
        assert_eq!(args.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_overrides_precedence() {
        let args = parse(&["--bg", "#000001"]);
        let preset = Preset {
            bg: Some("#000002".to_string()),
            primary: Some("#000003".to_string()),
            ..Preset::default()
        };
        let overrides = args.overrides(&preset);
        assert_eq!(overrides.background.as_deref(), Some("#000001"));
        assert_eq!(overrides.primary.as_deref(), Some("#000003"));
        assert_eq!(overrides.accent.as_deref(), Some(PLACEHOLDER_ACCENT));
    }

    #[test]
    fn test_validate_canvas() {
        assert!(parse(&[]).validate_canvas().is_ok());
        assert!(parse(&["--width", "0"]).validate_canvas().is_err());
        assert!(parse(&["--height", "NaN"]).validate_canvas().is_err());
    }
}
