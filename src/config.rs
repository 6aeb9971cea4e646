//! Configuration management for the application.
//!
//! This module handles loading application configuration in TOML
//! format with platform-specific directory resolution. The configuration only
//! carries the locations of the template store, the preset file and the default
//! output directory; everything else is decided per invocation.

use crate::branding::{APP_DATA_DIR, CONFIG_DIR_ENV};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Path configuration for file system locations.
///
/// Unset entries resolve relative to the config directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding `*.svg` pattern templates
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    /// Directory generated covers are written to when `--out` is omitted
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// JSON file mapping preset names to option sets
    #[serde(default)]
    pub presets_file: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/covergen/config.toml`
/// - macOS: `~/Library/Application Support/covergen/config.toml`
/// - Windows: `%APPDATA%\covergen\config.toml`
///
/// The directory can be moved with the `COVERGEN_CONFIG_DIR` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,

    /// Directory the config was loaded from; relative defaults hang off it.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    /// Creates a Config rooted at the given directory with default paths.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig::default(),
            base_dir: base_dir.into(),
        }
    }

    /// Gets the config directory path.
    ///
    /// `COVERGEN_CONFIG_DIR` wins when set and non-empty; otherwise the
    /// platform config directory joined with `covergen`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir()?)
    }

    /// Loads `config.toml` from an explicit directory.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::with_base_dir(dir));
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let mut config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;
        config.base_dir = dir.to_path_buf();

        Ok(config)
    }

    /// Resolved template store directory.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(self.paths.templates_dir.as_deref(), "templates")
    }

    /// Resolved default output directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(self.paths.output_dir.as_deref(), "output")
    }

    /// Resolved preset file path.
    #[must_use]
    pub fn presets_file(&self) -> PathBuf {
        self.resolve(self.paths.presets_file.as_deref(), "presets.json")
    }

    /// Applies command-line directory overrides on top of the file values.
    pub fn apply_overrides(
        &mut self,
        templates_dir: Option<&Path>,
        output_dir: Option<&Path>,
        presets_file: Option<&Path>,
    ) {
        if let Some(dir) = templates_dir {
            self.paths.templates_dir = Some(dir.to_path_buf());
        }
        if let Some(dir) = output_dir {
            self.paths.output_dir = Some(dir.to_path_buf());
        }
        if let Some(file) = presets_file {
            self.paths.presets_file = Some(file.to_path_buf());
        }
    }

    fn resolve(&self, configured: Option<&Path>, default_name: &str) -> PathBuf {
        match configured {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.base_dir.join(path),
            None => self.base_dir.join(default_name),
        }
    }
}
