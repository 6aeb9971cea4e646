//! Branding and application identity configuration.
//!
//! This module centralizes the names the binaries print and the directory they
//! keep their data in, so help text and hints stay consistent.

/// The generator binary name (used in command examples).
pub const APP_BINARY_NAME: &str = "covergen";

/// The template importer binary name.
pub const IMPORTER_BINARY_NAME: &str = "covergen-add-template";

/// The batch cover writer binary name.
pub const BATCH_BINARY_NAME: &str = "covergen-batch";

/// The directory name for application data (config, templates, output).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "covergen";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "COVERGEN_CONFIG_DIR";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Generate SVG covers from pattern templates with a text overlay";

/// Example invocation rendering a cover from a given template file name.
pub fn generate_hint(template_file: &str) -> String {
    format!(
        "{} --title \"My Article\" --template {}",
        APP_BINARY_NAME, template_file
    )
}

/// Example invocation listing the template store.
pub fn list_templates_hint() -> String {
    format!("{} --list-templates", APP_BINARY_NAME)
}
