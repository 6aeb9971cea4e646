//! Application-wide constants.
//!
//! Rendering defaults and the placeholder colors every bundled template is
//! authored with.

/// Id forced onto every normalized pattern; the background rect fills with `url(#a)`.
pub const PATTERN_ID: &str = "a";

/// Placeholder color for the background role.
pub const PLACEHOLDER_BACKGROUND: &str = "#2b2b31";

/// Placeholder color for the primary role.
pub const PLACEHOLDER_PRIMARY: &str = "#ecc94b";

/// Placeholder color for the accent role.
pub const PLACEHOLDER_ACCENT: &str = "#f44034";

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: f64 = 1200.0;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: f64 = 630.0;

/// Default fill for title and subtitle.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Default fill for the readability panel behind the text.
pub const DEFAULT_TEXT_BG: &str = "#000000";

/// Default opacity of the readability panel.
pub const DEFAULT_TEXT_BG_OPACITY: f64 = 0.35;

/// Default title font size.
pub const DEFAULT_TITLE_SIZE: f64 = 72.0;

/// Default subtitle font size.
pub const DEFAULT_SUBTITLE_SIZE: f64 = 30.0;

/// Default horizontal text anchor.
pub const DEFAULT_TEXT_X: &str = "50%";

/// Default vertical text anchor.
pub const DEFAULT_TEXT_Y: &str = "50%";

/// Default font stack.
pub const DEFAULT_FONT_FAMILY: &str = "ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, Helvetica, Arial, \"Apple Color Emoji\", \"Segoe UI Emoji\"";

/// Maximum slug length for generated cover file names.
pub const OUTPUT_SLUG_MAX_LEN: usize = 100;

/// Maximum slug length for imported template names.
pub const TEMPLATE_SLUG_MAX_LEN: usize = 80;

/// File name prefix for imported templates.
pub const TEMPLATE_FILE_PREFIX: &str = "template-";

/// Name of the preset consulted when none (or an unknown one) is requested.
pub const DEFAULT_PRESET: &str = "default";

/// Default cover file name written by the batch command.
pub const DEFAULT_COVER_NAME: &str = "cover.svg";
