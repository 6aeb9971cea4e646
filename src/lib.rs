//! covergen library
//!
//! Generates cover-image SVG files from reusable pattern templates: the first
//! `<pattern>` of a template is extracted, recolored and rescaled through text
//! substitution, then composed with a title overlay into a full document.

// Module declarations
pub mod batch;
pub mod branding;
pub mod cli;
pub mod config;
pub mod constants;
pub mod pattern;
pub mod presets;
pub mod render;
pub mod slug;
pub mod templates;

pub use pattern::{extract_first_pattern, normalize_pattern, PatternOverrides};
pub use presets::{Preset, PresetBook};
pub use render::{escape_xml, render_background, render_cover, CoverRequest, TextStyle};
pub use templates::{ImportError, TemplateStore};
