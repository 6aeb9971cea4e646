//! covergen - render SVG covers from pattern templates
//!
//! Usage:
//!   covergen --title "Article Title"             Random template, default preset
//!   covergen --title "..." --template dots       Pick a template from the store
//!   covergen --list-templates | --list-presets   Show what is available

use clap::Parser;
use covergen::cli::{common, GenerateArgs};

fn main() -> std::process::ExitCode {
    let args = GenerateArgs::parse();
    common::init_tracing(args.verbose);
    common::finish(args.execute())
}
