//! covergen-add-template - add SVG pattern templates to the store
//!
//! ```bash
//! # Paste SVG, then Ctrl-D
//! covergen-add-template --name "heart-stitch"
//!
//! # From a file (several <svg> documents become heart-stitch_1, _2, ...)
//! covergen-add-template --name "heart-stitch" --file patterns.svg
//! ```

use clap::Parser;
use covergen::cli::{common, ImportArgs};

fn main() -> std::process::ExitCode {
    let args = ImportArgs::parse();
    common::init_tracing(args.verbose);
    common::finish(args.execute())
}
