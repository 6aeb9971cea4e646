//! covergen-batch - pattern covers for every post of a content tree
//!
//! ```bash
//! covergen-batch --content-dir content --template dots --dry-run
//! covergen-batch --content-dir content --template dots --force
//! ```

use clap::Parser;
use covergen::cli::{common, BatchArgs};

fn main() -> std::process::ExitCode {
    let args = BatchArgs::parse();
    common::init_tracing(args.verbose);
    common::finish(args.execute())
}
