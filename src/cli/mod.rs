//! CLI command handlers for covergen.
//!
//! Each binary parses one of these argument structs and calls `execute`.
//! Handlers return [`CliResult`]; [`common::finish`] maps errors to exit codes.

pub mod batch;
pub mod common;
pub mod generate;
pub mod import;

// Re-export types used by the binaries and tests
pub use batch::BatchArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use import::ImportArgs;
