//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A template using all three placeholder colors, with an id and transform to rewrite.
pub const HEX_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><defs><pattern id="hex" width="30" height="60" patternTransform="scale(2)" patternUnits="userSpaceOnUse"><rect width="100%" height="100%" fill="#2b2b31"/><path fill="#ecc94b" d="M9.27 0 0 6.48v23.49l15 10V60h5.16L30 53.46V29.97L15 19.96V0Z"/><path fill="#F44034" d="M0 0v3.4L5 0z"/></pattern></defs><rect width="800%" height="800%" fill="url(#hex)"/></svg>"##;

/// A template without any id on its pattern.
pub const DOTS_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><defs><pattern width="20" height="20" patternUnits="userSpaceOnUse"><rect width="100%" height="100%" fill="#2b2b31"/><circle cx="10" cy="10" r="3" fill="#ecc94b"/></pattern></defs></svg>"##;

/// An SVG with no pattern element.
pub const NO_PATTERN_SVG: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="10" height="10"/></svg>"#;

/// An isolated covergen home: config dir with templates/, output/ and presets.json.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Creates a workspace with `template-hex.svg` and `template-dots.svg`.
    pub fn with_templates() -> Self {
        let ws = Self::new();
        ws.add_template("template-hex.svg", HEX_TEMPLATE);
        ws.add_template("template-dots.svg", DOTS_TEMPLATE);
        ws
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn add_template(&self, file_name: &str, content: &str) -> PathBuf {
        fs::create_dir_all(self.templates_dir()).expect("Failed to create templates dir");
        let path = self.templates_dir().join(file_name);
        fs::write(&path, content).expect("Failed to write template");
        path
    }

    pub fn write_presets(&self, json: &str) {
        fs::write(self.root().join("presets.json"), json).expect("Failed to write presets");
    }

    /// Template file names currently in the store.
    pub fn template_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.templates_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Command for one of the binaries, isolated to this workspace.
    pub fn command(&self, bin: &str) -> Command {
        let mut cmd = Command::new(bin);
        cmd.env("COVERGEN_CONFIG_DIR", self.root());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Runs a binary with args and no stdin.
    pub fn run(&self, bin: &str, args: &[&str]) -> Output {
        self.command(bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a binary with args, feeding `input` on stdin until EOF.
    pub fn run_with_stdin(&self, bin: &str, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(bin)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn command");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for command")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Creates a post directory with an `index.md`.
pub fn make_post(content_dir: &Path, slug: &str, index: &str) -> PathBuf {
    let dir = content_dir.join("posts").join(slug);
    fs::create_dir_all(&dir).expect("Failed to create post dir");
    fs::write(dir.join("index.md"), index).expect("Failed to write index.md");
    dir
}
