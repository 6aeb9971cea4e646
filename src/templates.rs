//! Template store: a directory of `*.svg` pattern templates.
//!
//! Templates are looked up by file name (with or without the `.svg`
//! extension) or by an explicit path. New templates come in through
//! [`TemplateStore::import`], which validates a whole batch before writing
//! any file.

use crate::constants::{TEMPLATE_FILE_PREFIX, TEMPLATE_SLUG_MAX_LEN};
use crate::slug::slugify_or_timestamp;
use anyhow::Context;
use rand::seq::IndexedRandom;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static SVG_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<svg\b.*?</svg>").expect("svg document regex is valid")
});

/// Why an import was refused.
#[derive(Debug)]
pub enum ImportError {
    /// The template name is blank
    MissingName,
    /// Candidate number `index` (1-based) failed validation
    Invalid {
        /// 1-based position of the candidate in the input
        index: usize,
        /// What is missing
        reason: &'static str,
    },
    /// A target file already exists and `--no-clobber` was given
    AlreadyExists(PathBuf),
    /// Filesystem failure
    Io(anyhow::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Template name must not be empty"),
            Self::Invalid { index, reason } => {
                write!(f, "Invalid template SVG (#{index}): {reason}")
            }
            Self::AlreadyExists(path) => write!(
                f,
                "Template already exists: {} (drop --no-clobber to overwrite)",
                path.display()
            ),
            Self::Io(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<anyhow::Error> for ImportError {
    fn from(e: anyhow::Error) -> Self {
        Self::Io(e)
    }
}

/// Splits text into its `<svg>...</svg>` documents.
///
/// Text without any complete SVG document is returned whole (trimmed) as a
/// single candidate so validation can report what is missing.
#[must_use]
pub fn split_svg_documents(text: &str) -> Vec<String> {
    let documents: Vec<String> = SVG_DOCUMENT
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if documents.is_empty() {
        vec![text.trim().to_string()]
    } else {
        documents
    }
}

/// Checks that a candidate looks like a pattern template.
///
/// Substring checks only, case-insensitive.
pub fn validate_template(svg: &str) -> Result<(), &'static str> {
    let lower = svg.to_lowercase();
    if !lower.contains("<svg") {
        return Err("Missing \"<svg\"");
    }
    if !lower.contains("<pattern") {
        return Err("Missing \"<pattern\" (only the first pattern is used)");
    }
    if !lower.contains("</pattern>") {
        return Err("Missing \"</pattern>\"");
    }
    Ok(())
}

/// A directory of pattern templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Creates a store rooted at `dir`. The directory need not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template file names, sorted. A missing directory lists as empty.
    pub fn list(&self) -> anyhow::Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).context(format!(
            "Failed to read template directory: {}",
            self.dir.display()
        ))?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.to_lowercase().ends_with(".svg"))
            .collect();

        names.sort();
        Ok(names)
    }

    /// Resolves a `--template` argument to an existing file.
    ///
    /// Arguments that look like paths (contain a separator or end in `.svg`)
    /// are tried as paths first; then `<store>/<name>[.svg]`.
    #[must_use]
    pub fn resolve(&self, template: &str) -> Option<PathBuf> {
        if template.is_empty() {
            return None;
        }

        let looks_like_path =
            template.contains('/') || template.contains('\\') || template.ends_with(".svg");
        if looks_like_path {
            let candidate = PathBuf::from(template);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        let file_name = if template.ends_with(".svg") {
            template.to_string()
        } else {
            format!("{template}.svg")
        };
        let candidate = self.dir.join(file_name);
        candidate.is_file().then_some(candidate)
    }

    /// Picks a random template from the store, `None` when empty.
    pub fn pick_random(&self) -> anyhow::Result<Option<PathBuf>> {
        let names = self.list()?;
        Ok(names
            .choose(&mut rand::rng())
            .map(|name| self.dir.join(name)))
    }

    /// Planned target paths for `count` templates named `name`.
    fn target_paths(&self, name: &str, count: usize) -> Vec<PathBuf> {
        let slug = slugify_or_timestamp(name, TEMPLATE_SLUG_MAX_LEN, "template");
        (1..=count)
            .map(|i| {
                let suffix = if count > 1 {
                    format!("_{i}")
                } else {
                    String::new()
                };
                self.dir
                    .join(format!("{TEMPLATE_FILE_PREFIX}{slug}{suffix}.svg"))
            })
            .collect()
    }

    /// Imports one or more templates from raw text.
    ///
    /// Every candidate is validated before the first file is written. Existing
    /// targets are replaced unless `no_clobber` is set, in which case any
    /// existing target refuses the whole batch. Returns the written paths in
    /// input order.
    pub fn import(
        &self,
        name: &str,
        source: &str,
        no_clobber: bool,
    ) -> Result<Vec<PathBuf>, ImportError> {
        if name.trim().is_empty() {
            return Err(ImportError::MissingName);
        }

        let candidates = split_svg_documents(source);
        for (i, candidate) in candidates.iter().enumerate() {
            validate_template(candidate)
                .map_err(|reason| ImportError::Invalid { index: i + 1, reason })?;
        }

        let targets = self.target_paths(name, candidates.len());
        if no_clobber {
            if let Some(existing) = targets.iter().find(|p| p.exists()) {
                return Err(ImportError::AlreadyExists(existing.clone()));
            }
        }

        fs::create_dir_all(&self.dir).context(format!(
            "Failed to create template directory: {}",
            self.dir.display()
        ))?;

        for (candidate, target) in candidates.iter().zip(&targets) {
            fs::write(target, format!("{}\n", candidate.trim()))
                .context(format!("Failed to write template: {}", target.display()))?;
            tracing::info!(path = %target.display(), "saved template");
        }

        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><defs><pattern id="p" width="10" height="10"><rect fill="#2b2b31"/></pattern></defs></svg>"##;

    fn store() -> (TemplateStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        (TemplateStore::new(temp_dir.path().join("templates")), temp_dir)
    }

    #[test]
    fn test_split_multiple_documents() {
        let text = format!("{VALID}\n\n  {}\n", VALID.replace("id=\"p\"", "id=\"q\""));
        let docs = split_svg_documents(&text);
        assert_eq!(docs.len(), 2);
        assert!(docs[1].contains("id=\"q\""));
    }

    #[test]
    fn test_split_without_documents_returns_whole_input() {
        assert_eq!(split_svg_documents("  <pattern></pattern>\n"), vec!["<pattern></pattern>"]);
    }

    #[test]
    fn test_validate_template() {
        assert!(validate_template(VALID).is_ok());
        assert!(validate_template(&VALID.to_uppercase()).is_ok());
        assert_eq!(validate_template("<pattern></pattern>"), Err("Missing \"<svg\""));
        assert!(validate_template("<svg></svg>").unwrap_err().contains("<pattern"));
        assert_eq!(
            validate_template("<svg><pattern id='x'></svg>"),
            Err("Missing \"</pattern>\"")
        );
    }

    #[test]
    fn test_import_single() {
        let (store, _temp) = store();
        let written = store.import("Heart Stitch", VALID, false).unwrap();
        assert_eq!(written, vec![store.dir().join("template-heart-stitch.svg")]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), format!("{VALID}\n"));
    }

    #[test]
    fn test_import_batch_gets_suffixes() {
        let (store, _temp) = store();
        let written = store
            .import("waves", &format!("{VALID}{VALID}"), false)
            .unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["template-waves_1.svg", "template-waves_2.svg"]);
    }

    #[test]
    fn test_import_invalid_writes_nothing() {
        let (store, _temp) = store();
        let source = format!("{VALID}<svg><rect/></svg>");
        match store.import("broken", &source, false) {
            Err(ImportError::Invalid { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_import_overwrites_existing_by_default() {
        let (store, _temp) = store();
        store.import("dots", VALID, false).unwrap();
        let updated = VALID.replace("id=\"p\"", "id=\"q\"");

        let written = store.import("dots", &updated, false).unwrap();

        assert_eq!(written, vec![store.dir().join("template-dots.svg")]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), format!("{updated}\n"));
    }

    #[test]
    fn test_import_no_clobber_keeps_existing() {
        let (store, _temp) = store();
        store.import("dots", VALID, false).unwrap();
        let updated = VALID.replace("id=\"p\"", "id=\"q\"");

        assert!(matches!(
            store.import("dots", &updated, true),
            Err(ImportError::AlreadyExists(_))
        ));
        let kept = fs::read_to_string(store.dir().join("template-dots.svg")).unwrap();
        assert_eq!(kept, format!("{VALID}\n"));
    }

    #[test]
    fn test_import_blank_name() {
        let (store, _temp) = store();
        assert!(matches!(store.import("  ", VALID, false), Err(ImportError::MissingName)));
    }

    #[test]
    fn test_list_sorted_svg_only() {
        let (store, _temp) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("b.svg"), VALID).unwrap();
        fs::write(store.dir().join("a.SVG"), VALID).unwrap();
        fs::write(store.dir().join("notes.txt"), "x").unwrap();
        assert_eq!(store.list().unwrap(), vec!["a.SVG", "b.svg"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let (store, _temp) = store();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.pick_random().unwrap(), None);
    }

    #[test]
    fn test_resolve_by_name_and_path() {
        let (store, temp) = store();
        fs::create_dir_all(store.dir()).unwrap();
        let in_store = store.dir().join("template-dots.svg");
        fs::write(&in_store, VALID).unwrap();
        let outside = temp.path().join("elsewhere.svg");
        fs::write(&outside, VALID).unwrap();

        assert_eq!(store.resolve("template-dots"), Some(in_store.clone()));
        assert_eq!(store.resolve("template-dots.svg"), Some(in_store));
        assert_eq!(store.resolve(outside.to_str().unwrap()), Some(outside));
        assert_eq!(store.resolve("missing"), None);
        assert_eq!(store.resolve(""), None);
    }

    #[test]
    fn test_pick_random_from_store() {
        let (store, _temp) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("only.svg"), VALID).unwrap();
        assert_eq!(store.pick_random().unwrap(), Some(store.dir().join("only.svg")));
    }
}
