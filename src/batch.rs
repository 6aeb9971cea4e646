//! Batch covers for a static-site content tree.
//!
//! Every `<content>/posts/<slug>/index.md` is a post. Each post gets a cover
//! file next to its `index.md`, and the post's front matter gets a
//! `cover: <file>` line pointing at it.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Content root containing `posts/`
    pub content_dir: PathBuf,
    /// Cover file name written into each post directory
    pub cover_name: String,
    /// Overwrite covers that already exist
    pub force: bool,
    /// Report what would happen without touching any file
    pub dry_run: bool,
}

/// Result of updating a post's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterUpdate {
    /// New file content
    Updated(String),
    /// The cover line already had the wanted value
    Unchanged,
    /// The file has no `---` delimited front matter
    Missing,
}

/// What happened to a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Cover written; `front_matter` tells whether `index.md` changed
    Written {
        /// Whether `index.md` was rewritten
        front_matter: bool,
    },
    /// Dry run: the cover would have been written
    WouldWrite {
        /// Whether `index.md` would be rewritten
        front_matter: bool,
    },
    /// Cover exists and `force` was not set
    Skipped,
    /// Writing failed
    Failed(String),
}

/// Per-post outcomes plus totals.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(post directory name, outcome)` in processing order
    pub posts: Vec<(String, PostOutcome)>,
}

impl BatchReport {
    /// Posts whose cover was (or would be) written.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                PostOutcome::Written { .. } | PostOutcome::WouldWrite { .. }
            )
        })
    }

    /// Posts left alone because a cover existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Skipped))
    }

    /// Posts that failed.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&PostOutcome) -> bool) -> usize {
        self.posts.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Post directories under `<content_dir>/posts` that contain `index.md`, sorted.
pub fn find_posts(content_dir: &Path) -> Result<Vec<PathBuf>> {
    let posts_dir = content_dir.join("posts");
    if !posts_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&posts_dir).context(format!(
        "Failed to read posts directory: {}",
        posts_dir.display()
    ))?;

    let mut posts: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && path.join("index.md").is_file())
        .collect();

    posts.sort();
    Ok(posts)
}

/// Sets `cover: <cover_name>` inside the front matter of a Markdown post.
///
/// An existing `cover:` line is replaced; otherwise the line is added just
/// before the closing `---`, using the line ending of the opening `---`.
/// Lines outside the front matter are never touched.
#[must_use]
pub fn update_front_matter(content: &str, cover_name: &str) -> FrontMatterUpdate {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return FrontMatterUpdate::Missing;
    }
    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|l| l.trim_end() == "---")
        .map(|i| i + 1)
    else {
        return FrontMatterUpdate::Missing;
    };

    let cover_line = format!("cover: {cover_name}");
    let mut out: Vec<String> = lines.iter().map(|l| (*l).to_string()).collect();

    match (1..close).find(|&i| lines[i].starts_with("cover:")) {
        Some(i) if lines[i].trim_end() == cover_line => return FrontMatterUpdate::Unchanged,
        Some(i) => out[i] = format!("{cover_line}{}", line_ending(lines[i])),
        None => out.insert(close, format!("{cover_line}{}", line_ending(lines[0]))),
    }

    FrontMatterUpdate::Updated(out.concat())
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Writes `svg` as the cover of every post and links it from the front matter.
///
/// Fails when the content directory is missing or holds no posts; individual
/// post failures are recorded in the report instead.
pub fn run_batch(options: &BatchOptions, svg: &str) -> Result<BatchReport> {
    if !options.content_dir.is_dir() {
        bail!(
            "Content directory does not exist: {}",
            options.content_dir.display()
        );
    }

    let posts = find_posts(&options.content_dir)?;
    if posts.is_empty() {
        bail!(
            "No posts found under {}",
            options.content_dir.join("posts").display()
        );
    }

    let mut report = BatchReport::default();
    for post in posts {
        let name = post
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = process_post(&post, options, svg);
        tracing::debug!(post = %name, ?outcome, "processed post");
        report.posts.push((name, outcome));
    }

    Ok(report)
}

fn process_post(post: &Path, options: &BatchOptions, svg: &str) -> PostOutcome {
    let cover_path = post.join(&options.cover_name);
    if cover_path.exists() && !options.force {
        return PostOutcome::Skipped;
    }

    let index = post.join("index.md");
    let content = match fs::read_to_string(&index) {
        Ok(content) => content,
        Err(e) => return PostOutcome::Failed(format!("Failed to read {}: {e}", index.display())),
    };
    let update = update_front_matter(&content, &options.cover_name);

    if options.dry_run {
        return PostOutcome::WouldWrite {
            front_matter: matches!(update, FrontMatterUpdate::Updated(_)),
        };
    }

    if let Err(e) = fs::write(&cover_path, svg) {
        return PostOutcome::Failed(format!(
            "Failed to write {}: {e}",
            cover_path.display()
        ));
    }

    match update {
        FrontMatterUpdate::Updated(updated) => match fs::write(&index, updated) {
            Ok(()) => PostOutcome::Written { front_matter: true },
            Err(e) => PostOutcome::Failed(format!("Failed to write {}: {e}", index.display())),
        },
        FrontMatterUpdate::Unchanged | FrontMatterUpdate::Missing => {
            PostOutcome::Written { front_matter: false }
        }
    }
}
