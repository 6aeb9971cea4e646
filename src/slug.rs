//! Filesystem-safe names derived from free-form titles.

use chrono::Utc;

/// Characters that are unsafe in file names on at least one platform.
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Turns free-form text into a lowercase, hyphen-separated slug.
///
/// Unicode letters are kept as-is; only path-unsafe characters are dropped.
/// Returns `None` when nothing usable is left. The result is capped at
/// `max_len` characters without a trailing hyphen.
#[must_use]
pub fn slugify(text: &str, max_len: usize) -> Option<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { ' ' } else { c })
        .collect();

    let slug = cleaned
        .split_whitespace()
        .flat_map(|word| word.split('-'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    if slug.is_empty() {
        return None;
    }

    if slug.chars().count() > max_len {
        let cut: String = slug.chars().take(max_len).collect();
        let cut = cut.trim_end_matches('-').to_string();
        return if cut.is_empty() { None } else { Some(cut) };
    }

    Some(slug)
}

/// Like [`slugify`], falling back to `<prefix>-<unix millis>` for empty input.
#[must_use]
pub fn slugify_or_timestamp(text: &str, max_len: usize, prefix: &str) -> String {
    slugify(text, max_len)
        .unwrap_or_else(|| format!("{}-{}", prefix, Utc::now().timestamp_millis()))
}
