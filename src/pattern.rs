//! Pattern extraction and normalization.
//!
//! Templates are plain SVG text. The first `<pattern>` block is cut out with a
//! text search and then rewritten attribute by attribute, so no XML parser is
//! involved. Nested `<pattern>` elements and malformed markup are not
//! supported: the non-greedy match simply stops at the first `</pattern>`.

use crate::constants::{
    PATTERN_ID, PLACEHOLDER_ACCENT, PLACEHOLDER_BACKGROUND, PLACEHOLDER_PRIMARY,
};
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static PATTERN_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pattern\b.*?</pattern>").expect("pattern block regex is valid")
});

static PATTERN_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<pattern\b[^>]*>?").expect("pattern open tag regex is valid")
});

static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("id"));
static WIDTH_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("width"));
static HEIGHT_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("height"));
static TRANSFORM_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("patternTransform"));

/// Matches ` name="..."` or ` name='...'`, whitespace before the name required so
/// `stroke-width` or `data-id` never count as `width` / `id`.
fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)(\s){}\s*=\s*(?:"[^"]*"|'[^']*')"#,
        regex::escape(name)
    ))
    .expect("attribute regex is valid")
}

/// Caller-supplied changes applied by [`normalize_pattern`].
///
/// Every field is optional; an empty set only pins the pattern id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternOverrides {
    /// Replaces the background placeholder color
    pub background: Option<String>,
    /// Replaces the primary placeholder color
    pub primary: Option<String>,
    /// Replaces the accent placeholder color
    pub accent: Option<String>,
    /// New tile `width`
    pub tile_width: Option<f64>,
    /// New tile `height`
    pub tile_height: Option<f64>,
    /// `scale(..)` component of `patternTransform`
    pub scale: Option<f64>,
    /// `rotate(..)` component of `patternTransform`
    pub rotate: Option<f64>,
}

impl PatternOverrides {
    /// Builds the `patternTransform` value, scale first, or `None` when neither is set.
    #[must_use]
    pub fn transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(scale) = self.scale {
            parts.push(format!("scale({scale})"));
        }
        if let Some(rotate) = self.rotate {
            parts.push(format!("rotate({rotate})"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Returns the first `<pattern ...>...</pattern>` block of an SVG document.
///
/// Matching is case-insensitive and spans newlines. `None` means the document
/// has no pattern element.
#[must_use]
pub fn extract_first_pattern(svg: &str) -> Option<&str> {
    PATTERN_BLOCK.find(svg).map(|m| m.as_str())
}

/// Rewrites an extracted pattern block.
///
/// In order: pins `id` to [`PATTERN_ID`], replaces `width`/`height`, sets
/// `patternTransform`, then swaps the placeholder colors. Only the opening
/// `<pattern>` tag is touched for attributes; color replacement covers the
/// whole block.
#[must_use]
pub fn normalize_pattern(pattern: &str, overrides: &PatternOverrides) -> String {
    let (before, open_tag, after) = match PATTERN_OPEN_TAG.find(pattern) {
        Some(m) => (
            &pattern[..m.start()],
            m.as_str().to_string(),
            &pattern[m.end()..],
        ),
        // No opening tag at all: nothing to pin, colors still apply.
        None => return replace_colors(pattern.to_string(), overrides),
    };

    let mut tag = pin_id(&open_tag);

    if let Some(width) = overrides.tile_width {
        tag = replace_first_attr(&WIDTH_ATTR, &tag, "width", &width.to_string());
    }
    if let Some(height) = overrides.tile_height {
        tag = replace_first_attr(&HEIGHT_ATTR, &tag, "height", &height.to_string());
    }

    if let Some(transform) = overrides.transform() {
        tag = if TRANSFORM_ATTR.is_match(&tag) {
            replace_first_attr(&TRANSFORM_ATTR, &tag, "patternTransform", &transform)
        } else {
            insert_attr(&tag, "patternTransform", &transform)
        };
    }

    replace_colors(format!("{before}{tag}{after}"), overrides)
}

/// Forces exactly one `id="a"` on the opening tag.
///
/// The first id attribute is rewritten in place, any further ones are dropped.
fn pin_id(tag: &str) -> String {
    if !ID_ATTR.is_match(tag) {
        return insert_attr(tag, "id", PATTERN_ID);
    }

    let mut seen = false;
    ID_ATTR
        .replace_all(tag, |caps: &regex::Captures<'_>| {
            if seen {
                String::new()
            } else {
                seen = true;
                format!("{}id=\"{}\"", &caps[1], PATTERN_ID)
            }
        })
        .into_owned()
}

fn replace_first_attr(re: &Regex, tag: &str, name: &str, value: &str) -> String {
    re.replacen(tag, 1, |caps: &regex::Captures<'_>| {
        format!("{}{}=\"{}\"", &caps[1], name, value)
    })
    .into_owned()
}

/// Inserts `name="value"` directly after `<pattern`.
fn insert_attr(tag: &str, name: &str, value: &str) -> String {
    // `<pattern` is 8 bytes of ASCII, matched case-insensitively by the caller.
    let split = "<pattern".len();
    format!("{} {}=\"{}\"{}", &tag[..split], name, value, &tag[split..])
}

fn replace_colors(mut text: String, overrides: &PatternOverrides) -> String {
    let swaps = [
        (PLACEHOLDER_BACKGROUND, overrides.background.as_deref()),
        (PLACEHOLDER_PRIMARY, overrides.primary.as_deref()),
        (PLACEHOLDER_ACCENT, overrides.accent.as_deref()),
    ];

    for (placeholder, replacement) in swaps {
        if let Some(color) = replacement {
            text = replace_ignore_case(&text, placeholder, color);
        }
    }

    text
}

/// Replaces every case-insensitive occurrence of `needle`.
fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    match Regex::new(&format!("(?i){}", regex::escape(needle))) {
        Ok(re) => re.replace_all(haystack, NoExpand(replacement)).into_owned(),
        Err(_) => haystack.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><defs><pattern id="hex" width="30" height="60" patternTransform="scale(2)" patternUnits="userSpaceOnUse"><rect width="100%" height="100%" fill="#2b2b31"/><path fill="#ECC94B" d="M0 0h5"/><path fill="#f44034" d="M1 1h5"/><path fill="#ecc94b" d="M2 2h5"/></pattern></defs><rect width="800%" height="800%" fill="url(#hex)"/></svg>"##;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_extract_returns_exact_block() {
        let block = extract_first_pattern(TEMPLATE).unwrap();
        assert!(block.starts_with("<pattern id=\"hex\""));
        assert!(block.ends_with("</pattern>"));
        assert_eq!(count(block, "<path"), 3);
        assert!(!block.contains("<defs>"));
    }

    #[test]
    fn test_extract_is_case_insensitive_and_multiline() {
        let svg = "<svg>\n<PATTERN id='x'\n width='4'>\n<rect/>\n</Pattern>\n</svg>";
        assert_eq!(
            extract_first_pattern(svg),
            Some("<PATTERN id='x'\n width='4'>\n<rect/>\n</Pattern>")
        );
    }

    #[test]
    fn test_extract_takes_first_of_many() {
        let svg = "<pattern id=\"one\"></pattern><pattern id=\"two\"></pattern>";
        assert_eq!(extract_first_pattern(svg), Some("<pattern id=\"one\"></pattern>"));
    }

    #[test]
    fn test_extract_missing_pattern() {
        assert_eq!(extract_first_pattern("<svg><rect/></svg>"), None);
        // <patterns> is not a pattern element
        assert_eq!(extract_first_pattern("<patterns></pattern>"), None);
    }

    #[test]
    fn test_normalize_replaces_existing_id() {
        let out = normalize_pattern(
            "<pattern id='hex' width=\"3\"><rect/></pattern>",
            &PatternOverrides::default(),
        );
        assert_eq!(out, "<pattern id=\"a\" width=\"3\"><rect/></pattern>");
    }

    #[test]
    fn test_normalize_inserts_missing_id() {
        let out = normalize_pattern(
            "<pattern width=\"3\"><rect id=\"inner\"/></pattern>",
            &PatternOverrides::default(),
        );
        assert_eq!(out, "<pattern id=\"a\" width=\"3\"><rect id=\"inner\"/></pattern>");
    }

    #[test]
    fn test_normalize_single_id_with_duplicates() {
        let out = normalize_pattern(
            "<pattern id=\"x\" data-id=\"y\" ID='z'><g id=\"a\"/></pattern>",
            &PatternOverrides::default(),
        );
        let open_tag = &out[..out.find('>').unwrap()];
        assert_eq!(count(open_tag, "id=\"a\""), 1);
        assert!(open_tag.contains("data-id=\"y\""));
        assert!(!open_tag.contains("'z'"));
    }

    #[test]
    fn test_normalize_tile_size_verbatim() {
        let overrides = PatternOverrides {
            tile_width: Some(40.0),
            tile_height: Some(12.5),
            ..PatternOverrides::default()
        };
        let out = normalize_pattern(
            "<pattern id=\"a\" width=\"30\" height=\"60\" stroke-width=\"1\"><rect width=\"100%\"/></pattern>",
            &overrides,
        );
        assert!(out.starts_with("<pattern id=\"a\" width=\"40\" height=\"12.5\" stroke-width=\"1\">"));
        // Child attributes are untouched
        assert!(out.contains("<rect width=\"100%\"/>"));
    }

    #[test]
    fn test_transform_scale_then_rotate() {
        let overrides = PatternOverrides {
            scale: Some(2.0),
            rotate: Some(15.0),
            ..PatternOverrides::default()
        };
        assert_eq!(overrides.transform().as_deref(), Some("scale(2) rotate(15)"));

        let out = normalize_pattern(TEMPLATE, &overrides);
        assert!(out.contains("patternTransform=\"scale(2) rotate(15)\""));
        assert_eq!(count(&out, "patternTransform"), 1);
    }

    #[test]
    fn test_transform_inserted_when_absent() {
        let overrides = PatternOverrides {
            rotate: Some(-7.5),
            ..PatternOverrides::default()
        };
        let out = normalize_pattern("<pattern width=\"3\"></pattern>", &overrides);
        assert_eq!(
            out,
            "<pattern patternTransform=\"rotate(-7.5)\" id=\"a\" width=\"3\"></pattern>"
        );
    }

    #[test]
    fn test_no_transform_leaves_existing_value() {
        let out = normalize_pattern(TEMPLATE, &PatternOverrides::default());
        assert!(out.contains("patternTransform=\"scale(2)\""));
    }

    #[test]
    fn test_colors_replaced_globally_ignoring_case() {
        let overrides = PatternOverrides {
            background: Some("#112233".to_string()),
            primary: Some("tomato".to_string()),
            accent: Some("$1".to_string()),
            ..PatternOverrides::default()
        };
        let block = extract_first_pattern(TEMPLATE).unwrap();
        let out = normalize_pattern(block, &overrides);

        assert!(out.contains("fill=\"#112233\""));
        assert_eq!(count(&out, "fill=\"tomato\""), 2);
        assert!(!out.to_lowercase().contains(PLACEHOLDER_PRIMARY));
        // Replacement text is literal, not a capture reference
        assert!(out.contains("fill=\"$1\""));
    }

    #[test]
    fn test_colors_kept_without_overrides() {
        let block = extract_first_pattern(TEMPLATE).unwrap();
        let out = normalize_pattern(block, &PatternOverrides::default());
        assert!(out.contains(PLACEHOLDER_BACKGROUND));
        assert!(out.contains("#ECC94B"));
    }
}
