//! Utility functions for timestamps, text derivation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - ISO-8601 and RFC-822 timestamp formatting
//! - Slugs, titles, excerpts and reading time derived from article Markdown
//! - JSON error detection and code-fence stripping for LLM responses
//! - File system validation for output directories

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static FIRST_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*\n(.*?)\n?\s*```\s*$").unwrap());

/// Words read per minute when estimating reading time.
const WORDS_PER_MINUTE: usize = 200;

/// ISO-8601 with millisecond precision and a `Z` suffix
/// (`2025-10-01T08:30:00.123Z`).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored ISO-8601 timestamp.
///
/// Accepts full RFC-3339 strings and bare `YYYY-MM-DD` dates (read as midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way RSS readers expect (`Wed, 01 Oct 2025 08:30:00 GMT`).
pub fn rfc822(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// The `YYYY-MM-DD` part of a stored timestamp, if it parses.
pub fn date_part(s: &str) -> Option<String> {
    parse_timestamp(s).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes (backing off to a char boundary)
/// with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Keep at most `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// When the LLM response is cut off by its token limit the JSON ends early
/// and fails with an EOF error.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````) if present.
pub fn strip_code_fences(s: &str) -> &str {
    match CODE_FENCE.captures(s).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => s.trim(),
    }
}

/// Convert a title or category name to a URL slug.
///
/// Lowercases, drops everything except ASCII letters, digits, whitespace and
/// hyphens, then collapses whitespace runs into a single hyphen.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Machine Learning"), "machine-learning");
/// assert_eq!(slugify("CI/CD & You"), "cicd-you");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lower, "");
    WHITESPACE_RUN.replace_all(&kept, "-").into_owned()
}

/// The text of the first level-one Markdown heading.
pub fn extract_title(markdown: &str) -> Option<String> {
    FIRST_H1
        .captures(markdown)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Build a listing excerpt from article Markdown.
///
/// Uses the first paragraph that is not a heading and is longer than 50
/// characters, cut to 200 characters. Falls back to the title cut to 150.
pub fn build_excerpt(markdown: &str, title: &str) -> String {
    let paragraph = markdown
        .split("\n\n")
        .find(|p| !p.starts_with('#') && p.trim().chars().count() > 50);

    match paragraph {
        Some(p) => format!("{}...", truncate_chars(p, 200)),
        None => format!("{}...", truncate_chars(title, 150)),
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `word_count` words, rounded up.
pub fn reading_time(word_count: usize) -> u32 {
    word_count.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a scratch file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = path.join("..__write_check__");
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert!(result.starts_with('é'));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Machine Learning"), "machine-learning");
        assert_eq!(slugify("AI Tools"), "ai-tools");
        assert_eq!(slugify("CI/CD & You"), "cicd-you");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Maya Chen's Analysis"), "maya-chens-analysis");
    }

    #[test]
    fn test_extract_title() {
        let md = "Intro line\n# The Real Title\n\n## Section\n";
        assert_eq!(extract_title(md), Some("The Real Title".to_string()));
        assert_eq!(extract_title("## Only a subheading"), None);
    }

    #[test]
    fn test_build_excerpt_uses_first_long_paragraph() {
        let md = "# Title\n\nshort\n\nThis paragraph is comfortably longer than fifty characters in total.";
        assert_eq!(
            build_excerpt(md, "Title"),
            "This paragraph is comfortably longer than fifty characters in total...."
        );
    }

    #[test]
    fn test_build_excerpt_falls_back_to_title() {
        let md = "# Title\n\ntoo short";
        assert_eq!(build_excerpt(md, "A Title"), "A Title...");
    }

    #[test]
    fn test_build_excerpt_cuts_to_200_chars() {
        let md = "x".repeat(500);
        let excerpt = build_excerpt(&md, "t");
        assert_eq!(excerpt.chars().count(), 203);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
        assert_eq!(word_count("one two\n\nthree   four"), 4);
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  [1, 2]  "), "[1, 2]");
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "{}");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let full = parse_timestamp("2025-09-15T10:00:00Z").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2025, 9, 15, 10, 0, 0).unwrap());
        let bare = parse_timestamp("2025-09-15").unwrap();
        assert_eq!(bare, Utc.with_ymd_and_hms(2025, 9, 15, 0, 0, 0).unwrap());
        assert!(parse_timestamp("recently").is_none());
    }

    #[test]
    fn test_rfc822_and_iso() {
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 8, 30, 0).unwrap();
        assert_eq!(rfc822(at), "Wed, 01 Oct 2025 08:30:00 GMT");
        assert_eq!(iso_timestamp(at), "2025-10-01T08:30:00.000Z");
        assert_eq!(date_part("2025-10-01T08:30:00.000Z"), Some("2025-10-01".to_string()));
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"{"field": "value"#;
        let result: Result<serde_json::Value, _> = serde_json::from_str(json_eof);
        let e = result.unwrap_err();
        assert!(looks_truncated(&e));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("public").join("deep");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__write_check__").exists());
    }
}
