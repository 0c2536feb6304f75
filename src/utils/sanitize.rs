//! Alias sanitization for the public redirect path.

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s_-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_{2,}").unwrap());

/// Result of sanitizing a raw alias path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedAlias {
    /// Canonical alias with only letters, digits, `-` and `_`.
    pub alias: String,
    /// True when the trimmed input ended with `+`, asking for the
    /// details page instead of a redirect.
    pub is_info_request: bool,
}

/// Normalizes a raw path segment into a canonical alias.
///
/// The transformation never fails; hostile input degrades to an empty
/// alias which callers treat as not found.
///
/// Steps, in order:
/// 1. Trim surrounding whitespace and note a trailing `+` marker.
/// 2. Drop every character outside letters, digits, whitespace, `-`, `_`.
/// 3. Collapse whitespace runs into a single `-`.
/// 4. Collapse `-` runs, then `_` runs.
/// 5. Strip leading/trailing `-`, then leading/trailing `_`.
pub fn sanitize_alias(raw: &str) -> SanitizedAlias {
    let trimmed = raw.trim();
    let is_info_request = trimmed.ends_with('+');

    let stripped = DISALLOWED.replace_all(trimmed, "");
    let dashed = WHITESPACE.replace_all(&stripped, "-");
    let dashed = DASH_RUNS.replace_all(&dashed, "-");
    let collapsed = UNDERSCORE_RUNS.replace_all(&dashed, "_");
    let alias = collapsed.trim_matches('-').trim_matches('_').to_string();

    SanitizedAlias {
        alias,
        is_info_request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias_of(raw: &str) -> String {
        sanitize_alias(raw).alias
    }

    #[test]
    fn strips_punctuation_and_joins_words() {
        assert_eq!(alias_of("My Cool Alias!!"), "My-Cool-Alias");
    }

    #[test]
    fn collapses_underscore_runs() {
        assert_eq!(alias_of("a__b"), "a_b");
    }

    #[test]
    fn collapses_dash_runs() {
        assert_eq!(alias_of("a---b"), "a-b");
    }

    #[test]
    fn trims_surrounding_separators() {
        assert_eq!(alias_of("  --a--  "), "a");
        assert_eq!(alias_of("__a__"), "a");
    }

    #[test]
    fn detects_info_request_marker() {
        let result = sanitize_alias("alias+");
        assert_eq!(result.alias, "alias");
        assert!(result.is_info_request);
    }

    #[test]
    fn plain_alias_is_not_info_request() {
        let result = sanitize_alias("alias");
        assert_eq!(result.alias, "alias");
        assert!(!result.is_info_request);
    }

    #[test]
    fn hostile_input_degrades_to_empty() {
        assert_eq!(alias_of("!!!???"), "");
        assert_eq!(alias_of(""), "");
        let bare_marker = sanitize_alias("+");
        assert_eq!(bare_marker.alias, "");
        assert!(bare_marker.is_info_request);
    }

    #[test]
    fn preserves_allowed_charset() {
        assert_eq!(alias_of("Ql9y"), "Ql9y");
        assert_eq!(alias_of("my-alias_2024"), "my-alias_2024");
    }
}
