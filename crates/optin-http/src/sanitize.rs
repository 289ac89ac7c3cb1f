//! Plain-text sanitizing for submitted values

use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("TAG_REGEX: invalid regex pattern"));

static WHITESPACE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_REGEX: invalid regex pattern"));

/// Reduces a submitted value to a single line of plain text.
///
/// Strips tags, turns line breaks and tabs into spaces, collapses runs of
/// whitespace and trims the result.
///
/// # Examples
///
/// ```
/// use optin_http::sanitize_text;
///
/// assert_eq!(sanitize_text("  <b>Jane</b>\n\tDoe "), "Jane Doe");
/// ```
pub fn sanitize_text(value: &str) -> String {
	let stripped = TAG_REGEX.replace_all(value, "");
	WHITESPACE_REGEX
		.replace_all(&stripped, " ")
		.trim()
		.to_string()
}
