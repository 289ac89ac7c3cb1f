//! Input types present in form markup
//!
//! A lexical scan for `type="..."` attributes. Malformed or partial markup
//! simply yields fewer matches.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static TYPE_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?i)type="(\w+)""#).expect("TYPE_ATTR_REGEX: invalid regex pattern")
});

/// Lower-cased input types in order of first appearance.
///
/// # Examples
///
/// ```
/// use optin_forms::field_types;
///
/// let types = field_types(r#"<input type="EMAIL" name="EMAIL"><input type="submit"><input type="email">"#);
/// assert_eq!(types.iter().collect::<Vec<_>>(), vec!["email", "submit"]);
/// ```
pub fn field_types(markup: &str) -> IndexSet<String> {
	TYPE_ATTR_REGEX
		.captures_iter(markup)
		.filter_map(|caps| caps.get(1))
		.map(|m| m.as_str().to_lowercase())
		.collect()
}
