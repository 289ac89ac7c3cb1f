//! HTML escaping helper

/// Escapes a value for use inside a double- or single-quoted attribute.
///
/// # Examples
///
/// ```
/// use optin_core::escape_attr;
///
/// assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
/// ```
pub fn escape_attr(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#039;"),
			_ => out.push(c),
		}
	}
	out
}
