//! Email address grammar

use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a whole address (RFC 5321)
pub const MAX_EMAIL_LENGTH: usize = 254;

// Dot-atom local part, one or more domain labels and an alphabetic TLD.
//
// Labels may not start or end with a hyphen.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Checks `value` against a standard email address grammar.
///
/// # Examples
///
/// ```
/// use optin_validators::is_valid_email;
///
/// assert!(is_valid_email("jane.doe+news@example.co.uk"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("jane@-example.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
	value.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(value)
}
