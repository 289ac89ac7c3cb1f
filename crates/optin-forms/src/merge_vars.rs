//! Merge variables derived from the submitted data

use optin_http::{FieldMap, FieldValue};

pub const NAME: &str = "NAME";
pub const FIRST_NAME: &str = "FNAME";
pub const LAST_NAME: &str = "LNAME";
pub const OPTIN_IP: &str = "OPTIN_IP";

/// Fills in merge variables a list provider commonly expects.
///
/// A lone `NAME` is split at its first space into `FNAME` and `LNAME` (or
/// `FNAME` alone). `OPTIN_IP` is set from `client_ip` unless already given.
///
/// # Examples
///
/// ```
/// use optin_forms::guess_merge_vars;
/// use optin_http::FieldMap;
///
/// let mut data = FieldMap::new();
/// data.insert("NAME", "Jane van Doe");
///
/// let vars = guess_merge_vars(data, "203.0.113.9");
/// assert_eq!(vars.get_str("FNAME"), Some("Jane"));
/// assert_eq!(vars.get_str("LNAME"), Some("van Doe"));
/// assert_eq!(vars.get_str("OPTIN_IP"), Some("203.0.113.9"));
/// ```
pub fn guess_merge_vars(mut vars: FieldMap, client_ip: &str) -> FieldMap {
	if !vars.contains_key(FIRST_NAME) && !vars.contains_key(LAST_NAME) {
		let name = vars.get(NAME).map(FieldValue::to_text);
		if let Some(name) = name {
			match name.split_once(' ') {
				Some((first, last)) => {
					vars.insert(FIRST_NAME, first.trim());
					vars.insert(LAST_NAME, last.trim());
				}
				None => {
					vars.insert(FIRST_NAME, name);
				}
			}
		}
	}

	let has_ip = vars.get(OPTIN_IP).is_some_and(|ip| !ip.is_empty());
	if !has_ip && !client_ip.is_empty() {
		vars.insert(OPTIN_IP, client_ip);
	}

	vars
}
