//! Ordered, de-duplicated error code list

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Error codes in order of first occurrence. A code is held at most once.
///
/// # Examples
///
/// ```
/// use optin_validators::ErrorCodes;
///
/// let mut codes = ErrorCodes::new();
/// codes.insert("spam");
/// codes.insert("invalid_email");
/// codes.insert("spam");
///
/// assert_eq!(codes, ["spam", "invalid_email"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCodes(IndexSet<String>);

impl ErrorCodes {
	pub fn new() -> Self {
		Self(IndexSet::new())
	}

	/// Records a code. Returns false when it was already present.
	pub fn insert(&mut self, code: impl Into<String>) -> bool {
		self.0.insert(code.into())
	}

	pub fn contains(&self, code: &str) -> bool {
		self.0.contains(code)
	}

	/// Removes a code, keeping the order of the others.
	pub fn remove(&mut self, code: &str) -> bool {
		self.0.shift_remove(code)
	}

	pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
		self.0.retain(|code| keep(code));
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn first(&self) -> Option<&str> {
		self.0.first().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn to_vec(&self) -> Vec<String> {
		self.0.iter().cloned().collect()
	}
}

impl<S: Into<String>> FromIterator<S> for ErrorCodes {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<S: Into<String>> Extend<S> for ErrorCodes {
	fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(Into::into));
	}
}

impl IntoIterator for ErrorCodes {
	type Item = String;
	type IntoIter = indexmap::set::IntoIter<String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<const N: usize> PartialEq<[&str; N]> for ErrorCodes {
	fn eq(&self, other: &[&str; N]) -> bool {
		self.0.len() == N && self.0.iter().zip(other.iter()).all(|(a, b)| a == b)
	}
}

impl PartialEq<Vec<&str>> for ErrorCodes {
	fn eq(&self, other: &Vec<&str>) -> bool {
		self.0.len() == other.len() && self.0.iter().zip(other.iter()).all(|(a, b)| a == b)
	}
}
