//! Submitted field values

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// A single submitted field: either one string or a list of strings
/// (`name[]=a&name[]=b`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Text(String),
	List(Vec<String>),
}

impl FieldValue {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(text) => Some(text),
			FieldValue::List(_) => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			FieldValue::Text(_) => None,
			FieldValue::List(items) => Some(items),
		}
	}

	/// True for an empty string or an empty list. Whitespace counts as content.
	pub fn is_empty(&self) -> bool {
		match self {
			FieldValue::Text(text) => text.is_empty(),
			FieldValue::List(items) => items.is_empty(),
		}
	}

	/// True when nothing but whitespace was submitted.
	///
	/// # Examples
	///
	/// ```
	/// use optin_http::FieldValue;
	///
	/// assert!(FieldValue::from("   ").is_blank());
	/// assert!(FieldValue::List(vec![" ".into(), "".into()]).is_blank());
	/// assert!(!FieldValue::List(vec!["list-a".into()]).is_blank());
	/// ```
	pub fn is_blank(&self) -> bool {
		match self {
			FieldValue::Text(text) => text.trim().is_empty(),
			FieldValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
		}
	}

	/// Flattens the value into one string, joining list items with `", "`.
	pub fn to_text(&self) -> String {
		match self {
			FieldValue::Text(text) => text.clone(),
			FieldValue::List(items) => items.join(", "),
		}
	}

	/// Returns a copy with `f` applied to every string.
	pub fn map_text(&self, f: impl Fn(&str) -> String) -> FieldValue {
		match self {
			FieldValue::Text(text) => FieldValue::Text(f(text)),
			FieldValue::List(items) => FieldValue::List(items.iter().map(|i| f(i.as_str())).collect()),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(value: Vec<String>) -> Self {
		FieldValue::List(value)
	}
}

impl From<Vec<&str>> for FieldValue {
	fn from(value: Vec<&str>) -> Self {
		FieldValue::List(value.into_iter().map(String::from).collect())
	}
}

/// Insertion-ordered map of field name to [`FieldValue`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<String, FieldValue>);

impl FieldMap {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Inserts a value, keeping the original position when the name already exists.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		value: impl Into<FieldValue>,
	) -> Option<FieldValue> {
		self.0.insert(name.into(), value.into())
	}

	/// Appends to a list field. A single-string value under the same name is replaced.
	pub fn push_item(&mut self, name: impl Into<String>, item: impl Into<String>) {
		let item = item.into();
		match self.0.entry(name.into()) {
			Entry::Occupied(mut entry) => match entry.get_mut() {
				FieldValue::List(items) => items.push(item),
				other => *other = FieldValue::List(vec![item]),
			},
			Entry::Vacant(entry) => {
				entry.insert(FieldValue::List(vec![item]));
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.0.get(name)
	}

	/// Returns the value of a single-string field
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(FieldValue::as_text)
	}

	pub fn contains_key(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
		self.0.shift_remove(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldValue> {
		self.0.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Drops every field whose name starts with `prefix`.
	///
	/// # Examples
	///
	/// ```
	/// use optin_http::FieldMap;
	///
	/// let mut fields = FieldMap::new();
	/// fields.insert("EMAIL", "jane@example.com");
	/// fields.insert("_optin_honeypot", "");
	///
	/// let visible = fields.without_prefix("_");
	/// assert!(visible.contains_key("EMAIL"));
	/// assert!(!visible.contains_key("_optin_honeypot"));
	/// ```
	pub fn without_prefix(&self, prefix: &str) -> FieldMap {
		self.0
			.iter()
			.filter(|(name, _)| !name.starts_with(prefix))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}

	/// Drops every field named in `names` (exact match).
	pub fn without_names<S: AsRef<str>>(&self, names: &[S]) -> FieldMap {
		self.0
			.iter()
			.filter(|(name, _)| !names.iter().any(|n| n.as_ref() == name.as_str()))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}

	/// Upper-cases every field name. On collision the later field wins.
	pub fn with_upper_case_names(&self) -> FieldMap {
		self.0
			.iter()
			.map(|(name, value)| (name.to_uppercase(), value.clone()))
			.collect()
	}

	/// Returns a copy with [`sanitize_text`](crate::sanitize_text) applied to every value.
	pub fn sanitized(&self) -> FieldMap {
		self.0
			.iter()
			.map(|(name, value)| (name.clone(), value.map_text(crate::sanitize_text)))
			.collect()
	}
}

impl FromIterator<(String, FieldValue)> for FieldMap {
	fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
		let mut map = IndexMap::new();
		for (name, value) in iter {
			map.insert(name, value);
		}
		Self(map)
	}
}

impl IntoIterator for FieldMap {
	type Item = (String, FieldValue);
	type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a FieldMap {
	type Item = (&'a String, &'a FieldValue);
	type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
