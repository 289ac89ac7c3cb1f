//! Flat per-form settings map

use crate::errors::{ConfError, ConfResult, json_type_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recognized setting keys
pub mod keys {
	pub const CSS: &str = "css";
	pub const DOUBLE_OPTIN: &str = "double_optin";
	pub const UPDATE_EXISTING: &str = "update_existing";
	pub const REPLACE_INTERESTS: &str = "replace_interests";
	pub const SEND_WELCOME: &str = "send_welcome";
	pub const REDIRECT: &str = "redirect";
	pub const HIDE_AFTER_SUCCESS: &str = "hide_after_success";
	pub const LISTS: &str = "lists";
	pub const EMAIL_TYPE: &str = "email_type";
	pub const REQUIRED_FIELDS: &str = "required_fields";
}

/// Prefix of stored per-message text overrides (`text_subscribed`, ...)
pub const TEXT_OVERRIDE_PREFIX: &str = "text_";

/// Settings of one form: string keys to scalar or array values
///
/// Unknown keys are kept as-is. Typed accessors coerce loosely-typed stored
/// values (`"1"`, `1`, `true`) instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSettings(Map<String, Value>);

impl FormSettings {
	/// Empty map, without built-in defaults
	pub fn new() -> Self {
		Self(Map::new())
	}

	/// Built-in default settings
	pub fn defaults() -> Self {
		let mut settings = Self::new();
		settings.set(keys::CSS, "");
		settings.set(keys::DOUBLE_OPTIN, true);
		settings.set(keys::UPDATE_EXISTING, false);
		settings.set(keys::REPLACE_INTERESTS, true);
		settings.set(keys::SEND_WELCOME, false);
		settings.set(keys::REDIRECT, "");
		settings.set(keys::HIDE_AFTER_SUCCESS, false);
		settings.set(keys::LISTS, Value::Array(Vec::new()));
		settings.set(keys::EMAIL_TYPE, "");
		settings.set(keys::REQUIRED_FIELDS, "");
		settings
	}

	/// Parses a serialized settings object.
	///
	/// # Examples
	///
	/// ```
	/// use optin_conf::FormSettings;
	///
	/// let settings = FormSettings::from_json_str(r#"{"lists": ["a1"], "double_optin": "0"}"#).unwrap();
	/// assert_eq!(settings.lists(), vec!["a1".to_string()]);
	/// assert!(!settings.double_optin());
	///
	/// assert!(FormSettings::from_json_str("[1, 2]").is_err());
	/// ```
	pub fn from_json_str(json: &str) -> ConfResult<Self> {
		let value: Value = serde_json::from_str(json)?;
		Self::try_from(value)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.0.remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> serde_json::map::Iter<'_> {
		self.0.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Shallow merge: every key of `overrides` replaces the value here.
	pub fn merge(&mut self, overrides: &FormSettings) {
		for (key, value) in &overrides.0 {
			self.0.insert(key.clone(), value.clone());
		}
	}

	/// Scalar value rendered as a string. Arrays, objects, null and absent
	/// keys give an empty string; `false` gives an empty string too.
	pub fn get_string(&self, key: &str) -> String {
		self.0.get(key).and_then(scalar_to_string).unwrap_or_default()
	}

	/// Loose truthiness of a stored value.
	pub fn get_bool(&self, key: &str) -> bool {
		match self.0.get(key) {
			Some(Value::Bool(b)) => *b,
			Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
			Some(Value::String(s)) => matches!(
				s.trim().to_ascii_lowercase().as_str(),
				"1" | "true" | "yes" | "on"
			),
			Some(Value::Array(items)) => !items.is_empty(),
			Some(Value::Object(map)) => !map.is_empty(),
			Some(Value::Null) | None => false,
		}
	}

	/// Selected list identifiers.
	///
	/// Accepts an array of ids or a comma-delimited string.
	pub fn lists(&self) -> Vec<String> {
		match self.0.get(keys::LISTS) {
			Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
			Some(Value::String(raw)) => split_list(raw),
			Some(Value::Number(n)) => vec![n.to_string()],
			_ => Vec::new(),
		}
	}

	/// Raw comma-delimited required field names
	pub fn required_fields(&self) -> String {
		self.get_string(keys::REQUIRED_FIELDS)
	}

	/// Stylesheet identifier, or `None` when unset, empty or `false`
	pub fn css(&self) -> Option<String> {
		let css = self.get_string(keys::CSS);
		(!css.is_empty() && css != "0").then_some(css)
	}

	pub fn redirect(&self) -> String {
		self.get_string(keys::REDIRECT)
	}

	pub fn email_type(&self) -> String {
		self.get_string(keys::EMAIL_TYPE)
	}

	pub fn double_optin(&self) -> bool {
		self.get_bool(keys::DOUBLE_OPTIN)
	}

	pub fn update_existing(&self) -> bool {
		self.get_bool(keys::UPDATE_EXISTING)
	}

	pub fn replace_interests(&self) -> bool {
		self.get_bool(keys::REPLACE_INTERESTS)
	}

	pub fn send_welcome(&self) -> bool {
		self.get_bool(keys::SEND_WELCOME)
	}

	pub fn hide_after_success(&self) -> bool {
		self.get_bool(keys::HIDE_AFTER_SUCCESS)
	}

	/// Every string `text_<key>` entry, keyed as stored
	pub fn text_overrides(&self) -> IndexMap<String, String> {
		self.0
			.iter()
			.filter(|(key, _)| key.starts_with(TEXT_OVERRIDE_PREFIX))
			.filter_map(|(key, value)| value.as_str().map(|text| (key.clone(), text.to_string())))
			.collect()
	}

	pub fn into_inner(self) -> Map<String, Value> {
		self.0
	}
}

impl TryFrom<Value> for FormSettings {
	type Error = ConfError;

	fn try_from(value: Value) -> ConfResult<Self> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(ConfError::InvalidShape {
				expected: "object",
				found: json_type_name(&other),
			}),
		}
	}
}

impl From<Map<String, Value>> for FormSettings {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormSettings {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

/// Splits a comma-delimited list into trimmed parts, keeping order.
///
/// A string that is blank after trimming holds no items.
///
/// # Examples
///
/// ```
/// use optin_conf::split_list;
///
/// assert_eq!(split_list(" a1, b2 ,c3"), vec!["a1", "b2", "c3"]);
/// assert!(split_list("  ").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<String> {
	if raw.trim().is_empty() {
		return Vec::new();
	}
	raw.split(',').map(|part| part.trim().to_string()).collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(true) => Some("1".to_string()),
		Value::Bool(false) => Some(String::new()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}
