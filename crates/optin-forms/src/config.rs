//! Per-form submission configuration

use optin_conf::split_list;
use optin_http::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a submission asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
	#[default]
	Subscribe,
	Unsubscribe,
}

impl FormAction {
	/// Parses an action, repairing anything unrecognized to `Subscribe`.
	///
	/// Matching is exact: `"Unsubscribe"` is not `unsubscribe`.
	///
	/// # Examples
	///
	/// ```
	/// use optin_forms::FormAction;
	///
	/// assert_eq!(FormAction::from_lenient("unsubscribe"), FormAction::Unsubscribe);
	/// assert_eq!(FormAction::from_lenient("UNSUBSCRIBE"), FormAction::Subscribe);
	/// assert_eq!(FormAction::from_lenient("delete"), FormAction::Subscribe);
	/// ```
	pub fn from_lenient(value: &str) -> Self {
		match value {
			"subscribe" => FormAction::Subscribe,
			"unsubscribe" => FormAction::Unsubscribe,
			other => {
				tracing::warn!(
					value_len = other.len(),
					"invalid form action; falling back to subscribe"
				);
				FormAction::Subscribe
			}
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			FormAction::Subscribe => "subscribe",
			FormAction::Unsubscribe => "unsubscribe",
		}
	}

	/// Message key rendered after a successful submission
	pub fn success_message_key(&self) -> &'static str {
		match self {
			FormAction::Subscribe => "subscribed",
			FormAction::Unsubscribe => "unsubscribed",
		}
	}
}

impl fmt::Display for FormAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The three configuration values a submission may steer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
	pub action: FormAction,
	pub lists: Vec<String>,
	/// Empty means inherit
	pub email_type: String,
}

impl FormConfig {
	/// Shallow-merges `update`, normalizing every value it carries.
	pub fn apply(&mut self, update: ConfigUpdate) {
		if let Some(action) = update.action {
			self.action = FormAction::from_lenient(&action);
		}
		if let Some(lists) = update.lists {
			self.lists = match lists {
				FieldValue::Text(raw) => split_list(&raw),
				FieldValue::List(items) => items,
			};
		}
		if let Some(email_type) = update.email_type {
			self.email_type = email_type;
		}
	}
}

/// A partial [`FormConfig`]; `None` leaves the current value untouched
///
/// # Examples
///
/// ```
/// use optin_forms::{ConfigUpdate, FormAction, FormConfig};
///
/// let mut config = FormConfig::default();
/// config.apply(ConfigUpdate::new().action("unsubscribe").lists("a1, b2"));
///
/// assert_eq!(config.action, FormAction::Unsubscribe);
/// assert_eq!(config.lists, vec!["a1", "b2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
	pub action: Option<String>,
	pub lists: Option<FieldValue>,
	pub email_type: Option<String>,
}

impl ConfigUpdate {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	/// A string is split on commas; a list is taken as-is.
	pub fn lists(mut self, lists: impl Into<FieldValue>) -> Self {
		self.lists = Some(lists.into());
		self
	}

	pub fn email_type(mut self, email_type: impl Into<String>) -> Self {
		self.email_type = Some(email_type.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.action.is_none() && self.lists.is_none() && self.email_type.is_none()
	}
}
