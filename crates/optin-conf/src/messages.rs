//! Message templates keyed by message id

use indexmap::IndexMap;
use optin_core::{Message, MessageType};
use serde::{Deserialize, Serialize};

/// Recognized message keys
pub mod keys {
	pub const SUBSCRIBED: &str = "subscribed";
	pub const UNSUBSCRIBED: &str = "unsubscribed";
	pub const NOT_SUBSCRIBED: &str = "not_subscribed";
	pub const ALREADY_SUBSCRIBED: &str = "already_subscribed";
	pub const ERROR: &str = "error";
	pub const INVALID_EMAIL: &str = "invalid_email";
	pub const REQUIRED_FIELD_MISSING: &str = "required_field_missing";
	pub const NO_LISTS_SELECTED: &str = "no_lists_selected";
	pub const SPAM: &str = "spam";
}

/// Ordered message templates
///
/// # Examples
///
/// ```
/// use optin_conf::MessageTemplates;
/// use optin_core::MessageType;
///
/// let templates = MessageTemplates::defaults();
/// let spam = templates.get("spam").unwrap();
/// assert_eq!(spam.kind(), &MessageType::Error);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTemplates(IndexMap<String, Message>);

impl MessageTemplates {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Built-in templates for every recognized key
	pub fn defaults() -> Self {
		let entries = [
			(
				keys::SUBSCRIBED,
				"Thank you, your sign-up request was successful! Please check your email inbox to confirm.",
				MessageType::Success,
			),
			(
				keys::UNSUBSCRIBED,
				"You were successfully unsubscribed.",
				MessageType::Success,
			),
			(
				keys::NOT_SUBSCRIBED,
				"Given email address is not subscribed.",
				MessageType::Notice,
			),
			(
				keys::ALREADY_SUBSCRIBED,
				"Given email address is already subscribed, thank you!",
				MessageType::Notice,
			),
			(
				keys::ERROR,
				"Oops. Something went wrong. Please try again later.",
				MessageType::Error,
			),
			(
				keys::INVALID_EMAIL,
				"Please provide a valid email address.",
				MessageType::Error,
			),
			(
				keys::REQUIRED_FIELD_MISSING,
				"Please fill in the required fields.",
				MessageType::Error,
			),
			(
				keys::NO_LISTS_SELECTED,
				"Please select at least one list.",
				MessageType::Error,
			),
			(
				keys::SPAM,
				"Oops. Something went wrong. Please try again later.",
				MessageType::Error,
			),
		];

		entries
			.into_iter()
			.map(|(key, text, kind)| (key.to_string(), Message::new(text, kind)))
			.collect()
	}

	pub fn get(&self, key: &str) -> Option<&Message> {
		self.0.get(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, message: Message) -> Option<Message> {
		self.0.insert(key.into(), message)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Overlays `overrides`: existing keys are replaced in place, new keys appended.
	pub fn merge(&mut self, overrides: &MessageTemplates) {
		for (key, message) in &overrides.0 {
			self.0.insert(key.clone(), message.clone());
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, Message> {
		self.0.iter()
	}

	pub fn into_inner(self) -> IndexMap<String, Message> {
		self.0
	}
}

impl FromIterator<(String, Message)> for MessageTemplates {
	fn from_iter<I: IntoIterator<Item = (String, Message)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for MessageTemplates {
	type Item = (String, Message);
	type IntoIter = indexmap::map::IntoIter<String, Message>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
