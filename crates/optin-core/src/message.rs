//! User-facing feedback messages

use crate::html::escape_attr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation category of a [`Message`].
///
/// The category ends up as a CSS class on the rendered alert, so any
/// site-specific category can be carried through [`MessageType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
	Success,
	Notice,
	Warning,
	#[default]
	Error,
	Custom(String),
}

impl MessageType {
	/// Returns the category name used in markup.
	///
	/// # Examples
	///
	/// ```
	/// use optin_core::MessageType;
	///
	/// assert_eq!(MessageType::Success.as_str(), "success");
	/// assert_eq!(MessageType::Custom("info".into()).as_str(), "info");
	/// ```
	pub fn as_str(&self) -> &str {
		match self {
			MessageType::Success => "success",
			MessageType::Notice => "notice",
			MessageType::Warning => "warning",
			MessageType::Error => "error",
			MessageType::Custom(name) => name,
		}
	}
}

impl From<&str> for MessageType {
	fn from(value: &str) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"success" => MessageType::Success,
			"notice" => MessageType::Notice,
			"warning" => MessageType::Warning,
			"" | "error" => MessageType::Error,
			_ => MessageType::Custom(value.trim().to_string()),
		}
	}
}

impl From<String> for MessageType {
	fn from(value: String) -> Self {
		MessageType::from(value.as_str())
	}
}

impl From<MessageType> for String {
	fn from(value: MessageType) -> Self {
		value.as_str().to_string()
	}
}

impl fmt::Display for MessageType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An immutable `(text, type)` pair shown to the person submitting a form.
///
/// The text may contain limited inline markup (`<strong>`, `<em>`, `<a>`)
/// configured by the site owner and is rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	text: String,
	#[serde(rename = "type", default)]
	kind: MessageType,
}

impl Message {
	/// Creates a new message
	///
	/// # Examples
	///
	/// ```
	/// use optin_core::{Message, MessageType};
	///
	/// let message = Message::new("Please select at least one list.", MessageType::Error);
	/// assert_eq!(message.text(), "Please select at least one list.");
	/// ```
	pub fn new(text: impl Into<String>, kind: MessageType) -> Self {
		Self {
			text: text.into(),
			kind,
		}
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self::new(text, MessageType::Success)
	}

	pub fn notice(text: impl Into<String>) -> Self {
		Self::new(text, MessageType::Notice)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(text, MessageType::Error)
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn kind(&self) -> &MessageType {
		&self.kind
	}

	/// Renders the message as an alert fragment.
	///
	/// # Examples
	///
	/// ```
	/// use optin_core::Message;
	///
	/// let html = Message::success("Done!").to_html();
	/// assert_eq!(html, r#"<div class="optin-alert optin-success"><p>Done!</p></div>"#);
	/// ```
	pub fn to_html(&self) -> String {
		format!(
			r#"<div class="optin-alert optin-{}"><p>{}</p></div>"#,
			escape_attr(self.kind.as_str()),
			self.text
		)
	}
}
