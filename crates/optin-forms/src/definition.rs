//! Stored form definitions and where they come from

use crate::errors::FormResult;
use indexmap::IndexMap;
use optin_conf::FormSettings;
use serde::{Deserialize, Serialize};

/// Kind tag of definitions that are forms
pub const FORM_KIND: &str = "optin-form";

/// A form as persisted by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
	pub id: i64,
	pub kind: String,
	pub title: String,
	/// Raw markup template with field placeholders
	pub markup: String,
	/// Stored settings overrides, expected to be an object
	#[serde(default)]
	pub stored_settings: Option<serde_json::Value>,
	/// Stored message texts keyed `text_<message key>`
	#[serde(default)]
	pub stored_messages: IndexMap<String, String>,
}

impl FormDefinition {
	pub fn new(id: i64, title: impl Into<String>, markup: impl Into<String>) -> Self {
		Self {
			id,
			kind: FORM_KIND.to_string(),
			title: title.into(),
			markup: markup.into(),
			stored_settings: None,
			stored_messages: IndexMap::new(),
		}
	}

	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = kind.into();
		self
	}

	pub fn with_stored_settings(mut self, settings: serde_json::Value) -> Self {
		self.stored_settings = Some(settings);
		self
	}

	/// Parses a serialized settings object.
	pub fn with_stored_settings_json(self, json: &str) -> FormResult<Self> {
		let settings = FormSettings::from_json_str(json)?;
		Ok(self.with_stored_settings(serde_json::Value::Object(settings.into_inner())))
	}

	/// Stores a text override for message `key`.
	pub fn with_message_text(mut self, key: &str, text: impl Into<String>) -> Self {
		self.stored_messages.insert(
			format!("{}{}", optin_conf::TEXT_OVERRIDE_PREFIX, key),
			text.into(),
		);
		self
	}

	pub fn is_form(&self) -> bool {
		self.kind == FORM_KIND
	}
}

/// Lookup of stored form definitions
pub trait FormDefinitionSource {
	fn get_form_definition(&self, id: i64) -> Option<FormDefinition>;

	/// Form used when id 0 is requested
	fn default_form_id(&self) -> Option<i64>;
}

/// Definitions held in memory
///
/// # Examples
///
/// ```
/// use optin_forms::{FormDefinition, FormDefinitionSource, InMemoryDefinitions};
///
/// let mut source = InMemoryDefinitions::new();
/// source.insert(FormDefinition::new(7, "Newsletter", "<input type=\"email\" name=\"EMAIL\">"));
///
/// assert_eq!(source.default_form_id(), Some(7));
/// assert!(source.get_form_definition(8).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefinitions {
	definitions: IndexMap<i64, FormDefinition>,
	default_id: Option<i64>,
}

impl InMemoryDefinitions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, definition: FormDefinition) -> Option<FormDefinition> {
		self.definitions.insert(definition.id, definition)
	}

	/// Without an explicit default, the first inserted definition is used.
	pub fn set_default_form_id(&mut self, id: i64) {
		self.default_id = Some(id);
	}

	pub fn remove(&mut self, id: i64) -> Option<FormDefinition> {
		self.definitions.shift_remove(&id)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl FormDefinitionSource for InMemoryDefinitions {
	fn get_form_definition(&self, id: i64) -> Option<FormDefinition> {
		self.definitions.get(&id).cloned()
	}

	fn default_form_id(&self) -> Option<i64> {
		self.default_id
			.or_else(|| self.definitions.keys().next().copied())
	}
}

impl FromIterator<FormDefinition> for InMemoryDefinitions {
	fn from_iter<I: IntoIterator<Item = FormDefinition>>(iter: I) -> Self {
		let mut source = Self::new();
		for definition in iter {
			source.insert(definition);
		}
		source
	}
}
