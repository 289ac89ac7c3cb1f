//! Layered resolution: defaults, then stored overrides, then extension hook

use crate::errors::json_type_name;
use crate::messages::MessageTemplates;
use crate::settings::FormSettings;
use indexmap::IndexMap;
use optin_core::Message;
use serde_json::Value;

/// Resolves the effective settings of a form.
///
/// Stored keys win over defaults; default keys missing from the stored map
/// survive. The hook sees the merged map and its result is authoritative. A
/// stored value that is not an object is ignored.
///
/// Inputs are never mutated.
///
/// # Examples
///
/// ```
/// use optin_conf::{FormSettings, resolve_settings};
/// use serde_json::json;
///
/// let stored = json!({"lists": ["a1"], "redirect": "/thanks"});
/// let settings = resolve_settings(&FormSettings::defaults(), Some(&stored), |mut s| {
///     s.set("send_welcome", true);
///     Ok::<_, std::convert::Infallible>(s)
/// })
/// .unwrap();
///
/// assert_eq!(settings.lists(), vec!["a1".to_string()]);
/// assert_eq!(settings.redirect(), "/thanks");
/// assert!(settings.send_welcome());
/// assert!(settings.double_optin());
/// ```
pub fn resolve_settings<E>(
	defaults: &FormSettings,
	stored: Option<&Value>,
	hook: impl FnOnce(FormSettings) -> Result<FormSettings, E>,
) -> Result<FormSettings, E> {
	let mut settings = defaults.clone();

	match stored {
		Some(Value::Object(map)) => {
			for (key, value) in map {
				settings.set(key.clone(), value.clone());
			}
			tracing::debug!(overrides = map.len(), "merged stored form settings");
		}
		Some(Value::Null) | None => {}
		Some(other) => {
			tracing::warn!(
				found = json_type_name(other),
				"stored form settings are not an object; using defaults"
			);
		}
	}

	hook(settings)
}

/// Resolves every message template into a [`Message`].
///
/// The hook receives the default templates and may add, drop or rewrite
/// entries. A stored `text_<key>` override then replaces the text of `key`
/// while keeping its type.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use optin_conf::{MessageTemplates, resolve_messages};
/// use optin_core::MessageType;
///
/// let mut stored = IndexMap::new();
/// stored.insert("text_subscribed".to_string(), "You're in!".to_string());
///
/// let messages = resolve_messages(&MessageTemplates::defaults(), &stored, |t| {
///     Ok::<_, std::convert::Infallible>(t)
/// })
/// .unwrap();
///
/// assert_eq!(messages["subscribed"].text(), "You're in!");
/// assert_eq!(messages["subscribed"].kind(), &MessageType::Success);
/// ```
pub fn resolve_messages<E>(
	defaults: &MessageTemplates,
	stored_text: &IndexMap<String, String>,
	hook: impl FnOnce(MessageTemplates) -> Result<MessageTemplates, E>,
) -> Result<IndexMap<String, Message>, E> {
	let templates = hook(defaults.clone())?;

	let messages: IndexMap<String, Message> = templates
		.into_iter()
		.map(|(key, template)| {
			let message = match stored_text.get(&text_override_key(&key)) {
				Some(text) => Message::new(text.clone(), template.kind().clone()),
				None => template,
			};
			(key, message)
		})
		.collect();

	tracing::debug!(messages = messages.len(), "resolved form messages");
	Ok(messages)
}

fn text_override_key(key: &str) -> String {
	format!("{}{}", crate::settings::TEXT_OVERRIDE_PREFIX, key)
}
