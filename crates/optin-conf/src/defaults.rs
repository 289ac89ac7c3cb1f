//! Site-wide defaults, optionally loaded from TOML

use crate::errors::ConfResult;
use crate::messages::MessageTemplates;
use crate::settings::FormSettings;
use serde::{Deserialize, Serialize};

/// Defaults every form starts from
///
/// A TOML document overlays the built-in values key by key:
///
/// ```toml
/// [settings]
/// double_optin = false
/// lists = ["a1b2c3"]
///
/// [messages.subscribed]
/// text = "Thanks, check your inbox!"
/// type = "success"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefaults {
	#[serde(default = "FormSettings::defaults")]
	pub settings: FormSettings,
	#[serde(default = "MessageTemplates::defaults")]
	pub messages: MessageTemplates,
}

#[derive(Deserialize)]
struct DefaultsOverlay {
	#[serde(default)]
	settings: FormSettings,
	#[serde(default)]
	messages: MessageTemplates,
}

impl FormDefaults {
	/// Built-in defaults overlaid with the `[settings]` and `[messages.*]`
	/// tables of `source`.
	///
	/// # Examples
	///
	/// ```
	/// use optin_conf::FormDefaults;
	///
	/// let defaults = FormDefaults::from_toml_str(r#"
	/// [settings]
	/// double_optin = false
	///
	/// [messages.spam]
	/// text = "Slow down!"
	/// type = "warning"
	/// "#).unwrap();
	///
	/// assert!(!defaults.settings.double_optin());
	/// assert!(defaults.settings.replace_interests());
	/// assert_eq!(defaults.messages.get("spam").unwrap().text(), "Slow down!");
	/// assert_eq!(defaults.messages.len(), 9);
	/// ```
	pub fn from_toml_str(source: &str) -> ConfResult<Self> {
		let overlay: DefaultsOverlay = toml::from_str(source)?;
		let mut defaults = Self::default();
		defaults.settings.merge(&overlay.settings);
		defaults.messages.merge(&overlay.messages);
		tracing::debug!(
			settings = overlay.settings.len(),
			messages = overlay.messages.len(),
			"loaded form defaults overlay"
		);
		Ok(defaults)
	}
}

impl Default for FormDefaults {
	fn default() -> Self {
		Self {
			settings: FormSettings::defaults(),
			messages: MessageTemplates::defaults(),
		}
	}
}
