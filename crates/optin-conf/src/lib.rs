//! Settings and message configuration for optin forms
//!
//! Every form resolves its configuration in layers:
//!
//! 1. Built-in defaults ([`FormSettings::defaults`], [`MessageTemplates::defaults`]),
//!    optionally replaced site-wide via [`FormDefaults::from_toml_str`]
//! 2. Stored per-form overrides (settings object, `text_<key>` message texts)
//! 3. An extension hook whose result is authoritative
//!
//! See [`resolve_settings`] and [`resolve_messages`].

pub mod defaults;
pub mod errors;
pub mod messages;
pub mod resolve;
pub mod settings;

pub use defaults::FormDefaults;
pub use errors::{ConfError, ConfResult};
pub use messages::MessageTemplates;
pub use resolve::{resolve_messages, resolve_settings};
pub use settings::{FormSettings, TEXT_OVERRIDE_PREFIX, split_list};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::defaults::*;
	pub use crate::errors::*;
	pub use crate::messages::MessageTemplates;
	pub use crate::resolve::*;
	pub use crate::settings::{FormSettings, split_list};
}
