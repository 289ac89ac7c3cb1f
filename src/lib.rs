//! # optin
//!
//! Opt-in subscription forms for web applications: layered form settings,
//! request parsing, rule-based submission validation with anti-abuse
//! checks, and rendering of the alert markup shown after a submission.
//!
//! ## Crates
//!
//! - [`core`] - alert messages, HTML escaping, extension hooks
//! - [`conf`] - form settings and message templates, resolved in layers
//! - [`http`] - submission parsing and client IP detection
//! - [`validators`] - the rule engine and anti-forgery tokens
//! - [`forms`] - the form entity, the registry and the submission state machine
//!
//! ## Feature Flags
//!
//! - `forms` (default) - the form entity and registry
//!
//! Without `forms` the lower layers can be used on their own, e.g. to
//! validate arbitrary field maps.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "forms")]
//! # {
//! use optin::prelude::*;
//! use serde_json::json;
//!
//! let mut source = InMemoryDefinitions::new();
//! source.insert(
//!     FormDefinition::new(1, "Newsletter", r#"<input type="email" name="EMAIL">"#)
//!         .with_stored_settings(json!({"lists": ["weekly"]})),
//! );
//!
//! let env = FormEnvironment::new().into_shared();
//! let mut registry = FormRegistry::new(source, env);
//!
//! let mut fields = FieldMap::new();
//! fields.insert("EMAIL", "jane@example.com");
//!
//! let form = registry.get(1).unwrap();
//! form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();
//!
//! // no render timestamp or token: rejected by the anti-abuse pass
//! assert!(!form.is_valid().unwrap());
//! assert_eq!(*form.errors(), ["spam"]);
//! # }
//! ```

pub mod conf;
pub mod core;
#[cfg(feature = "forms")]
pub mod forms;
pub mod http;
pub mod validators;

pub use optin_conf::{FormDefaults, FormSettings, MessageTemplates};
pub use optin_core::{Filter, HookError, Message, MessageType};
pub use optin_http::{FieldMap, FieldValue, SubmissionRequest};
pub use optin_validators::{ErrorCodes, HmacNonceVerifier, NonceVerifier, Rule, Validator};

#[cfg(feature = "forms")]
pub use optin_forms::{
	Form, FormDefinition, FormDefinitionSource, FormEnvironment, FormError, FormHooks, FormRegistry,
	FormResult,
};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::{
		ErrorCodes, FieldMap, FieldValue, Filter, FormDefaults, FormSettings, HmacNonceVerifier,
		HookError, Message, MessageTemplates, MessageType, NonceVerifier, Rule, SubmissionRequest,
		Validator,
	};

	#[cfg(feature = "forms")]
	pub use optin_forms::prelude::*;
}
