//! Opt-in subscription forms
//!
//! The orchestrating crate: a [`Form`] owns resolved settings and messages,
//! binds one submission through [`Form::handle_request`], validates it with
//! [`Form::is_valid`] and renders the outcome with [`Form::get_response`].
//!
//! Forms are looked up through a [`FormRegistry`], which loads
//! [`FormDefinition`]s from a [`FormDefinitionSource`] and caches one
//! instance per id. Everything a site shares between forms (extension hooks,
//! defaults, the anti-forgery service) lives in a [`FormEnvironment`].
//!
//! ## Example
//!
//! ```
//! use optin_forms::{FormDefinition, FormEnvironment, FormRegistry, InMemoryDefinitions};
//! use optin_http::SubmissionRequest;
//!
//! let mut source = InMemoryDefinitions::new();
//! source.insert(FormDefinition::new(1, "Newsletter", r#"<input type="email" name="EMAIL">"#));
//! let mut registry = FormRegistry::new(source, FormEnvironment::new().into_shared());
//!
//! let form = registry.get(1).unwrap();
//! form.handle_request(&SubmissionRequest::default()).unwrap();
//!
//! // no lists configured
//! assert!(!form.is_valid().unwrap());
//! assert_eq!(*form.errors(), ["no_lists_selected"]);
//! assert!(form.get_response().unwrap().starts_with(r#"<div class="optin-response">"#));
//! ```

pub mod config;
pub mod definition;
pub mod environment;
pub mod errors;
pub mod field_types;
pub mod form;
pub mod hooks;
pub mod merge_vars;
pub mod registry;
pub mod reserved;

pub use config::{ConfigUpdate, FormAction, FormConfig};
pub use definition::{FORM_KIND, FormDefinition, FormDefinitionSource, InMemoryDefinitions};
pub use environment::FormEnvironment;
pub use errors::{FormError, FormResult};
pub use field_types::field_types;
pub use form::{EMAIL_FIELD, Form, RESPONSE_CLASS};
pub use hooks::FormHooks;
pub use merge_vars::guess_merge_vars;
pub use registry::{DEFAULT_FORM_ID, FormRegistry};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::config::*;
	pub use crate::definition::*;
	pub use crate::environment::*;
	pub use crate::errors::*;
	pub use crate::form::Form;
	pub use crate::hooks::*;
	pub use crate::registry::FormRegistry;
}
