//! Extension points of the form engine
//!
//! Each point is a [`Filter`]; with nothing registered it passes values
//! through unchanged. Callback failures abort the operation that applied the
//! filter.

use crate::definition::FormDefinition;
use crate::form::Form;
use optin_conf::{FormSettings, MessageTemplates};
use optin_core::Filter;
use optin_http::FieldMap;
use optin_validators::ErrorCodes;

/// Every extension point, ready to register callbacks on
///
/// # Examples
///
/// ```
/// use optin_forms::FormHooks;
///
/// let hooks = FormHooks::new();
/// hooks.email_type.add(|_, _| Ok("text".to_string()));
/// hooks.ignored_field_names.add(|mut names, _form| {
///     names.push("CAPTCHA".to_string());
///     Ok(names)
/// });
///
/// assert_eq!(hooks.email_type.len(), 1);
/// ```
#[derive(Debug)]
pub struct FormHooks {
	/// Resolved settings of a form under construction
	pub settings: Filter<FormSettings, FormDefinition>,
	/// Message templates before stored text overrides
	pub messages: Filter<MessageTemplates, FormDefinition>,
	/// Error codes after validation
	pub errors: Filter<ErrorCodes, Form>,
	/// Response markup, before wrapping
	pub response_html: Filter<String, Form>,
	/// Field names dropped from the user data bag
	pub ignored_field_names: Filter<Vec<String>, Form>,
	/// Merge variables sent along with a subscription
	pub merge_vars: Filter<FieldMap>,
	/// Redirect target after a successful submission
	pub redirect_url: Filter<String, Form>,
	/// Lists of every form
	pub lists: Filter<Vec<String>>,
	/// Lists of one form, after `lists`
	pub form_lists: Filter<Vec<String>, Form>,
	/// Fallback email type when a form sets none
	pub email_type: Filter<String>,
}

impl FormHooks {
	pub fn new() -> Self {
		Self {
			settings: Filter::new("optin_form_settings"),
			messages: Filter::new("optin_form_messages"),
			errors: Filter::new("optin_form_errors"),
			response_html: Filter::new("optin_form_response_html"),
			ignored_field_names: Filter::new("optin_form_ignored_field_names"),
			merge_vars: Filter::new("optin_merge_vars"),
			redirect_url: Filter::new("optin_form_redirect_url"),
			lists: Filter::new("optin_lists"),
			form_lists: Filter::new("optin_form_lists"),
			email_type: Filter::new("optin_email_type"),
		}
	}
}

impl Default for FormHooks {
	fn default() -> Self {
		Self::new()
	}
}
