//! The opt-in form entity and its submission state machine
//!
//! A [`Form`] moves through three states:
//!
//! 1. unsubmitted, right after construction
//! 2. submitted, once [`Form::handle_request`] ran
//! 3. validated (valid or invalid), once [`Form::is_valid`] ran
//!
//! Validation runs three passes, each gating the next: configuration sanity,
//! anti-abuse control fields, then the user-visible fields.

use crate::config::{ConfigUpdate, FormAction, FormConfig};
use crate::definition::FormDefinition;
use crate::environment::FormEnvironment;
use crate::errors::{FormError, FormResult};
use crate::field_types::field_types;
use crate::merge_vars::guess_merge_vars;
use crate::reserved;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use optin_conf::messages::keys as message_keys;
use optin_conf::{FormSettings, resolve_messages, resolve_settings};
use optin_core::Message;
use optin_http::{FieldMap, FieldValue, SubmissionRequest};
use optin_validators::{ErrorCodes, Rule, Validator};
use std::sync::{Arc, LazyLock};

/// Class of the element every response is wrapped in
pub const RESPONSE_CLASS: &str = "optin-response";

/// Field name of the email address in the user data bag
pub const EMAIL_FIELD: &str = "EMAIL";

static FALLBACK_MESSAGE: LazyLock<Message> = LazyLock::new(|| Message::error(""));

/// A configured subscription form and the state of one submission
#[derive(Debug)]
pub struct Form {
	id: i64,
	title: String,
	markup: String,
	settings: FormSettings,
	messages: IndexMap<String, Message>,
	field_types: IndexSet<String>,
	config: FormConfig,
	/// Config before any request was applied
	base_config: Option<FormConfig>,
	is_submitted: bool,
	errors: ErrorCodes,
	data: FieldMap,
	raw_data: FieldMap,
	client_ip: String,
	env: Arc<FormEnvironment>,
}

impl Form {
	/// Builds a form from its stored definition.
	///
	/// Settings and messages are resolved once, here. Definitions of another
	/// kind are rejected.
	///
	/// # Examples
	///
	/// ```
	/// use optin_forms::{Form, FormDefinition, FormEnvironment};
	/// use serde_json::json;
	///
	/// let definition = FormDefinition::new(3, "Newsletter", r#"<input type="email" name="EMAIL">"#)
	///     .with_stored_settings(json!({"lists": ["a1b2"]}));
	/// let form = Form::from_definition(definition, FormEnvironment::new().into_shared()).unwrap();
	///
	/// assert_eq!(form.id(), 3);
	/// assert_eq!(form.config().lists, vec!["a1b2"]);
	/// assert!(form.has_field_type("EMAIL"));
	/// assert!(!form.is_submitted());
	/// ```
	pub fn from_definition(definition: FormDefinition, env: Arc<FormEnvironment>) -> FormResult<Self> {
		if !definition.is_form() {
			return Err(FormError::WrongType {
				id: definition.id,
				kind: definition.kind,
			});
		}

		let settings = resolve_settings(
			&env.defaults.settings,
			definition.stored_settings.as_ref(),
			|settings| env.hooks.settings.apply(settings, &definition),
		)?;

		// `text_<key>` entries may live in the settings blob or in their own store
		let mut text_overrides = settings.text_overrides();
		text_overrides.extend(definition.stored_messages.clone());

		let messages = resolve_messages(&env.defaults.messages, &text_overrides, |templates| {
			env.hooks.messages.apply(templates, &definition)
		})?;

		let config = FormConfig {
			action: FormAction::Subscribe,
			lists: settings.lists(),
			email_type: settings.email_type(),
		};

		tracing::debug!(
			form_id = definition.id,
			settings = settings.len(),
			messages = messages.len(),
			"form loaded"
		);

		Ok(Self {
			id: definition.id,
			field_types: field_types(&definition.markup),
			title: definition.title,
			markup: definition.markup,
			settings,
			messages,
			config,
			base_config: None,
			is_submitted: false,
			errors: ErrorCodes::new(),
			data: FieldMap::new(),
			raw_data: FieldMap::new(),
			client_ip: String::new(),
			env,
		})
	}

	pub fn id(&self) -> i64 {
		self.id
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn markup(&self) -> &str {
		&self.markup
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn messages(&self) -> &IndexMap<String, Message> {
		&self.messages
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	pub fn is_submitted(&self) -> bool {
		self.is_submitted
	}

	pub fn errors(&self) -> &ErrorCodes {
		&self.errors
	}

	/// Submitted user fields: control fields and ignored names dropped, values
	/// sanitized, names upper-cased
	pub fn data(&self) -> &FieldMap {
		&self.data
	}

	/// Submitted fields, verbatim
	pub fn raw_data(&self) -> &FieldMap {
		&self.raw_data
	}

	/// Client address captured from the last handled request, possibly empty
	pub fn client_ip(&self) -> &str {
		&self.client_ip
	}

	/// Binds a submission to this form.
	///
	/// Control fields `_optin_lists` and `_optin_action` update the config
	/// when present at all, so an explicitly empty list selection is kept.
	/// Handling a second request replaces everything the first one set.
	pub fn handle_request(&mut self, request: &SubmissionRequest) -> FormResult<()> {
		self.is_submitted = true;
		self.errors.clear();
		self.raw_data = request.all().clone();
		self.client_ip = request.client_ip();

		let env = Arc::clone(&self.env);
		let ignored = env.hooks.ignored_field_names.apply(Vec::new(), self)?;
		self.data = request
			.all_without_prefix(reserved::PREFIX)
			.without_names(&ignored)
			.sanitized()
			.with_upper_case_names();

		let mut update = ConfigUpdate::new();
		if let Some(lists) = self.raw_data.get(reserved::LISTS) {
			update.lists = Some(lists.clone());
		}
		if let Some(action) = self.raw_data.get(reserved::ACTION) {
			update.action = Some(action.to_text());
		}

		let base = self.base_config.get_or_insert_with(|| self.config.clone()).clone();
		self.config = base;
		if !update.is_empty() {
			self.config.apply(update);
		}

		tracing::debug!(
			form_id = self.id,
			fields = self.data.len(),
			ignored = ignored.len(),
			action = %self.config.action,
			"submission handled"
		);
		Ok(())
	}

	/// Validates the bound submission against the wall clock.
	///
	/// See [`Form::is_valid_at`].
	pub fn is_valid(&mut self) -> FormResult<bool> {
		self.is_valid_at(Utc::now())
	}

	/// Validates the bound submission.
	///
	/// An unsubmitted form is valid and gains no errors. Otherwise the first
	/// failing pass publishes its codes and later passes are skipped. The
	/// `errors` hook may then rewrite the codes; the return value reflects
	/// the last pass that ran.
	pub fn is_valid_at(&mut self, now: DateTime<Utc>) -> FormResult<bool> {
		if !self.is_submitted {
			return Ok(true);
		}

		let env = Arc::clone(&self.env);

		let (valid, errors) = match self.validate_config() {
			(true, _) => match self.validate_control_fields(&env, now) {
				(true, _) => self.validate_user_fields(),
				failed => failed,
			},
			failed => failed,
		};

		let errors = env.hooks.errors.apply(errors, self)?;
		tracing::debug!(
			form_id = self.id,
			valid,
			errors = ?errors.to_vec(),
			"submission validated"
		);
		self.errors = errors;
		Ok(valid)
	}

	fn validate_config(&self) -> (bool, ErrorCodes) {
		let mut bag = FieldMap::new();
		bag.insert("lists", FieldValue::List(self.config.lists.clone()));

		let mut validator = Validator::new(&bag);
		validator.add_rule("lists", Rule::NotEmpty, message_keys::NO_LISTS_SELECTED);
		let valid = validator.validate();
		tracing::debug!(form_id = self.id, valid, "config pass");
		(valid, validator.into_errors())
	}

	fn validate_control_fields(&self, env: &FormEnvironment, now: DateTime<Utc>) -> (bool, ErrorCodes) {
		if let Some(raw) = self.raw_data.get_str(reserved::TIMESTAMP)
			&& raw.trim().parse::<f64>().is_err()
		{
			tracing::warn!(form_id = self.id, "unparsable form timestamp");
		}

		let latest_render = now.timestamp() - env.min_fill_seconds();
		let mut validator = Validator::new(&self.raw_data).with_nonce_verifier(env.nonce_verifier());
		validator
			.add_rule(
				reserved::TIMESTAMP,
				Rule::Range {
					min: None,
					max: latest_render as f64,
				},
				message_keys::SPAM,
			)
			.add_rule(reserved::HONEYPOT, Rule::Empty, message_keys::SPAM)
			.add_rule(
				reserved::NONCE,
				Rule::ValidNonce {
					action: reserved::NONCE_ACTION.to_string(),
				},
				message_keys::SPAM,
			);
		let valid = validator.validate();
		tracing::debug!(form_id = self.id, valid, "anti-abuse pass");
		(valid, validator.into_errors())
	}

	fn validate_user_fields(&self) -> (bool, ErrorCodes) {
		let mut validator = Validator::new(&self.data);
		validator.add_rule(EMAIL_FIELD, Rule::Email, message_keys::INVALID_EMAIL);
		for field in self.get_required_fields() {
			validator.add_rule(field, Rule::NotEmpty, message_keys::REQUIRED_FIELD_MISSING);
		}
		let valid = validator.validate();
		tracing::debug!(form_id = self.id, valid, "field pass");
		(valid, validator.into_errors())
	}

	/// Alert markup for the current state, always inside one wrapper element.
	///
	/// Nothing inside the wrapper before submission; every error message in
	/// recorded order after a failed one; the `subscribed`/`unsubscribed`
	/// message after a successful one.
	pub fn get_response(&self) -> FormResult<String> {
		let mut html = String::new();
		if self.is_submitted {
			if self.has_errors() {
				for code in self.errors.iter() {
					html.push_str(&self.get_message_html(code));
				}
			} else {
				html = self.get_message_html(self.config.action.success_message_key());
			}
		}

		let html = self.env.hooks.response_html.apply(html, self)?;
		Ok(format!("<div class=\"{RESPONSE_CLASS}\">{html}</div>"))
	}

	/// The message for `key`, or the `error` message when there is none.
	pub fn get_message(&self, key: &str) -> &Message {
		self.messages
			.get(key)
			.or_else(|| self.messages.get(message_keys::ERROR))
			.unwrap_or(&*FALLBACK_MESSAGE)
	}

	pub fn get_message_html(&self, key: &str) -> String {
		self.get_message(key).to_html()
	}

	/// Lower-cased input types found in the markup
	pub fn get_field_types(&self) -> &IndexSet<String> {
		&self.field_types
	}

	pub fn has_field_type(&self, field_type: &str) -> bool {
		self.field_types.contains(&field_type.to_lowercase())
	}

	/// Merges `update` into the config. The change survives later requests.
	pub fn set_config(&mut self, update: ConfigUpdate) -> &FormConfig {
		if let Some(base) = self.base_config.as_mut() {
			base.apply(update.clone());
		}
		self.config.apply(update);
		&self.config
	}

	pub fn get_action(&self) -> FormAction {
		self.config.action
	}

	/// Lists a subscription goes to, after the `lists` and `form_lists` hooks
	pub fn get_lists(&self) -> FormResult<Vec<String>> {
		let lists = self.env.hooks.lists.apply(self.config.lists.clone(), &())?;
		Ok(self.env.hooks.form_lists.apply(lists, self)?)
	}

	/// Upper-cased names of the fields that must be filled in
	pub fn get_required_fields(&self) -> Vec<String> {
		self.settings
			.required_fields()
			.split(',')
			.map(str::trim)
			.filter(|name| !name.is_empty())
			.map(str::to_uppercase)
			.collect()
	}

	/// `html` or `text`; the `email_type` hook decides when the form sets none
	pub fn get_email_type(&self) -> FormResult<String> {
		if !self.config.email_type.is_empty() {
			return Ok(self.config.email_type.clone());
		}
		Ok(self.env.hooks.email_type.apply("html".to_string(), &())?)
	}

	/// Stylesheet to load, or an empty string. Every theme shares `form-themes`.
	pub fn get_stylesheet(&self) -> String {
		match self.settings.css() {
			None => String::new(),
			Some(css) if css.contains("form-theme-") => "form-themes".to_string(),
			Some(css) => css,
		}
	}

	pub fn get_redirect_url(&self) -> FormResult<String> {
		let url = self.settings.redirect().trim().to_string();
		Ok(self.env.hooks.redirect_url.apply(url, self)?)
	}

	/// Records an error code unless already present.
	///
	/// Works in any state, so an unsubmitted form can carry errors this way.
	/// The next [`Form::handle_request`] clears them.
	pub fn add_error(&mut self, code: impl Into<String>) {
		self.errors.insert(code);
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// Merge variables for the list provider, derived from [`Form::data`]
	pub fn merge_vars(&self) -> FormResult<FieldMap> {
		let vars = guess_merge_vars(self.data.clone(), &self.client_ip);
		Ok(self.env.hooks.merge_vars.apply(vars, &())?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn env() -> Arc<FormEnvironment> {
		FormEnvironment::new().into_shared()
	}

	fn form_with(settings: serde_json::Value, env: Arc<FormEnvironment>) -> Form {
		let definition = FormDefinition::new(1, "Test", r#"<input type="email" name="EMAIL">"#)
			.with_stored_settings(settings);
		Form::from_definition(definition, env).unwrap()
	}

	#[rstest]
	fn test_wrong_kind_rejected(env: Arc<FormEnvironment>) {
		let definition = FormDefinition::new(5, "Page", "").with_kind("page");
		let err = Form::from_definition(definition, env).unwrap_err();
		assert!(matches!(err, FormError::WrongType { id: 5, ref kind } if kind == "page"));
	}

	#[rstest]
	fn test_config_from_settings(env: Arc<FormEnvironment>) {
		let form = form_with(json!({"lists": "a, b", "email_type": "text"}), env);

		assert_eq!(form.config().lists, vec!["a", "b"]);
		assert_eq!(form.get_email_type().unwrap(), "text");
		assert_eq!(form.get_action(), FormAction::Subscribe);
	}

	#[rstest]
	#[case("", vec![])]
	#[case("name, ,email,", vec!["NAME", "EMAIL"])]
	#[case(" Phone ", vec!["PHONE"])]
	fn test_required_fields(env: Arc<FormEnvironment>, #[case] raw: &str, #[case] expected: Vec<&str>) {
		let form = form_with(json!({"required_fields": raw}), env);
		assert_eq!(form.get_required_fields(), expected);
	}

	#[rstest]
	#[case(json!(""), "")]
	#[case(json!(false), "")]
	#[case(json!("form-theme-red"), "form-themes")]
	#[case(json!("form-basic"), "form-basic")]
	fn test_stylesheet(env: Arc<FormEnvironment>, #[case] css: serde_json::Value, #[case] expected: &str) {
		let form = form_with(json!({"css": css}), env);
		assert_eq!(form.get_stylesheet(), expected);
	}

	#[rstest]
	fn test_message_fallback(env: Arc<FormEnvironment>) {
		let form = form_with(json!({}), env);
		assert_eq!(form.get_message("no_such_key"), form.get_message("error"));
	}

	#[rstest]
	fn test_text_override_from_settings_blob(env: Arc<FormEnvironment>) {
		let form = form_with(json!({"text_subscribed": "You're in"}), env);
		assert_eq!(form.get_message("subscribed").text(), "You're in");
	}

	#[rstest]
	fn test_add_error_once(env: Arc<FormEnvironment>) {
		let mut form = form_with(json!({}), env);
		form.add_error("spam");
		form.add_error("spam");
		assert!(form.has_errors());
		assert_eq!(form.errors().len(), 1);
	}

	#[rstest]
	fn test_manual_errors_cleared_by_request(env: Arc<FormEnvironment>) {
		let mut form = form_with(json!({}), env);
		form.add_error("already_subscribed");
		assert!(!form.is_submitted());
		assert!(form.has_errors());

		form.handle_request(&SubmissionRequest::default()).unwrap();
		assert!(!form.has_errors());
	}

	#[rstest]
	fn test_redirect_url_trimmed(env: Arc<FormEnvironment>) {
		let form = form_with(json!({"redirect": "  https://example.com/thanks "}), env);
		assert_eq!(form.get_redirect_url().unwrap(), "https://example.com/thanks");
	}

	#[rstest]
	#[case("Unsubscribe")]
	#[case("SUBSCRIBE")]
	#[case("delete")]
	#[case("")]
	fn test_set_config_repairs_action(env: Arc<FormEnvironment>, #[case] action: &str) {
		let mut form = form_with(json!({}), env);
		form.set_config(ConfigUpdate::new().action("unsubscribe"));

		let config = form.set_config(ConfigUpdate::new().action(action).lists(" a1, b2 ,c3"));

		assert_eq!(config.action, FormAction::Subscribe);
		assert_eq!(config.lists, vec!["a1", "b2", "c3"]);
	}

	#[rstest]
	fn test_set_config_survives_next_request(env: Arc<FormEnvironment>) {
		let mut form = form_with(json!({"lists": ["a"]}), env);
		form.handle_request(&SubmissionRequest::default()).unwrap();

		form.set_config(ConfigUpdate::new().lists("x,y").email_type("text"));
		form.handle_request(&SubmissionRequest::default()).unwrap();

		assert_eq!(form.config().lists, vec!["x", "y"]);
		assert_eq!(form.config().email_type, "text");
	}

	#[rstest]
	fn test_request_keys_apply_over_set_config(env: Arc<FormEnvironment>) {
		let mut form = form_with(json!({"lists": ["a"]}), env);
		form.set_config(ConfigUpdate::new().lists("x"));

		let mut fields = FieldMap::new();
		fields.insert(reserved::LISTS, "visitor");
		form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();
		assert_eq!(form.config().lists, vec!["visitor"]);

		form.handle_request(&SubmissionRequest::default()).unwrap();
		assert_eq!(form.config().lists, vec!["x"]);
	}

	#[rstest]
	fn test_data_is_sanitized(env: Arc<FormEnvironment>) {
		let mut fields = FieldMap::new();
		fields.insert("email", " jane@example.com ");
		fields.insert("name", "<b>Jane</b>\n Doe");
		let mut form = form_with(json!({}), env);
		form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();

		assert_eq!(form.data().get_str("EMAIL"), Some("jane@example.com"));
		assert_eq!(form.data().get_str("NAME"), Some("Jane Doe"));
		assert_eq!(form.raw_data().get_str("email"), Some(" jane@example.com "));
	}

	#[rstest]
	fn test_email_type_hook_default() {
		let env = FormEnvironment::new();
		env.hooks.email_type.add(|_, _| Ok("text".to_string()));
		let form = form_with(json!({}), env.into_shared());

		assert_eq!(form.get_email_type().unwrap(), "text");
	}
}
