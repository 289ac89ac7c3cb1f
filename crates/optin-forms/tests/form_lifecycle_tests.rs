//! Submission lifecycle tests
//!
//! Drives forms from a registry through handle, validate and respond, with a
//! real HMAC verifier minting the anti-forgery tokens.

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use optin_forms::prelude::*;
use optin_forms::reserved;
use optin_http::{FieldMap, FieldValue, SubmissionRequest};
use optin_validators::{HmacNonceVerifier, NonceVerifier};
use proptest::prelude::*;
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

const MARKUP: &str = r#"<p><label>Email</label><input type="EMAIL" name="EMAIL"></p>
<p><label>Name</label><input type="text" name="NAME"></p>
<input type="submit" value="Subscribe">"#;

struct Site {
	nonces: Arc<HmacNonceVerifier>,
	registry: FormRegistry<InMemoryDefinitions>,
}

impl Site {
	fn new(env: FormEnvironment) -> Self {
		let nonces = Arc::new(HmacNonceVerifier::new(b"test-secret", "visitor").unwrap());
		let shared: Arc<dyn NonceVerifier> = nonces.clone();
		let env = env.with_shared_nonce_verifier(shared).into_shared();

		let source: InMemoryDefinitions = [
			FormDefinition::new(1, "Newsletter", MARKUP)
				.with_stored_settings(json!({"lists": ["news", "offers"], "required_fields": "name"}))
				.with_message_text("subscribed", "Welcome aboard!"),
			FormDefinition::new(2, "Unconfigured", MARKUP),
		]
		.into_iter()
		.collect();

		Self {
			nonces,
			registry: FormRegistry::new(source, env),
		}
	}

	/// Control fields of a form rendered `age` seconds before `now`
	fn control_fields(&self, now: DateTime<Utc>, age: i64) -> FieldMap {
		let mut fields = FieldMap::new();
		fields.insert(reserved::TIMESTAMP, (now - Duration::seconds(age)).timestamp().to_string());
		fields.insert(reserved::HONEYPOT, "");
		fields.insert(reserved::NONCE, self.nonces.create(reserved::NONCE_ACTION));
		fields
	}
}

#[fixture]
fn site() -> Site {
	Site::new(FormEnvironment::new())
}

fn submission(mut fields: FieldMap, user: &[(&str, &str)]) -> SubmissionRequest {
	for (name, value) in user {
		fields.insert(*name, *value);
	}
	SubmissionRequest::from_fields(fields)
}

#[rstest]
fn test_unsubmitted_form(mut site: Site) {
	let form = site.registry.get(1).unwrap();

	assert!(form.is_valid().unwrap());
	assert!(!form.has_errors());
	assert_eq!(form.get_response().unwrap(), r#"<div class="optin-response"></div>"#);
}

#[rstest]
fn test_successful_subscription(mut site: Site) {
	let now = Utc::now();
	let request = submission(
		site.control_fields(now, 30),
		&[("EMAIL", "jane@example.com"), ("name", "Jane Doe")],
	);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert!(form.is_valid_at(now).unwrap());
	assert!(form.errors().is_empty());
	assert_eq!(
		form.get_response().unwrap(),
		r#"<div class="optin-response"><div class="optin-alert optin-success"><p>Welcome aboard!</p></div></div>"#
	);
	assert_eq!(form.get_lists().unwrap(), vec!["news", "offers"]);

	let vars = form.merge_vars().unwrap();
	assert_eq!(vars.get_str("FNAME"), Some("Jane"));
	assert_eq!(vars.get_str("LNAME"), Some("Doe"));
	assert!(!vars.contains_key(reserved::NONCE));
}

#[rstest]
fn test_urlencoded_post(mut site: Site) {
	let now = Utc::now();
	let controls = site.control_fields(now, 10);
	let body = format!(
		"EMAIL=jane%40example.com&NAME=Jane&_optin_timestamp={}&_optin_honeypot=&_optin_form_nonce={}&_optin_action=unsubscribe",
		controls.get_str(reserved::TIMESTAMP).unwrap(),
		controls.get_str(reserved::NONCE).unwrap(),
	);
	let request = http::Request::builder()
		.method("POST")
		.uri("/optin")
		.header("content-type", "application/x-www-form-urlencoded")
		.header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
		.body(Bytes::from(body))
		.unwrap();

	let form = site.registry.get(1).unwrap();
	form.handle_request(&SubmissionRequest::from_request(&request)).unwrap();

	assert_eq!(form.get_action(), FormAction::Unsubscribe);
	assert_eq!(form.client_ip(), "203.0.113.9");
	assert!(form.is_valid_at(now).unwrap());
	assert!(form.get_response().unwrap().contains("optin-success"));
	assert_eq!(form.merge_vars().unwrap().get_str("OPTIN_IP"), Some("203.0.113.9"));
}

#[rstest]
fn test_padded_email_is_accepted(mut site: Site) {
	let now = Utc::now();
	let controls = site.control_fields(now, 30);
	let body = format!(
		"EMAIL=+jane%40example.com+&NAME=%09Jane%0A&_optin_timestamp={}&_optin_honeypot=&_optin_form_nonce={}",
		controls.get_str(reserved::TIMESTAMP).unwrap(),
		controls.get_str(reserved::NONCE).unwrap(),
	);
	let request = http::Request::builder()
		.method("POST")
		.uri("/optin")
		.header("content-type", "application/x-www-form-urlencoded")
		.body(Bytes::from(body))
		.unwrap();

	let form = site.registry.get(1).unwrap();
	form.handle_request(&SubmissionRequest::from_request(&request)).unwrap();

	assert_eq!(form.data().get_str("EMAIL"), Some("jane@example.com"));
	assert_eq!(form.raw_data().get_str("EMAIL"), Some(" jane@example.com "));
	assert!(form.is_valid_at(now).unwrap());
	assert!(form.errors().is_empty());
}

#[rstest]
#[case::honeypot_filled(&[(reserved::HONEYPOT, "http://spam.example")])]
#[case::forged_nonce(&[(reserved::NONCE, "0123abcd")])]
#[case::missing_nonce(&[(reserved::NONCE, "")])]
#[case::no_timestamp(&[(reserved::TIMESTAMP, "")])]
#[case::garbage_timestamp(&[(reserved::TIMESTAMP, "yesterday")])]
fn test_spam_is_the_only_error(mut site: Site, #[case] tampered: &[(&str, &str)]) {
	let now = Utc::now();
	// an invalid email too, which the field pass never gets to see
	let request = submission(site.control_fields(now, 30), &[("EMAIL", "nope")])
		.all()
		.clone();
	let request = submission(request, tampered);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert!(!form.is_valid_at(now).unwrap());
	assert_eq!(*form.errors(), ["spam"]);
	assert!(form.get_response().unwrap().contains("optin-error"));
}

#[rstest]
#[case(0, false)]
#[case(1, false)]
#[case(2, true)]
#[case(120, true)]
fn test_minimum_fill_time(mut site: Site, #[case] age: i64, #[case] valid: bool) {
	let now = Utc::now();
	let request = submission(
		site.control_fields(now, age),
		&[("EMAIL", "jane@example.com"), ("NAME", "Jane")],
	);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert_eq!(form.is_valid_at(now).unwrap(), valid);
}

#[rstest]
#[case::bad_email(&[("EMAIL", "jane@"), ("NAME", "Jane")], vec!["invalid_email"])]
#[case::missing_required(&[("EMAIL", "jane@example.com")], vec!["required_field_missing"])]
#[case::both(&[("EMAIL", ""), ("NAME", "  ")], vec!["invalid_email", "required_field_missing"])]
fn test_field_errors(mut site: Site, #[case] user: &[(&str, &str)], #[case] expected: Vec<&str>) {
	let now = Utc::now();
	let request = submission(site.control_fields(now, 30), user);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert!(!form.is_valid_at(now).unwrap());
	assert_eq!(*form.errors(), expected);
}

#[rstest]
fn test_no_lists_selected(mut site: Site) {
	let now = Utc::now();
	let request = submission(site.control_fields(now, 30), &[("EMAIL", "jane@example.com")]);

	let form = site.registry.get(2).unwrap();
	form.handle_request(&request).unwrap();

	assert!(!form.is_valid_at(now).unwrap());
	assert_eq!(*form.errors(), ["no_lists_selected"]);
}

#[rstest]
fn test_visitor_list_selection(mut site: Site) {
	let now = Utc::now();
	let mut fields = site.control_fields(now, 30);
	fields.insert(reserved::LISTS, FieldValue::List(vec!["offers".to_string()]));
	let request = submission(fields, &[("EMAIL", "jane@example.com"), ("NAME", "Jane")]);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();
	assert_eq!(form.get_lists().unwrap(), vec!["offers"]);

	// an explicitly empty selection is kept and fails the config pass
	let mut fields = site.control_fields(now, 30);
	fields.insert(reserved::LISTS, "");
	let form = site.registry.get(1).unwrap();
	form.handle_request(&submission(fields, &[("EMAIL", "jane@example.com")]))
		.unwrap();
	assert!(form.config().lists.is_empty());
	assert!(!form.is_valid_at(now).unwrap());
	assert_eq!(*form.errors(), ["no_lists_selected"]);
}

#[rstest]
fn test_handle_request_is_idempotent(mut site: Site) {
	let now = Utc::now();
	let mut fields = site.control_fields(now, 30);
	fields.insert(reserved::LISTS, "a, b");
	fields.insert(reserved::ACTION, "unsubscribe");
	let request = submission(fields, &[("email", "jane@example.com"), ("Name", "Jane")]);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();
	let once = (form.config().clone(), form.data().clone(), form.raw_data().clone());
	form.add_error("spam");
	form.handle_request(&request).unwrap();

	assert_eq!(
		(form.config().clone(), form.data().clone(), form.raw_data().clone()),
		once
	);
	assert!(!form.has_errors());
	assert_eq!(form.data().keys().collect::<Vec<_>>(), vec!["EMAIL", "NAME"]);
}

#[rstest]
fn test_second_request_restores_stored_config(mut site: Site) {
	let mut fields = FieldMap::new();
	fields.insert(reserved::LISTS, "other");
	fields.insert(reserved::ACTION, "unsubscribe");

	let form = site.registry.get(1).unwrap();
	form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();
	assert_eq!(form.config().lists, vec!["other"]);

	form.handle_request(&SubmissionRequest::default()).unwrap();
	assert_eq!(form.config().lists, vec!["news", "offers"]);
	assert_eq!(form.get_action(), FormAction::Subscribe);
}

#[rstest]
fn test_field_type_detection(mut site: Site) {
	let form = site.registry.get(1).unwrap();

	assert!(form.has_field_type("email"));
	assert!(form.has_field_type("Text"));
	assert!(!form.has_field_type("checkbox"));
	assert_eq!(
		form.get_field_types().iter().map(String::as_str).collect::<Vec<_>>(),
		vec!["email", "text", "submit"]
	);
}

#[rstest]
fn test_ignored_field_names_hook() {
	let env = FormEnvironment::new();
	env.hooks.ignored_field_names.add(|mut names, _| {
		names.push("captcha".to_string());
		Ok(names)
	});
	let mut site = Site::new(env);

	let request = submission(FieldMap::new(), &[("EMAIL", "jane@example.com"), ("captcha", "x7")]);
	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert!(!form.data().contains_key("CAPTCHA"));
	assert!(form.raw_data().contains_key("captcha"));
}

#[rstest]
fn test_errors_hook_rewrites_codes() {
	let env = FormEnvironment::new();
	env.hooks.errors.add(|mut codes, form| {
		if form.id() == 1 && codes.contains("invalid_email") {
			codes.insert("error");
		}
		Ok(codes)
	});
	let mut site = Site::new(env);
	let now = Utc::now();
	let request = submission(site.control_fields(now, 30), &[("EMAIL", "x"), ("NAME", "Jane")]);

	let form = site.registry.get(1).unwrap();
	form.handle_request(&request).unwrap();

	assert!(!form.is_valid_at(now).unwrap());
	assert_eq!(*form.errors(), ["invalid_email", "error"]);
	let response = form.get_response().unwrap();
	assert_eq!(response.matches("optin-alert").count(), 2);
}

#[rstest]
fn test_response_hook_sees_inner_html(mut site: Site) {
	site.registry
		.environment()
		.hooks
		.response_html
		.add(|html, form| Ok(format!("{html}<!-- form {} -->", form.id())));

	let form = site.registry.get(1).unwrap();
	assert_eq!(
		form.get_response().unwrap(),
		r#"<div class="optin-response"><!-- form 1 --></div>"#
	);
}

#[rstest]
fn test_hook_failure_propagates() {
	let env = FormEnvironment::new();
	env.hooks.settings.add(|_, definition| {
		anyhow::ensure!(definition.id != 2, "form 2 is disabled");
		Ok(optin_conf::FormSettings::defaults())
	});
	let mut site = Site::new(env);

	assert!(site.registry.get(1).is_ok());
	let err = site.registry.get(2).unwrap_err();
	assert!(matches!(err, FormError::Hook(ref e) if e.hook == "optin_form_settings"));
	assert!(!site.registry.contains(2));
}

#[rstest]
fn test_list_hooks_run_in_order(mut site: Site) {
	let hooks = &site.registry.environment().hooks;
	hooks.lists.add(|mut lists, _| {
		lists.push("global".to_string());
		Ok(lists)
	});
	hooks.form_lists.add(|lists, form| {
		Ok(lists.into_iter().map(|l| format!("{}:{l}", form.id())).collect())
	});

	let form = site.registry.get(1).unwrap();
	assert_eq!(form.get_lists().unwrap(), vec!["1:news", "1:offers", "1:global"]);
}

#[rstest]
fn test_default_form(mut site: Site) {
	assert_eq!(site.registry.get(0).unwrap().title(), "Newsletter");
}

proptest! {
	#[test]
	fn prop_unknown_action_means_subscribe(action in "[a-zA-Z_]{0,16}") {
		prop_assume!(action != "unsubscribe");
		let mut fields = FieldMap::new();
		fields.insert(reserved::ACTION, action);

		let mut site = Site::new(FormEnvironment::new());
		let form = site.registry.get(1).unwrap();
		form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();
		prop_assert_eq!(form.get_action(), FormAction::Subscribe);
	}

	#[test]
	fn prop_list_selection_keeps_order(lists in prop::collection::vec("[a-z0-9]{1,8}", 1..6)) {
		let mut fields = FieldMap::new();
		fields.insert(reserved::LISTS, lists.join(","));

		let mut site = Site::new(FormEnvironment::new());
		let form = site.registry.get(2).unwrap();
		form.handle_request(&SubmissionRequest::from_fields(fields)).unwrap();
		prop_assert_eq!(&form.config().lists, &lists);
	}
}
