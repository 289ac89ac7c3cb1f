//! End-to-end tests through the facade crate

#![cfg(feature = "forms")]

use chrono::Utc;
use optin::prelude::*;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn post(body: String) -> http::Request<Vec<u8>> {
	http::Request::builder()
		.method("POST")
		.uri("/optin")
		.header("content-type", "application/x-www-form-urlencoded")
		.body(body.into_bytes())
		.unwrap()
}

#[rstest]
fn test_post_to_response() {
	let nonces = Arc::new(HmacNonceVerifier::new(b"facade", "visitor").unwrap());
	let shared: Arc<dyn NonceVerifier> = nonces.clone();
	let env = FormEnvironment::new().with_shared_nonce_verifier(shared).into_shared();

	let mut source = InMemoryDefinitions::new();
	source.insert(
		FormDefinition::new(4, "Footer", r#"<input type="email" name="EMAIL">"#)
			.with_stored_settings(json!({"lists": "a1,b2", "hide_after_success": true})),
	);
	let mut registry = FormRegistry::new(source, env);

	let now = Utc::now();
	let body = format!(
		"EMAIL=jane%40example.com&_optin_timestamp={}&_optin_honeypot=&_optin_form_nonce={}",
		now.timestamp() - 60,
		nonces.create("_optin_form_nonce"),
	);
	let request = SubmissionRequest::from_request(&post(body));

	let form = registry.get(0).unwrap();
	form.handle_request(&request).unwrap();

	assert!(form.is_valid_at(now).unwrap());
	assert!(form.settings().hide_after_success());
	assert_eq!(form.get_lists().unwrap(), vec!["a1", "b2"]);
	assert!(form.get_response().unwrap().contains("optin-success"));
}

#[rstest]
fn test_defaults_from_toml() {
	let defaults = FormDefaults::from_toml_str(
		r#"
[settings]
email_type = "text"

[messages.spam]
text = "Slow down"
type = "warning"
"#,
	)
	.unwrap();
	let env = FormEnvironment::new().with_defaults(defaults).into_shared();
	let form = Form::from_definition(FormDefinition::new(1, "One", ""), env).unwrap();

	assert_eq!(form.get_email_type().unwrap(), "text");
	assert_eq!(
		form.get_message_html("spam"),
		r#"<div class="optin-alert optin-warning"><p>Slow down</p></div>"#
	);
}
