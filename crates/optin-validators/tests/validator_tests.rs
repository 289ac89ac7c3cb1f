//! Validator integration tests

use chrono::{TimeZone, Utc};
use optin_http::{FieldMap, parse_urlencoded};
use optin_validators::{ErrorCodes, HmacNonceVerifier, Rule, RuleParams, Validator};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
fn test_anti_abuse_rules_over_parsed_body() {
	let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
	let verifier = HmacNonceVerifier::new(b"secret", "visitor").unwrap();
	let token = verifier.create_at("_optin_form_nonce", now);
	let body = format!(
		"_optin_timestamp={}&_optin_honeypot=&_optin_form_nonce={}",
		now.timestamp() - 30,
		token
	);
	let data = parse_urlencoded(body.as_bytes());

	let mut validator = Validator::new(&data).with_nonce_verifier(&verifier);
	validator
		.add_rule(
			"_optin_timestamp",
			Rule::Range {
				min: None,
				max: (now.timestamp() - 2) as f64,
			},
			"spam",
		)
		.add_rule("_optin_honeypot", Rule::Empty, "spam")
		.add_rule(
			"_optin_form_nonce",
			Rule::ValidNonce {
				action: "_optin_form_nonce".to_string(),
			},
			"spam",
		);

	assert!(validator.validate());
}

#[rstest]
#[case("", true)]
#[case("_optin_honeypot=", true)]
#[case("_optin_honeypot=%20", false)]
#[case("_optin_honeypot=bot", false)]
fn test_honeypot(#[case] body: &str, #[case] passes: bool) {
	let data = parse_urlencoded(body.as_bytes());
	let mut validator = Validator::new(&data);
	validator.add_rule("_optin_honeypot", Rule::Empty, "spam");

	assert_eq!(validator.validate(), passes);
}

#[rstest]
fn test_named_rules_match_enum_rules() {
	let mut data = FieldMap::new();
	data.insert("EMAIL", "jane@example.com");
	data.insert("AGE", "31");

	let mut named = Validator::new(&data);
	named
		.add_named_rule("EMAIL", "email", "invalid_email", &RuleParams::new())
		.unwrap()
		.add_named_rule("AGE", "range", "too_old", &RuleParams::new().min(18.0).max(30.0))
		.unwrap();

	assert!(!named.validate());
	assert_eq!(*named.get_errors(), ["too_old"]);
}

proptest! {
	#[test]
	fn test_error_codes_never_duplicated(
		codes in prop::collection::vec(prop::sample::select(vec!["spam", "invalid_email", "required_field_missing"]), 0..20)
	) {
		let data = FieldMap::new();
		let mut validator = Validator::new(&data);
		for (i, code) in codes.iter().enumerate() {
			validator.add_rule(format!("FIELD_{i}"), Rule::NotEmpty, *code);
		}

		let passed = validator.validate();
		let errors = validator.get_errors();

		prop_assert_eq!(passed, codes.is_empty());
		let mut expected: Vec<&str> = Vec::new();
		for code in &codes {
			if !expected.contains(code) {
				expected.push(*code);
			}
		}
		prop_assert_eq!(errors.len(), expected.len());
		prop_assert!(errors.iter().zip(expected.iter()).all(|(a, b)| a == *b));
	}

	#[test]
	fn test_error_codes_collect_dedups(input in prop::collection::vec("[a-c]", 0..30)) {
		let codes: ErrorCodes = input.iter().map(String::as_str).collect();
		let unique: std::collections::HashSet<&String> = input.iter().collect();
		prop_assert_eq!(codes.len(), unique.len());
	}
}
