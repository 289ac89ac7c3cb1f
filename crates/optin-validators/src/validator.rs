//! Declarative validator over one field map

use crate::error_codes::ErrorCodes;
use crate::errors::ValidationResult;
use crate::nonce::NonceVerifier;
use crate::rule::{Rule, RuleParams};
use optin_http::FieldMap;
use std::collections::HashSet;

/// One rule bound to a field and the code recorded when it fails
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBinding {
	pub field: String,
	pub rule: Rule,
	pub error_code: String,
}

/// Runs rules against a borrowed data bag
///
/// Rules run in the order they were added. Once a field fails, later rules on
/// that field are skipped; rules on other fields still run, so one pass can
/// collect several codes.
///
/// # Examples
///
/// ```
/// use optin_http::FieldMap;
/// use optin_validators::{Rule, Validator};
///
/// let mut data = FieldMap::new();
/// data.insert("EMAIL", "not-an-email");
/// data.insert("_honeypot", "filled by a bot");
///
/// let mut validator = Validator::new(&data);
/// validator
///     .add_rule("EMAIL", Rule::Email, "invalid_email")
///     .add_rule("_honeypot", Rule::Empty, "spam")
///     .add_rule("NAME", Rule::NotEmpty, "spam");
///
/// assert!(!validator.validate());
/// assert_eq!(*validator.get_errors(), ["invalid_email", "spam"]);
/// ```
pub struct Validator<'a> {
	data: &'a FieldMap,
	rules: Vec<RuleBinding>,
	errors: ErrorCodes,
	nonce_verifier: Option<&'a dyn NonceVerifier>,
}

impl<'a> Validator<'a> {
	pub fn new(data: &'a FieldMap) -> Self {
		Self {
			data,
			rules: Vec::new(),
			errors: ErrorCodes::new(),
			nonce_verifier: None,
		}
	}

	/// Sets the service `valid_nonce` rules check tokens against.
	pub fn with_nonce_verifier(mut self, verifier: &'a dyn NonceVerifier) -> Self {
		self.nonce_verifier = Some(verifier);
		self
	}

	pub fn add_rule(
		&mut self,
		field: impl Into<String>,
		rule: Rule,
		error_code: impl Into<String>,
	) -> &mut Self {
		self.rules.push(RuleBinding {
			field: field.into(),
			rule,
			error_code: error_code.into(),
		});
		self
	}

	/// Adds a rule by its declarative name, e.g. `"not_empty"`.
	pub fn add_named_rule(
		&mut self,
		field: impl Into<String>,
		rule_name: &str,
		error_code: impl Into<String>,
		params: &RuleParams,
	) -> ValidationResult<&mut Self> {
		let rule = Rule::from_name(rule_name, params)?;
		Ok(self.add_rule(field, rule, error_code))
	}

	pub fn rules(&self) -> &[RuleBinding] {
		&self.rules
	}

	/// Runs every rule. Returns true when none failed.
	///
	/// Errors from a previous run are discarded first.
	pub fn validate(&mut self) -> bool {
		self.errors.clear();
		let mut failed_fields: HashSet<&str> = HashSet::new();

		for binding in &self.rules {
			if failed_fields.contains(binding.field.as_str()) {
				continue;
			}
			let value = self.data.get(&binding.field);
			if !binding.rule.passes(value, self.nonce_verifier) {
				tracing::trace!(
					field = %binding.field,
					rule = binding.rule.name(),
					code = %binding.error_code,
					"rule failed"
				);
				failed_fields.insert(binding.field.as_str());
				self.errors.insert(binding.error_code.as_str());
			}
		}

		self.errors.is_empty()
	}

	pub fn get_errors(&self) -> &ErrorCodes {
		&self.errors
	}

	pub fn into_errors(self) -> ErrorCodes {
		self.errors
	}
}
