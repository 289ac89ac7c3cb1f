//! Rule catalogue

use crate::email::is_valid_email;
use crate::errors::{ValidationError, ValidationResult};
use crate::nonce::NonceVerifier;
use optin_http::FieldValue;

/// Parameters for rules built by name
///
/// # Examples
///
/// ```
/// use optin_validators::{Rule, RuleParams};
///
/// let rule = Rule::from_name("range", &RuleParams::new().max(10.0)).unwrap();
/// assert_eq!(rule, Rule::Range { min: None, max: 10.0 });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleParams {
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub action: Option<String>,
}

impl RuleParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}
}

/// A predicate over one field value
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
	/// Passes when the value holds something other than whitespace
	NotEmpty,
	/// Passes when the value is absent or empty (honeypots)
	Empty,
	/// Passes when the value is a single well-formed address
	Email,
	/// Passes when the value parses as a number within `[min, max]`
	Range { min: Option<f64>, max: f64 },
	/// Passes when the value is a valid anti-forgery token for `action`
	ValidNonce { action: String },
}

impl Rule {
	/// Builds a rule from its declarative name.
	pub fn from_name(name: &str, params: &RuleParams) -> ValidationResult<Self> {
		match name {
			"not_empty" => Ok(Rule::NotEmpty),
			"empty" => Ok(Rule::Empty),
			"email" => Ok(Rule::Email),
			"range" => {
				let max = params.max.ok_or(ValidationError::MissingParameter {
					rule: "range",
					param: "max",
				})?;
				Ok(Rule::Range {
					min: params.min,
					max,
				})
			}
			"valid_nonce" => {
				let action = params
					.action
					.clone()
					.ok_or(ValidationError::MissingParameter {
						rule: "valid_nonce",
						param: "action",
					})?;
				Ok(Rule::ValidNonce { action })
			}
			other => Err(ValidationError::UnknownRule(other.to_string())),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Rule::NotEmpty => "not_empty",
			Rule::Empty => "empty",
			Rule::Email => "email",
			Rule::Range { .. } => "range",
			Rule::ValidNonce { .. } => "valid_nonce",
		}
	}

	/// Evaluates the rule. `value` is `None` when the field was not submitted.
	pub fn passes(&self, value: Option<&FieldValue>, nonces: Option<&dyn NonceVerifier>) -> bool {
		match self {
			Rule::NotEmpty => value.is_some_and(|v| !v.is_blank()),
			Rule::Empty => value.is_none_or(FieldValue::is_empty),
			Rule::Email => value
				.and_then(FieldValue::as_text)
				.is_some_and(is_valid_email),
			Rule::Range { min, max } => value
				.and_then(FieldValue::as_text)
				.and_then(|text| text.trim().parse::<f64>().ok())
				.is_some_and(|n| n.is_finite() && n <= *max && min.is_none_or(|min| n >= min)),
			Rule::ValidNonce { action } => match (value.and_then(FieldValue::as_text), nonces) {
				(Some(token), Some(verifier)) => verifier.verify(token, action),
				(_, None) => {
					tracing::warn!(action = %action, "no nonce verifier configured; rejecting token");
					false
				}
				(None, Some(_)) => false,
			},
		}
	}
}
