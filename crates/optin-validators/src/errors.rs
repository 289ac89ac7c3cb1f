//! Validator configuration errors
//!
//! A submission failing a rule is not an error; it is recorded as an error
//! code. These variants describe rule sets that cannot be built at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("unknown validation rule '{0}'")]
	UnknownRule(String),
	#[error("rule '{rule}' requires the '{param}' parameter")]
	MissingParameter {
		rule: &'static str,
		param: &'static str,
	},
	#[error("nonce secret rejected: {0}")]
	InvalidSecret(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
