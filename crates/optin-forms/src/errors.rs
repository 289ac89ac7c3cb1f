//! Form construction and extension hook failures
//!
//! Validation failures are never errors; they are recorded as error codes
//! on the form. What remains here is fatal to the current operation.

use optin_conf::ConfError;
use optin_core::HookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
	#[error("There is no form with ID {0}, perhaps it was deleted?")]
	NotFound(i64),

	#[error("Definition {id} is a '{kind}', not a form")]
	WrongType { id: i64, kind: String },

	#[error(transparent)]
	Hook(#[from] HookError),

	#[error(transparent)]
	Conf(#[from] ConfError),
}

pub type FormResult<T> = Result<T, FormError>;
