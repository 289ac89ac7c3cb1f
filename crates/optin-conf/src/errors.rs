//! Configuration loading errors

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfError {
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid settings shape: expected {expected}, found {found}")]
	InvalidShape {
		expected: &'static str,
		found: &'static str,
	},
}

pub type ConfResult<T> = Result<T, ConfError>;

/// Short JSON type name used in diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
