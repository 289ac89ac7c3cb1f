//! Rule-based validation for optin submissions
//!
//! A [`Validator`] binds [`Rule`]s to field names of one [`FieldMap`](optin_http::FieldMap)
//! and produces an ordered, de-duplicated list of [`ErrorCodes`]. Failing
//! rules are expected outcomes, never errors; [`ValidationError`] only covers
//! rule sets that cannot be built.
//!
//! Anti-forgery tokens are checked through the [`NonceVerifier`] trait, with
//! [`HmacNonceVerifier`] as a stateless implementation.

pub mod email;
pub mod error_codes;
pub mod errors;
pub mod nonce;
pub mod rule;
pub mod validator;

pub use email::is_valid_email;
pub use error_codes::ErrorCodes;
pub use errors::{ValidationError, ValidationResult};
pub use nonce::{DEFAULT_NONCE_LIFETIME, DenyAllNonces, HmacNonceVerifier, NonceVerifier};
pub use rule::{Rule, RuleParams};
pub use validator::{RuleBinding, Validator};
