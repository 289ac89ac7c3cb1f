//! Rule-based validation of submitted fields.
//!
//! # Examples
//!
//! ```rust
//! use optin::http::FieldMap;
//! use optin::validators::{Rule, Validator};
//!
//! let mut data = FieldMap::new();
//! data.insert("EMAIL", "not-an-address");
//!
//! let mut validator = Validator::new(&data);
//! validator.add_rule("EMAIL", Rule::Email, "invalid_email");
//! assert!(!validator.validate());
//! assert_eq!(*validator.get_errors(), ["invalid_email"]);
//! ```

pub use optin_validators::*;
