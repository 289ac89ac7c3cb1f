//! Form settings, message templates and their layered resolution.
//!
//! # Examples
//!
//! ```rust
//! use optin::conf::{FormDefaults, FormSettings};
//!
//! let defaults = FormDefaults::from_toml_str("[settings]\ndouble_optin = false\n").unwrap();
//! assert!(!defaults.settings.double_optin());
//! assert!(FormSettings::defaults().double_optin());
//! ```

pub use optin_conf::*;
