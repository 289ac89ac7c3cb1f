//! Shared building blocks: alert messages, HTML escaping and extension hooks.
//!
//! # Examples
//!
//! ```rust
//! use optin::core::{Filter, Message};
//!
//! let filter: Filter<String> = Filter::new("greeting");
//! filter.add(|s, _| Ok(s.to_uppercase()));
//! assert_eq!(filter.apply("hi".to_string(), &()).unwrap(), "HI");
//! assert_eq!(Message::success("ok").kind().as_str(), "success");
//! ```

pub use optin_core::*;
