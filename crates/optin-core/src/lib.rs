//! Core types for optin
//!
//! This crate provides the building blocks shared by every other optin crate:
//!
//! - **Messages**: immutable `(text, type)` pairs rendered as user-facing alerts
//! - **Extension hooks**: named, ordered filter chains that let embedding code
//!   inspect or transform values produced by the form engine
//! - **HTML helpers**: attribute and text escaping used when rendering alerts
//!
//! ## Example
//!
//! ```
//! use optin_core::{Filter, Message, MessageType};
//!
//! let message = Message::new("Thanks for subscribing!", MessageType::Success);
//! assert_eq!(message.kind(), &MessageType::Success);
//!
//! let shout: Filter<String> = Filter::new("shout");
//! shout.add(|text, _| Ok(text.to_uppercase()));
//! assert_eq!(shout.apply("hi".to_string(), &()).unwrap(), "HI");
//! ```

pub mod hooks;
pub mod html;
pub mod message;

pub use hooks::{DEFAULT_PRIORITY, Filter, HookError, HookResult};
pub use html::escape_attr;
pub use message::{Message, MessageType};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::hooks::*;
	pub use crate::html::*;
	pub use crate::message::*;
}
