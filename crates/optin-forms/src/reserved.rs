//! Reserved internal field names
//!
//! Fields starting with [`PREFIX`] are control fields. They are kept in the
//! raw submission but never reach the user data bag.

pub const PREFIX: &str = "_";

/// Unix time at which the form was rendered
pub const TIMESTAMP: &str = "_optin_timestamp";

/// Hidden field that must stay empty
pub const HONEYPOT: &str = "_optin_honeypot";

/// Anti-forgery token
pub const NONCE: &str = "_optin_form_nonce";

/// Lists selected by the visitor, overriding the configured ones
pub const LISTS: &str = "_optin_lists";

/// `subscribe` or `unsubscribe`
pub const ACTION: &str = "_optin_action";

/// Action the anti-forgery token is minted for
pub const NONCE_ACTION: &str = "_optin_form_nonce";

/// Seconds a human needs at least between render and submit
pub const MIN_FILL_SECONDS: i64 = 2;
