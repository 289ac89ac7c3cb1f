//! Submission parsing and client address detection.

pub use optin_http::*;
