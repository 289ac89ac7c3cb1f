//! Request adapter for optin form submissions
//!
//! Turns an incoming HTTP request into typed field groups:
//!
//! - [`SubmissionRequest::all`]: every submitted field, verbatim
//! - [`SubmissionRequest::all_without_prefix`]: the same minus internal/control
//!   fields (conventionally prefixed with an underscore)
//! - [`SubmissionRequest::client_ip`]: best-effort client address from proxy headers
//!
//! Nothing here fails on bad input; absent fields are simply absent.

pub mod client_ip;
pub mod fields;
pub mod request;
pub mod sanitize;

pub use client_ip::{CLIENT_IP_HEADERS, client_ip_from};
pub use fields::{FieldMap, FieldValue};
pub use request::{FORM_URLENCODED, SubmissionRequest, parse_urlencoded};
pub use sanitize::sanitize_text;
