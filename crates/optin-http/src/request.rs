//! Incoming submission adapter
//!
//! [`SubmissionRequest`] normalizes an HTTP request into a [`FieldMap`] and
//! exposes the handful of transport details the form engine cares about.
//! Parsing never fails: a missing or malformed body yields an empty map.

use crate::FieldMap;
use crate::client_ip::client_ip_from;
use crate::fields::FieldValue;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::net::SocketAddr;

/// Content type of classic HTML form posts
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Suffix marking a multi-valued field (`lists[]=a&lists[]=b`)
const LIST_SUFFIX: &str = "[]";

/// A parsed form submission
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
	fields: FieldMap,
	headers: HeaderMap,
	remote_addr: Option<SocketAddr>,
}

impl SubmissionRequest {
	/// Builds a submission from an HTTP request.
	///
	/// The body is read as `application/x-www-form-urlencoded`. Requests
	/// without a body (e.g. `GET`) fall back to the URI query string. The peer
	/// address is taken from a `SocketAddr` request extension when present.
	///
	/// # Examples
	///
	/// ```
	/// use optin_http::SubmissionRequest;
	///
	/// let request = http::Request::builder()
	///     .method("POST")
	///     .uri("/subscribe")
	///     .header("content-type", "application/x-www-form-urlencoded")
	///     .body("EMAIL=jane%40example.com&_optin_lists[]=a&_optin_lists[]=b")
	///     .unwrap();
	///
	/// let submission = SubmissionRequest::from_request(&request);
	/// assert_eq!(submission.get_str("EMAIL"), Some("jane@example.com"));
	/// assert_eq!(
	///     submission.get("_optin_lists").and_then(|v| v.as_list()),
	///     Some(&["a".to_string(), "b".to_string()][..])
	/// );
	/// ```
	pub fn from_request<B: AsRef<[u8]>>(request: &http::Request<B>) -> Self {
		let body = request.body().as_ref();
		let fields = if !body.is_empty() {
			if accepts_urlencoded(request.headers()) {
				parse_urlencoded(body)
			} else {
				tracing::debug!(
					method = %request.method(),
					"submission body is not form-urlencoded; ignoring it"
				);
				FieldMap::new()
			}
		} else if request.method() == Method::GET || request.method() == Method::HEAD {
			request
				.uri()
				.query()
				.map(|query| parse_urlencoded(query.as_bytes()))
				.unwrap_or_default()
		} else {
			FieldMap::new()
		};

		Self {
			fields,
			headers: request.headers().clone(),
			remote_addr: request.extensions().get::<SocketAddr>().copied(),
		}
	}

	/// Builds a submission from already-parsed fields.
	pub fn from_fields(fields: FieldMap) -> Self {
		Self {
			fields,
			..Self::default()
		}
	}

	/// Adds a header. Invalid names or values are ignored.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let (Ok(name), Ok(value)) = (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			self.headers.append(name, value);
		}
		self
	}

	pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	/// Every submitted field, verbatim
	pub fn all(&self) -> &FieldMap {
		&self.fields
	}

	/// Every submitted field except those whose name starts with `prefix`
	pub fn all_without_prefix(&self, prefix: &str) -> FieldMap {
		self.fields.without_prefix(prefix)
	}

	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.fields.get(name)
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.fields.get_str(name)
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn remote_addr(&self) -> Option<SocketAddr> {
		self.remote_addr
	}

	/// Best-effort client IP, or an empty string when unknown.
	///
	/// Advisory only: every candidate apart from the socket peer address is
	/// client-controlled.
	pub fn client_ip(&self) -> String {
		client_ip_from(&self.headers, self.remote_addr)
			.map(|ip| ip.to_string())
			.unwrap_or_default()
	}
}

fn accepts_urlencoded(headers: &HeaderMap) -> bool {
	match headers
		.get(http::header::CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
	{
		// Browsers always send one, but hand-rolled clients often do not
		None => true,
		Some(content_type) => content_type
			.split(';')
			.next()
			.is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED)),
	}
}

/// Parses an urlencoded payload into a [`FieldMap`].
///
/// `name[]` pairs collect into a list under `name`; a repeated plain name
/// keeps its last value. A payload that cannot be decoded yields an empty map.
pub fn parse_urlencoded(payload: &[u8]) -> FieldMap {
	let pairs: Vec<(String, String)> = match serde_urlencoded::from_bytes(payload) {
		Ok(pairs) => pairs,
		Err(err) => {
			tracing::debug!(error = %err, "discarding undecodable urlencoded payload");
			return FieldMap::new();
		}
	};

	let mut fields = FieldMap::new();
	for (name, value) in pairs {
		match name.strip_suffix(LIST_SUFFIX) {
			Some(base) if !base.is_empty() => fields.push_item(base, value),
			_ => {
				fields.insert(name, FieldValue::Text(value));
			}
		}
	}
	fields
}
