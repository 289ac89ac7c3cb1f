//! Anti-forgery tokens
//!
//! [`NonceVerifier`] is the seam to whatever session-bound token service the
//! host provides. [`HmacNonceVerifier`] is a self-contained implementation:
//! tokens are hex HMAC-SHA256 tags over `action|scope|tick`, where `tick`
//! advances every half lifetime. A token minted during the current or the
//! previous tick verifies, so a token stays valid for between one half and one
//! full lifetime.

use crate::errors::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime in seconds (one day)
pub const DEFAULT_NONCE_LIFETIME: i64 = 86_400;

/// Verifies anti-forgery tokens for a named action
pub trait NonceVerifier: Send + Sync {
	fn verify(&self, token: &str, action: &str) -> bool;
}

/// Rejects every token. Useful when a host has no session scope at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllNonces;

impl NonceVerifier for DenyAllNonces {
	fn verify(&self, _token: &str, _action: &str) -> bool {
		false
	}
}

impl<F> NonceVerifier for F
where
	F: Fn(&str, &str) -> bool + Send + Sync,
{
	fn verify(&self, token: &str, action: &str) -> bool {
		self(token, action)
	}
}

/// HMAC-based tokens bound to a secret and a scope (typically a session or user id)
///
/// # Examples
///
/// ```
/// use optin_validators::{HmacNonceVerifier, NonceVerifier};
///
/// let verifier = HmacNonceVerifier::new(b"site-secret-key", "session-42").unwrap();
/// let token = verifier.create("_optin_form_nonce");
///
/// assert!(verifier.verify(&token, "_optin_form_nonce"));
/// assert!(!verifier.verify(&token, "other_action"));
/// ```
#[derive(Clone)]
pub struct HmacNonceVerifier {
	secret: Vec<u8>,
	scope: String,
	lifetime: i64,
}

impl HmacNonceVerifier {
	/// Rejects an empty secret.
	pub fn new(secret: &[u8], scope: impl Into<String>) -> ValidationResult<Self> {
		if secret.is_empty() {
			return Err(ValidationError::InvalidSecret(
				"secret must not be empty".to_string(),
			));
		}
		Ok(Self {
			secret: secret.to_vec(),
			scope: scope.into(),
			lifetime: DEFAULT_NONCE_LIFETIME,
		})
	}

	/// Sets the lifetime in seconds. Values below 2 are raised to 2.
	pub fn with_lifetime(mut self, seconds: i64) -> Self {
		self.lifetime = seconds.max(2);
		self
	}

	pub fn scope(&self) -> &str {
		&self.scope
	}

	pub fn lifetime(&self) -> i64 {
		self.lifetime
	}

	/// Mints a token for `action` using the wall clock.
	pub fn create(&self, action: &str) -> String {
		self.create_at(action, Utc::now())
	}

	pub fn create_at(&self, action: &str, now: DateTime<Utc>) -> String {
		self.token_for_tick(action, self.tick(now))
	}

	pub fn verify_at(&self, token: &str, action: &str, now: DateTime<Utc>) -> bool {
		if token.is_empty() {
			return false;
		}
		let tick = self.tick(now);
		// Both ticks are always computed so timing does not depend on which matched
		let current = constant_time_eq(token, &self.token_for_tick(action, tick));
		let previous = constant_time_eq(token, &self.token_for_tick(action, tick - 1));
		current | previous
	}

	/// `ceil(now / (lifetime / 2))`
	fn tick(&self, now: DateTime<Utc>) -> i64 {
		let half = self.lifetime / 2;
		let seconds = now.timestamp();
		seconds.div_euclid(half) + i64::from(seconds.rem_euclid(half) != 0)
	}

	fn token_for_tick(&self, action: &str, tick: i64) -> String {
		let message = format!("{}|{}|{}", action, self.scope, tick);
		match HmacSha256::new_from_slice(&self.secret) {
			Ok(mut mac) => {
				mac.update(message.as_bytes());
				hex::encode(mac.finalize().into_bytes())
			}
			// HMAC takes keys of any length, and `new` refuses empty ones
			Err(_) => String::new(),
		}
	}
}

impl NonceVerifier for HmacNonceVerifier {
	fn verify(&self, token: &str, action: &str) -> bool {
		self.verify_at(token, action, Utc::now())
	}
}

impl std::fmt::Debug for HmacNonceVerifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HmacNonceVerifier")
			.field("secret", &"<redacted>")
			.field("scope", &self.scope)
			.field("lifetime", &self.lifetime)
			.finish()
	}
}

/// Compares SHA-256 digests of both inputs so the length of neither leaks.
fn constant_time_eq(a: &str, b: &str) -> bool {
	let hash_a = Sha256::digest(a.as_bytes());
	let hash_b = Sha256::digest(b.as_bytes());
	hash_a.ct_eq(&hash_b).into()
}
