//! Collaborators shared by every form of a site

use crate::hooks::FormHooks;
use crate::reserved::MIN_FILL_SECONDS;
use optin_conf::FormDefaults;
use optin_validators::{DenyAllNonces, NonceVerifier};
use std::fmt;
use std::sync::Arc;

/// Hooks, defaults and the anti-forgery service forms are built with
///
/// Without a verifier every token is rejected, so submissions fail the
/// anti-abuse pass until one is configured.
///
/// # Examples
///
/// ```
/// use optin_forms::FormEnvironment;
/// use optin_validators::HmacNonceVerifier;
///
/// let verifier = HmacNonceVerifier::new(b"site-secret", "visitor-1").unwrap();
/// let env = FormEnvironment::new()
///     .with_nonce_verifier(verifier)
///     .with_min_fill_seconds(5);
///
/// assert_eq!(env.min_fill_seconds(), 5);
/// ```
pub struct FormEnvironment {
	pub hooks: FormHooks,
	pub defaults: FormDefaults,
	nonce_verifier: Arc<dyn NonceVerifier>,
	min_fill_seconds: i64,
}

impl FormEnvironment {
	pub fn new() -> Self {
		Self {
			hooks: FormHooks::new(),
			defaults: FormDefaults::default(),
			nonce_verifier: Arc::new(DenyAllNonces),
			min_fill_seconds: MIN_FILL_SECONDS,
		}
	}

	pub fn with_hooks(mut self, hooks: FormHooks) -> Self {
		self.hooks = hooks;
		self
	}

	pub fn with_defaults(mut self, defaults: FormDefaults) -> Self {
		self.defaults = defaults;
		self
	}

	pub fn with_nonce_verifier(mut self, verifier: impl NonceVerifier + 'static) -> Self {
		self.nonce_verifier = Arc::new(verifier);
		self
	}

	pub fn with_shared_nonce_verifier(mut self, verifier: Arc<dyn NonceVerifier>) -> Self {
		self.nonce_verifier = verifier;
		self
	}

	/// Minimum seconds between render and submit. Negative values count as zero.
	pub fn with_min_fill_seconds(mut self, seconds: i64) -> Self {
		self.min_fill_seconds = seconds.max(0);
		self
	}

	pub fn nonce_verifier(&self) -> &dyn NonceVerifier {
		self.nonce_verifier.as_ref()
	}

	pub fn min_fill_seconds(&self) -> i64 {
		self.min_fill_seconds
	}

	pub fn into_shared(self) -> Arc<Self> {
		Arc::new(self)
	}
}

impl Default for FormEnvironment {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for FormEnvironment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormEnvironment")
			.field("hooks", &self.hooks)
			.field("defaults", &self.defaults)
			.field("min_fill_seconds", &self.min_fill_seconds)
			.finish_non_exhaustive()
	}
}
