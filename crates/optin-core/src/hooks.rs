//! Synchronous extension hooks
//!
//! A [`Filter`] is a named extension point holding an ordered list of
//! callbacks. Applying the filter threads a value through every callback in
//! priority order; each callback receives the value produced by the previous
//! one together with a read-only context (usually the form being processed).
//!
//! A filter with no callbacks is the identity transform. A callback that
//! returns an error aborts the chain and the error propagates to the caller
//! wrapped in a [`HookError`] naming the extension point.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Priority used by [`Filter::add`]. Lower priorities run first.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Result type for hook application
pub type HookResult<T> = Result<T, HookError>;

/// Failure raised by a registered callback
#[derive(Debug, thiserror::Error)]
#[error("extension hook '{hook}' failed: {source}")]
pub struct HookError {
	/// Name of the extension point whose callback failed
	pub hook: String,
	#[source]
	pub source: anyhow::Error,
}

impl HookError {
	pub fn new(hook: impl Into<String>, source: anyhow::Error) -> Self {
		Self {
			hook: hook.into(),
			source,
		}
	}
}

struct Registration<T, C: ?Sized> {
	priority: i32,
	callback: Arc<dyn Fn(T, &C) -> anyhow::Result<T> + Send + Sync>,
}

impl<T, C: ?Sized> Clone for Registration<T, C> {
	fn clone(&self) -> Self {
		Self {
			priority: self.priority,
			callback: Arc::clone(&self.callback),
		}
	}
}

/// Named, ordered chain of value-transforming callbacks
///
/// `T` is the value being filtered and `C` the context handed to every
/// callback alongside it.
///
/// # Examples
///
/// ```
/// use optin_core::Filter;
///
/// let errors: Filter<Vec<String>> = Filter::new("form_errors");
/// errors.add(|mut codes, _| {
///     codes.retain(|c| c != "spam");
///     Ok(codes)
/// });
///
/// let filtered = errors.apply(vec!["spam".to_string(), "error".to_string()], &()).unwrap();
/// assert_eq!(filtered, vec!["error".to_string()]);
/// ```
pub struct Filter<T, C: ?Sized = ()> {
	name: &'static str,
	callbacks: RwLock<Vec<Registration<T, C>>>,
}

impl<T, C: ?Sized> Filter<T, C> {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			callbacks: RwLock::new(Vec::new()),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Registers a callback at [`DEFAULT_PRIORITY`]
	pub fn add<F>(&self, callback: F)
	where
		F: Fn(T, &C) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		self.add_with_priority(DEFAULT_PRIORITY, callback);
	}

	/// Registers a callback at the given priority
	///
	/// Callbacks sharing a priority run in registration order.
	///
	/// # Examples
	///
	/// ```
	/// use optin_core::Filter;
	///
	/// let filter: Filter<String> = Filter::new("greeting");
	/// filter.add_with_priority(20, |s, _| Ok(format!("{s}!")));
	/// filter.add_with_priority(5, |s, _| Ok(format!("hello {s}")));
	///
	/// assert_eq!(filter.apply("world".to_string(), &()).unwrap(), "hello world!");
	/// ```
	pub fn add_with_priority<F>(&self, priority: i32, callback: F)
	where
		F: Fn(T, &C) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		let mut callbacks = self.callbacks.write();
		// Insert after every registration with priority <= the new one
		let position = callbacks
			.iter()
			.position(|r| r.priority > priority)
			.unwrap_or(callbacks.len());
		callbacks.insert(
			position,
			Registration {
				priority,
				callback: Arc::new(callback),
			},
		);
	}

	/// Threads `value` through every registered callback
	pub fn apply(&self, value: T, context: &C) -> HookResult<T> {
		// Snapshot so callbacks may register further callbacks
		let callbacks: Vec<Registration<T, C>> = self.callbacks.read().clone();
		if callbacks.is_empty() {
			return Ok(value);
		}

		tracing::trace!(hook = self.name, callbacks = callbacks.len(), "applying filter");

		let mut value = value;
		for registration in callbacks {
			value = (registration.callback)(value, context)
				.map_err(|source| HookError::new(self.name, source))?;
		}
		Ok(value)
	}

	pub fn has_callbacks(&self) -> bool {
		!self.callbacks.read().is_empty()
	}

	pub fn len(&self) -> usize {
		self.callbacks.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.read().is_empty()
	}

	/// Removes every registered callback
	pub fn clear(&self) {
		self.callbacks.write().clear();
	}
}

impl<T, C: ?Sized> fmt::Debug for Filter<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Filter")
			.field("name", &self.name)
			.field("callbacks", &self.len())
			.finish()
	}
}
