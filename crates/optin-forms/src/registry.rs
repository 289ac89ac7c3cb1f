//! Request-scoped form instance cache

use crate::definition::FormDefinitionSource;
use crate::environment::FormEnvironment;
use crate::errors::{FormError, FormResult};
use crate::form::Form;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// Id requesting the site's default form
pub const DEFAULT_FORM_ID: i64 = 0;

/// At most one live [`Form`] per id, for as long as the registry lives
///
/// Create one per request (or per unit of work) and drop it at the end.
///
/// # Examples
///
/// ```
/// use optin_forms::{FormDefinition, FormEnvironment, FormRegistry, InMemoryDefinitions};
///
/// let mut source = InMemoryDefinitions::new();
/// source.insert(FormDefinition::new(12, "Sidebar", ""));
///
/// let mut registry = FormRegistry::new(source, FormEnvironment::new().into_shared());
/// assert_eq!(registry.get(0).unwrap().id(), 12);
/// assert!(registry.get(13).is_err());
/// assert_eq!(registry.len(), 1);
/// ```
pub struct FormRegistry<S: FormDefinitionSource> {
	source: S,
	env: Arc<FormEnvironment>,
	instances: HashMap<i64, Form>,
}

impl<S: FormDefinitionSource> FormRegistry<S> {
	pub fn new(source: S, env: Arc<FormEnvironment>) -> Self {
		Self {
			source,
			env,
			instances: HashMap::new(),
		}
	}

	/// Returns the cached form, loading it on first use.
	///
	/// Id 0 resolves to the source's default form.
	pub fn get(&mut self, id: i64) -> FormResult<&mut Form> {
		let id = if id == DEFAULT_FORM_ID {
			self.source
				.default_form_id()
				.ok_or(FormError::NotFound(DEFAULT_FORM_ID))?
		} else {
			id
		};

		match self.instances.entry(id) {
			Entry::Occupied(entry) => {
				tracing::debug!(form_id = id, "form cache hit");
				Ok(entry.into_mut())
			}
			Entry::Vacant(entry) => {
				tracing::debug!(form_id = id, "form cache miss");
				let definition = self
					.source
					.get_form_definition(id)
					.ok_or(FormError::NotFound(id))?;
				let form = Form::from_definition(definition, Arc::clone(&self.env))?;
				Ok(entry.insert(form))
			}
		}
	}

	pub fn contains(&self, id: i64) -> bool {
		self.instances.contains_key(&id)
	}

	/// Drops the cached instance of `id`
	pub fn forget(&mut self, id: i64) -> Option<Form> {
		self.instances.remove(&id)
	}

	pub fn clear(&mut self) {
		self.instances.clear();
	}

	pub fn len(&self) -> usize {
		self.instances.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub fn environment(&self) -> &Arc<FormEnvironment> {
		&self.env
	}
}
