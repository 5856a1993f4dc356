//! Type-keyed storage attached to every request.
//!
//! Middleware uses it to hand values (application context, verified
//! identity) to downstream handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type Slot = Box<dyn Any + Send + Sync>;

/// Per-request values keyed by their type
///
/// Clones share the same storage, so a value inserted by middleware is
/// visible to every later holder of the request.
#[derive(Clone, Default)]
pub struct Extensions {
	slots: Arc<RwLock<HashMap<TypeId, Slot>>>,
}

impl Extensions {
	/// # Examples
	///
	/// ```
	/// use folio_http::Extensions;
	///
	/// let extensions = Extensions::new();
	/// assert_eq!(extensions.get::<String>(), None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `value`, replacing a previous value of the same type
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Extensions;
	///
	/// let extensions = Extensions::new();
	/// extensions.insert(7u32);
	/// extensions.insert(8u32);
	/// assert_eq!(extensions.get::<u32>(), Some(8));
	/// ```
	pub fn insert<T: Send + Sync + 'static>(&self, value: T) {
		let mut slots = self
			.slots
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		slots.insert(TypeId::of::<T>(), Box::new(value));
	}

	/// A clone of the stored `T`, if any
	pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
		let slots = self
			.slots
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		slots.get(&TypeId::of::<T>())?.downcast_ref::<T>().cloned()
	}
}

impl std::fmt::Debug for Extensions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Extensions").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Clone, Debug, PartialEq)]
	struct Context(&'static str);

	#[rstest]
	fn test_values_are_keyed_by_type() {
		let extensions = Extensions::new();
		extensions.insert(Context("app"));
		extensions.insert(String::from("user"));

		assert_eq!(extensions.get::<Context>(), Some(Context("app")));
		assert_eq!(extensions.get::<String>().as_deref(), Some("user"));
		assert_eq!(extensions.get::<u64>(), None);
	}

	#[rstest]
	fn test_clones_share_storage() {
		let extensions = Extensions::new();
		let handed_down = extensions.clone();

		handed_down.insert(Arc::new(5usize));

		assert_eq!(extensions.get::<Arc<usize>>().as_deref(), Some(&5));
	}
}
