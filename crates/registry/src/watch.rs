//! Watched-attribute key list.

use indexmap::IndexSet;

use crate::error::RegistryError;

/// Insertion-ordered, duplicate-free set of attribute keys preserved across
/// a switch.
///
/// The key holding an instance's family-membership record must stay on this
/// list for switch memory to work. Removing it is permitted by
/// [`remove_key`](Self::remove_key) like any other key, but doing so is a
/// collaborator configuration error, not something this layer enforces.
#[derive(Debug, Default)]
pub struct AttributeWatchList {
	keys: IndexSet<String>,
}

impl AttributeWatchList {
	/// Creates an empty watch list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a key to the watch list.
	///
	/// A duplicate add returns [`RegistryError::AlreadyWatched`] so the
	/// caller can tell its key collided with another collaborator's, but
	/// the list itself is unchanged and callers may treat the condition as
	/// non-fatal.
	pub fn add_key(&mut self, key: impl Into<String>) -> Result<(), RegistryError> {
		let key = key.into();
		if self.keys.contains(&key) {
			tracing::warn!(
				key = %key,
				"attribute key is already watched; check for a conflicting collaborator key"
			);
			return Err(RegistryError::AlreadyWatched(key));
		}
		tracing::debug!(key = %key, "registered watched attribute key");
		self.keys.insert(key);
		Ok(())
	}

	/// Removes a key from the watch list, preserving the order of the rest.
	pub fn remove_key(&mut self, key: &str) -> Result<(), RegistryError> {
		if self.keys.shift_remove(key) {
			tracing::debug!(key = %key, "removed watched attribute key");
			Ok(())
		} else {
			tracing::warn!(key = %key, "cannot remove attribute key; it is not watched");
			Err(RegistryError::NotWatched(key.to_string()))
		}
	}

	/// Returns true if `key` is watched.
	#[inline]
	pub fn contains(&self, key: &str) -> bool {
		self.keys.contains(key)
	}

	/// Iterates keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	/// Returns the number of watched keys.
	#[inline]
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Returns true if no keys are watched.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}
