//! In-memory store for native builds and tests

use super::{CredentialStore, StorageError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store pre-filled with values
	pub fn with_values<I, K, V>(values: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			values: RwLock::new(
				values
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	/// Number of stored keys
	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	/// Whether the store is empty
	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}
}

impl CredentialStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.read().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.values
			.write()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.values.write().remove(key);
		Ok(())
	}

	fn has(&self, key: &str) -> bool {
		self.values.read().contains_key(key)
	}
}
