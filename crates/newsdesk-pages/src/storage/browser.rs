//! Browser `localStorage` backend (wasm32 only).

use super::{CredentialStore, StorageError};
use web_sys::Storage;

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	storage: Storage,
}

impl LocalStorage {
	/// Opens the current window's local storage.
	pub fn new() -> Result<Self, StorageError> {
		let window =
			web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
		let storage = window
			.local_storage()
			.map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
			.ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
		Ok(Self { storage })
	}
}

impl CredentialStore for LocalStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.storage
			.set_item(key, value)
			.map_err(|e| StorageError::Write {
				key: key.to_string(),
				message: format!("{:?}", e),
			})
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.storage
			.remove_item(key)
			.map_err(|e| StorageError::Write {
				key: key.to_string(),
				message: format!("{:?}", e),
			})
	}
}
