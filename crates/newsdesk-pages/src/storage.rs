//! Persisted client storage.
//!
//! The navigation guard only needs a key-value view of the browser's
//! `localStorage`, so storage is abstracted behind [`CredentialStore`].
//! [`MemoryStore`] backs native builds and tests; [`LocalStorage`] wraps the
//! real browser storage on `wasm32`.
//!
//! ## Keys
//!
//! | Key | Value | Written by |
//! |-----|-------|------------|
//! | [`USER_KEY`] | opaque serialized user record | login flow ([`AuthSession`]) |
//! | [`RESET_CREATE_POST_FORM_KEY`] | `"true"` | navigation guard |

mod memory;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

use serde::Serialize;
use std::sync::Arc;

/// Key holding the current user record. Presence alone means "logged in".
pub const USER_KEY: &str = "user";

/// Key asking the create-post form to reset on its next load.
pub const RESET_CREATE_POST_FORM_KEY: &str = "resetCreatePostForm";

/// Errors raised by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
	/// The backend cannot be reached (no window, storage disabled, ...).
	#[error("Storage unavailable: {0}")]
	Unavailable(String),
	/// A write or delete was rejected.
	#[error("Failed to write `{key}`: {message}")]
	Write {
		/// Key being written
		key: String,
		/// Backend message
		message: String,
	},
}

/// Injectable key-value store.
///
/// All methods take `&self`; backends use interior mutability the way the
/// browser's `Storage` object does.
pub trait CredentialStore {
	/// Reads a value.
	fn get(&self, key: &str) -> Option<String>;

	/// Writes a value, replacing any previous one.
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

	/// Deletes a value. Deleting a missing key succeeds.
	fn remove(&self, key: &str) -> Result<(), StorageError>;

	/// Whether a value exists.
	fn has(&self, key: &str) -> bool {
		self.get(key).is_some()
	}
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
	fn get(&self, key: &str) -> Option<String> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		(**self).remove(key)
	}

	fn has(&self, key: &str) -> bool {
		(**self).has(key)
	}
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
	fn get(&self, key: &str) -> Option<String> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		(**self).remove(key)
	}

	fn has(&self, key: &str) -> bool {
		(**self).has(key)
	}
}

/// Whether a non-empty user record is stored. The record is never parsed.
pub fn credential_present<S: CredentialStore + ?Sized>(store: &S) -> bool {
	store.get(USER_KEY).is_some_and(|record| !record.is_empty())
}

/// The login/logout side of the `user` key.
///
/// The guard only ever reads [`USER_KEY`]; this type is the flow that
/// writes it.
#[derive(Debug, Clone)]
pub struct AuthSession<S> {
	store: S,
}

impl<S: CredentialStore> AuthSession<S> {
	/// Wraps a store.
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// Stores the user record as JSON.
	pub fn login<U: Serialize + ?Sized>(&self, user: &U) -> Result<(), StorageError> {
		let record = serde_json::to_string(user).map_err(|e| StorageError::Write {
			key: USER_KEY.to_string(),
			message: e.to_string(),
		})?;
		self.store.set(USER_KEY, &record)?;
		tracing::debug!("user record stored");
		Ok(())
	}

	/// Removes the user record.
	pub fn logout(&self) -> Result<(), StorageError> {
		self.store.remove(USER_KEY)?;
		tracing::debug!("user record removed");
		Ok(())
	}

	/// Whether a user record is stored.
	pub fn is_logged_in(&self) -> bool {
		credential_present(&self.store)
	}

	/// The raw stored record, if any.
	pub fn user_record(&self) -> Option<String> {
		self.store.get(USER_KEY)
	}

	/// Returns the wrapped store.
	pub fn store(&self) -> &S {
		&self.store
	}
}
