//! newsdesk Pages - client-side plumbing for the newsdesk front end
//!
//! ## Architecture
//!
//! - [`router`]: route table, navigation guard and navigator
//! - [`storage`]: injectable key-value store standing in for `localStorage`
//! - [`search`]: HTTP client for the news search endpoint
//! - [`models`]: news API types
//!
//! Everything except [`search`] is synchronous. Rendering is left to the
//! view layer; a [`router::Location`] carries the route name, path
//! parameters and props a view needs.
//!
//! ## Logging
//!
//! Events are emitted with `tracing`; installing a subscriber is up to the
//! application.

#![warn(missing_docs)]

pub mod models;
pub mod router;
pub mod search;
pub mod storage;

pub use models::{Author, Category, Post, author_display_name};
pub use router::{
	Decision, Location, Navigation, NavigationGuard, NavigationRequest, Navigator, PathPattern,
	Props, QueryParams, RouteDefinition, RouteMatch, RouteRecord, RouteTable, RouterError,
};
pub use search::{SearchClient, SearchError, SearchResults};
pub use storage::{
	AuthSession, CredentialStore, MemoryStore, RESET_CREATE_POST_FORM_KEY, StorageError, USER_KEY,
	credential_present,
};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
