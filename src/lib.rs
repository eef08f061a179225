//! # newsdesk
//!
//! Client-side front end for the newsdesk news site.
//!
//! This crate is a facade over the workspace crates plus the concrete
//! application wiring:
//!
//! - [`conf`]: layered settings (`newsdesk-conf`)
//! - [`pages`]: router, navigation guard, credential store and search client
//!   (`newsdesk-pages`)
//! - [`app`]: the news route table and [`app::NewsApp`]
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use newsdesk::prelude::*;
//!
//! let settings = Settings::load(None)?;
//! let mut app = NewsApp::new(settings, MemoryStore::new())?;
//!
//! let navigation = app.navigate("/post/42?x=1")?;
//! assert_eq!(navigation.location.route_name, "Login");
//!
//! let results = app.search("rust").await?;
//! ```

pub mod app;

pub use newsdesk_conf as conf;
pub use newsdesk_pages as pages;

pub use app::{AppError, LoginProps, NewsApp, RegisterProps, news_routes};

/// Common imports for applications built on newsdesk.
pub mod prelude {
	pub use crate::app::{AppError, LoginProps, NewsApp, RegisterProps, news_routes};
	pub use newsdesk_conf::{Settings, SettingsBuilder, SettingsError};
	pub use newsdesk_pages::{
		AuthSession, Author, Category, CredentialStore, Decision, Location, MemoryStore,
		Navigation, NavigationGuard, Navigator, Post, RouteTable, RouterError, SearchClient,
		SearchError, SearchResults,
	};
}
