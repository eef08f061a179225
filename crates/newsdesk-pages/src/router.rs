//! Client-side routing.
//!
//! - [`RouteTable`]: immutable ordered list of [`RouteRecord`]s with
//!   `:param` patterns, name lookups and reverse URLs
//! - [`NavigationGuard`]: before-each hook gating protected routes on
//!   credential presence
//! - [`Navigator`]: resolve, guard and commit to history
//!
//! ## Example
//!
//! ```ignore
//! use newsdesk_pages::router::{NavigationGuard, Navigator, RouteDefinition, RouteTable};
//! use newsdesk_pages::storage::MemoryStore;
//!
//! let table = RouteTable::builder()
//!     .redirect("/", "home")
//!     .route(RouteDefinition::new("home", "/home"))
//!     .route(RouteDefinition::new("Post", "/post/:id").requires_auth())
//!     .route(RouteDefinition::new("Login", "/login"))
//!     .build()?;
//!
//! let guard = NavigationGuard::new("Login", "Please log in to view full articles");
//! let mut navigator = Navigator::new(table, guard, MemoryStore::new());
//! let nav = navigator.push("/post/42")?;
//! assert_eq!(nav.location.route_name, "Login");
//! ```

mod core;
mod guard;
mod navigator;
mod pattern;
mod query;

pub use self::core::{
	Props, PropsMapper, RouteDefinition, RouteMatch, RouteRecord, RouteTable, RouteTableBuilder,
	RouterError,
};
pub use guard::{Decision, NavigationGuard, NavigationRequest};
pub use navigator::{Location, MAX_REDIRECTS, Navigation, Navigator};
pub use pattern::PathPattern;
pub use query::{PathParts, QueryParams, join_full_path, split_full_path};
