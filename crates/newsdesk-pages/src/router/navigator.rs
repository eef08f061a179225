//! Navigation: resolve, guard, commit.
//!
//! [`Navigator`] owns the route table, the guard, the store and an in-memory
//! history stack. It is the synchronous core behind `pushState`-style
//! navigation; a browser shell only needs to mirror
//! [`Location::full_path`] into the address bar.

use super::core::{Props, RouteMatch, RouteTable, RouterError};
use super::guard::{Decision, NavigationGuard, NavigationRequest};
use super::query::QueryParams;
use crate::storage::CredentialStore;
use std::collections::HashMap;

/// Upper bound on guard redirects followed by one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// A committed navigation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
	/// Path with query and fragment.
	pub full_path: String,
	/// Name of the route entered.
	pub route_name: String,
	/// Path parameters.
	pub params: HashMap<String, String>,
	/// Query parameters.
	pub query: QueryParams,
	/// View props derived from the query.
	pub props: Props,
}

impl Location {
	fn from_match(matched: &RouteMatch) -> Self {
		Self {
			full_path: matched.full_path.clone(),
			route_name: matched.route.name().to_string(),
			params: matched.params.clone(),
			query: matched.query.clone(),
			props: matched.route.props_for(&matched.query),
		}
	}

	/// A single path parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// Result of [`Navigator::push`] and [`Navigator::replace`].
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
	/// Where the user ended up.
	pub location: Location,
	/// Guard decision for the route originally requested.
	pub decision: Decision,
	/// Requested path when a redirect (table or guard) was followed.
	pub redirected_from: Option<String>,
}

impl Navigation {
	/// Whether the requested route was entered without a guard redirect.
	pub fn is_allowed(&self) -> bool {
		self.decision.is_allowed()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationType {
	Push,
	Replace,
}

/// Client-side navigator.
#[derive(Debug)]
pub struct Navigator<S> {
	table: RouteTable,
	guard: NavigationGuard,
	store: S,
	history: Vec<Location>,
}

impl<S: CredentialStore> Navigator<S> {
	/// Creates a navigator with empty history.
	pub fn new(table: RouteTable, guard: NavigationGuard, store: S) -> Self {
		Self {
			table,
			guard,
			store,
			history: Vec::new(),
		}
	}

	/// The route table.
	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	/// The guard.
	pub fn guard(&self) -> &NavigationGuard {
		&self.guard
	}

	/// The store consulted by the guard.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// Current location, if any navigation has been committed.
	pub fn current(&self) -> Option<&Location> {
		self.history.last()
	}

	/// Committed locations, oldest first.
	pub fn history(&self) -> &[Location] {
		&self.history
	}

	/// Navigates to a path, adding a history entry.
	pub fn push(&mut self, path: &str) -> Result<Navigation, RouterError> {
		self.navigate(path, NavigationType::Push)
	}

	/// Navigates to a path, replacing the current history entry.
	pub fn replace(&mut self, path: &str) -> Result<Navigation, RouterError> {
		self.navigate(path, NavigationType::Replace)
	}

	/// Drops the current entry and returns the previous one.
	///
	/// The guard is not re-run for history traversal.
	pub fn back(&mut self) -> Option<&Location> {
		if self.history.len() < 2 {
			return None;
		}
		self.history.pop();
		self.history.last()
	}

	/// Resolves `path` and runs the guard, following login redirects, without
	/// touching history.
	///
	/// This is a real navigation attempt as far as the guard is concerned:
	/// entering the create-post route writes the form-reset flag to the store.
	pub fn resolve_guarded(&self, path: &str) -> Result<Navigation, RouterError> {
		let mut path = path.to_string();
		let mut first_decision = None;
		let mut redirected_from = None;

		for _ in 0..=MAX_REDIRECTS {
			let matched = self.table.resolve(&path)?;
			if redirected_from.is_none() {
				redirected_from = matched.redirected_from.clone();
			}

			let origin = self
				.current()
				.and_then(|location| self.table.get(&location.route_name));
			let request = NavigationRequest::new(&matched.route, &matched.full_path).with_origin(origin);
			let decision = self.guard.before_each(&request, &self.store);

			let next = decision.login_location(&self.table, self.guard.login_route())?;
			let decision = first_decision.get_or_insert(decision).clone();

			match next {
				None => {
					return Ok(Navigation {
						location: Location::from_match(&matched),
						decision,
						redirected_from,
					});
				}
				Some(login_path) => {
					tracing::debug!(from = %matched.full_path, to = %login_path, "redirecting to login");
					if redirected_from.is_none() {
						redirected_from = Some(matched.full_path.clone());
					}
					path = login_path;
				}
			}
		}

		Err(RouterError::RedirectLoop(path))
	}

	fn navigate(&mut self, path: &str, nav_type: NavigationType) -> Result<Navigation, RouterError> {
		let navigation = self.resolve_guarded(path)?;

		match nav_type {
			NavigationType::Push => self.history.push(navigation.location.clone()),
			NavigationType::Replace => {
				self.history.pop();
				self.history.push(navigation.location.clone());
			}
		}

		tracing::debug!(
			path = %navigation.location.full_path,
			route = %navigation.location.route_name,
			replace = nav_type == NavigationType::Replace,
			"navigation committed"
		);

		Ok(navigation)
	}
}
