//! Navigation guard.
//!
//! Runs before every route transition. The decision depends only on the
//! target route's `requires_auth` flag and whether a user record is present
//! in storage; the record is never validated. Independently of the decision,
//! entering the create-post route raises a "reset the form" flag in storage.
//!
//! The guard is synchronous and never touches the network.

use super::core::{RouteDefinition, RouteTable, RouterError};
use crate::storage::{CredentialStore, RESET_CREATE_POST_FORM_KEY, credential_present};

/// A pending transition.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest<'a> {
	/// Route being entered.
	pub target: &'a RouteDefinition,
	/// Route being left, if any.
	pub origin: Option<&'a RouteDefinition>,
	/// Requested path including query string.
	pub full_path: &'a str,
}

impl<'a> NavigationRequest<'a> {
	/// Creates a request without an origin.
	pub fn new(target: &'a RouteDefinition, full_path: &'a str) -> Self {
		Self {
			target,
			origin: None,
			full_path,
		}
	}

	/// Sets the origin route.
	pub fn with_origin(mut self, origin: Option<&'a RouteDefinition>) -> Self {
		self.origin = origin;
		self
	}
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	/// Enter the target route.
	Allow,
	/// Send the user to the login route and come back afterwards.
	RedirectToLogin {
		/// Full path originally requested.
		return_path: String,
		/// Prompt shown by the login view.
		message: String,
	},
}

impl Decision {
	/// Whether the transition may proceed.
	pub fn is_allowed(&self) -> bool {
		matches!(self, Self::Allow)
	}

	/// Path of the login redirect, e.g.
	/// `/login?redirect=%2Fpost%2F42&message=Please+log+in`.
	///
	/// Returns `None` for [`Decision::Allow`].
	pub fn login_location(
		&self,
		table: &RouteTable,
		login_route: &str,
	) -> Result<Option<String>, RouterError> {
		match self {
			Self::Allow => Ok(None),
			Self::RedirectToLogin {
				return_path,
				message,
			} => {
				let path = table.reverse(login_route, &[])?;
				let query = serde_urlencoded::to_string([
					("redirect", return_path.as_str()),
					("message", message.as_str()),
				])
				.map_err(|e| RouterError::QueryEncoding(e.to_string()))?;
				Ok(Some(format!("{}?{}", path, query)))
			}
		}
	}
}

/// Decides whether a route may be entered.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
	login_route: String,
	login_message: String,
	reset_form_route: Option<String>,
}

impl NavigationGuard {
	/// Creates a guard redirecting to `login_route` with `login_message`.
	pub fn new(login_route: impl Into<String>, login_message: impl Into<String>) -> Self {
		Self {
			login_route: login_route.into(),
			login_message: login_message.into(),
			reset_form_route: None,
		}
	}

	/// Names the route whose visits raise the form-reset flag.
	pub fn with_reset_form_route(mut self, route_name: impl Into<String>) -> Self {
		self.reset_form_route = Some(route_name.into());
		self
	}

	/// Name of the login route.
	pub fn login_route(&self) -> &str {
		&self.login_route
	}

	/// Prompt attached to login redirects.
	pub fn login_message(&self) -> &str {
		&self.login_message
	}

	/// Name of the route whose visits raise the form-reset flag.
	pub fn reset_form_route(&self) -> Option<&str> {
		self.reset_form_route.as_deref()
	}

	/// Pure decision for a request.
	pub fn authorize(&self, request: &NavigationRequest<'_>, credential_present: bool) -> Decision {
		if !request.target.is_protected() || credential_present {
			return Decision::Allow;
		}

		Decision::RedirectToLogin {
			return_path: request.full_path.to_string(),
			message: self.login_message.clone(),
		}
	}

	/// Whether entering the target raises the form-reset flag.
	pub fn resets_form(&self, request: &NavigationRequest<'_>) -> bool {
		self.reset_form_route.as_deref() == Some(request.target.name())
	}

	/// Full before-each hook: reads credential presence from `store`,
	/// decides, and records the form-reset flag when applicable.
	///
	/// A failed flag write is logged and does not change the decision.
	pub fn before_each<S>(&self, request: &NavigationRequest<'_>, store: &S) -> Decision
	where
		S: CredentialStore + ?Sized,
	{
		let decision = self.authorize(request, credential_present(store));

		if self.resets_form(request)
			&& let Err(e) = store.set(RESET_CREATE_POST_FORM_KEY, "true")
		{
			tracing::warn!(error = %e, route = %request.target.name(), "could not raise form reset flag");
		}

		tracing::debug!(
			target_route = %request.target.name(),
			origin_route = ?request.origin.map(|r| r.name()),
			path = %request.full_path,
			allowed = decision.is_allowed(),
			"navigation guard evaluated"
		);

		decision
	}
}
