//! The newsdesk route table and application wiring.
//!
//! [`news_routes`] declares every page of the site. [`NewsApp`] combines it
//! with [`Settings`], a credential store and a [`SearchClient`].

use newsdesk_conf::{Settings, SettingsError};
use newsdesk_pages::router::{
	Navigation, NavigationGuard, Navigator, Props, QueryParams, RouteDefinition, RouteTable,
	RouterError,
};
use newsdesk_pages::search::{SearchClient, SearchError, SearchResults};
use newsdesk_pages::storage::{AuthSession, CredentialStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Route names used by the news site.
pub mod names {
	/// Landing page.
	pub const HOME: &str = "home";
	/// New post form.
	pub const CREATE: &str = "Create";
	/// Edit form for an existing post.
	pub const EDIT: &str = "Edit";
	/// Full article. Requires a logged-in user.
	pub const POST: &str = "Post";
	/// Login page.
	pub const LOGIN: &str = "Login";
	/// Registration page.
	pub const REGISTER: &str = "Register";
	/// Search results page.
	pub const SEARCH: &str = "Search";
}

/// Errors surfaced by [`NewsApp`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	/// Settings could not be loaded.
	#[error(transparent)]
	Settings(#[from] SettingsError),
	/// Routing failed.
	#[error(transparent)]
	Router(#[from] RouterError),
	/// The search request failed.
	#[error(transparent)]
	Search(#[from] SearchError),
}

fn copy_query(query: &QueryParams, keys: &[&str]) -> Props {
	keys.iter()
		.filter_map(|key| {
			query
				.get(key)
				.map(|value| (key.to_string(), Value::String(value.to_string())))
		})
		.collect()
}

/// Props for the login page: `redirect` and `message` from the query.
pub fn login_props(query: &QueryParams) -> Props {
	copy_query(query, &["redirect", "message"])
}

/// Props for the registration page: `redirect` from the query.
pub fn register_props(query: &QueryParams) -> Props {
	copy_query(query, &["redirect"])
}

/// Builds the news site's route table.
///
/// `/` redirects to `home`; only `Post` requires a logged-in user.
pub fn news_routes() -> Result<RouteTable, RouterError> {
	RouteTable::builder()
		.redirect("/", names::HOME)
		.route(RouteDefinition::new(names::HOME, "/home"))
		.route(RouteDefinition::new(names::CREATE, "/create"))
		.route(RouteDefinition::new(names::EDIT, "/edit/:id"))
		.route(RouteDefinition::new(names::POST, "/post/:id").requires_auth())
		.route(RouteDefinition::new(names::LOGIN, "/login").with_props(login_props))
		.route(RouteDefinition::new(names::REGISTER, "/register").with_props(register_props))
		.route(RouteDefinition::new(names::SEARCH, "/search"))
		.build()
}

/// Typed props of the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginProps {
	/// Path to return to after logging in.
	pub redirect: Option<String>,
	/// Prompt shown above the form.
	pub message: Option<String>,
}

impl LoginProps {
	/// Reads the props computed for a `Login` location.
	pub fn from_props(props: &Props) -> Result<Self, serde_json::Error> {
		serde_json::from_value(Value::Object(props.clone()))
	}
}

/// Typed props of the registration page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProps {
	/// Path to return to after registering.
	pub redirect: Option<String>,
}

impl RegisterProps {
	/// Reads the props computed for a `Register` location.
	pub fn from_props(props: &Props) -> Result<Self, serde_json::Error> {
		serde_json::from_value(Value::Object(props.clone()))
	}
}

/// The news front end: navigator, guard and search client built from settings.
#[derive(Debug)]
pub struct NewsApp<S> {
	settings: Settings,
	navigator: Navigator<S>,
	search: SearchClient,
}

impl<S: CredentialStore> NewsApp<S> {
	/// Wires the application.
	///
	/// Fails when `settings.login_route` names no route, or when the API base
	/// URL is rejected by the search client.
	pub fn new(settings: Settings, store: S) -> Result<Self, AppError> {
		let table = news_routes()?;
		if !table.has_route(&settings.login_route) {
			return Err(RouterError::InvalidRouteName(settings.login_route.clone()).into());
		}
		if !table.has_route(&settings.create_post_route) {
			tracing::warn!(
				route = %settings.create_post_route,
				"create-post route is not in the route table; the form reset flag will never be set"
			);
		}

		let guard = NavigationGuard::new(&settings.login_route, &settings.login_message)
			.with_reset_form_route(&settings.create_post_route);
		let timeout = settings.request_timeout_secs.map(Duration::from_secs);
		let search = SearchClient::with_timeout(settings.api_base_url(), timeout)?;

		tracing::debug!(
			api_base_url = %settings.api_base_url(),
			routes = table.len(),
			"news app initialized"
		);

		Ok(Self {
			navigator: Navigator::new(table, guard, store),
			settings,
			search,
		})
	}

	/// Loads settings (defaults, optional TOML file, environment) and wires
	/// the application.
	pub fn from_env(config_file: Option<&std::path::Path>, store: S) -> Result<Self, AppError> {
		let settings = Settings::load(config_file)?;
		Self::new(settings, store)
	}

	/// Active settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// The navigator.
	pub fn navigator(&self) -> &Navigator<S> {
		&self.navigator
	}

	/// The navigator, mutably.
	pub fn navigator_mut(&mut self) -> &mut Navigator<S> {
		&mut self.navigator
	}

	/// The search client.
	pub fn search_client(&self) -> &SearchClient {
		&self.search
	}

	/// Login state backed by the navigator's store.
	pub fn session(&self) -> AuthSession<&S> {
		AuthSession::new(self.navigator.store())
	}

	/// Navigates to `path`, adding a history entry.
	pub fn navigate(&mut self, path: &str) -> Result<Navigation, AppError> {
		Ok(self.navigator.push(path)?)
	}

	/// Searches published news.
	pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
		Ok(self.search.search(query).await?)
	}
}
