//! Route table and path resolution.
//!
//! The table is an immutable, ordered list of tagged [`RouteRecord`]s built
//! once at startup. Resolution walks the list and the first matching record
//! wins.

use super::pattern::PathPattern;
use super::query::{QueryParams, join_full_path, split_full_path};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Props handed to a view, derived from the query string.
pub type Props = Map<String, Value>;

/// Maps query parameters to view props.
pub type PropsMapper = fn(&QueryParams) -> Props;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// Route not found.
	#[error("Route not found: {0}")]
	NotFound(String),
	/// Invalid route name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// Two routes share a name.
	#[error("Duplicate route name: {0}")]
	DuplicateRouteName(String),
	/// Navigation kept redirecting.
	#[error("Too many redirects while navigating to {0}")]
	RedirectLoop(String),
	/// A redirect query string could not be encoded.
	#[error("Failed to encode query string: {0}")]
	QueryEncoding(String),
}

/// A named navigation target.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
	pattern: PathPattern,
	name: String,
	requires_auth: bool,
	props: Option<PropsMapper>,
}

impl RouteDefinition {
	/// Creates a public route without props.
	pub fn new(name: impl Into<String>, pattern: &str) -> Self {
		Self {
			pattern: PathPattern::new(pattern),
			name: name.into(),
			requires_auth: false,
			props: None,
		}
	}

	/// Marks the route as requiring a logged-in user.
	pub fn requires_auth(mut self) -> Self {
		self.requires_auth = true;
		self
	}

	/// Attaches a query-to-props mapper.
	pub fn with_props(mut self, mapper: PropsMapper) -> Self {
		self.props = Some(mapper);
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Whether entering this route needs a credential.
	pub fn is_protected(&self) -> bool {
		self.requires_auth
	}

	/// Whether a props mapper is attached.
	pub fn has_props(&self) -> bool {
		self.props.is_some()
	}

	/// Props for the given query; empty when the route has no mapper.
	pub fn props_for(&self, query: &QueryParams) -> Props {
		self.props.map(|mapper| mapper(query)).unwrap_or_default()
	}
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub enum RouteRecord {
	/// A route rendering a view.
	View(RouteDefinition),
	/// Sends matching paths to the named route.
	Redirect {
		/// Pattern the redirect applies to.
		pattern: PathPattern,
		/// Target route name.
		to: String,
	},
}

impl RouteRecord {
	/// Creates a redirect record.
	pub fn redirect(pattern: &str, to: impl Into<String>) -> Self {
		Self::Redirect {
			pattern: PathPattern::new(pattern),
			to: to.into(),
		}
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		match self {
			Self::View(route) => route.pattern(),
			Self::Redirect { pattern, .. } => pattern,
		}
	}
}

impl From<RouteDefinition> for RouteRecord {
	fn from(route: RouteDefinition) -> Self {
		Self::View(route)
	}
}

/// A resolved path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub route: RouteDefinition,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
	/// Parsed query string.
	pub query: QueryParams,
	/// Final path including query and fragment.
	pub full_path: String,
	/// Requested full path when a redirect record was followed.
	pub redirected_from: Option<String>,
}

/// Immutable ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
	records: Vec<RouteRecord>,
	named_routes: HashMap<String, usize>,
}

impl RouteTable {
	/// Starts a table.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Builds a table from records.
	///
	/// Rejects duplicate names and redirects to unknown routes.
	pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouterError> {
		let mut named_routes = HashMap::new();
		for (index, record) in records.iter().enumerate() {
			if let RouteRecord::View(route) = record
				&& named_routes.insert(route.name().to_string(), index).is_some()
			{
				return Err(RouterError::DuplicateRouteName(route.name().to_string()));
			}
		}

		for record in &records {
			if let RouteRecord::Redirect { to, .. } = record
				&& !named_routes.contains_key(to)
			{
				return Err(RouterError::InvalidRouteName(to.clone()));
			}
		}

		Ok(Self {
			records,
			named_routes,
		})
	}

	/// Resolves a full path (query and fragment allowed) to a route.
	pub fn resolve(&self, full_path: &str) -> Result<RouteMatch, RouterError> {
		let parts = split_full_path(full_path);

		let (record, params) = self
			.records
			.iter()
			.find_map(|record| record.pattern().matches(parts.path).map(|p| (record, p)))
			.ok_or_else(|| RouterError::NotFound(parts.path.to_string()))?;

		let query = QueryParams::parse(parts.query);

		match record {
			RouteRecord::View(route) => Ok(RouteMatch {
				route: route.clone(),
				params,
				query,
				full_path: full_path.to_string(),
				redirected_from: None,
			}),
			RouteRecord::Redirect { to, .. } => {
				let route = self
					.get(to)
					.ok_or_else(|| RouterError::InvalidRouteName(to.clone()))?;
				let path = route
					.pattern()
					.reverse(&params)
					.map_err(RouterError::MissingParameter)?;
				let params = route.pattern().matches(&path).unwrap_or_default();

				tracing::debug!(from = %full_path, to = %route.name(), "following route redirect");

				Ok(RouteMatch {
					route: route.clone(),
					params,
					query,
					full_path: join_full_path(&path, parts.query, parts.fragment),
					redirected_from: Some(full_path.to_string()),
				})
			}
		}
	}

	/// Generates a URL by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let route = self
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		route
			.pattern()
			.reverse(&params_map)
			.map_err(RouterError::MissingParameter)
	}

	/// Looks up a route by name.
	pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
		let index = self.named_routes.get(name)?;
		match &self.records[*index] {
			RouteRecord::View(route) => Some(route),
			RouteRecord::Redirect { .. } => None,
		}
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Iterates over the named routes in table order.
	pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
		self.records.iter().filter_map(|record| match record {
			RouteRecord::View(route) => Some(route),
			RouteRecord::Redirect { .. } => None,
		})
	}

	/// Returns the number of records, redirects included.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether the table has no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Fluent construction of a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
	records: Vec<RouteRecord>,
}

impl RouteTableBuilder {
	/// Appends a view route.
	pub fn route(mut self, route: RouteDefinition) -> Self {
		self.records.push(RouteRecord::View(route));
		self
	}

	/// Appends a redirect from `pattern` to the route named `to`.
	pub fn redirect(mut self, pattern: &str, to: impl Into<String>) -> Self {
		self.records.push(RouteRecord::redirect(pattern, to));
		self
	}

	/// Finishes the table.
	pub fn build(self) -> Result<RouteTable, RouterError> {
		RouteTable::new(self.records)
	}
}
