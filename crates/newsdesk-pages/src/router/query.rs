//! Query strings and full-path splitting.

use serde::Serialize;

/// Ordered query parameters. Repeated keys are kept; [`QueryParams::get`]
/// returns the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams {
	pairs: Vec<(String, String)>,
}

impl QueryParams {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses `a=1&b=two` (a leading `?` is accepted).
	///
	/// Malformed input yields an empty set rather than an error; the query
	/// string never decides whether a route matches.
	pub fn parse(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		if query.is_empty() {
			return Self::default();
		}

		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => Self { pairs },
			Err(e) => {
				tracing::warn!(query, error = %e, "ignoring malformed query string");
				Self::default()
			}
		}
	}

	/// First value for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Every value for `key`, in order.
	pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.pairs
			.iter()
			.filter(move |(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Appends a pair.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.pairs.push((key.into(), value.into()));
	}

	/// Iterates over all pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Number of pairs.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Whether there are no pairs.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Encodes back to `a=1&b=two` (no leading `?`).
	pub fn to_query_string(&self) -> String {
		serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
	}
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			pairs: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// The three parts of a full path: `/post/42?x=1#top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParts<'a> {
	/// `/post/42`
	pub path: &'a str,
	/// `x=1`
	pub query: &'a str,
	/// `top`
	pub fragment: &'a str,
}

/// Splits a full path into path, query and fragment.
pub fn split_full_path(full_path: &str) -> PathParts<'_> {
	let (rest, fragment) = full_path.split_once('#').unwrap_or((full_path, ""));
	let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
	PathParts {
		path,
		query,
		fragment,
	}
}

/// Joins path, query and fragment, omitting empty parts.
pub fn join_full_path(path: &str, query: &str, fragment: &str) -> String {
	let mut full = path.to_string();
	if !query.is_empty() {
		full.push('?');
		full.push_str(query);
	}
	if !fragment.is_empty() {
		full.push('#');
		full.push_str(fragment);
	}
	full
}
