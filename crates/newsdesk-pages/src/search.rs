//! News search client.
//!
//! One read-only request per call:
//!
//! ```text
//! GET {base_url}/news/search?query={percent-encoded query}
//! ```
//!
//! Ambient session credentials are included: a cookie jar on native
//! targets, `credentials: "include"` on wasm32. There is no retry,
//! pagination or caching. Failures are logged here and returned to the
//! caller, which decides how to present them.

use crate::models::Post;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Path of the search endpoint relative to the API base URL.
pub const SEARCH_PATH: &str = "/news/search";

/// Same set as `encodeURIComponent`: alphanumerics and `-_.!~*'()` pass through.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Posts returned by the search endpoint.
pub type SearchResults = Vec<Post>;

/// Errors raised by [`SearchClient`].
///
/// Every variant except [`SearchError::InvalidBaseUrl`] is a failed search
/// (see [`SearchError::is_search_failed`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
	/// The configured base URL is not an absolute http(s) URL.
	#[error("Invalid search base URL: {0}")]
	InvalidBaseUrl(String),
	/// The request could not complete (connection refused, timeout, ...).
	#[error("Search failed: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("Search failed: HTTP {status}")]
	Status {
		/// HTTP status code
		status: u16,
	},
	/// The response body was not the expected JSON.
	#[error("Search failed: invalid response body: {0}")]
	Decode(String),
}

impl SearchError {
	/// Whether this error is a failed search call.
	pub fn is_search_failed(&self) -> bool {
		!matches!(self, Self::InvalidBaseUrl(_))
	}

	/// HTTP status of a [`SearchError::Status`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status } => Some(*status),
			_ => None,
		}
	}
}

/// HTTP client for the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
	http: reqwest::Client,
	base_url: String,
}

impl SearchClient {
	/// Creates a client for `base_url` (trailing slashes are ignored).
	pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
		Self::with_timeout(base_url, None)
	}

	/// Creates a client with an optional request timeout.
	///
	/// The timeout is ignored on wasm32, where the browser owns it.
	pub fn with_timeout(
		base_url: impl Into<String>,
		timeout: Option<Duration>,
	) -> Result<Self, SearchError> {
		let base_url = base_url.into();
		let parsed = reqwest::Url::parse(&base_url)
			.map_err(|e| SearchError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(SearchError::InvalidBaseUrl(base_url));
		}

		let http = build_http_client(timeout)?;

		Ok(Self {
			http,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	/// Base URL without trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// URL requested for `query`.
	pub fn search_url(&self, query: &str) -> String {
		format!(
			"{}{}?query={}",
			self.base_url,
			SEARCH_PATH,
			utf8_percent_encode(query, QUERY_COMPONENT)
		)
	}

	/// Searches posts.
	pub async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
		self.search_as(query).await
	}

	/// Searches and decodes the body into any JSON shape.
	pub async fn search_as<T: DeserializeOwned>(&self, query: &str) -> Result<T, SearchError> {
		match self.fetch(query).await {
			Ok(results) => Ok(results),
			Err(e) => {
				tracing::error!(error = %e, query, "Search error");
				Err(e)
			}
		}
	}

	async fn fetch<T: DeserializeOwned>(&self, query: &str) -> Result<T, SearchError> {
		let url = self.search_url(query);
		tracing::debug!(%url, "sending search request");

		let response = with_credentials(self.http.get(&url))
			.send()
			.await
			.map_err(|e| SearchError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(SearchError::Status {
				status: status.as_u16(),
			});
		}

		response
			.json::<T>()
			.await
			.map_err(|e| SearchError::Decode(e.to_string()))
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, SearchError> {
	let mut builder = reqwest::Client::builder().cookie_store(true);
	if let Some(timeout) = timeout {
		builder = builder.timeout(timeout);
	}
	builder
		.build()
		.map_err(|e| SearchError::Network(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_timeout: Option<Duration>) -> Result<reqwest::Client, SearchError> {
	reqwest::Client::builder()
		.build()
		.map_err(|e| SearchError::Network(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
	request
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
	request.fetch_credentials_include()
}
