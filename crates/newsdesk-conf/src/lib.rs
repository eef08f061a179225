//! # Settings Module
//!
//! Layered configuration for newsdesk front ends.
//!
//! Settings are assembled from an ordered list of [`sources::ConfigSource`]s.
//! Each source yields a flat key/value map and later sources override earlier
//! ones, so the usual stack is:
//!
//! 1. [`sources::DefaultSource`]: compiled-in defaults
//! 2. [`sources::TomlFileSource`]: an optional `newsdesk.toml`
//! 3. [`sources::EnvSource`]: `NEWSDESK_*` environment variables
//!
//! ## Example
//!
//! ```ignore
//! use newsdesk_conf::builder::SettingsBuilder;
//! use newsdesk_conf::sources::{DefaultSource, EnvSource, TomlFileSource};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(DefaultSource)
//!     .add_source(TomlFileSource::optional("newsdesk.toml"))
//!     .add_source(EnvSource::new("NEWSDESK_"))
//!     .build()?;
//! ```

pub mod builder;
pub mod sources;
pub mod validation;

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

pub use builder::SettingsBuilder;

/// Prompt shown on the login page when a protected route was requested.
pub const DEFAULT_LOGIN_MESSAGE: &str = "Please log in to view full articles";

/// Default base URL of the news API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable prefix read by [`Settings::load`].
pub const ENV_PREFIX: &str = "NEWSDESK_";

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// A settings file could not be read.
	#[error("Failed to read settings file {path}: {source}")]
	Io {
		/// Path of the file that failed to load
		path: String,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},

	/// A source produced data that could not be parsed.
	#[error("Failed to parse settings from {source_name}: {message}")]
	Parse {
		/// Name of the offending source
		source_name: String,
		/// Parser message
		message: String,
	},

	/// The merged settings violate a validation rule.
	#[error("Invalid setting `{key}`: {message}")]
	Invalid {
		/// Setting key
		key: String,
		/// What is wrong with it
		message: String,
	},
}

/// Main settings structure for a newsdesk front end
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Base URL of the news API; search requests go to `{api_base_url}/news/search`
	pub api_base_url: String,

	/// Name of the route unauthenticated users are redirected to
	pub login_route: String,

	/// Prompt passed to the login route alongside the return path
	pub login_message: String,

	/// Name of the route whose form is reset on every visit
	pub create_post_route: String,

	/// Optional timeout applied to outgoing API requests
	#[serde(deserialize_with = "deserialize_optional_secs")]
	pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_string(),
			login_route: "Login".to_string(),
			login_message: DEFAULT_LOGIN_MESSAGE.to_string(),
			create_post_route: "Create".to_string(),
			request_timeout_secs: None,
		}
	}
}

impl Settings {
	/// Loads settings from defaults, an optional TOML file and `NEWSDESK_*`
	/// environment variables, then validates them.
	pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
		let mut builder = SettingsBuilder::new().add_source(sources::DefaultSource);
		if let Some(path) = config_file {
			builder = builder.add_source(sources::TomlFileSource::optional(path));
		}
		builder.add_source(sources::EnvSource::new(ENV_PREFIX)).build()
	}

	/// Base URL without trailing slashes.
	pub fn api_base_url(&self) -> &str {
		self.api_base_url.trim_end_matches('/')
	}
}

/// Environment values always arrive as strings, so the timeout accepts both
/// `30` and `"30"`.
fn deserialize_optional_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Int(u64),
		Text(String),
	}

	match Option::<Raw>::deserialize(deserializer)? {
		None => Ok(None),
		Some(Raw::Int(secs)) => Ok(Some(secs)),
		Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
		Some(Raw::Text(text)) => text
			.trim()
			.parse::<u64>()
			.map(Some)
			.map_err(serde::de::Error::custom),
	}
}
