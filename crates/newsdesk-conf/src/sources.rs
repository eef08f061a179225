//! Configuration sources.
//!
//! Every source produces a flat map of setting keys to JSON values. The
//! builder merges them in insertion order.

use crate::{Settings, SettingsError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Flat key/value map produced by a source.
pub type SourceMap = Map<String, Value>;

/// A provider of setting values.
pub trait ConfigSource {
	/// Loads this source's values.
	fn load(&self) -> Result<SourceMap, SettingsError>;

	/// Short name used in logs and error messages.
	fn name(&self) -> String;
}

/// Compiled-in defaults from [`Settings::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<SourceMap, SettingsError> {
		match serde_json::to_value(Settings::default()) {
			Ok(Value::Object(map)) => Ok(map),
			Ok(_) => Ok(Map::new()),
			Err(e) => Err(SettingsError::Parse {
				source_name: self.name(),
				message: e.to_string(),
			}),
		}
	}

	fn name(&self) -> String {
		"defaults".to_string()
	}
}

/// Top-level keys of a TOML file.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// A file that must exist.
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			required: true,
		}
	}

	/// A file that is skipped when absent.
	pub fn optional(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			required: false,
		}
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<SourceMap, SettingsError> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional settings file not found");
			return Ok(Map::new());
		}

		let content = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
			path: self.path.display().to_string(),
			source,
		})?;

		let table: toml::Table = toml::from_str(&content).map_err(|e| SettingsError::Parse {
			source_name: self.name(),
			message: e.to_string(),
		})?;

		match serde_json::to_value(table) {
			Ok(Value::Object(map)) => Ok(map),
			Ok(_) => Ok(Map::new()),
			Err(e) => Err(SettingsError::Parse {
				source_name: self.name(),
				message: e.to_string(),
			}),
		}
	}

	fn name(&self) -> String {
		format!("toml:{}", self.path.display())
	}
}

/// Environment variables sharing a prefix.
///
/// `NEWSDESK_API_BASE_URL=https://x` becomes `api_base_url = "https://x"`.
/// Values stay strings; typed fields parse them during deserialization.
#[derive(Debug, Clone)]
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Reads from a fixed list instead of the process environment.
	pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: prefix.into(),
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> SourceMap {
		vars.filter_map(|(key, value)| {
			let stripped = key.strip_prefix(&self.prefix)?;
			if stripped.is_empty() {
				return None;
			}
			Some((stripped.to_ascii_lowercase(), Value::String(value)))
		})
		.collect()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<SourceMap, SettingsError> {
		Ok(match &self.vars {
			Some(vars) => self.collect(vars.iter().cloned()),
			None => self.collect(std::env::vars()),
		})
	}

	fn name(&self) -> String {
		format!("env:{}*", self.prefix)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_source_contains_all_keys() {
		let map = DefaultSource.load().unwrap();
		for key in [
			"api_base_url",
			"login_route",
			"login_message",
			"create_post_route",
			"request_timeout_secs",
		] {
			assert!(map.contains_key(key), "missing {key}");
		}
	}

	#[rstest]
	fn test_env_source_strips_prefix_and_lowercases() {
		let source = EnvSource::from_vars(
			"NEWSDESK_",
			[
				("NEWSDESK_API_BASE_URL", "https://news.example.com"),
				("NEWSDESK_", "ignored"),
				("OTHER_API_BASE_URL", "ignored"),
			],
		);
		let map = source.load().unwrap();

		assert_eq!(map.len(), 1);
		assert_eq!(
			map.get("api_base_url"),
			Some(&Value::String("https://news.example.com".to_string()))
		);
	}

	#[rstest]
	fn test_missing_optional_toml_is_empty() {
		let source = TomlFileSource::optional("/nonexistent/newsdesk.toml");
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_missing_required_toml_is_io_error() {
		let source = TomlFileSource::new("/nonexistent/newsdesk.toml");
		assert!(matches!(source.load(), Err(SettingsError::Io { .. })));
	}
}
