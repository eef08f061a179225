//! Settings builder merging ordered sources.

use crate::sources::{ConfigSource, SourceMap};
use crate::validation::validate;
use crate::{Settings, SettingsError};
use serde_json::Value;

/// Builds [`Settings`] from ordered sources. Later sources win.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl std::fmt::Debug for SettingsBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsBuilder")
			.field(
				"sources",
				&self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl SettingsBuilder {
	/// Creates a builder with no sources.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a source.
	pub fn add_source<S>(mut self, source: S) -> Self
	where
		S: ConfigSource + 'static,
	{
		self.sources.push(Box::new(source));
		self
	}

	/// Merges every source without deserializing.
	pub fn merged(&self) -> Result<SourceMap, SettingsError> {
		let mut merged = SourceMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(source = %source.name(), keys = values.len(), "loaded settings source");
			merged.extend(values);
		}
		Ok(merged)
	}

	/// Merges, deserializes and validates.
	pub fn build(self) -> Result<Settings, SettingsError> {
		let merged = self.merged()?;
		let settings: Settings =
			serde_json::from_value(Value::Object(merged)).map_err(|e| SettingsError::Parse {
				source_name: "merged".to_string(),
				message: e.to_string(),
			})?;
		validate(&settings)?;
		Ok(settings)
	}
}
