//! Validation rules applied after merging.

use crate::{Settings, SettingsError};
use url::Url;

/// Checks the merged settings.
pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
	validate_base_url(&settings.api_base_url)?;

	for (key, value) in [
		("login_route", &settings.login_route),
		("create_post_route", &settings.create_post_route),
	] {
		if value.trim().is_empty() {
			return Err(invalid(key, "route name must not be empty"));
		}
	}

	if settings.request_timeout_secs == Some(0) {
		return Err(invalid("request_timeout_secs", "timeout must be positive"));
	}

	Ok(())
}

/// The API base URL must be an absolute `http` or `https` URL.
pub fn validate_base_url(raw: &str) -> Result<Url, SettingsError> {
	let url = Url::parse(raw).map_err(|e| invalid("api_base_url", &e.to_string()))?;
	match url.scheme() {
		"http" | "https" => {}
		other => {
			return Err(invalid(
				"api_base_url",
				&format!("unsupported scheme `{other}`"),
			));
		}
	}
	if url.cannot_be_a_base() || url.host_str().is_none() {
		return Err(invalid("api_base_url", "URL has no host"));
	}
	Ok(url)
}

fn invalid(key: &str, message: &str) -> SettingsError {
	SettingsError::Invalid {
		key: key.to_string(),
		message: message.to_string(),
	}
}
