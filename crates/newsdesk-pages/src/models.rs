//! News API models.
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Shown when a post has no usable author name.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Post category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	/// Category id.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// Post author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
	/// Author id.
	pub id: String,
	/// Contact email.
	#[serde(default)]
	pub email: String,
	/// Preformatted full name.
	#[serde(default)]
	pub full_name: Option<String>,
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Account role.
	#[serde(default)]
	pub role: String,
}

impl Author {
	/// Name to display: the full name, else "first last", else whichever
	/// part exists, else [`UNKNOWN_AUTHOR`]. Empty strings count as absent.
	pub fn display_name(&self) -> String {
		fn present(value: &Option<String>) -> Option<&str> {
			value.as_deref().filter(|v| !v.is_empty())
		}

		if let Some(full) = present(&self.full_name) {
			return full.to_string();
		}

		match (present(&self.first_name), present(&self.last_name)) {
			(Some(first), Some(last)) => format!("{} {}", first, last),
			(Some(only), None) | (None, Some(only)) => only.to_string(),
			(None, None) => UNKNOWN_AUTHOR.to_string(),
		}
	}
}

/// Display name for an optional author.
pub fn author_display_name(author: Option<&Author>) -> String {
	author
		.map(Author::display_name)
		.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// A news post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// Post id.
	pub id: String,
	/// Headline.
	pub title: String,
	/// Teaser.
	#[serde(default)]
	pub description: String,
	/// Body.
	#[serde(default)]
	pub content: String,
	/// Cover image.
	#[serde(default)]
	pub image_url: Option<String>,
	/// Category, if assigned.
	#[serde(default)]
	pub category: Option<Category>,
	/// Author, if known.
	#[serde(default)]
	pub author: Option<Author>,
	/// Creation timestamp as sent by the API.
	#[serde(default)]
	pub created_date: String,
}

impl Post {
	/// Display name of the post's author.
	pub fn author_name(&self) -> String {
		author_display_name(self.author.as_ref())
	}
}
