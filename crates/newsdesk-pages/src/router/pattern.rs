//! URL path patterns.
//!
//! A pattern is a sequence of `/`-separated segments. A segment is either a
//! literal (`post`) or a single named parameter (`:id`). There are no
//! wildcards, optional segments or nested patterns.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
}

/// A compiled route pattern such as `/post/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
	raw: String,
	segments: Vec<Segment>,
}

impl PathPattern {
	/// Compiles a pattern. Empty segments are ignored, so `/post/:id/`
	/// and `/post/:id` compile to the same pattern.
	pub fn new(pattern: &str) -> Self {
		let segments = pattern
			.split('/')
			.filter(|s| !s.is_empty())
			.map(|s| match s.strip_prefix(':') {
				Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
				_ => Segment::Literal(s.to_string()),
			})
			.collect();

		Self {
			raw: pattern.to_string(),
			segments,
		}
	}

	/// The pattern as written.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Names of the parameters, in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|s| match s {
			Segment::Param(name) => Some(name.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Matches a path (no query string) and returns the bound parameters.
	///
	/// One trailing slash is tolerated. Parameter values are
	/// percent-decoded and never empty.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let path = path.strip_prefix('/')?;
		let path = path.strip_suffix('/').unwrap_or(path);

		let parts: Vec<&str> = if path.is_empty() {
			Vec::new()
		} else {
			path.split('/').collect()
		};

		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(literal) => {
					if literal != part {
						return None;
					}
				}
				Segment::Param(name) => {
					if part.is_empty() {
						return None;
					}
					let value = urlencoding::decode(part)
						.map(|v| v.into_owned())
						.unwrap_or_else(|_| part.to_string());
					params.insert(name.clone(), value);
				}
			}
		}

		Some(params)
	}

	/// Builds a concrete path from parameters.
	///
	/// Returns `Err` with the first missing parameter name.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, String> {
		let mut path = String::new();
		for segment in &self.segments {
			path.push('/');
			match segment {
				Segment::Literal(literal) => path.push_str(literal),
				Segment::Param(name) => {
					let value = params
						.get(name)
						.filter(|v| !v.is_empty())
						.ok_or_else(|| name.clone())?;
					path.push_str(&urlencoding::encode(value));
				}
			}
		}

		if path.is_empty() {
			path.push('/');
		}
		Ok(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/home", "/home", true)]
	#[case("/home", "/home/", true)]
	#[case("/home", "/Home", false)]
	#[case("/home", "/home/extra", false)]
	#[case("/home", "home", false)]
	#[case("/", "/", true)]
	#[case("/", "/home", false)]
	fn test_literal_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		assert_eq!(PathPattern::new(pattern).matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_param_binding() {
		let pattern = PathPattern::new("/post/:id");
		let params = pattern.matches("/post/42").unwrap();
		assert_eq!(params.get("id"), Some(&"42".to_string()));
	}

	#[rstest]
	fn test_param_is_percent_decoded() {
		let pattern = PathPattern::new("/edit/:id");
		let params = pattern.matches("/edit/a%20b").unwrap();
		assert_eq!(params.get("id"), Some(&"a b".to_string()));
	}

	#[rstest]
	#[case("/post/")]
	#[case("/post//")]
	#[case("/post")]
	fn test_param_requires_value(#[case] path: &str) {
		assert!(PathPattern::new("/post/:id").matches(path).is_none());
	}

	#[rstest]
	fn test_param_names() {
		let pattern = PathPattern::new("/users/:user_id/posts/:post_id");
		let names: Vec<_> = pattern.param_names().collect();
		assert_eq!(names, vec!["user_id", "post_id"]);
	}

	#[rstest]
	fn test_reverse() {
		let pattern = PathPattern::new("/post/:id");
		let mut params = HashMap::new();
		params.insert("id".to_string(), "7".to_string());
		assert_eq!(pattern.reverse(&params), Ok("/post/7".to_string()));
	}

	#[rstest]
	fn test_reverse_root() {
		assert_eq!(PathPattern::new("/").reverse(&HashMap::new()), Ok("/".to_string()));
	}

	#[rstest]
	fn test_reverse_missing_param() {
		let pattern = PathPattern::new("/edit/:id");
		assert_eq!(pattern.reverse(&HashMap::new()), Err("id".to_string()));
	}
}
