//! Configuration for static file sources served by the tripatlas server.
//!
//! Each entry in the `static` section of the configuration file defines one
//! `StaticSourceConfig`: where the site's prebuilt assets live and under
//! which URL prefix they are served.
//!
//! # Example YAML
//! ```yaml
//! static:
//!   - ["/", "./site"]
//!   - path: "./public"
//!     url_prefix: "/assets"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration entry for serving static assets.
///
/// - `path`: local folder holding the assets.
/// - `url_prefix`: optional base URL prefix (defaults to `/`).
///
/// Relative paths are resolved against the directory of the configuration
/// file by [`StaticSourceConfig::resolve_paths`].
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSourceConfig {
	/// Path to the folder containing static files
	pub path: PathBuf,

	/// Optional URL prefix where static files will be served
	/// Defaults to root ("/")
	pub url_prefix: Option<String>,
}

impl StaticSourceConfig {
	pub fn resolve_paths(&mut self, base: &Path) {
		if self.path.is_relative() {
			self.path = base.join(&self.path);
		}
	}
}

/// Custom deserializer supporting both key-value pair arrays and explicit
/// mapping forms:
/// ```yaml
/// static:
///   - ["/", "./site"]
///   - path: "./public"
///     url_prefix: "/assets"
/// ```
impl<'de> Deserialize<'de> for StaticSourceConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum StaticSourceConfigHelper {
			Pair(String, PathBuf),
			Entry {
				path: PathBuf,
				#[serde(default)]
				url_prefix: Option<String>,
			},
		}

		Ok(match StaticSourceConfigHelper::deserialize(deserializer)? {
			StaticSourceConfigHelper::Pair(url_prefix, path) => StaticSourceConfig {
				path,
				url_prefix: Some(url_prefix),
			},
			StaticSourceConfigHelper::Entry { path, url_prefix } => StaticSourceConfig { path, url_prefix },
		})
	}
}

#[cfg(test)]
impl From<(&str, &str)> for StaticSourceConfig {
	fn from((url_prefix, path): (&str, &str)) -> Self {
		Self {
			path: PathBuf::from(path),
			url_prefix: Some(url_prefix.to_string()),
		}
	}
}
