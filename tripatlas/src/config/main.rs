use super::{CorsConfig, ServerConfig, StaticSourceConfig};
use anyhow::{Context, Result};
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

use serde::Deserialize;

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// HTTP server configuration
	#[serde(default)]
	pub server: ServerConfig,

	/// Cross-Origin Resource Sharing (CORS) settings
	#[serde(default)]
	pub cors: CorsConfig,

	/// List of static sources
	#[serde(default, rename = "static")]
	pub static_sources: Vec<StaticSourceConfig>,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parse from a file path and resolve relative static source paths
	/// against that file's directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut config =
			Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;

		config.resolve_paths(path.parent().unwrap_or(Path::new(".")));
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		for static_source in &mut self.static_sources {
			static_source.resolve_paths(base);
		}
	}
}
