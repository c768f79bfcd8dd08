use anyhow::{Result, ensure};
use std::path::{Path, PathBuf};

/// A normalized request path: always starts with `/`, keeps a trailing `/`
/// to mark directories.
#[derive(Clone, PartialOrd, PartialEq, Debug)]
pub struct Url {
	pub str: String,
}

impl Url {
	pub fn new(url: &str) -> Url {
		let str = if url.starts_with('/') {
			url.to_owned()
		} else {
			format!("/{url}")
		};
		Url { str }
	}

	pub fn starts_with(&self, url: &Url) -> bool {
		self.str.starts_with(&url.str)
	}

	pub fn is_dir(&self) -> bool {
		self.str.ends_with('/')
	}

	pub fn to_dir(&self) -> Url {
		if self.str.ends_with('/') {
			self.clone()
		} else {
			Url::new(&format!("{}/", self.str))
		}
	}

	pub fn strip_prefix(&self, prefix: &Url) -> Result<Url> {
		ensure!(
			self.str.starts_with(&prefix.str),
			"url '{self}' does not start with prefix '{prefix}'"
		);

		Ok(Url::new(&self.str[prefix.str.len()..]))
	}

	pub fn to_path(&self, base: &Path) -> PathBuf {
		base.join(&self.str[1..])
	}

	pub fn push(&mut self, filename: &str) {
		if self.is_dir() {
			self.str = format!("{}{}", self.str, filename);
		} else {
			self.str = format!("{}/{}", self.str, filename);
		}
	}
}

impl std::fmt::Display for Url {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.str)
	}
}

impl From<&str> for Url {
	fn from(s: &str) -> Self {
		Url::new(s)
	}
}
