use super::{Folder, SourceResponse};
use super::super::utils::Url;
use anyhow::Result;
use std::path::Path;

/// A [`Folder`] mounted at a URL prefix.
///
/// Requests are matched against the prefix; the remainder of the path is
/// resolved inside the folder.
#[derive(Clone, Debug)]
pub struct StaticSource {
	source: Folder,
	prefix: Url,
}

impl StaticSource {
	pub fn new(path: &Path, url_prefix: Url) -> Result<StaticSource> {
		Ok(StaticSource {
			source: Folder::from(path)?,
			prefix: url_prefix.to_dir(),
		})
	}

	pub fn get_data(&self, url: &Url) -> Option<SourceResponse> {
		// "/assets" should behave like "/assets/" when that is the mount point.
		if url.to_dir().str == self.prefix.str {
			return self.source.get_data(&Url::from("/"));
		}
		if !url.starts_with(&self.prefix) {
			return None;
		}

		let stripped = url.strip_prefix(&self.prefix).ok()?;
		self.source.get_data(&stripped)
	}
}
