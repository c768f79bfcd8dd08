use super::SourceResponse;
use super::super::utils::{Url, guess_mime};
use anyhow::{Context, Result, ensure};
use std::{
	env::current_dir,
	fmt::Debug,
	fs,
	path::{Path, PathBuf},
};

/// A local folder of prebuilt site assets.
#[derive(Clone)]
pub struct Folder {
	folder: PathBuf,
	name: String,
}

impl Folder {
	pub fn from(path: &Path) -> Result<Folder> {
		let mut folder = current_dir()?;
		folder.push(path);

		ensure!(folder.exists(), "path {folder:?} does not exist");
		ensure!(folder.is_dir(), "path {folder:?} must be a directory");

		let folder = folder
			.canonicalize()
			.with_context(|| format!("canonicalizing static folder {path:?}"))?;

		Ok(Folder {
			folder,
			name: path.to_string_lossy().to_string(),
		})
	}

	#[cfg(test)]
	pub fn get_name(&self) -> &str {
		&self.name
	}

	/// Resolve `url` inside the folder and return the file's bytes and MIME
	/// type. Directories resolve to their `index.html`; paths escaping the
	/// folder and missing files yield `None`.
	pub fn get_data(&self, url: &Url) -> Option<SourceResponse> {
		let mut local_path = url.to_path(&self.folder);

		if local_path.is_dir() {
			local_path.push("index.html");
		}

		// Canonicalizing resolves any ".." segments, so the containment
		// check below is meaningful; it also weeds out missing files.
		let local_path = local_path.canonicalize().ok()?;
		if !local_path.starts_with(&self.folder) {
			return None;
		}

		let bytes = fs::read(&local_path).ok()?;
		SourceResponse::new_some(bytes, &guess_mime(&local_path))
	}
}

impl Debug for Folder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Folder")
			.field("folder", &self.folder)
			.field("name", &self.name)
			.finish()
	}
}
