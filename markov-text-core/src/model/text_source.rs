use std::path::{Path, PathBuf};

use crate::error::{MarkovError, Result};
use crate::io;

/// Where the raw corpus of a builder comes from.
///
/// # Variants
/// - `RawText(String)`: the corpus itself.
/// - `File(PathBuf)`: a file name, resolved as-is or under `./res/`, whose
///   lines are each preceded by a single space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextSource {
	RawText(String),
	File(PathBuf),
}

impl TextSource {
	/// Creates a file source.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the file name is empty.
	pub fn file<P: AsRef<Path>>(filename: P) -> Result<Self> {
		let filename = filename.as_ref();
		if filename.as_os_str().is_empty() {
			return Err(MarkovError::InvalidArgument("filename must not be empty".to_owned()));
		}
		Ok(Self::File(filename.to_path_buf()))
	}

	/// Fetches the raw (unsanitized) text referenced by this source.
	///
	/// # Errors
	/// I/O failures are returned unchanged as `MarkovError::Io`.
	pub fn to_raw_text(&self) -> Result<String> {
		match self {
			Self::RawText(text) => Ok(text.clone()),
			Self::File(filename) => {
				let path = io::resolve_resource(filename);
				log::debug!("Reading corpus from {}", path.display());
				Ok(io::read_joined(path)?)
			}
		}
	}
}

impl From<String> for TextSource {
	fn from(text: String) -> Self {
		Self::RawText(text)
	}
}

impl From<&str> for TextSource {
	fn from(text: &str) -> Self {
		Self::RawText(text.to_owned())
	}
}
