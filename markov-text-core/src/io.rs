use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, io};

/// Folder, relative to the working directory, where named resources are looked up.
pub(crate) const RESOURCE_FOLDER: &str = "res";

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a text file and puts a single space before each of its lines.
///
/// The first line is preceded by a space too, so a non-empty file always
/// yields text starting with `' '`. An empty file yields an empty string.
pub(crate) fn read_joined<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	Ok(read_file(filename)?
		.iter()
		.fold(String::new(), |text, line| text + " " + line))
}

/// Resolves a resource name to a path.
///
/// - An existing path is returned as-is
/// - Otherwise the name is looked up under `<current dir>/res/`
///
/// The returned path is not guaranteed to exist; opening it reports the error.
pub(crate) fn resolve_resource<P: AsRef<Path>>(name: P) -> PathBuf {
	let name = name.as_ref();
	if name.exists() {
		return name.to_path_buf();
	}

	env::current_dir()
		.unwrap_or_else(|_| PathBuf::from("."))
		.join(RESOURCE_FOLDER)
		.join(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn scratch_file(name: &str, contents: &str) -> PathBuf {
		let path = env::temp_dir().join(format!("markov-text-io-{}-{name}", std::process::id()));
		fs::write(&path, contents).unwrap();
		path
	}

	#[test]
	fn read_joined_separates_lines_with_spaces() {
		let path = scratch_file("joined.txt", "first line\r\nsecond\nthird\n");
		assert_eq!(read_joined(&path).unwrap(), " first line second third");
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn read_joined_of_empty_file_is_empty() {
		let path = scratch_file("empty.txt", "");
		assert_eq!(read_joined(&path).unwrap(), "");
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn resolve_resource_keeps_existing_paths() {
		let path = scratch_file("existing.txt", "x");
		assert_eq!(resolve_resource(&path), path);
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn resolve_resource_falls_back_to_resource_folder() {
		let resolved = resolve_resource("definitely-not-here.txt");
		assert!(resolved.ends_with(Path::new(RESOURCE_FOLDER).join("definitely-not-here.txt")));
	}

	#[test]
	fn read_file_reports_missing_files() {
		let err = read_file("/definitely/not/here.txt").unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}
