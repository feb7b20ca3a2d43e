use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};

/// Generation parameters shared by builders and drivers.
///
/// Every field is optional in the serialized form:
///
/// ```json
/// { "prefix_length": 7, "suffix_length": 4, "seed": 321 }
/// ```
///
/// # Invariants
/// - `prefix_length` and `suffix_length` are >= 1 once validated
/// - `seed == None` means a non-deterministic random source
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MarkovConfig {
	/// Number of characters used as a lookup key.
	pub prefix_length: usize,

	/// Number of characters appended at each step of the walk.
	pub suffix_length: usize,

	/// Seed of the random source, if reproducible output is wanted.
	pub seed: Option<u64>,
}

impl Default for MarkovConfig {
	fn default() -> Self {
		Self { prefix_length: 1, suffix_length: 1, seed: None }
	}
}

impl MarkovConfig {
	/// Parses and validates a configuration from a JSON string.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a configuration from a JSON file.
	///
	/// # Errors
	/// - `MarkovError::Io` if the file cannot be read
	/// - `MarkovError::Config` if the file is not valid JSON for this structure
	/// - `MarkovError::InvalidArgument` if a length is zero
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::from_json_str(&fs::read_to_string(path)?)
	}

	/// Checks that both lengths are strictly positive.
	pub fn validate(&self) -> Result<()> {
		if self.prefix_length == 0 {
			return Err(MarkovError::InvalidArgument("prefix_length must be > 0".to_owned()));
		}
		if self.suffix_length == 0 {
			return Err(MarkovError::InvalidArgument("suffix_length must be > 0".to_owned()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_use_defaults() {
		let config = MarkovConfig::from_json_str("{}").unwrap();
		assert_eq!(config, MarkovConfig::default());
		assert_eq!(config.prefix_length, 1);
		assert_eq!(config.suffix_length, 1);
		assert_eq!(config.seed, None);
	}

	#[test]
	fn full_document_is_parsed() {
		let config =
			MarkovConfig::from_json_str(r#"{ "prefix_length": 7, "suffix_length": 2, "seed": 321 }"#).unwrap();
		assert_eq!(config, MarkovConfig { prefix_length: 7, suffix_length: 2, seed: Some(321) });
	}

	#[test]
	fn zero_lengths_are_rejected() {
		assert!(matches!(
			MarkovConfig::from_json_str(r#"{ "prefix_length": 0 }"#),
			Err(MarkovError::InvalidArgument(_))
		));
		assert!(matches!(
			MarkovConfig::from_json_str(r#"{ "suffix_length": 0 }"#),
			Err(MarkovError::InvalidArgument(_))
		));
	}

	#[test]
	fn negative_and_unknown_fields_are_config_errors() {
		assert!(matches!(
			MarkovConfig::from_json_str(r#"{ "prefix_length": -17 }"#),
			Err(MarkovError::Config(_))
		));
		assert!(matches!(
			MarkovConfig::from_json_str(r#"{ "order": 3 }"#),
			Err(MarkovError::Config(_))
		));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		assert!(matches!(
			MarkovConfig::from_json_file("/definitely/not/here.json"),
			Err(MarkovError::Io(_))
		));
	}
}
