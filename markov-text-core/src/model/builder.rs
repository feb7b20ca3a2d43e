use std::path::Path;
use std::sync::{Arc, mpsc};
use std::thread;

use super::generator::Generator;
use super::markov_model::MarkovModel;
use super::text_source::TextSource;
use crate::config::MarkovConfig;
use crate::error::{positive, Result};
use crate::text::sanitize;

/// Below this number of windows the corpus is scanned on the calling thread.
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Number of chunks per CPU when scanning in parallel.
const CHUNK_FACTOR: usize = 4;

/// Builder for a `Generator` over a Markov model of a corpus.
///
/// Instances are created with `from_raw_text` or `from_file`, then tuned:
///
/// ```no_run
/// use markov_text_core::model::builder::ModelBuilder;
///
/// let hamlet = ModelBuilder::from_file("hamlet.txt")?
/// 	.with_prefix_length(7)?
/// 	.with_suffix_length(4)?
/// 	.build()?;
/// # Ok::<(), markov_text_core::error::MarkovError>(())
/// ```
///
/// # Defaults
/// - `prefix_length = 1`, `suffix_length = 1`
/// - no seed (non-deterministic output)
#[derive(Clone, Debug)]
pub struct ModelBuilder {
	source: TextSource,
	prefix_length: usize,
	suffix_length: usize,
	seed: Option<u64>,
}

impl ModelBuilder {
	fn new(source: TextSource) -> Self {
		let config = MarkovConfig::default();
		Self {
			source,
			prefix_length: config.prefix_length,
			suffix_length: config.suffix_length,
			seed: config.seed,
		}
	}

	/// Returns a builder using `raw_text` as the corpus.
	pub fn from_raw_text<S: Into<String>>(raw_text: S) -> Self {
		Self::new(TextSource::RawText(raw_text.into()))
	}

	/// Returns a builder reading its corpus from `filename`.
	///
	/// The file is resolved as-is if it exists, otherwise under `./res/`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the file name is empty.
	pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
		Ok(Self::new(TextSource::file(filename)?))
	}

	/// Sets the prefix length. Must be > 0.
	///
	/// A larger value produces output that more closely resembles the corpus.
	pub fn with_prefix_length<N: TryInto<usize>>(mut self, prefix_length: N) -> Result<Self> {
		self.prefix_length = positive(prefix_length, "prefix_length")?;
		Ok(self)
	}

	/// Sets the suffix length. Must be > 0.
	pub fn with_suffix_length<N: TryInto<usize>>(mut self, suffix_length: N) -> Result<Self> {
		self.suffix_length = positive(suffix_length, "suffix_length")?;
		Ok(self)
	}

	/// Makes generation reproducible.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Switches back to a non-deterministic random source.
	pub fn without_seed(mut self) -> Self {
		self.seed = None;
		self
	}

	/// Applies every setting of `config`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if a length of `config` is zero.
	pub fn with_config(mut self, config: &MarkovConfig) -> Result<Self> {
		config.validate()?;
		self.prefix_length = config.prefix_length;
		self.suffix_length = config.suffix_length;
		self.seed = config.seed;
		Ok(self)
	}

	pub fn source(&self) -> &TextSource {
		&self.source
	}

	/// Fetches, sanitizes and scans the corpus.
	///
	/// # Errors
	/// I/O failures of a file source are returned unchanged.
	pub fn build_model(&self) -> Result<MarkovModel> {
		let raw_text = self.source.to_raw_text()?;
		let chars: Vec<char> = sanitize(&raw_text).chars().collect();

		let windows = MarkovModel::window_count(chars.len(), self.prefix_length, self.suffix_length);
		let model = if windows < PARALLEL_THRESHOLD {
			MarkovModel::from_window_range(&chars, 0..windows, self.prefix_length, self.suffix_length)?
		} else {
			self.scan_parallel(&chars, windows)?
		};

		log::debug!(
			"Built model ({}, {}): {} characters, {} prefixes, {} observations",
			self.prefix_length,
			self.suffix_length,
			chars.len(),
			model.prefix_count(),
			model.observation_count()
		);
		Ok(model)
	}

	/// Builds the model and wraps it in a generator.
	pub fn build(&self) -> Result<Generator> {
		let model = Arc::new(self.build_model()?);
		Ok(match self.seed {
			Some(seed) => Generator::seeded(model, seed),
			None => Generator::from_entropy(model),
		})
	}

	/// Splits the offsets into chunks, scans them on worker threads and merges
	/// the partial models back in offset order.
	///
	/// # Notes
	/// - Partial models are tagged with their chunk index before being sent,
	///   so thread completion order does not matter.
	fn scan_parallel(&self, chars: &[char], windows: usize) -> Result<MarkovModel> {
		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = windows.div_ceil(chunks);
		let (prefix_length, suffix_length) = (self.prefix_length, self.suffix_length);
		log::debug!("Scanning {windows} windows in chunks of {chunk_size}");

		let mut partials: Vec<Option<Result<MarkovModel>>> = Vec::new();
		thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for (index, start) in (0..windows).step_by(chunk_size).enumerate() {
				let tx = tx.clone();
				let end = (start + chunk_size).min(windows);
				scope.spawn(move || {
					let partial = MarkovModel::from_window_range(chars, start..end, prefix_length, suffix_length);
					// The receiver outlives every worker of this scope.
					let _ = tx.send((index, partial));
				});
				partials.push(None);
			}
			drop(tx);

			for (index, partial) in rx.iter() {
				partials[index] = Some(partial);
			}
		});

		let mut model = MarkovModel::new(prefix_length, suffix_length)?;
		for partial in partials.into_iter().flatten() {
			model.merge(partial?)?;
		}
		Ok(model)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;

	#[test]
	fn lengths_default_to_one() {
		let model = ModelBuilder::from_raw_text("abcd").build_model().unwrap();
		assert_eq!(model.prefix_length(), 1);
		assert_eq!(model.suffix_length(), 1);
		assert_eq!(model.observation_count(), 3);
	}

	#[test]
	fn non_positive_lengths_are_rejected() {
		let builder = ModelBuilder::from_raw_text("abc").with_prefix_length(2).unwrap();
		for bad in [0, -17] {
			assert!(matches!(builder.clone().with_prefix_length(bad), Err(MarkovError::InvalidArgument(_))));
			assert!(matches!(builder.clone().with_suffix_length(bad), Err(MarkovError::InvalidArgument(_))));
		}
	}

	#[test]
	fn text_is_sanitized_before_scanning() {
		let model = ModelBuilder::from_raw_text("\ta  b\n")
			.with_prefix_length(2)
			.unwrap()
			.build_model()
			.unwrap();
		// sanitized: " a b "
		assert_eq!(model.prefixes().collect::<Vec<_>>(), [" a", " b", "a "]);
		assert_eq!(model.suffixes(" a"), [" "]);
		assert_eq!(model.suffixes("a "), ["b"]);
		assert_eq!(model.suffixes(" b"), [" "]);
	}

	#[test]
	fn config_is_applied() {
		let config = MarkovConfig { prefix_length: 3, suffix_length: 2, seed: Some(4) };
		let builder = ModelBuilder::from_raw_text("abcdefgh").with_config(&config).unwrap();
		let model = builder.build_model().unwrap();
		assert_eq!((model.prefix_length(), model.suffix_length()), (3, 2));

		let bad = MarkovConfig { prefix_length: 0, ..config };
		assert!(matches!(builder.with_config(&bad), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn empty_filename_is_rejected() {
		assert!(matches!(ModelBuilder::from_file(""), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn missing_file_fails_at_build() {
		let builder = ModelBuilder::from_file("missing-corpus.txt").unwrap();
		assert!(matches!(builder.build(), Err(MarkovError::Io(_))));
	}

	#[test]
	fn parallel_scan_matches_sequential_scan() {
		let text: String = (0..PARALLEL_THRESHOLD / 2)
			.map(|i| format!("w{} ", i % 97))
			.collect::<Vec<_>>()
			.join("x");
		let builder = ModelBuilder::from_raw_text(text.as_str())
			.with_prefix_length(3)
			.unwrap()
			.with_suffix_length(2)
			.unwrap();

		let chars: Vec<char> = sanitize(&text).chars().collect();
		let windows = MarkovModel::window_count(chars.len(), 3, 2);
		assert!(windows >= PARALLEL_THRESHOLD);

		let sequential = MarkovModel::from_window_range(&chars, 0..windows, 3, 2).unwrap();
		assert_eq!(builder.build_model().unwrap(), sequential);
	}

	#[test]
	fn seeded_builds_are_reproducible() {
		let builder = ModelBuilder::from_raw_text("one fish two fish red fish blue fish")
			.with_prefix_length(2)
			.unwrap()
			.with_seed(321);
		let mut first = builder.build().unwrap();
		let mut second = builder.build().unwrap();
		assert_eq!(first.of_length(80).unwrap(), second.of_length(80).unwrap());
	}
}
