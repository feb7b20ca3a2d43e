use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::markov_model::MarkovModel;
use crate::error::{non_negative, Result};
use crate::text::last_n_chars;

/// Random walker over a shared, immutable `MarkovModel`.
///
/// # Responsibilities
/// - Own the random source used for every draw
/// - Generate text of at most a requested length
///
/// # Notes
/// - The random source is ChaCha8, whose stream for a given seed does not
///   change between releases.
/// - The random source advances across calls; use `reseed` to restart it.
/// - Not meant to be shared between threads: use one generator per thread,
///   each with its own seed, over the same `Arc<MarkovModel>`.
#[derive(Debug, Clone)]
pub struct Generator {
	model: Arc<MarkovModel>,
	rng: ChaCha8Rng,
}

impl Generator {
	/// Creates a generator from a model and an explicitly constructed random source.
	pub fn new(model: Arc<MarkovModel>, rng: ChaCha8Rng) -> Self {
		Self { model, rng }
	}

	/// Creates a reproducible generator.
	pub fn seeded(model: Arc<MarkovModel>, seed: u64) -> Self {
		Self::new(model, ChaCha8Rng::seed_from_u64(seed))
	}

	/// Creates a generator seeded from the thread-local random source.
	pub fn from_entropy(model: Arc<MarkovModel>) -> Self {
		Self::new(model, ChaCha8Rng::from_rng(&mut rand::rng()))
	}

	/// Returns the model this generator walks.
	pub fn model(&self) -> &Arc<MarkovModel> {
		&self.model
	}

	/// Restarts the random source from `seed`.
	pub fn reseed(&mut self, seed: u64) {
		self.rng = ChaCha8Rng::seed_from_u64(seed);
	}

	/// Generates a text of at most `length` characters.
	///
	/// # Behavior
	/// - Starts from a prefix drawn uniformly among the distinct keys.
	/// - Appends a suffix drawn from the current prefix's observations until
	///   `length` is reached or the current prefix has no observation.
	/// - The next prefix is the last `prefix_length` characters of the output.
	/// - Output longer than `length` is truncated; shorter output is returned as-is.
	///
	/// # Notes
	/// - Draw order: one draw for the start, then one per appended suffix.
	/// - An empty model yields an empty string.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `length` is negative.
	pub fn of_length<N: TryInto<usize>>(&mut self, length: N) -> Result<String> {
		let length = non_negative(length, "length")?;
		let prefix_length = self.model.prefix_length();

		let mut prefix = match self.model.random_prefix(&mut self.rng) {
			Some(prefix) => prefix.to_owned(),
			None => {
				log::trace!("Empty model, nothing to generate");
				return Ok(String::new());
			}
		};
		let mut output: Vec<char> = prefix.chars().collect();

		while output.len() < length {
			let Some(suffix) = self.model.predict(&prefix, &mut self.rng) else {
				log::trace!("Dead end on prefix {prefix:?} after {} characters", output.len());
				break;
			};

			output.extend(suffix.chars());
			prefix = last_n_chars(&output, prefix_length);
		}

		output.truncate(length);
		Ok(output.into_iter().collect())
	}
}
