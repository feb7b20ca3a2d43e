use rand::Rng;

use crate::error::{MarkovError, Result};

/// Represents a state in a Markov model.
///
/// A `State` corresponds to a fixed-length prefix (`key`) and stores every
/// suffix observed right after an occurrence of that prefix, in scan order.
///
/// Duplicates are kept on purpose: a suffix seen three times appears three
/// times, so a uniform draw over indices reproduces the empirical
/// transition frequencies of the corpus.
///
/// ## Responsibilities:
/// - Accumulate suffix observations during learning
/// - Predict the next suffix with a single uniform index draw
/// - Merge with another state having the same key (ordered parallel learning)
///
/// ## Invariants
/// - All suffixes belong to the same `key`
/// - `suffixes` order is the order in which occurrences were scanned
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Identifier of the state (prefix).
	key: String,
	/// Observed suffixes, one entry per occurrence of `key`.
	/// Example: ["e ", "ed", "e "]
	suffixes: Vec<String>,
}

impl State {
	/// Creates a new empty state for the given prefix.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			suffixes: Vec::new(),
		}
	}

	/// Returns the prefix this state is keyed by.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records one occurrence of `suffix` following this prefix.
	pub fn add_suffix(&mut self, suffix: String) {
		self.suffixes.push(suffix);
	}

	/// Returns every observed suffix, in scan order.
	pub fn suffixes(&self) -> &[String] {
		&self.suffixes
	}

	/// Returns the number of recorded observations.
	pub fn len(&self) -> usize {
		self.suffixes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.suffixes.is_empty()
	}

	/// Picks a suffix by drawing a uniform index into the observation list.
	///
	/// Exactly one value is drawn from `rng` when the state has observations,
	/// none otherwise. Returns `None` if the state is empty.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.suffixes.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.suffixes.len());
		self.suffixes.get(index).map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// `other`'s observations are appended after this state's own, so merging
	/// partial states in source order keeps the global scan order.
	///
	/// # Errors
	/// Returns an error if the state keys do not match.
	pub fn merge(&mut self, other: State) -> Result<()> {
		if self.key != other.key {
			return Err(MarkovError::ModelMismatch(format!(
				"key mismatch: {:?} vs {:?}",
				self.key, other.key
			)));
		}

		self.suffixes.extend(other.suffixes);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn empty_state_predicts_nothing() {
		let state = State::new("ab");
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		assert!(state.is_empty());
		assert_eq!(state.predict(&mut rng), None);
	}

	#[test]
	fn predict_only_returns_observed_suffixes() {
		let mut state = State::new("a");
		state.add_suffix("b".to_owned());
		state.add_suffix("c".to_owned());
		state.add_suffix("b".to_owned());

		let mut rng = ChaCha8Rng::seed_from_u64(7);
		for _ in 0..100 {
			let suffix = state.predict(&mut rng).unwrap();
			assert!(suffix == "b" || suffix == "c");
		}
	}

	#[test]
	fn duplicates_weight_the_draw() {
		let mut state = State::new("a");
		for _ in 0..9 {
			state.add_suffix("x".to_owned());
		}
		state.add_suffix("y".to_owned());

		let mut rng = ChaCha8Rng::seed_from_u64(42);
		let xs = (0..10_000).filter(|_| state.predict(&mut rng) == Some("x")).count();
		assert!((8_500..9_500).contains(&xs), "got {xs} x draws");
	}

	#[test]
	fn merge_appends_in_order() {
		let mut first = State::new("k");
		first.add_suffix("1".to_owned());
		let mut second = State::new("k");
		second.add_suffix("2".to_owned());
		second.add_suffix("3".to_owned());

		first.merge(second).unwrap();
		assert_eq!(first.suffixes(), ["1", "2", "3"]);
	}

	#[test]
	fn merge_rejects_other_keys() {
		let mut first = State::new("k");
		assert!(matches!(first.merge(State::new("j")), Err(MarkovError::ModelMismatch(_))));
	}
}
