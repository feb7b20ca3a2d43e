use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Range;

use rand::Rng;

use super::state::State;
use crate::error::{MarkovError, Result};

/// Represents a Markov model over fixed-length character sequences.
///
/// The `MarkovModel` maps every prefix of `prefix_length` characters seen in
/// the corpus to the ordered list of `suffix_length`-character suffixes that
/// immediately followed it.
///
/// # Responsibilities
/// - Record one (prefix, suffix) pair per window offset of the corpus
/// - Expose suffix lists for lookup during a random walk
/// - Pick a starting prefix uniformly among distinct keys
/// - Merge partial models built over consecutive offset ranges
///
/// # Invariants
/// - `prefix_length` and `suffix_length` are always >= 1
/// - Each state in `states` corresponds to a unique prefix
/// - Every recorded suffix has exactly `suffix_length` characters
/// - Keys are ordered, so enumeration (and thus a seeded start draw) is stable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovModel {
	/// Number of characters in a prefix.
	prefix_length: usize,

	/// Number of characters in a suffix.
	suffix_length: usize,

	/// Mapping from a prefix to its corresponding state
	states: BTreeMap<String, State>,
}

impl MarkovModel {
	/// Creates an empty model.
	///
	/// # Errors
	/// Returns an error if either length is zero.
	pub fn new(prefix_length: usize, suffix_length: usize) -> Result<Self> {
		if prefix_length == 0 || suffix_length == 0 {
			return Err(MarkovError::InvalidArgument(
				"prefix and suffix lengths must be > 0".to_owned(),
			));
		}
		Ok(Self { prefix_length, suffix_length, states: BTreeMap::new() })
	}

	/// Builds a model from already sanitized text by scanning every window offset.
	///
	/// Produces an empty model when the text is shorter than
	/// `prefix_length + suffix_length` characters.
	pub fn from_text(text: &str, prefix_length: usize, suffix_length: usize) -> Result<Self> {
		let chars: Vec<char> = text.chars().collect();
		let offsets = 0..Self::window_count(chars.len(), prefix_length, suffix_length);
		Self::from_window_range(&chars, offsets, prefix_length, suffix_length)
	}

	/// Builds a partial model from the windows starting at each offset in `offsets`.
	///
	/// Offsets whose window would run past the end of `chars` are ignored.
	pub fn from_window_range(
		chars: &[char],
		offsets: Range<usize>,
		prefix_length: usize,
		suffix_length: usize,
	) -> Result<Self> {
		let mut model = Self::new(prefix_length, suffix_length)?;
		let window = prefix_length + suffix_length;

		for i in offsets {
			let Some(chunk) = chars.get(i..i + window) else {
				break;
			};
			let prefix: String = chunk[..prefix_length].iter().collect();
			let suffix: String = chunk[prefix_length..].iter().collect();
			model.add_observation(prefix, suffix);
		}

		Ok(model)
	}

	/// Number of window offsets in a text of `text_len` characters.
	pub fn window_count(text_len: usize, prefix_length: usize, suffix_length: usize) -> usize {
		(text_len + 1).saturating_sub(prefix_length + suffix_length)
	}

	fn add_observation(&mut self, prefix: String, suffix: String) {
		match self.states.entry(prefix) {
			Entry::Occupied(mut entry) => entry.get_mut().add_suffix(suffix),
			Entry::Vacant(entry) => {
				let mut state = State::new(entry.key());
				state.add_suffix(suffix);
				entry.insert(state);
			}
		}
	}

	pub fn prefix_length(&self) -> usize {
		self.prefix_length
	}

	pub fn suffix_length(&self) -> usize {
		self.suffix_length
	}

	/// Returns `true` if no window was recorded.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of distinct prefixes.
	pub fn prefix_count(&self) -> usize {
		self.states.len()
	}

	/// Total number of recorded (prefix, suffix) observations.
	pub fn observation_count(&self) -> usize {
		self.states.values().map(State::len).sum()
	}

	/// Iterates over the distinct prefixes in key order.
	pub fn prefixes(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Returns the suffixes observed after `prefix`, in scan order.
	///
	/// Unknown prefixes yield an empty slice.
	pub fn suffixes(&self, prefix: &str) -> &[String] {
		self.states.get(prefix).map(State::suffixes).unwrap_or_default()
	}

	/// Picks the next suffix for `prefix`.
	///
	/// Returns `None` (without drawing) if the prefix is unknown.
	pub fn predict<R: Rng + ?Sized>(&self, prefix: &str, rng: &mut R) -> Option<&str> {
		self.states.get(prefix)?.predict(rng)
	}

	/// Returns a random prefix, each distinct key being equally likely.
	///
	/// Useful for starting a generation sequence.
	/// Draws exactly once from `rng`, even when there is a single key.
	/// Returns `None` (without drawing) if the model has no states.
	pub fn random_prefix<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.states.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.states.len());
		self.states.keys().nth(index).map(String::as_str)
	}

	/// Merges another model into this one.
	///
	/// # Notes
	/// - Both models must share the same prefix and suffix lengths.
	/// - `other`'s observations are appended after `self`'s for every key, so
	///   merging models of consecutive offset ranges in range order yields the
	///   same model as a single sequential scan.
	///
	/// # Errors
	/// Returns an error if the model lengths do not match.
	pub fn merge(&mut self, other: Self) -> Result<()> {
		if self.prefix_length != other.prefix_length || self.suffix_length != other.suffix_length {
			return Err(MarkovError::ModelMismatch(format!(
				"lengths mismatch: self=({}, {}), other=({}, {})",
				self.prefix_length, self.suffix_length, other.prefix_length, other.suffix_length
			)));
		}

		for (key, state) in other.states {
			match self.states.entry(key) {
				Entry::Occupied(mut entry) => entry.get_mut().merge(state)?,
				Entry::Vacant(entry) => {
					entry.insert(state);
				}
			}
		}

		Ok(())
	}
}
