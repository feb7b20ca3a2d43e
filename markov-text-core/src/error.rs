use thiserror::Error;

/// Errors produced while configuring, building or running a Markov generator.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// A caller supplied an invalid value (non-positive length, empty filename, ...).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The text source could not be read. The underlying error is kept unchanged.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A configuration document could not be parsed.
	#[error("invalid configuration: {0}")]
	Config(#[from] serde_json::Error),

	/// Two models or states with different parameters/keys were merged.
	#[error("model mismatch: {0}")]
	ModelMismatch(String),
}

pub type Result<T> = std::result::Result<T, MarkovError>;

/// Converts any integer into a strictly positive `usize`.
///
/// Zero and negative values are rejected with [`MarkovError::InvalidArgument`].
pub(crate) fn positive<N: TryInto<usize>>(value: N, name: &str) -> Result<usize> {
	match value.try_into() {
		Ok(n) if n > 0 => Ok(n),
		_ => Err(MarkovError::InvalidArgument(format!("{name} must be > 0"))),
	}
}

/// Converts any integer into a non-negative `usize`.
pub(crate) fn non_negative<N: TryInto<usize>>(value: N, name: &str) -> Result<usize> {
	value
		.try_into()
		.map_err(|_| MarkovError::InvalidArgument(format!("{name} must be non-negative")))
}
