//! Character-level Markov text generation library.
//!
//! This crate builds a fixed-order Markov model from an input corpus and
//! random-walks it to produce text whose local structure mimics the corpus:
//! - Prefix → suffix observation maps over fixed-length character windows
//! - Order-preserving (optionally parallel) corpus scanning
//! - Seedable, reproducible generation of output of a requested length
//!
//! Typical usage goes through [`model::builder::ModelBuilder`]:
//!
//! ```no_run
//! use markov_text_core::model::builder::ModelBuilder;
//!
//! let mut hamlet = ModelBuilder::from_file("hamlet.txt")?
//! 	.with_prefix_length(7)?
//! 	.with_suffix_length(4)?
//! 	.build()?;
//! println!("{}", hamlet.of_length(1000)?);
//! # Ok::<(), markov_text_core::error::MarkovError>(())
//! ```

/// Markov model construction and generation.
///
/// This module exposes the builder, the immutable model and the generator.
pub mod model;

/// Configuration (prefix/suffix lengths, seed) loadable from JSON.
pub mod config;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// Text sanitization and char-slicing helpers.
///
/// Not exposed
pub(crate) mod text;

/// I/O utilities (file loading, path resolution).
///
/// Not exposed
pub(crate) mod io;
