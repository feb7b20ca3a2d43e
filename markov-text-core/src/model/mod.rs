//! Top-level module for the Markov text generation system.
//!
//! This module provides:
//! - The corpus scanner and its configuration (`ModelBuilder`)
//! - The immutable prefix → suffixes map (`MarkovModel`)
//! - Per-prefix observation lists (`State`)
//! - The acquisition strategy for raw text (`TextSource`)
//! - The seedable random walker (`Generator`)

/// Builder turning a text source and lengths into a model and a generator.
///
/// Handles sanitization and order-preserving parallel scanning.
pub mod builder;

/// Random walk over a shared model with an owned, seedable random source.
pub mod generator;

/// Fixed-length prefix → ordered suffix observations.
///
/// Supports window scanning, ordered merging and uniform start selection.
pub mod markov_model;

/// Observation list of a single prefix.
pub mod state;

/// Raw text or file acquisition.
pub mod text_source;
