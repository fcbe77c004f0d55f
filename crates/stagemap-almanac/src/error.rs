/*
 * error.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Error types for reading almanac text.

use stagemap_core::DomainError;
use thiserror::Error;

/// Errors raised while turning almanac text into typed stage data.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input holds no non-blank lines.
    #[error("almanac is empty")]
    Empty,

    /// The first block does not start with `seeds:`.
    #[error("line {line}: expected a 'seeds:' line, found '{found}'")]
    MissingSeeds { line: usize, found: String },

    /// A token that is not an unsigned integer.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A block that does not open with a map header.
    #[error("line {line}: expected a '<source>-to-<destination> map:' header, found '{found}'")]
    InvalidHeader { line: usize, found: String },

    /// A map line without exactly three numbers.
    #[error(
        "line {line}: expected 3 numbers (destination start, source start, length), found {found}"
    )]
    InvalidEntry { line: usize, found: usize },

    /// Seeds read as `(start, length)` pairs, but one value is left over.
    #[error("seed list has an odd number of values ({count}); ranges need (start, length) pairs")]
    OddSeedPairs { count: usize },

    /// A seed pair that does not describe a non-empty range.
    #[error("seed pair ({start}, {length}): {source}")]
    InvalidSeedRange {
        start: u64,
        length: u64,
        #[source]
        source: DomainError,
    },

    /// Map blocks whose categories do not follow on from each other.
    #[error("line {line}: map '{name}' does not continue from map '{previous}'")]
    BrokenChain {
        line: usize,
        name: String,
        previous: String,
    },

    /// The entries of a map block were rejected by the engine.
    #[error("line {line}: {source}")]
    Stage {
        line: usize,
        #[source]
        source: DomainError,
    },
}

/// Result type for almanac reading.
pub type Result<T> = std::result::Result<T, ParseError>;
