/*
 * error.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Error types for the remapping engine.

use thiserror::Error;

use crate::range::Range;

/// Malformed stage data, or a translation request the data cannot satisfy.
///
/// None of these are recoverable inside the engine: they describe a bug in
/// whatever built the tables, and are surfaced as soon as they are seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A range was built with its endpoints reversed.
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange { start: u64, end: u64 },

    /// A `(start, length)` pair with a length of zero.
    #[error("range starting at {start} has zero length")]
    EmptyRange { start: u64 },

    /// A mapping entry with a length of zero.
    #[error(
        "mapping entry has non-positive length (destination start = {destination_start}, source start = {source_start})"
    )]
    NonPositiveLength {
        destination_start: u64,
        source_start: u64,
    },

    /// `start + length - 1` does not fit in the value domain.
    #[error("range starting at {start} with length {length} overflows the value domain")]
    Overflow { start: u64, length: u64 },

    /// Two entries of one table claim the same input value.
    #[error("source ranges {first} and {second} overlap")]
    OverlappingEntries { first: Range, second: Range },

    /// A gap-filled table was asked to translate a range it does not cover.
    #[error("table does not cover {range}: no entry claims {uncovered}")]
    IncompleteCoverage { range: Range, uncovered: u64 },

    /// Two stages registered under the same name.
    #[error("stage '{0}' is defined more than once")]
    DuplicateStage(String),

    /// A pipeline names a stage the catalog does not hold.
    #[error("pipeline references unknown stage '{0}'")]
    UnknownStage(String),

    /// Any of the above, raised while building or running a named stage.
    #[error("stage '{stage}': {source}")]
    InStage {
        stage: String,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Attach the name of the stage that raised this error.
    pub fn in_stage(self, stage: impl Into<String>) -> Self {
        match self {
            // Keep the innermost stage name
            DomainError::InStage { .. } => self,
            other => DomainError::InStage {
                stage: stage.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error without any stage context.
    pub fn root(&self) -> &DomainError {
        match self {
            DomainError::InStage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors reported by the aggregation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Neither seed values nor seed ranges were supplied.
    #[error("no seed values or seed ranges were supplied")]
    EmptyInput,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stage_wraps_once() {
        let err = DomainError::UnknownStage("x".to_string())
            .in_stage("seed-to-soil")
            .in_stage("outer");

        assert_eq!(
            err.to_string(),
            "stage 'seed-to-soil': pipeline references unknown stage 'x'"
        );
        assert_eq!(err.root(), &DomainError::UnknownStage("x".to_string()));
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: EngineError = DomainError::Overflow {
            start: u64::MAX,
            length: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "range starting at 18446744073709551615 with length 2 overflows the value domain"
        );
    }
}
