/*
 * entry.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! One source-range to destination-range translation rule.

use serde::Serialize;

use crate::error::{DomainError, Result};
use crate::range::Range;

/// Maps every value of `source` to the value at the same position in
/// `destination`. Both ranges have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MappingEntry {
    source: Range,
    destination: Range,
}

impl MappingEntry {
    /// Build an entry from a `(destination start, source start, length)`
    /// triple, the order almanac lines use.
    pub fn from_triple(destination_start: u64, source_start: u64, length: u64) -> Result<Self> {
        if length == 0 {
            return Err(DomainError::NonPositiveLength {
                destination_start,
                source_start,
            });
        }
        Ok(Self {
            source: Range::from_start_len(source_start, length)?,
            destination: Range::from_start_len(destination_start, length)?,
        })
    }

    /// An entry passing `range` through unchanged.
    pub fn identity(range: Range) -> Self {
        Self {
            source: range,
            destination: range,
        }
    }

    pub fn source(&self) -> Range {
        self.source
    }

    pub fn destination(&self) -> Range {
        self.destination
    }

    /// `destination.start - source.start`.
    pub fn offset(&self) -> i128 {
        i128::from(self.destination.start()) - i128::from(self.source.start())
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.destination
    }

    /// Translate one value, or `None` when the entry does not claim it.
    pub fn translate(&self, value: u64) -> Option<u64> {
        self.source
            .contains(value)
            .then(|| self.destination.start() + (value - self.source.start()))
    }

    /// Translate the part of `range` this entry claims.
    ///
    /// The result stays inside `destination`, so it cannot overflow.
    pub fn translate_overlap(&self, range: &Range) -> Option<Range> {
        let overlap = self.source.intersection(range)?;
        let start = self.destination.start() + (overlap.start() - self.source.start());
        let end = self.destination.start() + (overlap.end() - self.source.start());
        Some(Range::from_ordered(start, end))
    }
}
