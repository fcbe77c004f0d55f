/*
 * range.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Closed integer intervals.

use std::fmt;

use serde::Serialize;

use crate::error::{DomainError, Result};

/// A closed interval `[start, end]` over `u64`, with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Range {
    start: u64,
    end: u64,
}

// Never empty, so no `is_empty`
#[allow(clippy::len_without_is_empty)]
impl Range {
    /// Create the range `[start, end]`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Endpoints the caller has already ordered.
    pub(crate) fn from_ordered(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// The single-value range `[value, value]`.
    pub fn point(value: u64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// Create `[start, start + length - 1]` from a `(start, length)` pair.
    pub fn from_start_len(start: u64, length: u64) -> Result<Self> {
        if length == 0 {
            return Err(DomainError::EmptyRange { start });
        }
        let end = start
            .checked_add(length - 1)
            .ok_or(DomainError::Overflow { start, length })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of values in the range.
    ///
    /// `[0, u64::MAX]` holds one more value than `u64` can count, hence `u128`.
    pub fn len(&self) -> u128 {
        u128::from(self.end - self.start) + 1
    }

    pub fn contains(&self, value: u64) -> bool {
        self.start <= value && value <= self.end
    }

    /// The values shared by both ranges, if any.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Range { start, end })
    }

    /// Iterate every value of the range in ascending order.
    pub fn values(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
