/*
 * gap.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Gap filling: completing a table with identity entries.
//!
//! Range translation needs every input value claimed by exactly one entry.
//! [`fill_gaps`] inserts identity entries before the first entry, between
//! non-adjacent entries and after the last entry, so the source ranges form
//! a contiguous partition starting at zero and reaching at least
//! `required_max`.
//!
//! Entries that already extend past `required_max` are kept as they are:
//! filling never shortens or drops a real entry. The covered span is then
//! `[0, coverage_end]` with `coverage_end >= required_max`.

use serde::Serialize;

use crate::entry::MappingEntry;
use crate::range::Range;
use crate::table::RangeTable;

/// A table whose source ranges partition `[0, coverage_end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapFilledTable {
    entries: Vec<MappingEntry>,
    required_max: u64,
}

impl GapFilledTable {
    /// Entries in ascending source order, identity fillers included.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// The bound this table was filled for.
    pub fn required_max(&self) -> u64 {
        self.required_max
    }

    /// Last value claimed by any entry. Never below `required_max`.
    pub fn coverage_end(&self) -> u64 {
        self.entries
            .last()
            .map_or(self.required_max, |entry| entry.source().end())
    }

    /// Whether every value of `range` is claimed by an entry.
    pub fn covers(&self, range: &Range) -> bool {
        range.end() <= self.coverage_end()
    }

    /// Number of identity entries inserted by filling.
    pub fn filler_count(&self, original: &RangeTable) -> usize {
        self.entries.len() - original.len()
    }

    /// Wrap a table without filling it, to exercise coverage checks.
    #[cfg(test)]
    pub(crate) fn from_table_unchecked(table: RangeTable, required_max: u64) -> Self {
        Self {
            entries: table.entries().to_vec(),
            required_max,
        }
    }

    /// Drop the bound and keep the entries as a plain table.
    pub fn into_table(self) -> RangeTable {
        RangeTable::from_sorted(self.entries)
    }
}

/// Fill every gap of `table` below `required_max` with identity entries.
///
/// The result is recomputed from scratch; a table that already covers
/// `[0, required_max]` comes back unchanged.
pub fn fill_gaps(table: &RangeTable, required_max: u64) -> GapFilledTable {
    let mut entries = Vec::with_capacity(table.len() * 2 + 1);
    // First value not yet claimed; `None` once `u64::MAX` is claimed.
    let mut cursor = Some(0u64);

    for entry in table.entries() {
        let source = entry.source();
        if let Some(next) = cursor.filter(|&next| source.start() > next) {
            entries.push(MappingEntry::identity(Range::from_ordered(
                next,
                source.start() - 1,
            )));
        }
        entries.push(*entry);
        cursor = source.end().checked_add(1);
    }

    if let Some(next) = cursor.filter(|&next| next <= required_max) {
        entries.push(MappingEntry::identity(Range::from_ordered(
            next,
            required_max,
        )));
    }

    GapFilledTable {
        entries,
        required_max,
    }
}

impl RangeTable {
    /// See [`fill_gaps`].
    pub fn gap_filled(&self, required_max: u64) -> GapFilledTable {
        fill_gaps(self, required_max)
    }
}
