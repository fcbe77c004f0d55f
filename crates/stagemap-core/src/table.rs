/*
 * table.rs
 * Copyright (c) 2026 Posit, PBC
 *
 * Validated per-stage lookup tables.
 */

//! Sparse, partial lookup tables and the named stages that own them.
//!
//! A [`RangeTable`] holds the entries of one translation step sorted by
//! source start, with no two source ranges overlapping. Values no entry
//! claims pass through [`RangeTable::lookup`] unchanged.

use serde::Serialize;

use crate::entry::MappingEntry;
use crate::error::{DomainError, Result};

/// Sorted, pairwise disjoint mapping entries of one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeTable {
    entries: Vec<MappingEntry>,
}

impl RangeTable {
    /// A table with no entries; every value maps to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(destination start, source start, length)` triples.
    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, u64, u64)>,
    {
        let entries = triples
            .into_iter()
            .map(|(destination_start, source_start, length)| {
                MappingEntry::from_triple(destination_start, source_start, length)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(entries)
    }

    /// Sort `entries` by source start and reject overlapping source ranges.
    pub fn from_entries(mut entries: Vec<MappingEntry>) -> Result<Self> {
        entries.sort_by_key(|entry| entry.source().start());

        for pair in entries.windows(2) {
            let (prev, next) = (pair[0].source(), pair[1].source());
            if next.start() <= prev.end() {
                return Err(DomainError::OverlappingEntries {
                    first: prev,
                    second: next,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Entries already known to be sorted and disjoint.
    pub(crate) fn from_sorted(entries: Vec<MappingEntry>) -> Self {
        debug_assert!(
            entries
                .windows(2)
                .all(|pair| pair[0].source().end() < pair[1].source().start())
        );
        Self { entries }
    }

    /// Translate one value, falling back to identity when no entry claims it.
    pub fn lookup(&self, value: u64) -> u64 {
        self.find(value)
            .and_then(|entry| entry.translate(value))
            .unwrap_or(value)
    }

    /// The entry whose source range contains `value`.
    pub fn find(&self, value: u64) -> Option<&MappingEntry> {
        // Entries starting at or before `value`; only the last can contain it.
        let candidates = self
            .entries
            .partition_point(|entry| entry.source().start() <= value);
        let entry = self.entries.get(candidates.checked_sub(1)?)?;
        entry.source().contains(value).then_some(entry)
    }

    /// Entries in ascending source order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named translation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    name: String,
    table: RangeTable,
}

impl Stage {
    pub fn new(name: impl Into<String>, table: RangeTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// Build a stage from raw triples, tagging any error with the stage name.
    pub fn from_triples<I>(name: impl Into<String>, triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u64, u64, u64)>,
    {
        let name = name.into();
        match RangeTable::from_triples(triples) {
            Ok(table) => Ok(Self { name, table }),
            Err(err) => Err(err.in_stage(name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn lookup(&self, value: u64) -> u64 {
        self.table.lookup(value)
    }
}
