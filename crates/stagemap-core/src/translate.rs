/*
 * translate.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Mapping one input range through one gap-filled table.
//!
//! The input is cut at every entry boundary it crosses and each piece is
//! shifted by its entry's offset. No individual value is ever visited, so
//! the cost is proportional to the number of entries the range touches,
//! not to its length.

use crate::error::{DomainError, Result};
use crate::gap::GapFilledTable;
use crate::range::Range;

/// Translate `input` through `table`.
///
/// Output ranges follow the table's entry order, which is also the order in
/// which they cover `input`. Their lengths always sum to `input.len()`.
///
/// Fails with [`DomainError::IncompleteCoverage`] if some value of `input`
/// is claimed by no entry.
pub fn translate_range(input: Range, table: &GapFilledTable) -> Result<Vec<Range>> {
    let entries = table.entries();
    // Skip entries that end before the input starts.
    let first = entries.partition_point(|entry| entry.source().end() < input.start());

    let mut output = Vec::new();
    // Next input value that still has to be claimed; `None` past `u64::MAX`.
    let mut expected = Some(input.start());

    for entry in &entries[first..] {
        let Some(next) = expected else { break };
        if next > input.end() || entry.source().start() > input.end() {
            break;
        }
        if entry.source().start() > next {
            return Err(DomainError::IncompleteCoverage {
                range: input,
                uncovered: next,
            });
        }
        let Some(piece) = entry.translate_overlap(&input) else {
            continue;
        };
        tracing::trace!(
            input = %input,
            source = %entry.source(),
            output = %piece,
            "split"
        );
        output.push(piece);
        expected = entry.source().end().min(input.end()).checked_add(1);
    }

    match expected {
        Some(next) if next <= input.end() => Err(DomainError::IncompleteCoverage {
            range: input,
            uncovered: next,
        }),
        _ => Ok(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RangeTable;

    fn range(start: u64, end: u64) -> Range {
        Range::new(start, end).unwrap()
    }

    fn total_len(ranges: &[Range]) -> u128 {
        ranges.iter().map(Range::len).sum()
    }

    #[test]
    fn test_range_inside_one_entry() {
        let table = RangeTable::from_triples([(50, 98, 2), (52, 50, 48)])
            .unwrap()
            .gap_filled(92);
        let output = translate_range(range(79, 92), &table).unwrap();
        assert_eq!(output, vec![range(81, 94)]);
    }

    #[test]
    fn test_range_spanning_several_entries() {
        // light-to-temperature
        let table = RangeTable::from_triples([(45, 77, 23), (81, 45, 19), (68, 64, 13)])
            .unwrap()
            .gap_filled(87);
        let output = translate_range(range(74, 87), &table).unwrap();
        assert_eq!(output, vec![range(78, 80), range(45, 55)]);
        assert_eq!(total_len(&output), 14);
    }

    #[test]
    fn test_range_through_identity_fillers() {
        let table = RangeTable::from_triples([(100, 10, 5)])
            .unwrap()
            .gap_filled(30);
        let output = translate_range(range(5, 20), &table).unwrap();
        assert_eq!(output, vec![range(5, 9), range(100, 104), range(15, 20)]);
    }

    #[test]
    fn test_range_straddling_an_entry_boundary() {
        let table = RangeTable::from_triples([(500, 0, 10), (200, 10, 10)])
            .unwrap()
            .gap_filled(19);
        let output = translate_range(range(9, 10), &table).unwrap();
        assert_eq!(output, vec![range(509, 509), range(200, 200)]);
    }

    #[test]
    fn test_straddle_into_adjacent_destinations_still_splits() {
        let table = RangeTable::from_triples([(500, 0, 10), (510, 10, 10)])
            .unwrap()
            .gap_filled(19);
        let output = translate_range(range(5, 14), &table).unwrap();
        assert_eq!(output, vec![range(505, 509), range(510, 514)]);
    }

    #[test]
    fn test_single_value_range() {
        let table = RangeTable::from_triples([(0, 69, 1), (1, 0, 69)])
            .unwrap()
            .gap_filled(69);
        assert_eq!(
            translate_range(Range::point(69), &table).unwrap(),
            vec![Range::point(0)]
        );
    }

    #[test]
    fn test_input_past_coverage_is_rejected() {
        let table = RangeTable::empty().gap_filled(10);
        assert_eq!(
            translate_range(range(5, 12), &table),
            Err(DomainError::IncompleteCoverage {
                range: range(5, 12),
                uncovered: 11,
            })
        );
    }

    #[test]
    fn test_table_with_holes_is_rejected() {
        // An unfilled table, wrapped as if it had been filled.
        let holes = RangeTable::from_triples([(0, 0, 5), (50, 10, 5)]).unwrap();
        let unfilled = GapFilledTable::from_table_unchecked(holes, 14);
        assert_eq!(
            translate_range(range(3, 12), &unfilled),
            Err(DomainError::IncompleteCoverage {
                range: range(3, 12),
                uncovered: 5,
            })
        );
    }

    #[test]
    fn test_top_of_the_value_domain() {
        let table = RangeTable::from_triples([(0, u64::MAX - 1, 2)])
            .unwrap()
            .gap_filled(u64::MAX);
        let output = translate_range(range(u64::MAX - 2, u64::MAX), &table).unwrap();
        assert_eq!(output, vec![Range::point(u64::MAX - 2), range(0, 1)]);
    }
}
