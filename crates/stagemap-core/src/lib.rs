//! Staged interval remapping.
//!
//! This crate maps sets of integer ranges through an ordered list of named
//! stages. Each stage is a sparse table of disjoint source-range to
//! destination-range entries; values no entry claims pass through unchanged.
//! Ranges are split only at entry boundaries, so inputs far too large to
//! enumerate are handled in time proportional to the number of pieces.
//!
//! # Overview
//!
//! - [`RangeTable`] / [`Stage`]: sorted, validated entries of one stage
//! - [`fill_gaps`]: completes a table with identity entries up to a bound
//! - [`translate_range`]: maps one range through one gap-filled table
//! - [`Pipeline`]: applies stages in [`PipelineSpec`] order, point or range mode
//! - [`resolve_minimum`] / [`resolve_minimum_over_ranges`]: the smallest
//!   reachable final value
//!
//! # Example
//!
//! ```rust
//! use stagemap_core::*;
//!
//! let catalog = StageCatalog::from_stages([
//!     Stage::from_triples("seed-to-soil", [(50, 98, 2), (52, 50, 48)]).unwrap(),
//! ])
//! .unwrap();
//! let pipeline = Pipeline::new(&PipelineSpec::from_names(["seed-to-soil"]), &catalog).unwrap();
//!
//! let seeds = [Range::from_start_len(79, 14).unwrap()];
//! assert_eq!(resolve_minimum_over_ranges(&seeds, &pipeline), Ok(81));
//! ```

pub mod aggregate;
pub mod catalog;
pub mod entry;
pub mod error;
pub mod gap;
pub mod pipeline;
pub mod range;
pub mod table;
pub mod translate;

pub use aggregate::{resolve_minimum, resolve_minimum_over_ranges};
pub use catalog::StageCatalog;
pub use entry::MappingEntry;
pub use error::{DomainError, EngineError};
pub use gap::{GapFilledTable, fill_gaps};
pub use pipeline::{
    ALMANAC_STAGES, EngineOptions, Pipeline, PipelineSpec, PipelineTrace, StageStep,
};
pub use range::Range;
pub use table::{RangeTable, Stage};
pub use translate::translate_range;
