/*
 * aggregate.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! End-to-end entry points: the minimum value reachable after every stage.

use rayon::prelude::*;

use crate::error::EngineError;
use crate::pipeline::Pipeline;
use crate::range::Range;

/// Point mode: run every seed through `pipeline` and return the smallest
/// final value.
pub fn resolve_minimum(seeds: &[u64], pipeline: &Pipeline<'_>) -> Result<u64, EngineError> {
    let minimum = if pipeline.options().fans_out(seeds.len()) {
        seeds
            .par_iter()
            .map(|&seed| pipeline.run_point(seed))
            .min()
    } else {
        seeds.iter().map(|&seed| pipeline.run_point(seed)).min()
    };
    let minimum = minimum.ok_or(EngineError::EmptyInput)?;
    tracing::debug!(seeds = seeds.len(), minimum, "resolved point mode");
    Ok(minimum)
}

/// Range mode: run every seed range through `pipeline` and return the
/// smallest start among the resulting ranges.
///
/// Seed ranges may overlap and need not be sorted.
pub fn resolve_minimum_over_ranges(
    seed_ranges: &[Range],
    pipeline: &Pipeline<'_>,
) -> Result<u64, EngineError> {
    if seed_ranges.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    let output = pipeline.run_ranges(seed_ranges.to_vec())?;
    let minimum = output
        .iter()
        .map(Range::start)
        .min()
        .ok_or(EngineError::EmptyInput)?;
    tracing::debug!(
        seed_ranges = seed_ranges.len(),
        output_ranges = output.len(),
        minimum,
        "resolved range mode"
    );
    Ok(minimum)
}
