/*
 * pipeline.rs
 * Copyright (c) 2026 Posit, PBC
 *
 * Ordered composition of stages.
 */

//! Ordered composition of stages.
//!
//! A [`Pipeline`] resolves a [`PipelineSpec`] against a [`StageCatalog`]
//! once, then runs values through every stage in order:
//!
//! - **Point mode** folds [`RangeTable::lookup`](crate::RangeTable::lookup)
//!   over the stages for one scalar at a time.
//! - **Range mode** gap-fills each stage up to the largest endpoint entering
//!   it and translates the whole list of ranges, one stage after another.
//!
//! Within a stage the ranges are independent of each other. With
//! [`EngineOptions::parallel`] set, large lists are translated on the rayon
//! pool and joined before the next stage starts.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::StageCatalog;
use crate::error::{DomainError, Result};
use crate::range::Range;
use crate::table::Stage;
use crate::translate::translate_range;

/// The stage order of a standard almanac, from seeds to locations.
pub const ALMANAC_STAGES: [&str; 7] = [
    "seed-to-soil",
    "soil-to-fertilizer",
    "fertilizer-to-water",
    "water-to-light",
    "light-to-temperature",
    "temperature-to-humidity",
    "humidity-to-location",
];

/// Ordered stage names, from the initial domain to the final one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSpec {
    names: Vec<String>,
}

impl PipelineSpec {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The seven standard almanac stages.
    pub fn almanac() -> Self {
        Self::from_names(ALMANAC_STAGES)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Tuning knobs that never change results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineOptions {
    /// Fan translation out over the rayon pool.
    pub parallel: bool,
    /// Smallest number of inputs worth fanning out.
    pub parallel_threshold: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 64,
        }
    }
}

impl EngineOptions {
    pub(crate) fn fans_out(&self, inputs: usize) -> bool {
        self.parallel && inputs >= self.parallel_threshold.max(1)
    }
}

/// What one stage did to the range list, as recorded by [`Pipeline::trace_ranges`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStep {
    pub stage: String,
    /// Bound the stage was gap-filled to; `None` when no ranges entered it.
    pub required_max: Option<u64>,
    pub output: Vec<Range>,
}

/// Every intermediate range list of one range-mode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineTrace {
    pub input: Vec<Range>,
    pub steps: Vec<StageStep>,
}

impl PipelineTrace {
    /// Ranges leaving the last stage.
    pub fn output(&self) -> &[Range] {
        self.steps
            .last()
            .map_or(self.input.as_slice(), |step| step.output.as_slice())
    }
}

impl fmt::Display for PipelineTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input: {}", join_ranges(&self.input))?;
        for step in &self.steps {
            match step.required_max {
                Some(max) => write!(f, "{} (max {}): ", step.stage, max)?,
                None => write!(f, "{}: ", step.stage)?,
            }
            writeln!(f, "{}", join_ranges(&step.output))?;
        }
        Ok(())
    }
}

fn join_ranges(ranges: &[Range]) -> String {
    if ranges.is_empty() {
        return "(none)".to_string();
    }
    ranges
        .iter()
        .map(Range::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A resolved, ready-to-run sequence of stages.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    stages: Vec<&'a Stage>,
    options: EngineOptions,
}

impl<'a> Pipeline<'a> {
    /// Resolve every name of `spec` in `catalog`.
    pub fn new(spec: &PipelineSpec, catalog: &'a StageCatalog) -> Result<Self> {
        let stages = spec
            .names()
            .iter()
            .map(|name| {
                catalog
                    .get(name)
                    .ok_or_else(|| DomainError::UnknownStage(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            stages,
            options: EngineOptions::default(),
        })
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name())
    }

    /// Point mode: look `value` up in every stage in turn.
    pub fn run_point(&self, value: u64) -> u64 {
        self.stages
            .iter()
            .fold(value, |current, stage| stage.lookup(current))
    }

    /// Range mode: translate `ranges` through every stage in turn.
    ///
    /// Input ranges may overlap and need not be sorted. The output holds,
    /// for each input range in order, its pieces in ascending source order.
    pub fn run_ranges(&self, ranges: Vec<Range>) -> Result<Vec<Range>> {
        self.stages.iter().try_fold(ranges, |current, stage| {
            self.step(stage, &current).map(|(_, output)| output)
        })
    }

    /// Range mode, keeping every intermediate list.
    pub fn trace_ranges(&self, ranges: Vec<Range>) -> Result<PipelineTrace> {
        let mut steps: Vec<StageStep> = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let current = steps.last().map_or(ranges.as_slice(), |s| s.output.as_slice());
            let (required_max, output) = self.step(stage, current)?;
            steps.push(StageStep {
                stage: stage.name().to_string(),
                required_max,
                output,
            });
        }
        Ok(PipelineTrace {
            input: ranges,
            steps,
        })
    }

    /// Gap-fill `stage` for `ranges` and translate each of them.
    fn step(&self, stage: &Stage, ranges: &[Range]) -> Result<(Option<u64>, Vec<Range>)> {
        let Some(required_max) = ranges.iter().map(Range::end).max() else {
            return Ok((None, Vec::new()));
        };
        let filled = stage.table().gap_filled(required_max);

        let translated: Result<Vec<Vec<Range>>> = if self.options.fans_out(ranges.len()) {
            ranges
                .par_iter()
                .map(|range| translate_range(*range, &filled))
                .collect()
        } else {
            ranges
                .iter()
                .map(|range| translate_range(*range, &filled))
                .collect()
        };
        let translated = translated.map_err(|err| err.in_stage(stage.name()))?;

        let output: Vec<Range> = translated.into_iter().flatten().collect();
        tracing::debug!(
            stage = stage.name(),
            required_max,
            fillers = filled.filler_count(stage.table()),
            ranges_in = ranges.len(),
            ranges_out = output.len(),
            "translated stage"
        );
        Ok((Some(required_max), output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RangeTable;

    fn range(start: u64, end: u64) -> Range {
        Range::new(start, end).unwrap()
    }

    fn two_stage_catalog() -> StageCatalog {
        StageCatalog::from_stages([
            Stage::from_triples("a-to-b", [(100, 0, 10)]).unwrap(),
            Stage::from_triples("b-to-c", [(0, 105, 10)]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let catalog = two_stage_catalog();
        let spec = PipelineSpec::from_names(["a-to-b", "c-to-d"]);
        let err = Pipeline::new(&spec, &catalog).unwrap_err();
        assert_eq!(err, DomainError::UnknownStage("c-to-d".to_string()));
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let catalog = StageCatalog::new();
        let pipeline = Pipeline::new(&PipelineSpec::default(), &catalog).unwrap();
        assert_eq!(pipeline.run_point(7), 7);
        assert_eq!(
            pipeline.run_ranges(vec![range(3, 9)]).unwrap(),
            vec![range(3, 9)]
        );
    }

    #[test]
    fn test_run_point_follows_spec_order() {
        let catalog = two_stage_catalog();
        let forward = Pipeline::new(&PipelineSpec::from_names(["a-to-b", "b-to-c"]), &catalog)
            .unwrap();
        let backward = Pipeline::new(&PipelineSpec::from_names(["b-to-c", "a-to-b"]), &catalog)
            .unwrap();

        assert_eq!(forward.run_point(7), 2);
        assert_eq!(backward.run_point(7), 107);
    }

    #[test]
    fn test_run_ranges_grows_the_bound_per_stage() {
        // The first stage pushes values above anything the input contained.
        let catalog = two_stage_catalog();
        let pipeline =
            Pipeline::new(&PipelineSpec::from_names(["a-to-b", "b-to-c"]), &catalog).unwrap();
        let trace = pipeline.trace_ranges(vec![range(0, 12)]).unwrap();

        assert_eq!(trace.steps[0].required_max, Some(12));
        assert_eq!(trace.steps[0].output, vec![range(100, 109), range(10, 12)]);
        assert_eq!(trace.steps[1].required_max, Some(109));
        assert_eq!(
            trace.output(),
            &[range(100, 104), range(0, 4), range(10, 12)]
        );
    }

    #[test]
    fn test_no_ranges_in_no_ranges_out() {
        let catalog = two_stage_catalog();
        let pipeline =
            Pipeline::new(&PipelineSpec::from_names(["a-to-b", "b-to-c"]), &catalog).unwrap();
        assert!(pipeline.run_ranges(Vec::new()).unwrap().is_empty());

        let trace = pipeline.trace_ranges(Vec::new()).unwrap();
        assert_eq!(trace.steps[1].required_max, None);
        assert_eq!(trace.to_string(), "input: (none)\na-to-b: (none)\nb-to-c: (none)\n");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = StageCatalog::from_stages([Stage::new(
            "scatter",
            RangeTable::from_triples((0..50).map(|i| (1000 - i * 10, i * 10, 10))).unwrap(),
        )])
        .unwrap();
        let spec = PipelineSpec::from_names(["scatter"]);
        let inputs: Vec<Range> = (0..200).map(|i| range(i * 3, i * 3 + 17)).collect();

        let sequential = Pipeline::new(&spec, &catalog).unwrap();
        let parallel = Pipeline::new(&spec, &catalog).unwrap().with_options(EngineOptions {
            parallel: true,
            parallel_threshold: 8,
        });

        assert_eq!(
            sequential.run_ranges(inputs.clone()).unwrap(),
            parallel.run_ranges(inputs).unwrap()
        );
    }

    #[test]
    fn test_fans_out_only_above_threshold() {
        let options = EngineOptions {
            parallel: true,
            parallel_threshold: 4,
        };
        assert!(!options.fans_out(3));
        assert!(options.fans_out(4));
        assert!(!EngineOptions::default().fans_out(1_000));
    }
}
