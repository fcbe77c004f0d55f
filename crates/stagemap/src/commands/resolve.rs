//! `stagemap points` and `stagemap ranges`

use anyhow::Result;
use serde::Serialize;
use stagemap_core::{resolve_minimum, resolve_minimum_over_ranges};

use super::{InputArgs, load};
use crate::config::StageMapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Points,
    Ranges,
}

/// The answer of one run, as printed with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub mode: Mode,
    /// Seed values, or seed ranges, fed to the pipeline.
    pub inputs: usize,
    pub stages: Vec<String>,
    pub minimum: u64,
}

impl Resolution {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.minimum.to_string())
        }
    }
}

pub fn resolve(mode: Mode, args: &InputArgs, config: &StageMapConfig) -> Result<Resolution> {
    let loaded = load(args, config)?;
    let pipeline = loaded.pipeline()?;

    let (inputs, minimum) = match mode {
        Mode::Points => {
            let seeds = loaded.almanac.seeds();
            (seeds.len(), resolve_minimum(seeds, &pipeline)?)
        }
        Mode::Ranges => {
            let seed_ranges = loaded.almanac.seed_ranges()?;
            (
                seed_ranges.len(),
                resolve_minimum_over_ranges(&seed_ranges, &pipeline)?,
            )
        }
    };
    tracing::info!(?mode, inputs, minimum, "resolved");

    Ok(Resolution {
        mode,
        inputs,
        stages: pipeline.stage_names().map(str::to_string).collect(),
        minimum,
    })
}

pub fn execute(mode: Mode, args: &InputArgs, config: &StageMapConfig) -> Result<()> {
    let resolution = resolve(mode, args, config)?;
    println!("{}", resolution.render(args.json)?);
    Ok(())
}
