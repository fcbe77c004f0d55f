//! Command implementations

pub mod resolve;
pub mod trace;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use stagemap_almanac::Almanac;
use stagemap_core::{EngineOptions, Pipeline, PipelineSpec};

use crate::config::StageMapConfig;

/// Arguments shared by every command that reads an almanac.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Almanac file to read
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Configuration file (defaults to the nearest stagemap.yml above FILE)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stage order, overriding the config file and the order of maps in FILE
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub stages: Vec<String>,

    /// Translate ranges on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Print a JSON object instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// An almanac together with everything needed to run it.
pub struct Loaded {
    pub almanac: Almanac,
    pub spec: PipelineSpec,
    pub options: EngineOptions,
}

impl Loaded {
    pub fn pipeline(&self) -> Result<Pipeline<'_>> {
        Ok(Pipeline::new(&self.spec, self.almanac.catalog())?.with_options(self.options))
    }
}

/// Read the almanac and settle the stage order and engine options.
///
/// Stage order comes from `--stages`, then the config file, then the order
/// of map blocks in the almanac.
pub fn load(args: &InputArgs, config: &StageMapConfig) -> Result<Loaded> {
    let almanac = read_almanac(&args.input)?;

    let spec = if !args.stages.is_empty() {
        PipelineSpec::from_names(args.stages.iter().cloned())
    } else if let Some(spec) = config.pipeline_spec() {
        spec
    } else {
        almanac.pipeline_spec()?
    };

    let mut options = config.engine_options();
    options.parallel |= args.parallel;

    tracing::debug!(
        stages = spec.len(),
        parallel = options.parallel,
        "pipeline ready"
    );
    Ok(Loaded {
        almanac,
        spec,
        options,
    })
}

fn read_almanac(path: &Path) -> Result<Almanac> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read almanac: {}", path.display()))?;
    Almanac::parse(&content).with_context(|| format!("Failed to parse almanac: {}", path.display()))
}


#[cfg(test)]
mod tests {
    use super::test_support::{SAMPLE, input_with};
    use super::*;

    #[test]
    fn test_stage_order_defaults_to_file_order() {
        let (_temp, args) = input_with(SAMPLE);
        let loaded = load(&args, &StageMapConfig::default()).unwrap();
        assert_eq!(loaded.spec, PipelineSpec::almanac());
        assert!(!loaded.options.parallel);
    }

    #[test]
    fn test_cli_stages_override_config() {
        let (_temp, mut args) = input_with(SAMPLE);
        args.stages = vec!["seed-to-soil".to_string()];
        args.parallel = true;
        let config = StageMapConfig {
            pipeline: Some(vec!["soil-to-fertilizer".to_string()]),
            ..StageMapConfig::default()
        };

        let loaded = load(&args, &config).unwrap();
        assert_eq!(loaded.spec, PipelineSpec::from_names(["seed-to-soil"]));
        assert!(loaded.options.parallel);
    }

    #[test]
    fn test_unknown_stage_surfaces_when_building_the_pipeline() {
        let (_temp, mut args) = input_with(SAMPLE);
        args.stages = vec!["seed-to-sand".to_string()];
        let loaded = load(&args, &StageMapConfig::default()).unwrap();
        let err = loaded.pipeline().unwrap_err();
        assert_eq!(
            err.to_string(),
            "pipeline references unknown stage 'seed-to-sand'"
        );
    }

    #[test]
    fn test_parse_errors_name_the_file() {
        let (_temp, args) = input_with("seeds: x");
        let err = load(&args, &StageMapConfig::default())
            .err()
            .expect("parse should fail");
        assert!(err.to_string().starts_with("Failed to parse almanac"));
        assert_eq!(err.root_cause().to_string(), "line 1: invalid number 'x'");
    }
}
