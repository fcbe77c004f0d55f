//! `stagemap trace`: every intermediate range list of a range-mode run

use anyhow::Result;
use stagemap_core::PipelineTrace;

use super::{InputArgs, load};
use crate::config::StageMapConfig;

pub fn trace(args: &InputArgs, config: &StageMapConfig) -> Result<PipelineTrace> {
    let loaded = load(args, config)?;
    let pipeline = loaded.pipeline()?;
    let seed_ranges = loaded.almanac.seed_ranges()?;
    Ok(pipeline.trace_ranges(seed_ranges)?)
}

pub fn render(trace: &PipelineTrace, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(trace)?)
    } else {
        Ok(trace.to_string().trim_end().to_string())
    }
}

pub fn execute(args: &InputArgs, config: &StageMapConfig) -> Result<()> {
    let trace = trace(args, config)?;
    println!("{}", render(&trace, args.json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::input_with;

    #[test]
    fn test_trace_text() {
        let (_temp, args) = input_with("seeds: 8 4\n\na-to-b map:\n0 10 5\n\nb-to-c map:\n100 0 2\n");
        let trace = trace(&args, &StageMapConfig::default()).unwrap();
        assert_eq!(
            render(&trace, false).unwrap(),
            "input: [8, 11]\na-to-b (max 11): [8, 9] [0, 1]\nb-to-c (max 9): [8, 9] [100, 101]"
        );
    }

    #[test]
    fn test_trace_json() {
        let (_temp, args) = input_with("seeds: 8 4\n\na-to-b map:\n0 10 5\n");
        let trace = trace(&args, &StageMapConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&trace, true).unwrap()).unwrap();
        assert_eq!(value["steps"][0]["stage"], "a-to-b");
        assert_eq!(value["steps"][0]["required_max"], 11);
        assert_eq!(value["steps"][0]["output"][1]["start"], 0);
    }
}
