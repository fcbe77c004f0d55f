/*
 * reader.rs
 * Copyright (c) 2026 Posit, PBC
 *
 * Almanac text reader.
 */

//! Almanac text reader.
//!
//! An almanac is a sequence of blocks separated by blank lines. The first
//! block lists the seeds; every later block is a map:
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! ```
//!
//! Map lines are `destination start, source start, length` triples. Each map
//! becomes one [`Stage`] named after its header.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use stagemap_core::{PipelineSpec, Range, Stage, StageCatalog};

use crate::error::{ParseError, Result};

static MAP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<source>[A-Za-z0-9_]+)-to-(?P<destination>[A-Za-z0-9_]+) map:$").unwrap()
});

/// The header of one map block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHeader {
    /// Stage name, e.g. `seed-to-soil`.
    pub name: String,
    /// Category the map reads from, e.g. `seed`.
    pub source: String,
    /// Category the map writes to, e.g. `soil`.
    pub destination: String,
    /// Line of the header.
    pub line: usize,
}

/// A parsed almanac: seed values and one stage per map block.
#[derive(Debug, Clone)]
pub struct Almanac {
    seeds: Vec<u64>,
    maps: Vec<MapHeader>,
    catalog: StageCatalog,
}

impl Almanac {
    pub fn parse(input: &str) -> Result<Self> {
        let mut blocks = blocks(input).into_iter();
        let seed_block = blocks.next().ok_or(ParseError::Empty)?;
        let seeds = parse_seeds(&seed_block)?;

        let mut maps = Vec::new();
        let mut catalog = StageCatalog::new();
        for block in blocks {
            let (header, stage) = parse_map(&block)?;
            catalog.insert(stage).map_err(|source| ParseError::Stage {
                line: header.line,
                source,
            })?;
            maps.push(header);
        }

        tracing::debug!(seeds = seeds.len(), maps = maps.len(), "parsed almanac");
        Ok(Self {
            seeds,
            maps,
            catalog,
        })
    }

    /// Seed values, as listed.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// Seed values read as consecutive `(start, length)` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Range>> {
        if self.seeds.len() % 2 != 0 {
            return Err(ParseError::OddSeedPairs {
                count: self.seeds.len(),
            });
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| {
                let (start, length) = (pair[0], pair[1]);
                Range::from_start_len(start, length).map_err(|source| {
                    ParseError::InvalidSeedRange {
                        start,
                        length,
                        source,
                    }
                })
            })
            .collect()
    }

    /// Map headers in file order.
    pub fn maps(&self) -> &[MapHeader] {
        &self.maps
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// The stage order given by the file, checked to form one chain of
    /// categories (`a-to-b` must be followed by `b-to-...`).
    pub fn pipeline_spec(&self) -> Result<PipelineSpec> {
        for pair in self.maps.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if previous.destination != next.source {
                return Err(ParseError::BrokenChain {
                    line: next.line,
                    name: next.name.clone(),
                    previous: previous.name.clone(),
                });
            }
        }
        Ok(PipelineSpec::from_names(
            self.maps.iter().map(|map| map.name.clone()),
        ))
    }
}

impl FromStr for Almanac {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}

/// Numbered, non-blank lines grouped into blank-line separated blocks.
fn blocks(input: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((index + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_seeds(block: &[(usize, &str)]) -> Result<Vec<u64>> {
    let (line, first) = block[0];
    let Some(listed) = first.strip_prefix("seeds:") else {
        return Err(ParseError::MissingSeeds {
            line,
            found: first.to_string(),
        });
    };

    // Long seed lists may wrap onto following lines of the block.
    let mut seeds = parse_numbers(line, listed)?;
    for &(line, text) in &block[1..] {
        seeds.extend(parse_numbers(line, text)?);
    }
    Ok(seeds)
}

fn parse_map(block: &[(usize, &str)]) -> Result<(MapHeader, Stage)> {
    let (line, text) = block[0];
    let captures = MAP_HEADER
        .captures(text)
        .ok_or_else(|| ParseError::InvalidHeader {
            line,
            found: text.to_string(),
        })?;
    let header = MapHeader {
        name: text.trim_end_matches(" map:").to_string(),
        source: captures["source"].to_string(),
        destination: captures["destination"].to_string(),
        line,
    };

    let triples = block[1..]
        .iter()
        .map(|&(line, text)| match parse_numbers(line, text)?.as_slice() {
            &[destination, source, length] => Ok((destination, source, length)),
            other => Err(ParseError::InvalidEntry {
                line,
                found: other.len(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let stage = Stage::from_triples(header.name.clone(), triples)
        .map_err(|source| ParseError::Stage { line, source })?;
    Ok((header, stage))
}

fn parse_numbers(line: usize, text: &str) -> Result<Vec<u64>> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| ParseError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}
