//! Almanac reader for stagemap.
//!
//! Turns almanac text into the typed data the remapping engine consumes:
//! seed values, seed ranges, one [`Stage`](stagemap_core::Stage) per map
//! block, and the stage order the file implies. Malformed text is reported
//! as a [`ParseError`] and never reaches the engine.
//!
//! # Example
//!
//! ```rust
//! use stagemap_almanac::Almanac;
//! use stagemap_core::{Pipeline, resolve_minimum};
//!
//! let almanac: Almanac = "seeds: 3 12\n\nseed-to-soil map:\n0 10 5\n".parse().unwrap();
//! let spec = almanac.pipeline_spec().unwrap();
//! let pipeline = Pipeline::new(&spec, almanac.catalog()).unwrap();
//! assert_eq!(resolve_minimum(almanac.seeds(), &pipeline), Ok(2));
//! ```

pub mod error;
pub mod reader;

pub use error::ParseError;
pub use reader::{Almanac, MapHeader};
