use std::{io, path::PathBuf};

use thiserror::Error;

use crate::gym::Pos;

/// Errors raised while reading a map
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map file `{}`: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed map at line {line}, column {column}: {reason}")]
    Malformed {
        /// 1-based line in the source
        line: usize,
        /// 1-based position of the value within its line
        column: usize,
        reason: Malformed,
    },

    #[error("map contains no cells")]
    Empty,
}

/// Why a map line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("`{0}` is not a cell kind (expected 0-4)")]
    InvalidCell(String),

    #[error("row has {found} cells, expected {expected}")]
    RaggedRow { expected: usize, found: usize },

    #[error("second start cell, the first one is at {first:?}")]
    DuplicateStart { first: Pos },
}

/// A grid or table could not be sized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot allocate table of {width}x{height}x{depth} entries")]
pub struct AllocationError {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

/// Errors raised while training
#[derive(Error, Debug)]
pub enum TrainError {
    #[error("episode {episode} did not reach the objective within {steps} steps")]
    DidNotConverge { episode: u32, steps: u64 },

    #[error("failed to render frame: {0}")]
    Render(#[from] io::Error),
}

/// Errors raised while building a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for `{name}`: {value} is not in the interval [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("`episodes` must be at least 1")]
    NoEpisodes,

    #[error("invalid epsilon schedule: {0}")]
    Schedule(&'static str),

    #[error("failed to read config file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
