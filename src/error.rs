//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, empty registries, degenerate
//! distributions, and mismatched grids in merges.
//!
//! The enum is `Clone + PartialEq` so a failed distribution build can be
//! cached by the costmap's one-time initialization guard and replayed to
//! later callers.
use thiserror::Error;

use crate::grid::GridMetadata;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no cost functions registered")]
    NoCostFunctions,

    #[error("degenerate distribution: combined grid has zero probability mass")]
    DegenerateDistribution,

    #[error("grid metadata mismatch in merge: expected {expected:?}, found {found:?}")]
    GridMismatch {
        expected: GridMetadata,
        found: GridMetadata,
    },
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::InvalidConfig(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::InvalidConfig(value.to_owned())
    }
}
