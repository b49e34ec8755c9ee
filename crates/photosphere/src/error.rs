//! Error types for grid construction and spot population handling.

use thiserror::Error;

/// Errors raised while building or comparing surface grids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("rectangular grid needs nlat >= 2 and nlon >= 1, got nlat={nlat}, nlon={nlon}")]
    InvalidDimensions { nlat: usize, nlon: usize },
    #[error("spiral grid needs at least one point")]
    EmptySpiral,
    #[error("cannot compare a {left} grid with a {right} grid")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("spot was built on a {got:?} grid but the collection uses a {expected:?} grid")]
    GridMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("data of shape {got:?} does not match grid shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

/// Errors raised by spot generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpotError {
    #[error("unknown value {0:?} for distribution, expected \"solar\" or \"iso\"")]
    UnknownDistribution(String),
    #[error("coverage must be between 0 and 1, got {0}")]
    CoverageOutOfRange(f64),
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Any failure surfaced by the photosphere engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotosphereError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Spot(#[from] SpotError),
}
