//! Stellar photosphere surface-feature engine.
//!
//! Samples a star's surface on a grid, evolves a stochastic population of
//! starspots on it, composes the spots (and externally supplied faculae)
//! into a temperature map, and integrates that map over the visible disk,
//! including the part hidden by a transiting planet.

pub mod config;
pub mod coordinate_grid;
pub mod error;
pub mod geometry;
pub mod helpers;
pub mod processes;
pub mod spots;
pub mod star;

#[cfg(test)]
mod geometry_test;
#[cfg(test)]
mod helpers_test;
#[cfg(test)]
mod star_test;

// Re-export grid types
pub use coordinate_grid::{GridParams, RectangularGrid, Resample, SpiralGrid, SurfaceGrid};

// Re-export spot types
pub use spots::{SpotCollection, SpotDistribution, SpotFootprint, SpotGenerator, StarSpot};

// Re-export the engine
pub use star::{CoverageReport, Star};

pub use config::{SpotGeneratorParams, StarParams};
pub use error::{GridError, PhotosphereError, SpotError};
pub use geometry::{SubObserver, TransitGeometry};
pub use helpers::{TeffBin, round_teff};
pub use processes::{
    FaculaOverlay, FaculaPopulation, FaculaRegion, FlareSource, Granulation, NoFaculae, NoFlares,
    UniformGranulation,
};
