//! Surface processes the engine drives but does not model in detail.
//!
//! Faculae, granulation and flares are supplied by the caller through these
//! traits. The engine ages and births them in step with its spots and reads
//! back only what the composite map and the coverage table need.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use units::{Length, Temperature, Time};

use crate::coordinate_grid::SurfaceGrid;

/// Part of a facula seen on the surface grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaculaRegion {
    /// Hot walls of the magnetic depression.
    Wall,
    /// Cool floor at the bottom of the depression.
    Floor,
}

/// Temperature offset applied to the pixels of one facula region.
#[derive(Debug, Clone, PartialEq)]
pub struct FaculaOverlay {
    pub region: FaculaRegion,
    pub pixels: Array2<bool>,
    pub delta_teff: Temperature,
}

/// A population of faculae evolving alongside the spots.
pub trait FaculaPopulation: Debug {
    /// Add faculae born during `dt` on a star of radius `star_radius`.
    fn birth(&mut self, dt: Time, star_radius: Length);

    fn age(&mut self, dt: Time);

    /// Offsets to add to the composite map. Every mask must be shaped like
    /// `grid`.
    fn overlay(&self, grid: &SurfaceGrid, star_radius: Length) -> Vec<FaculaOverlay>;
}

/// Granulation: a fraction of the surface at a lower temperature.
pub trait Granulation: Debug {
    /// Fraction of every temperature bin that is covered by cool granulation
    /// lanes at `time`.
    fn coverage(&self, time: Time) -> f64;

    /// Temperature drop of the covered fraction.
    fn dteff(&self) -> Temperature;
}

/// Source of flare events. Advanced with the surface, not read by it.
pub trait FlareSource: Debug {
    fn advance(&mut self, dt: Time);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaculae;

impl FaculaPopulation for NoFaculae {
    fn birth(&mut self, _dt: Time, _star_radius: Length) {}

    fn age(&mut self, _dt: Time) {}

    fn overlay(&self, _grid: &SurfaceGrid, _star_radius: Length) -> Vec<FaculaOverlay> {
        Vec::new()
    }
}

/// Time-independent granulation coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformGranulation {
    pub coverage: f64,
    pub dteff: Temperature,
}

impl UniformGranulation {
    pub fn new(coverage: f64, dteff: Temperature) -> Self {
        Self { coverage, dteff }
    }

    /// Granulation that covers nothing.
    pub fn none() -> Self {
        Self::new(0.0, Temperature::zero())
    }
}

impl Default for UniformGranulation {
    fn default() -> Self {
        Self::none()
    }
}

impl Granulation for UniformGranulation {
    fn coverage(&self, _time: Time) -> f64 {
        self.coverage
    }

    fn dteff(&self) -> Temperature {
        self.dteff
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlares;

impl FlareSource for NoFlares {
    fn advance(&mut self, _dt: Time) {}
}
