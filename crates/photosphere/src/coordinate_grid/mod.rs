//! Sampling grids on the stellar sphere.
//!
//! Two layouts share one read-only contract:
//!
//! - [`RectangularGrid`]: evenly spaced latitudes (−90°..+90° inclusive) and
//!   longitudes (0°..360°, upper bound excluded), stored as `(nlon, nlat)`.
//! - [`SpiralGrid`]: a Fibonacci lattice of `n` nearly equal-area points,
//!   stored as a single `(n, 1)` column.
//!
//! Per-pixel weights from [`SurfaceGrid::area`] sum to one and must be used
//! for every disk or coverage integral. Only the rectangular layout can be
//! resampled onto a fixed display shape; callers ask for that capability
//! with [`SurfaceGrid::resampler`].

mod rectangular;
mod spiral;


pub use rectangular::RectangularGrid;
pub use spiral::SpiralGrid;

use ndarray::{Array1, Array2, Zip};
use serde::{Deserialize, Serialize};
use units::Angle;

use crate::error::GridError;

/// How a grid is requested in configuration.
///
/// A bare integer asks for a spiral grid with that many points; a pair asks
/// for a rectangular `[nlat, nlon]` grid. Floating-point values are rejected
/// when deserialising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridParams {
    Points(usize),
    Rectangular(usize, usize),
}

impl Default for GridParams {
    fn default() -> Self {
        GridParams::Rectangular(500, 1000)
    }
}

/// Resampling of grid data onto a rectangular display grid.
pub trait Resample {
    /// Nearest-neighbour resample of `data` (shaped like this grid) onto an
    /// `nlat × nlon` rectangular grid. Returns the target latitudes,
    /// longitudes and data shaped `(nlon, nlat)`.
    fn display_grid(
        &self,
        nlat: usize,
        nlon: usize,
        data: &Array2<f64>,
    ) -> Result<(Array1<Angle>, Array1<Angle>, Array2<f64>), GridError>;
}

/// A sampling of the stellar sphere.
#[derive(Debug, Clone)]
pub enum SurfaceGrid {
    Rectangular(RectangularGrid),
    Spiral(SpiralGrid),
}

impl SurfaceGrid {
    pub fn new(params: GridParams) -> Result<Self, GridError> {
        match params {
            GridParams::Points(n) => Self::spiral(n),
            GridParams::Rectangular(nlat, nlon) => Self::rectangular(nlat, nlon),
        }
    }

    pub fn rectangular(nlat: usize, nlon: usize) -> Result<Self, GridError> {
        RectangularGrid::new(nlat, nlon).map(SurfaceGrid::Rectangular)
    }

    pub fn spiral(n_points: usize) -> Result<Self, GridError> {
        SpiralGrid::new(n_points).map(SurfaceGrid::Spiral)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceGrid::Rectangular(_) => "rectangular",
            SurfaceGrid::Spiral(_) => "spiral",
        }
    }

    /// Shape of every per-pixel array on this grid.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            SurfaceGrid::Rectangular(g) => g.shape(),
            SurfaceGrid::Spiral(g) => g.shape(),
        }
    }

    pub fn n_pixels(&self) -> usize {
        let (a, b) = self.shape();
        a * b
    }

    /// One-dimensional latitude and longitude samples.
    ///
    /// For the rectangular grid these are the two axes; for the spiral grid
    /// they are the coordinates of each point.
    pub fn oned(&self) -> (Array1<Angle>, Array1<Angle>) {
        match self {
            SurfaceGrid::Rectangular(g) => g.oned(),
            SurfaceGrid::Spiral(g) => g.oned(),
        }
    }

    /// Latitude and longitude of every pixel.
    pub fn grid(&self) -> (Array2<Angle>, Array2<Angle>) {
        match self {
            SurfaceGrid::Rectangular(g) => g.grid(),
            SurfaceGrid::Spiral(g) => g.grid(),
        }
    }

    /// Pixel coordinates in radians, for inner loops.
    pub(crate) fn grid_radians(&self) -> (Array2<f64>, Array2<f64>) {
        let (lat, lon) = self.grid();
        (lat.mapv(|a| a.to_radians()), lon.mapv(|a| a.to_radians()))
    }

    /// A zero-filled `f32` array shaped like the grid.
    pub fn zeros(&self) -> Array2<f32> {
        Array2::zeros(self.shape())
    }

    /// An array shaped like the grid filled with `value`.
    pub fn filled<A: Clone>(&self, value: A) -> Array2<A> {
        Array2::from_elem(self.shape(), value)
    }

    /// Normalised solid-angle weight of each pixel (sums to one).
    pub fn area(&self) -> Array2<f64> {
        match self {
            SurfaceGrid::Rectangular(g) => g.area(),
            SurfaceGrid::Spiral(g) => g.area(),
        }
    }

    /// μ, the cosine of each pixel's angular distance from the sub-observer
    /// point. Negative values lie on the far hemisphere.
    pub fn cos_angle_from_disk_center(&self, lat0: Angle, lon0: Angle) -> Array2<f64> {
        let (lat, lon) = self.grid_radians();
        let (sin0, cos0) = lat0.to_radians().sin_cos();
        let lon0 = lon0.to_radians();
        Zip::from(&lat)
            .and(&lon)
            .map_collect(|&lat, &lon| sin0 * lat.sin() + cos0 * lat.cos() * (lon0 - lon).cos())
    }

    /// Compare two grids.
    ///
    /// Grids of the same layout are equal when their dimensions match.
    /// Comparing different layouts is a type mismatch rather than `false`.
    pub fn try_eq(&self, other: &SurfaceGrid) -> Result<bool, GridError> {
        match (self, other) {
            (SurfaceGrid::Rectangular(a), SurfaceGrid::Rectangular(b)) => Ok(a == b),
            (SurfaceGrid::Spiral(a), SurfaceGrid::Spiral(b)) => Ok(a == b),
            _ => Err(GridError::TypeMismatch {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }

    /// The resampling capability, present only for layouts that support it.
    pub fn resampler(&self) -> Option<&dyn Resample> {
        match self {
            SurfaceGrid::Rectangular(g) => Some(g),
            SurfaceGrid::Spiral(_) => None,
        }
    }
}

impl From<RectangularGrid> for SurfaceGrid {
    fn from(grid: RectangularGrid) -> Self {
        SurfaceGrid::Rectangular(grid)
    }
}

impl From<SpiralGrid> for SurfaceGrid {
    fn from(grid: SpiralGrid) -> Self {
        SurfaceGrid::Spiral(grid)
    }
}

/// Normalise a weight array so it sums to one.
pub(crate) fn normalized(weights: Array2<f64>) -> Array2<f64> {
    let total = weights.sum();
    if total > 0.0 { weights / total } else { weights }
}
