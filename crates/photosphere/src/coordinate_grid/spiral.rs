use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use units::Angle;

use crate::error::GridError;

/// Fibonacci-lattice sampling: `n` points with (nearly) equal area each.
///
/// Point `i` sits at `sin(lat) = −1 + (2i + 1)/n`, so latitudes ascend
/// with the index, and longitudes advance by the golden angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpiralGrid {
    n_points: usize,
}

impl SpiralGrid {
    pub fn new(n_points: usize) -> Result<Self, GridError> {
        if n_points == 0 {
            return Err(GridError::EmptySpiral);
        }
        Ok(Self { n_points })
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// `(n_points, 1)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_points, 1)
    }

    /// Typical point spacing, √(4π/N).
    pub fn resolution(&self) -> Angle {
        Angle::from_radians((4.0 * PI / self.n_points as f64).sqrt())
    }

    pub fn oned(&self) -> (Array1<Angle>, Array1<Angle>) {
        let n = self.n_points as f64;
        let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
        let lat = Array1::from_shape_fn(self.n_points, |i| {
            Angle::from_radians((-1.0 + (2 * i + 1) as f64 / n).asin())
        });
        let lon = Array1::from_shape_fn(self.n_points, |i| {
            Angle::from_radians(i as f64 * golden_angle).wrapped()
        });
        (lat, lon)
    }

    pub fn grid(&self) -> (Array2<Angle>, Array2<Angle>) {
        let (lat, lon) = self.oned();
        let shape = self.shape();
        (
            Array2::from_shape_fn(shape, |(i, _)| lat[i]),
            Array2::from_shape_fn(shape, |(i, _)| lon[i]),
        )
    }

    pub fn area(&self) -> Array2<f64> {
        Array2::from_elem(self.shape(), 1.0 / self.n_points as f64)
    }
}
