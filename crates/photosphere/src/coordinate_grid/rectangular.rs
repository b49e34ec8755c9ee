use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use units::Angle;

use super::{Resample, normalized};
use crate::error::GridError;

/// Evenly spaced latitude/longitude grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectangularGrid {
    nlat: usize,
    nlon: usize,
}

impl RectangularGrid {
    pub fn new(nlat: usize, nlon: usize) -> Result<Self, GridError> {
        if nlat < 2 || nlon < 1 {
            return Err(GridError::InvalidDimensions { nlat, nlon });
        }
        Ok(Self { nlat, nlon })
    }

    pub fn nlat(&self) -> usize {
        self.nlat
    }

    pub fn nlon(&self) -> usize {
        self.nlon
    }

    /// `(nlon, nlat)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nlon, self.nlat)
    }

    /// Latitude spacing, 180°/(nlat − 1).
    pub fn dlat(&self) -> Angle {
        Angle::from_degrees(180.0 / (self.nlat - 1) as f64)
    }

    /// Longitude spacing, 360°/nlon.
    pub fn dlon(&self) -> Angle {
        Angle::from_degrees(360.0 / self.nlon as f64)
    }

    fn lat_degrees(&self) -> Array1<f64> {
        Array1::linspace(-90.0, 90.0, self.nlat)
    }

    fn lon_degrees(&self) -> Array1<f64> {
        let step = 360.0 / self.nlon as f64;
        Array1::from_shape_fn(self.nlon, |i| i as f64 * step)
    }

    pub fn oned(&self) -> (Array1<Angle>, Array1<Angle>) {
        (
            self.lat_degrees().mapv(Angle::from_degrees),
            self.lon_degrees().mapv(Angle::from_degrees),
        )
    }

    pub fn grid(&self) -> (Array2<Angle>, Array2<Angle>) {
        let (lats, lons) = self.oned();
        let lat = Array2::from_shape_fn(self.shape(), |(_, j)| lats[j]);
        let lon = Array2::from_shape_fn(self.shape(), |(i, _)| lons[i]);
        (lat, lon)
    }

    /// Weights ∝ sin(lat + 90°): each row of pixels near a pole covers less
    /// of the sphere than one at the equator.
    pub fn area(&self) -> Array2<f64> {
        let lats = self.lat_degrees();
        let weights =
            Array2::from_shape_fn(self.shape(), |(_, j)| (lats[j] + 90.0).to_radians().sin());
        normalized(weights)
    }

    /// Index of the latitude row nearest `lat_deg`.
    fn nearest_lat(&self, lat_deg: f64) -> usize {
        let step = 180.0 / (self.nlat - 1) as f64;
        (((lat_deg + 90.0) / step).round().max(0.0) as usize).min(self.nlat - 1)
    }

    /// Index of the longitude column nearest `lon_deg`.
    fn nearest_lon(&self, lon_deg: f64) -> usize {
        let step = 360.0 / self.nlon as f64;
        ((lon_deg.rem_euclid(360.0) / step).round() as usize) % self.nlon
    }
}

impl Resample for RectangularGrid {
    fn display_grid(
        &self,
        nlat: usize,
        nlon: usize,
        data: &Array2<f64>,
    ) -> Result<(Array1<Angle>, Array1<Angle>, Array2<f64>), GridError> {
        if data.dim() != self.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.shape(),
                got: data.dim(),
            });
        }
        let target = RectangularGrid::new(nlat, nlon)?;
        let lats = target.lat_degrees();
        let lons = target.lon_degrees();
        let resampled = Array2::from_shape_fn(target.shape(), |(i, j)| {
            data[[self.nearest_lon(lons[i]), self.nearest_lat(lats[j])]]
        });
        let (lat_axis, lon_axis) = target.oned();
        Ok((lat_axis, lon_axis, resampled))
    }
}
