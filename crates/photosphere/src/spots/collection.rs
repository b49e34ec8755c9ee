use log::debug;
use ndarray::{Array2, Zip};
use std::sync::Arc;
use units::{Length, Temperature, Time};

use super::StarSpot;
use crate::coordinate_grid::SurfaceGrid;
use crate::error::GridError;

/// An ordered population of spots sharing one surface grid.
#[derive(Debug, Clone)]
pub struct SpotCollection {
    spots: Vec<StarSpot>,
    grid: Arc<SurfaceGrid>,
}

impl SpotCollection {
    pub fn new(grid: Arc<SurfaceGrid>) -> Self {
        Self {
            spots: Vec::new(),
            grid,
        }
    }

    /// Build a collection from existing spots, rebinding each one to `grid`.
    pub fn from_spots(spots: Vec<StarSpot>, grid: Arc<SurfaceGrid>) -> Self {
        let mut collection = Self { spots, grid: grid.clone() };
        collection.set_grid(grid);
        collection
    }

    pub fn grid(&self) -> &Arc<SurfaceGrid> {
        &self.grid
    }

    pub fn spots(&self) -> &[StarSpot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Replace the grid and recompute every member's footprint.
    pub fn set_grid(&mut self, grid: Arc<SurfaceGrid>) {
        for spot in &mut self.spots {
            spot.set_grid(grid.clone());
        }
        self.grid = grid;
    }

    /// Append a spot.
    ///
    /// The spot keeps the footprint it was built with; it is not recomputed
    /// here. A spot built on a different grid is rejected instead.
    pub fn add_spot(&mut self, spot: StarSpot) -> Result<(), GridError> {
        if !self.grid.try_eq(spot.grid())? {
            return Err(GridError::GridMismatch {
                expected: self.grid.shape(),
                got: spot.grid().shape(),
            });
        }
        self.spots.push(spot);
        Ok(())
    }

    /// Append several spots, stopping at the first one on a foreign grid.
    pub fn add_spots<I>(&mut self, spots: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = StarSpot>,
    {
        for spot in spots {
            self.add_spot(spot)?;
        }
        Ok(())
    }

    /// Drop spots that have finished decaying, keeping the rest in order.
    pub fn clean_spotlist(&mut self) {
        let before = self.spots.len();
        self.spots.retain(|spot| !spot.is_dead());
        let removed = before - self.spots.len();
        if removed > 0 {
            debug!("removed {removed} dead spots, {} remain", self.spots.len());
        }
    }

    /// Age every spot by `dt`, then prune the dead ones.
    pub fn age(&mut self, dt: Time) {
        for spot in &mut self.spots {
            spot.age(dt);
        }
        self.clean_spotlist();
    }

    /// Composite temperature map of all spots over a uniform `star_teff`.
    ///
    /// Each spot paints its umbra and penumbra. Where spots overlap the
    /// coolest region wins, so the result does not depend on spot order.
    pub fn map_pixels(&self, star_radius: Length, star_teff: Temperature) -> Array2<Temperature> {
        let mut surface = self.grid.filled(star_teff);
        for spot in &self.spots {
            let footprint = spot.map_pixels(star_radius);
            let umbra_teff = spot.teff_umbra();
            let penumbra_teff = spot.teff_penumbra();
            Zip::from(&mut surface)
                .and(&footprint.umbra)
                .and(&footprint.penumbra)
                .for_each(|teff, &umbra, &penumbra| {
                    let region = if umbra {
                        umbra_teff
                    } else if penumbra {
                        penumbra_teff
                    } else {
                        return;
                    };
                    if region < *teff {
                        *teff = region;
                    }
                });
        }
        surface
    }

    /// Area-weighted fraction of the surface covered by any spot.
    pub fn coverage(&self, star_radius: Length) -> f64 {
        let pristine = Temperature::from_kelvin(f64::INFINITY);
        let surface = self.map_pixels(star_radius, pristine);
        let area = self.grid.area();
        let total = area.sum();
        if total <= 0.0 {
            return 0.0;
        }
        let covered: f64 = Zip::from(&surface)
            .and(&area)
            .fold(0.0, |acc, teff, &w| if teff.is_finite() { acc + w } else { acc });
        covered / total
    }
}
