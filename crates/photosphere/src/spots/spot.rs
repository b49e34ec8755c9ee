use log::warn;
use ndarray::{Array1, Array2, Zip};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use units::{Angle, Area, AreaRate, GrowthRate, Length, Temperature, Time};

use crate::config::{
    DEFAULT_AREA_OVER_UMBRA_AREA, STARSPOT_DECAY_RATE_MSH_PER_DAY, STARSPOT_GROWTH_RATE_PER_DAY,
};
use crate::coordinate_grid::SurfaceGrid;
use crate::error::SpotError;
use crate::geometry::{SubObserver, angle_between_radians};

/// Pixels covered by a spot's umbra and penumbra.
///
/// The penumbra mask includes the umbra.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotFootprint {
    pub umbra: Array2<bool>,
    pub penumbra: Array2<bool>,
}

/// A single magnetic starspot with a cool umbra and a warmer penumbra.
///
/// Spots grow exponentially from their birth area to `area_max`, then decay
/// linearly until they vanish:
///
/// ```text
/// A(t) = A0 · exp(τ t)          while growing, τ = ln(1 + growth_rate · 1 day)
/// A(t) = A_max − W (t − t_max)  once decaying, clamped at zero
/// ```
///
/// The angular distance from the spot centre to every grid pixel is cached
/// and recomputed whenever the grid is replaced through [`StarSpot::set_grid`].
#[derive(Debug, Clone)]
pub struct StarSpot {
    lat: Angle,
    lon: Angle,
    area_max: Area,
    area_current: Area,
    teff_umbra: Temperature,
    teff_penumbra: Temperature,
    area_over_umbra_area: f64,
    growth_rate: GrowthRate,
    decay_rate: AreaRate,
    is_growing: bool,
    grid: Arc<SurfaceGrid>,
    distance: Array2<f64>,
}

impl StarSpot {
    /// Create a growing spot with the default growth, decay and umbra ratio.
    ///
    /// # Arguments
    /// * `lat`, `lon` - Spot centre
    /// * `area_max` - Peak area reached at the end of the growth phase
    /// * `area_current` - Area right now (usually the birth area)
    /// * `teff_umbra`, `teff_penumbra` - Temperatures of the two regions
    /// * `grid` - Surface grid the footprint is computed on
    pub fn new(
        lat: Angle,
        lon: Angle,
        area_max: Area,
        area_current: Area,
        teff_umbra: Temperature,
        teff_penumbra: Temperature,
        grid: Arc<SurfaceGrid>,
    ) -> Self {
        let distance = distance_map(&grid, lat, lon);
        Self {
            lat,
            lon,
            area_max,
            area_current,
            teff_umbra,
            teff_penumbra,
            area_over_umbra_area: DEFAULT_AREA_OVER_UMBRA_AREA,
            growth_rate: GrowthRate::from_per_day(STARSPOT_GROWTH_RATE_PER_DAY),
            decay_rate: AreaRate::from_msh_per_day(STARSPOT_DECAY_RATE_MSH_PER_DAY),
            is_growing: true,
            grid,
            distance,
        }
    }

    pub fn with_growth_rate(mut self, growth_rate: GrowthRate) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: AreaRate) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_growing(mut self, is_growing: bool) -> Self {
        self.is_growing = is_growing;
        self
    }

    /// Set the ratio of total spot area to umbral area. Must be positive.
    pub fn with_area_over_umbra_area(mut self, ratio: f64) -> Result<Self, SpotError> {
        if !(ratio > 0.0 && ratio.is_finite()) {
            return Err(SpotError::InvalidParameter {
                name: "area_over_umbra_area",
                reason: format!("must be positive, got {ratio}"),
            });
        }
        self.area_over_umbra_area = ratio;
        Ok(self)
    }

    /// Rebind the spot to a new grid, recomputing its pixel distances.
    pub fn set_grid(&mut self, grid: Arc<SurfaceGrid>) {
        self.distance = distance_map(&grid, self.lat, self.lon);
        self.grid = grid;
    }

    pub fn set_area_current(&mut self, area: Area) {
        self.area_current = area.max(Area::zero());
    }

    pub fn lat(&self) -> Angle {
        self.lat
    }

    pub fn lon(&self) -> Angle {
        self.lon
    }

    pub fn area_max(&self) -> Area {
        self.area_max
    }

    pub fn area_current(&self) -> Area {
        self.area_current
    }

    pub fn teff_umbra(&self) -> Temperature {
        self.teff_umbra
    }

    pub fn teff_penumbra(&self) -> Temperature {
        self.teff_penumbra
    }

    pub fn area_over_umbra_area(&self) -> f64 {
        self.area_over_umbra_area
    }

    pub fn growth_rate(&self) -> GrowthRate {
        self.growth_rate
    }

    pub fn decay_rate(&self) -> AreaRate {
        self.decay_rate
    }

    pub fn is_growing(&self) -> bool {
        self.is_growing
    }

    pub fn grid(&self) -> &Arc<SurfaceGrid> {
        &self.grid
    }

    /// Angular distance (radians) from the spot centre to each pixel.
    pub fn distance(&self) -> &Array2<f64> {
        &self.distance
    }

    /// A spot is dead once it has stopped growing and has no area left.
    pub fn is_dead(&self) -> bool {
        self.area_current <= Area::zero() && !self.is_growing
    }

    /// Linear radius of a flat disk with the spot's current area.
    pub fn radius(&self) -> Length {
        Length::from_km((self.area_current.to_km2() / PI).sqrt())
    }

    /// Angular radius of the spot cap on a star of radius `star_radius`.
    ///
    /// A spherical cap of half-angle `a` has area `2πR²(1 − cos a)`.
    pub fn angular_radius(&self, star_radius: Length) -> Angle {
        let cos_angle = 1.0 - self.area_current.to_km2() / (2.0 * PI * star_radius.powi(2));
        if cos_angle < -1.0 {
            warn!(
                "spot area {:.0} exceeds the surface of a {:.3} R_sun star; clamping to the whole sphere",
                self.area_current,
                star_radius.to_solar_radii()
            );
        }
        Angle::from_radians(cos_angle.clamp(-1.0, 1.0).acos())
    }

    /// Pixels covered by the umbra and penumbra.
    pub fn map_pixels(&self, star_radius: Length) -> SpotFootprint {
        let radius = self.angular_radius(star_radius).to_radians();
        let radius_umbra = radius / self.area_over_umbra_area.sqrt();
        SpotFootprint {
            umbra: self.distance.mapv(|r| r < radius_umbra),
            penumbra: self.distance.mapv(|r| r < radius),
        }
    }

    /// Fraction of the visible disk covered by the spot, seen from `sub_obs`.
    ///
    /// Integrates chord lengths of the spot across the disk with the
    /// trapezoidal rule on `n_points` samples. Intended as a check on the
    /// grid-based coverage.
    pub fn surface_fraction(&self, sub_obs: SubObserver, star_radius: Length, n_points: usize) -> f64 {
        let c0 = angle_between_radians(
            sub_obs.lat.to_radians(),
            sub_obs.lon.to_radians(),
            self.lat.to_radians(),
            self.lon.to_radians(),
        );
        let a = self.angular_radius(star_radius).to_radians();
        let c = Array1::linspace(-0.5 * PI, 0.5 * PI, n_points.max(2));
        let integrand = c.mapv(|c| 2.0 * c.cos() * (a * a - (c - c0).powi(2)).max(0.0).sqrt());
        trapezoid(&integrand, &c) / (2.0 * PI)
    }

    /// Advance the spot's area by `dt`.
    ///
    /// Growth switches to decay once `area_max` is reached within the step;
    /// the remaining time is spent decaying from `area_max`. Area never goes
    /// below zero. A zero growth rate means the spot never finishes growing.
    pub fn age(&mut self, dt: Time) {
        // time does not run backwards for a spot
        if !(dt.to_days() > 0.0) {
            return;
        }

        if !self.is_growing {
            self.area_current = (self.area_current - self.decay_rate.integrate(dt)).max(Area::zero());
            return;
        }

        let tau = self.growth_rate.continuous_per_day();
        if tau == 0.0 || self.area_current <= Area::zero() {
            // Never reaches its peak, so never starts to decay.
            return;
        }
        let time_to_max = Time::from_days((self.area_max / self.area_current).ln() / tau);

        if time_to_max > dt {
            self.area_current = self.area_current * (tau * dt.to_days()).exp();
        } else {
            self.is_growing = false;
            let area_decay = self.decay_rate.integrate(dt - time_to_max);
            self.area_current = (self.area_max - area_decay).max(Area::zero());
        }
    }
}

impl fmt::Display for StarSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StarSpot with Teff = ({:.0},{:.0}), area = {:.0}, lat = {:.1}, lon = {:.1}",
            self.teff_umbra, self.teff_penumbra, self.area_current, self.lat, self.lon
        )
    }
}

fn distance_map(grid: &SurfaceGrid, lat: Angle, lon: Angle) -> Array2<f64> {
    let (lat0, lon0) = (lat.to_radians(), lon.to_radians());
    let (lats, lons) = grid.grid_radians();
    Zip::from(&lats)
        .and(&lons)
        .map_collect(|&lat, &lon| angle_between_radians(lat0, lon0, lat, lon))
}

fn trapezoid(y: &Array1<f64>, x: &Array1<f64>) -> f64 {
    y.windows(2)
        .into_iter()
        .zip(x.windows(2))
        .map(|(y, x)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}
