use log::debug;
use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_distr::{Distribution, LogNormal, Normal, Poisson};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use units::{Angle, Area, Length, Time};

use super::StarSpot;
use crate::config::{
    AREA_OVER_UMBRA_AREA_STD, DEFAULT_AREA_OVER_UMBRA_AREA, SOLAR_SPOT_LATITUDE_MEAN_DEG,
    SOLAR_SPOT_LATITUDE_STD_DEG, SpotGeneratorParams,
};
use crate::coordinate_grid::SurfaceGrid;
use crate::error::SpotError;

/// Where on the surface new spots appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotDistribution {
    /// Two bands at ±15° (σ = 5°), as on the Sun.
    Solar,
    /// Uniform over the sphere.
    Iso,
}

impl FromStr for SpotDistribution {
    type Err = SpotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar" => Ok(SpotDistribution::Solar),
            "iso" => Ok(SpotDistribution::Iso),
            other => Err(SpotError::UnknownDistribution(other.to_string())),
        }
    }
}

impl fmt::Display for SpotDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotDistribution::Solar => write!(f, "solar"),
            SpotDistribution::Iso => write!(f, "iso"),
        }
    }
}

/// Draws new spots at a rate that keeps the surface near a target coverage.
///
/// Peak areas follow a lognormal distribution with median `mean_area`. Each
/// generator owns its random number generator, so a seeded generator always
/// produces the same population.
#[derive(Debug, Clone)]
pub struct SpotGenerator {
    params: SpotGeneratorParams,
    grid: Arc<SurfaceGrid>,
    rng: ChaChaRng,
}

impl SpotGenerator {
    pub fn new(
        params: SpotGeneratorParams,
        grid: Arc<SurfaceGrid>,
        rng: ChaChaRng,
    ) -> Result<Self, SpotError> {
        validate(&params)?;
        Ok(Self { params, grid, rng })
    }

    /// A generator that never births spots.
    pub fn off(grid: Arc<SurfaceGrid>, rng: ChaChaRng) -> Self {
        Self {
            params: SpotGeneratorParams::off(),
            grid,
            rng,
        }
    }

    pub fn params(&self) -> &SpotGeneratorParams {
        &self.params
    }

    pub fn grid(&self) -> &Arc<SurfaceGrid> {
        &self.grid
    }

    /// Grid that newly generated spots are bound to.
    pub fn set_grid(&mut self, grid: Arc<SurfaceGrid>) {
        self.grid = grid;
    }

    /// True when spots never decay.
    pub fn is_static(&self) -> bool {
        self.params.decay_rate.to_msh_per_day() == 0.0
    }

    /// True when spots never reach their peak and so never decay.
    fn is_stalled(&self) -> bool {
        self.params.growth_rate.continuous_per_day() == 0.0
    }

    /// Lifetime of a spot that peaks at `mean_area`: exponential growth from
    /// the birth area at the rate `StarSpot::age` uses, plus linear decay
    /// back to zero.
    pub fn mean_lifetime(&self) -> Time {
        if self.is_static() || self.is_stalled() {
            return Time::infinite();
        }
        let p = &self.params;
        let decay_time = p.mean_area / p.decay_rate;
        let growth_time = (p.mean_area / p.init_area).ln() / p.growth_rate;
        decay_time + growth_time
    }

    /// Time-averaged area of a spot that peaks at `mean_area`.
    ///
    /// Stalled spots keep their birth area forever.
    pub fn mean_area(&self) -> Area {
        if self.is_static() {
            return self.params.mean_area;
        }
        if self.is_stalled() {
            return self.params.init_area;
        }
        let p = &self.params;
        let peak = p.mean_area.to_msh();
        let growth = (peak - p.init_area.to_msh()) / p.growth_rate.continuous_per_day();
        let decay = peak * peak / (2.0 * p.decay_rate.to_msh_per_day());
        Area::from_msh((growth + decay) / self.mean_lifetime().to_days())
    }

    /// Expected number of spots born during `dt` on a star of radius
    /// `star_radius`.
    pub fn expected_births(&self, dt: Time, star_radius: Length) -> f64 {
        let covered = Area::sphere(star_radius) * self.params.coverage;
        let n_expected = covered / self.mean_area() * (dt / self.mean_lifetime());
        if n_expected.is_finite() && n_expected > 0.0 {
            n_expected
        } else {
            0.0
        }
    }

    /// Draw `n` spot centres from the configured distribution.
    pub fn get_coordinates(&mut self, n: usize) -> Result<(Vec<Angle>, Vec<Angle>), SpotError> {
        let mut lats = Vec::with_capacity(n);
        let mut lons = Vec::with_capacity(n);
        match self.params.distribution {
            SpotDistribution::Solar => {
                let band = Normal::new(SOLAR_SPOT_LATITUDE_MEAN_DEG, SOLAR_SPOT_LATITUDE_STD_DEG)
                    .map_err(|e| invalid("latitude distribution", e))?;
                for _ in 0..n {
                    let hemisphere = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let lat = band.sample(&mut self.rng) * hemisphere;
                    let lon = self.rng.random::<f64>() * 360.0;
                    lats.push(Angle::from_degrees(lat));
                    lons.push(Angle::from_degrees(lon));
                }
            }
            SpotDistribution::Iso => {
                for _ in 0..n {
                    let lon = self.rng.random::<f64>() * 360.0;
                    // inverse transform sampling of the cos(lat) Jacobian
                    let x: f64 = self.rng.random();
                    lats.push(Angle::from_radians((2.0 * x - 1.0).asin()));
                    lons.push(Angle::from_degrees(lon));
                }
            }
        }
        Ok((lats, lons))
    }

    /// Create `n` newly born spots.
    pub fn generate_spots(&mut self, n: usize) -> Result<Vec<StarSpot>, SpotError> {
        let p = &self.params;
        let peak_area = LogNormal::new(p.mean_area.to_msh().ln(), p.area_logsigma)
            .map_err(|e| invalid("area_logsigma", e))?;
        let area_ratio = Normal::new(DEFAULT_AREA_OVER_UMBRA_AREA, AREA_OVER_UMBRA_AREA_STD)
            .map_err(|e| invalid("area ratio distribution", e))?;

        let mut area_max = Vec::with_capacity(n);
        let mut ratios = Vec::with_capacity(n);
        for _ in 0..n {
            area_max.push(Area::from_msh(peak_area.sample(&mut self.rng)));
            let mut ratio = area_ratio.sample(&mut self.rng);
            while ratio <= 0.0 {
                ratio = area_ratio.sample(&mut self.rng);
            }
            ratios.push(ratio);
        }
        let (lats, lons) = self.get_coordinates(n)?;

        let p = &self.params;
        lats.into_iter()
            .zip(lons)
            .zip(area_max.into_iter().zip(ratios))
            .map(|((lat, lon), (area_max, ratio))| {
                StarSpot::new(
                    lat,
                    lon,
                    area_max,
                    p.init_area,
                    p.umbra_teff,
                    p.penumbra_teff,
                    self.grid.clone(),
                )
                .with_growth_rate(p.growth_rate)
                .with_decay_rate(p.decay_rate)
                .with_area_over_umbra_area(ratio)
            })
            .collect()
    }

    /// Spots born during `dt`; the count is a Poisson draw around
    /// [`SpotGenerator::expected_births`].
    pub fn birth_spots(&mut self, dt: Time, star_radius: Length) -> Result<Vec<StarSpot>, SpotError> {
        let n_expected = self.expected_births(dt, star_radius);
        if n_expected == 0.0 {
            return Ok(Vec::new());
        }
        let poisson = Poisson::new(n_expected).map_err(|e| invalid("birth rate", e))?;
        let n = poisson.sample(&mut self.rng) as usize;
        if n > 0 {
            debug!("birthing {n} spots (expected {n_expected:.2})");
        }
        self.generate_spots(n)
    }

    /// A population of spots at random points in their lives that together
    /// subtend `coverage` of the sphere.
    ///
    /// Static spots get a uniform area between the birth area and their
    /// peak. Stalled spots keep their birth area. Evolving spots are aged by
    /// a uniform fraction of the mean lifetime.
    pub fn generate_mature_spots(
        &mut self,
        coverage: f64,
        star_radius: Length,
    ) -> Result<Vec<StarSpot>, SpotError> {
        if !(0.0..=1.0).contains(&coverage) {
            return Err(SpotError::CoverageOutOfRange(coverage));
        }
        let target = 4.0 * PI * coverage;
        let mut solid_angle = 0.0;
        let mut spots = Vec::new();
        while solid_angle < target {
            let Some(mut spot) = self.generate_spots(1)?.pop() else {
                break;
            };
            if self.is_static() {
                let init = self.params.init_area;
                let u: f64 = self.rng.random();
                spot.set_area_current((spot.area_max() - init) * u + init);
            } else if !self.is_stalled() {
                let u: f64 = self.rng.random();
                spot.age(self.mean_lifetime() * u);
            }
            let radius = spot.angular_radius(star_radius).to_radians();
            solid_angle += PI * radius * radius;
            spots.push(spot);
        }
        debug!(
            "generated {} mature spots covering {:.3} sr",
            spots.len(),
            solid_angle
        );
        Ok(spots)
    }
}

fn invalid(name: &'static str, err: impl fmt::Display) -> SpotError {
    SpotError::InvalidParameter {
        name,
        reason: err.to_string(),
    }
}

fn validate(params: &SpotGeneratorParams) -> Result<(), SpotError> {
    if !(0.0..=1.0).contains(&params.coverage) {
        return Err(SpotError::CoverageOutOfRange(params.coverage));
    }
    let positive = |name: &'static str, value: f64| {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(SpotError::InvalidParameter {
                name,
                reason: format!("must be positive and finite, got {value}"),
            })
        }
    };
    let non_negative = |name: &'static str, value: f64| {
        if value >= 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(SpotError::InvalidParameter {
                name,
                reason: format!("must be non-negative and finite, got {value}"),
            })
        }
    };
    positive("mean_area", params.mean_area.to_msh())?;
    positive("init_area", params.init_area.to_msh())?;
    non_negative("area_logsigma", params.area_logsigma)?;
    non_negative("growth_rate", params.growth_rate.to_per_day())?;
    non_negative("decay_rate", params.decay_rate.to_msh_per_day())?;
    Ok(())
}
