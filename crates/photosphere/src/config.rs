//! Physical defaults and serialisable parameter sets.
//!
//! Defaults follow the sunspot literature: spots are born at 10 MSH, grow at
//! 52% per day and decay at 10.89 MSH per day. The ratio of total to umbral
//! area is drawn from N(5, 1) and solar-like spots cluster around ±15°
//! latitude.

use serde::{Deserialize, Serialize};
use units::{Area, AreaRate, GrowthRate, Length, Temperature, Time};

use crate::coordinate_grid::GridParams;
use crate::spots::SpotDistribution;

/// Area of a newly born spot, in MSH.
pub const STARSPOT_INITIAL_AREA_MSH: f64 = 10.0;
/// Fractional growth rate of a young spot, per day.
pub const STARSPOT_GROWTH_RATE_PER_DAY: f64 = 0.52;
/// Linear decay rate of a mature spot, in MSH per day.
pub const STARSPOT_DECAY_RATE_MSH_PER_DAY: f64 = 10.89;

pub const DEFAULT_AREA_OVER_UMBRA_AREA: f64 = 5.0;
pub const AREA_OVER_UMBRA_AREA_STD: f64 = 1.0;

/// Mean absolute latitude of solar-like spots, in degrees.
pub const SOLAR_SPOT_LATITUDE_MEAN_DEG: f64 = 15.0;
pub const SOLAR_SPOT_LATITUDE_STD_DEG: f64 = 5.0;

/// Parameters controlling the birth rate and properties of new spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotGeneratorParams {
    /// Median of the lognormal peak-area distribution.
    pub mean_area: Area,
    /// Standard deviation of the log of the peak area.
    pub area_logsigma: f64,
    pub umbra_teff: Temperature,
    pub penumbra_teff: Temperature,
    pub growth_rate: GrowthRate,
    pub decay_rate: AreaRate,
    pub init_area: Area,
    pub distribution: SpotDistribution,
    /// Target steady-state fraction of the surface covered by spots.
    pub coverage: f64,
}

impl Default for SpotGeneratorParams {
    fn default() -> Self {
        Self {
            mean_area: Area::from_msh(500.0),
            area_logsigma: 0.2,
            umbra_teff: Temperature::from_kelvin(2700.0),
            penumbra_teff: Temperature::from_kelvin(2600.0),
            growth_rate: GrowthRate::from_per_day(STARSPOT_GROWTH_RATE_PER_DAY),
            decay_rate: AreaRate::from_msh_per_day(STARSPOT_DECAY_RATE_MSH_PER_DAY),
            init_area: Area::from_msh(STARSPOT_INITIAL_AREA_MSH),
            distribution: SpotDistribution::Solar,
            coverage: 0.2,
        }
    }
}

impl SpotGeneratorParams {
    /// Parameters of a generator that never produces spots.
    pub fn off() -> Self {
        Self {
            mean_area: Area::from_msh(STARSPOT_INITIAL_AREA_MSH),
            area_logsigma: 1.0,
            umbra_teff: Temperature::zero(),
            penumbra_teff: Temperature::zero(),
            growth_rate: GrowthRate::zero(),
            decay_rate: AreaRate::zero(),
            init_area: Area::from_msh(STARSPOT_INITIAL_AREA_MSH),
            distribution: SpotDistribution::Iso,
            coverage: 0.0,
        }
    }
}

/// Bulk properties of the star and the grid its surface is sampled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarParams {
    pub teff: Temperature,
    pub radius: Length,
    pub period: Time,
    /// Quadratic limb-darkening coefficients.
    pub u1: f64,
    pub u2: f64,
    pub grid: GridParams,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            teff: Temperature::from_kelvin(3000.0),
            radius: Length::from_solar_radii(0.15),
            period: Time::from_days(10.0),
            u1: 0.0,
            u2: 0.0,
            grid: GridParams::default(),
        }
    }
}
