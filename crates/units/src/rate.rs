use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

use crate::area::Area;
use crate::time::Time;

/// A fractional growth rate (dimensionless change per unit time).
///
/// Base unit is "per day". A value of 0.52 means a feature grows by 52% of
/// its current size over one day.
///
/// # Examples
///
/// ```rust
/// use units::{GrowthRate, Time};
///
/// // Doubling every day
/// let rate = GrowthRate::from_per_day(1.0);
/// let t = std::f64::consts::LN_2 / rate;
/// assert!((t.to_days() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GrowthRate(f64); // Base unit: 1/day

impl GrowthRate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_per_day(value: f64) -> Self {
        Self(value)
    }

    pub fn to_per_day(&self) -> f64 {
        self.0
    }

    /// Continuous-time e-folding rate (per day) equivalent to this fractional
    /// per-day rate: ln(1 + r·1day).
    pub fn continuous_per_day(&self) -> f64 {
        (self.0 + 1.0).ln()
    }
}

/// A number of e-folds divided by a growth rate is the time the growth
/// takes at the equivalent continuous rate.
impl Div<GrowthRate> for f64 {
    type Output = Time;

    fn div(self, rhs: GrowthRate) -> Time {
        Time::from_days(self / rhs.continuous_per_day())
    }
}

/// A linear area rate (area per unit time), base unit MSH per day.
///
/// Used for the linear decay law of starspots.
///
/// # Examples
///
/// ```rust
/// use units::{Area, AreaRate, Time};
///
/// let decay = AreaRate::from_msh_per_day(10.89);
/// let lost = decay.integrate(Time::from_days(2.0));
/// assert!((lost.to_msh() - 21.78).abs() < 1e-9);
///
/// let lifetime = Area::from_msh(108.9) / decay;
/// assert!((lifetime.to_days() - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AreaRate(f64); // Base unit: MSH/day

impl AreaRate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_msh_per_day(value: f64) -> Self {
        Self(value)
    }

    pub fn to_msh_per_day(&self) -> f64 {
        self.0
    }

    /// Integrates the rate over a duration.
    pub fn integrate(&self, duration: Time) -> Area {
        Area::from_msh(self.0 * duration.to_days())
    }
}

impl Mul<f64> for AreaRate {
    type Output = AreaRate;

    fn mul(self, rhs: f64) -> AreaRate {
        AreaRate(self.0 * rhs)
    }
}

/// Area divided by an area rate is the time to accumulate (or lose) it.
impl Div<AreaRate> for Area {
    type Output = Time;

    fn div(self, rhs: AreaRate) -> Time {
        Time::from_days(self.to_msh() / rhs.0)
    }
}
