use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const AU_TO_KM: f64 = 1.495_978_707e8;

/// Nominal solar radius (IAU 2015 B3)
pub const SOLAR_RADIUS_KM: f64 = 695_700.0;
/// Nominal Earth equatorial radius
pub const EARTH_RADIUS_KM: f64 = 6_378.1;

/// A physical length quantity using f64 precision.
///
/// The base unit is the kilometre, which keeps stellar radii, planet radii
/// and spot sizes in a comfortable numeric range while orbit radii are still
/// exact to express in AU.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let star = Length::from_solar_radii(0.15);
/// let planet = Length::from_earth_radii(1.0);
/// let orbit = Length::from_au(0.05);
///
/// let radius_ratio = planet / star;
/// assert!(radius_ratio < 0.1);
/// assert!(orbit / star > 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: km

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value / 1_000.0)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value * AU_TO_KM)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_KM)
    }

    /// Creates a new `Length` from a value in Earth radii.
    pub fn from_earth_radii(value: f64) -> Self {
        Self(value * EARTH_RADIUS_KM)
    }

    /// Returns the length in kilometers.
    pub fn to_km(&self) -> f64 {
        self.0
    }

    /// Converts the length to meters.
    pub fn to_m(&self) -> f64 {
        self.0 * 1_000.0
    }

    /// Converts the length to astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0 / AU_TO_KM
    }

    /// Converts the length to solar radii.
    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_KM
    }

    /// Converts the length to Earth radii.
    pub fn to_earth_radii(&self) -> f64 {
        self.0 / EARTH_RADIUS_KM
    }

    /// Raise to integer power (returns dimensionless f64 in km^n)
    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
