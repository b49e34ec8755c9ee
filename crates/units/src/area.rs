use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::length::{Length, SOLAR_RADIUS_KM};

/// One micro-solar-hemisphere in km²: 1e-6 of half the solar surface.
pub const MSH_TO_KM2: f64 = 1e-6 * 2.0 * PI * SOLAR_RADIUS_KM * SOLAR_RADIUS_KM;

/// A stellar surface area using f64 precision.
///
/// The base unit is the micro-solar hemisphere (MSH), the unit used
/// throughout the sunspot literature. Conversion to km² and to a fraction of
/// a sphere of given radius is available for geometric work.
///
/// # Examples
///
/// ```rust
/// use units::{Area, Length};
///
/// let spot = Area::from_msh(500.0);
/// let sun = Length::from_solar_radii(1.0);
///
/// // 500 MSH is 250 millionths of the whole solar surface
/// let fraction = spot / Area::sphere(sun);
/// assert!((fraction - 2.5e-4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Area(f64); // Base unit: MSH

impl Area {
    /// Creates a zero area value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Area` from a value in micro-solar hemispheres.
    pub fn from_msh(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Area` from a value in square kilometers.
    pub fn from_km2(value: f64) -> Self {
        Self(value / MSH_TO_KM2)
    }

    /// Surface area of a sphere of the given radius (4πR²).
    pub fn sphere(radius: Length) -> Self {
        Self::from_km2(4.0 * PI * radius.powi(2))
    }

    /// Returns the area in micro-solar hemispheres.
    pub fn to_msh(&self) -> f64 {
        self.0
    }

    /// Converts the area to square kilometers.
    pub fn to_km2(&self) -> f64 {
        self.0 * MSH_TO_KM2
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Returns the larger of two areas.
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} msh", p, self.0),
            None => write!(f, "{} msh", self.0),
        }
    }
}

impl Add for Area {
    type Output = Area;

    fn add(self, rhs: Area) -> Area {
        Area(self.0 + rhs.0)
    }
}

impl Sub for Area {
    type Output = Area;

    fn sub(self, rhs: Area) -> Area {
        Area(self.0 - rhs.0)
    }
}

impl Mul<f64> for Area {
    type Output = Area;

    fn mul(self, rhs: f64) -> Area {
        Area(self.0 * rhs)
    }
}

impl Div<f64> for Area {
    type Output = Area;

    fn div(self, rhs: f64) -> Area {
        Area(self.0 / rhs)
    }
}

/// Division of Area by Area returns a dimensionless ratio
impl Div for Area {
    type Output = f64;

    fn div(self, rhs: Area) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Area (commutative multiplication)
impl Mul<Area> for f64 {
    type Output = Area;

    fn mul(self, rhs: Area) -> Area {
        rhs * self
    }
}
