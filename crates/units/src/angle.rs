use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A plane angle using f64 precision.
///
/// Radians are the base unit; latitudes, longitudes, orbital phases and
/// inclinations are usually supplied in degrees.
///
/// # Examples
///
/// ```rust
/// use units::Angle;
///
/// let phase = Angle::from_degrees(180.0);
/// assert!((phase.to_radians() - std::f64::consts::PI).abs() < 1e-12);
/// assert!(phase.sin().abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Angle(f64); // Base unit: radians

impl Angle {
    /// Creates a zero angle
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Angle` from a value in radians.
    pub fn from_radians(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Angle` from a value in degrees.
    pub fn from_degrees(value: f64) -> Self {
        Self(value * PI / 180.0)
    }

    /// Returns the angle in radians.
    pub fn to_radians(&self) -> f64 {
        self.0
    }

    /// Converts the angle to degrees.
    pub fn to_degrees(&self) -> f64 {
        self.0 * 180.0 / PI
    }

    pub fn sin(&self) -> f64 {
        self.0.sin()
    }

    pub fn cos(&self) -> f64 {
        self.0.cos()
    }

    /// Returns the angle reduced to [0°, 360°).
    pub fn wrapped(self) -> Self {
        Self(self.0.rem_euclid(2.0 * PI))
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} deg", p, self.to_degrees()),
            None => write!(f, "{} deg", self.to_degrees()),
        }
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

/// Division of Angle by Angle returns a dimensionless ratio
impl Div for Angle {
    type Output = f64;

    fn div(self, rhs: Angle) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Angle (commutative multiplication)
impl Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        rhs * self
    }
}
