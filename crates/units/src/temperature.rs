use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An effective temperature using f64 precision.
///
/// Kelvin is the base unit. Photospheric maps, spot umbrae and penumbrae, and
/// facula walls are all expressed in this type so that every value crossing a
/// module boundary carries its dimension.
///
/// # Examples
///
/// ```rust
/// use units::Temperature;
///
/// let photosphere = Temperature::from_kelvin(3000.0);
/// let umbra = Temperature::from_kelvin(2700.0);
///
/// let contrast = photosphere - umbra;
/// assert_eq!(contrast.to_kelvin(), 300.0);
/// assert!(umbra < photosphere);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    /// Creates a zero temperature value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Temperature` from a value in Kelvin.
    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    /// Returns the temperature value in Kelvin.
    pub fn to_kelvin(&self) -> f64 {
        self.0
    }

    /// Rounds to the nearest whole Kelvin, keeping the unit.
    ///
    /// ```rust
    /// use units::Temperature;
    ///
    /// assert_eq!(Temperature::from_kelvin(100.3).round(), Temperature::from_kelvin(100.0));
    /// assert_eq!(Temperature::from_kelvin(2000.4).round(), Temperature::from_kelvin(2000.0));
    /// ```
    pub fn round(self) -> Self {
        Self(self.0.round())
    }

    /// Returns the cooler of two temperatures.
    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 { other } else { self }
    }

    /// Returns the hotter of two temperatures.
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} K", p, self.0),
            None => write!(f, "{} K", self.0),
        }
    }
}

impl Add for Temperature {
    type Output = Temperature;

    fn add(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 + rhs.0)
    }
}

impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 - rhs.0)
    }
}

impl Neg for Temperature {
    type Output = Temperature;

    fn neg(self) -> Temperature {
        Temperature(-self.0)
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature(self.0 * rhs)
    }
}

impl Div<f64> for Temperature {
    type Output = Temperature;

    fn div(self, rhs: f64) -> Temperature {
        Temperature(self.0 / rhs)
    }
}

/// Allow f64 * Temperature (commutative multiplication)
impl Mul<Temperature> for f64 {
    type Output = Temperature;

    fn mul(self, rhs: Temperature) -> Temperature {
        rhs * self
    }
}
