//! Temperature binning used when collapsing per-pixel maps into coverage tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use units::Temperature;

/// Round an effective temperature to the nearest whole Kelvin.
///
/// Collapsing near-identical temperatures keeps the number of distinct
/// spectra a downstream synthesis step has to compute small without
/// affecting the accuracy of the model.
pub fn round_teff(teff: Temperature) -> Temperature {
    teff.round()
}

/// A rounded effective temperature usable as an ordered map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeffBin(i64);

impl TeffBin {
    pub fn from_kelvin(kelvin: i64) -> Self {
        Self(kelvin)
    }

    pub fn kelvin(&self) -> i64 {
        self.0
    }

    pub fn temperature(&self) -> Temperature {
        Temperature::from_kelvin(self.0 as f64)
    }
}

impl From<Temperature> for TeffBin {
    fn from(teff: Temperature) -> Self {
        Self(round_teff(teff).to_kelvin() as i64)
    }
}

impl fmt::Display for TeffBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} K", self.0)
    }
}
