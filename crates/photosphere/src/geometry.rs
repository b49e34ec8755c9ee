//! Spherical and disk-plane geometry.
//!
//! Angular separations on the stellar surface, the orthographic projection
//! of the visible hemisphere onto the sky plane, and circle–circle overlap
//! areas used for exact partial-pixel occultation.
//!
//! Disk-plane coordinates are in units of the stellar radius, so the
//! stellar disk is the unit circle centred on the origin.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use units::{Angle, Length};

/// The point on the stellar surface directly facing the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubObserver {
    pub lat: Angle,
    pub lon: Angle,
}

impl SubObserver {
    pub fn new(lat: Angle, lon: Angle) -> Self {
        Self { lat, lon }
    }

    /// Sub-observer point given in degrees.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::new(Angle::from_degrees(lat), Angle::from_degrees(lon))
    }
}

/// Position and size of a planet relative to its host star.
///
/// A phase of 180° places the planet in front of the disk centre (mid
/// transit); phases with `cos(phase) > 0` put it behind the star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitGeometry {
    pub orbit_radius: Length,
    pub planet_radius: Length,
    pub phase: Angle,
    pub inclination: Angle,
}

impl TransitGeometry {
    /// Planet centre and radius in disk-plane coordinates of a star of the given radius.
    pub fn planet_disk(&self, star_radius: Length) -> (f64, f64, f64) {
        let a = self.orbit_radius / star_radius;
        let x = a * self.phase.sin();
        let y = a * self.phase.cos() * self.inclination.cos();
        (x, y, self.planet_radius / star_radius)
    }

    /// True when the planet is on the far side of the star.
    pub fn is_behind_star(&self) -> bool {
        self.phase.cos() > 0.0
    }
}

/// Great-circle distance between two points (haversine form).
pub fn angle_between(lat1: Angle, lon1: Angle, lat2: Angle, lon2: Angle) -> Angle {
    Angle::from_radians(angle_between_radians(
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    ))
}

pub(crate) fn angle_between_radians(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let h = (0.5 * (lat1 - lat2)).sin().powi(2)
        + lat1.cos() * lat2.cos() * (0.5 * (lon1 - lon2)).sin().powi(2);
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Orthographic projection of `(lat, lon)` as seen from above `(lat0, lon0)`.
///
/// Returns `(x, y)` on the unit disk; `x` grows toward increasing longitude
/// and `y` toward the north pole.
pub fn proj_ortho(lat0: Angle, lon0: Angle, lat: Angle, lon: Angle) -> (f64, f64) {
    proj_ortho_radians(
        lat0.to_radians(),
        lon0.to_radians(),
        lat.to_radians(),
        lon.to_radians(),
    )
}

pub(crate) fn proj_ortho_radians(lat0: f64, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
    let dlon = lon - lon0;
    let x = lat.cos() * dlon.sin();
    let y = lat0.cos() * lat.sin() - lat0.sin() * lat.cos() * dlon.cos();
    (x, y)
}

/// Area of the lens shared by two circles with radii `r0`, `r1` whose
/// centres are `d` apart.
pub fn circle_intersection_area(d: f64, r0: f64, r1: f64) -> f64 {
    if r0 <= 0.0 || r1 <= 0.0 || d >= r0 + r1 {
        return 0.0;
    }
    if d <= (r0 - r1).abs() {
        let r = r0.min(r1);
        return PI * r * r;
    }

    let cos0 = ((d * d + r0 * r0 - r1 * r1) / (2.0 * d * r0)).clamp(-1.0, 1.0);
    let cos1 = ((d * d + r1 * r1 - r0 * r0) / (2.0 * d * r1)).clamp(-1.0, 1.0);
    let kite = (-d + r0 + r1) * (d + r0 - r1) * (d - r0 + r1) * (d + r0 + r1);

    r0 * r0 * cos0.acos() + r1 * r1 * cos1.acos() - 0.5 * kite.max(0.0).sqrt()
}

/// Fraction of the circle `(x, y, r)` that lies inside the unit circle.
pub fn fraction_inside_unit_circle(x: f64, y: f64, r: f64) -> f64 {
    if r <= 0.0 {
        return if x.hypot(y) < 1.0 { 1.0 } else { 0.0 };
    }
    let overlap = circle_intersection_area(x.hypot(y), 1.0, r);
    (overlap / (PI * r * r)).clamp(0.0, 1.0)
}
