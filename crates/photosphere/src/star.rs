//! The stellar surface engine.
//!
//! A [`Star`] owns one surface grid and every population living on it. It
//! composes their temperatures into a single map, projects that map onto the
//! observer's disk and aggregates it into per-temperature coverage fractions,
//! optionally with a transiting planet in front of (or behind) the disk.

use log::{debug, trace, warn};
use ndarray::{Array2, Zip};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;
use units::{Angle, Length, Temperature, Time};

use crate::config::StarParams;
use crate::coordinate_grid::SurfaceGrid;
use crate::error::{GridError, PhotosphereError};
use crate::geometry::{
    SubObserver, TransitGeometry, circle_intersection_area, fraction_inside_unit_circle,
    proj_ortho_radians,
};
use crate::helpers::TeffBin;
use crate::processes::{
    FaculaPopulation, FlareSource, Granulation, NoFaculae, NoFlares, UniformGranulation,
};
use crate::spots::{SpotCollection, SpotGenerator};

/// Disk-integrated view of the surface from one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Fraction of the visible, projected disk at each temperature.
    pub total: BTreeMap<TeffBin, f64>,
    /// Fraction of the visible disk at each temperature hidden by the planet.
    pub occulted: BTreeMap<TeffBin, f64>,
    /// Fraction of the planet's disk that is visible to the observer.
    pub planet_fraction: f64,
}

impl CoverageReport {
    pub fn total_fraction(&self) -> f64 {
        self.total.values().sum()
    }

    pub fn occulted_fraction(&self) -> f64 {
        self.occulted.values().sum()
    }
}

/// A star and everything on its surface.
#[derive(Debug)]
pub struct Star {
    teff: Temperature,
    radius: Length,
    period: Time,
    u1: f64,
    u2: f64,
    grid: Arc<SurfaceGrid>,
    spots: SpotCollection,
    faculae: Box<dyn FaculaPopulation>,
    granulation: Box<dyn Granulation>,
    flares: Box<dyn FlareSource>,
    spot_generator: SpotGenerator,
    map: OnceCell<Array2<Temperature>>,
}

impl Star {
    /// A spotless star with no faculae, granulation or flares and a spot
    /// generator that never births anything.
    pub fn new(teff: Temperature, radius: Length, period: Time, grid: Arc<SurfaceGrid>) -> Self {
        Self {
            teff,
            radius,
            period,
            u1: 0.0,
            u2: 0.0,
            spots: SpotCollection::new(grid.clone()),
            faculae: Box::new(NoFaculae),
            granulation: Box::new(UniformGranulation::none()),
            flares: Box::new(NoFlares),
            spot_generator: SpotGenerator::off(grid.clone(), ChaChaRng::seed_from_u64(0)),
            grid,
            map: OnceCell::new(),
        }
    }

    /// Build a star from configuration. `seed` seeds the spot generator.
    pub fn from_params(params: &StarParams, seed: u64) -> Result<Self, GridError> {
        let grid = Arc::new(SurfaceGrid::new(params.grid)?);
        let mut star = Self::new(params.teff, params.radius, params.period, grid.clone())
            .with_limb_darkening(params.u1, params.u2);
        star.spot_generator = SpotGenerator::off(grid, ChaChaRng::seed_from_u64(seed));
        Ok(star)
    }

    /// Use `spots` as the spot population, rebinding them to this star's grid.
    pub fn with_spots(mut self, mut spots: SpotCollection) -> Self {
        if !Arc::ptr_eq(spots.grid(), &self.grid) {
            spots.set_grid(self.grid.clone());
        }
        self.spots = spots;
        self.map.take();
        self
    }

    pub fn with_faculae(mut self, faculae: Box<dyn FaculaPopulation>) -> Self {
        self.faculae = faculae;
        self.map.take();
        self
    }

    pub fn with_granulation(mut self, granulation: Box<dyn Granulation>) -> Self {
        self.granulation = granulation;
        self
    }

    pub fn with_flares(mut self, flares: Box<dyn FlareSource>) -> Self {
        self.flares = flares;
        self
    }

    pub fn with_limb_darkening(mut self, u1: f64, u2: f64) -> Self {
        self.u1 = u1;
        self.u2 = u2;
        self
    }

    /// Use `generator` for new spots. Its spots are bound to this star's grid.
    pub fn with_spot_generator(mut self, mut generator: SpotGenerator) -> Self {
        generator.set_grid(self.grid.clone());
        self.spot_generator = generator;
        self
    }

    pub fn teff(&self) -> Temperature {
        self.teff
    }

    pub fn radius(&self) -> Length {
        self.radius
    }

    pub fn period(&self) -> Time {
        self.period
    }

    /// Quadratic limb-darkening coefficients `(u1, u2)`.
    pub fn limb_darkening(&self) -> (f64, f64) {
        (self.u1, self.u2)
    }

    pub fn grid(&self) -> &Arc<SurfaceGrid> {
        &self.grid
    }

    pub fn spots(&self) -> &SpotCollection {
        &self.spots
    }

    pub fn faculae(&self) -> &dyn FaculaPopulation {
        self.faculae.as_ref()
    }

    pub fn granulation(&self) -> &dyn Granulation {
        self.granulation.as_ref()
    }

    pub fn flares(&self) -> &dyn FlareSource {
        self.flares.as_ref()
    }

    pub fn spot_generator(&self) -> &SpotGenerator {
        &self.spot_generator
    }

    /// Replace the surface grid; every spot footprint is recomputed.
    pub fn set_grid(&mut self, grid: Arc<SurfaceGrid>) {
        self.spots.set_grid(grid.clone());
        self.spot_generator.set_grid(grid.clone());
        self.grid = grid;
        self.map.take();
    }

    /// Composite temperature map, shaped like the grid.
    ///
    /// Spots are painted over the photosphere first (coolest wins), then
    /// every facula overlay adds its offset to the pixels it covers. The
    /// result is cached until the surface next changes.
    pub fn map(&self) -> &Array2<Temperature> {
        self.map.get_or_init(|| self.compose_map())
    }

    fn compose_map(&self) -> Array2<Temperature> {
        trace!("recomposing surface map for {} spots", self.spots.len());
        let mut map = self.spots.map_pixels(self.radius, self.teff);
        for overlay in self.faculae.overlay(&self.grid, self.radius) {
            if overlay.pixels.dim() != map.dim() {
                warn!(
                    "skipping {:?} facula overlay of shape {:?} on a {:?} grid",
                    overlay.region,
                    overlay.pixels.dim(),
                    map.dim()
                );
                continue;
            }
            let delta = overlay.delta_teff;
            Zip::from(&mut map)
                .and(&overlay.pixels)
                .for_each(|teff, &covered| {
                    if covered {
                        *teff = *teff + delta;
                    }
                });
        }
        map
    }

    /// Age every population by `dt`. Spots that finish decaying are removed.
    pub fn age(&mut self, dt: Time) {
        self.spots.age(dt);
        self.faculae.age(dt);
        self.flares.advance(dt);
        self.map.take();
    }

    /// Birth new spots and faculae over `dt`. Returns the number of new spots.
    pub fn birth(&mut self, dt: Time) -> Result<usize, PhotosphereError> {
        let new_spots = self.spot_generator.birth_spots(dt, self.radius)?;
        let n = new_spots.len();
        self.spots.add_spots(new_spots)?;
        self.faculae.birth(dt, self.radius);
        self.map.take();
        Ok(n)
    }

    /// Age, then birth: one step of the surface timeline.
    pub fn step(&mut self, dt: Time) -> Result<usize, PhotosphereError> {
        self.age(dt);
        self.birth(dt)
    }

    /// Seed the surface with a mature spot population covering `coverage`
    /// of the sphere. Returns the number of spots added.
    pub fn generate_mature_spots(&mut self, coverage: f64) -> Result<usize, PhotosphereError> {
        let spots = self
            .spot_generator
            .generate_mature_spots(coverage, self.radius)?;
        self.spots.add_spots(spots)?;
        self.spots.clean_spotlist();
        self.map.take();
        debug!("surface now carries {} spots", self.spots.len());
        Ok(self.spots.len())
    }

    /// Granulation coverage at `time`, clamped to [0, 1].
    pub fn granulation_fraction(&self, time: Time) -> f64 {
        clamp_fraction(self.granulation.coverage(time))
    }

    /// μ of every pixel seen from `(lat0, lon0)`.
    pub fn get_mu(&self, lat0: Angle, lon0: Angle) -> Array2<f64> {
        self.grid.cos_angle_from_disk_center(lat0, lon0)
    }

    /// Normalised solid-angle weight of every pixel.
    pub fn get_jacobian(&self) -> Array2<f64> {
        self.grid.area()
    }

    /// Per-pixel fraction hidden by the planet, and the visible fraction of
    /// the planet itself.
    ///
    /// Every visible pixel is treated as a disk of equal projected area in
    /// the sky plane; its occulted fraction is the exact overlap with the
    /// planet's disk. A planet behind the star hides nothing.
    pub fn get_transit_mask(
        &self,
        lat0: Angle,
        lon0: Angle,
        transit: &TransitGeometry,
    ) -> (Array2<f64>, f64) {
        let (x_pl, y_pl, r_pl) = transit.planet_disk(self.radius);
        if transit.is_behind_star() {
            let planet_fraction = 1.0 - fraction_inside_unit_circle(x_pl, y_pl, r_pl);
            return (Array2::zeros(self.grid.shape()), planet_fraction);
        }

        let mu = self.get_mu(lat0, lon0);
        let jacobian = self.get_jacobian();
        let (lat, lon) = self.grid.grid_radians();
        let (lat0, lon0) = (lat0.to_radians(), lon0.to_radians());

        let mut mask = Array2::zeros(self.grid.shape());
        Zip::from(&mut mask)
            .and(&mu)
            .and(&jacobian)
            .and(&lat)
            .and(&lon)
            .for_each(|m, &mu, &w, &lat, &lon| {
                if mu <= 0.0 {
                    return;
                }
                let r_pix = (4.0 * w * mu).sqrt();
                if r_pix <= 0.0 {
                    return;
                }
                let (x, y) = proj_ortho_radians(lat0, lon0, lat, lon);
                let d = (x - x_pl).hypot(y - y_pl);
                let overlap = circle_intersection_area(d, r_pix, r_pl);
                *m = (overlap / (PI * r_pix * r_pix)).clamp(0.0, 1.0);
            });
        (mask, 1.0)
    }

    /// Fractions of the visible disk at each temperature.
    ///
    /// Pixels facing the observer are weighted by projected area and
    /// normalised to sum to one. A fraction `granulation_fraction` of every
    /// temperature bin is moved to a bin `dteff` cooler. With a transit, the
    /// same weights multiplied by the transit mask give the occulted
    /// fractions; without one they are all zero.
    pub fn calc_coverage(
        &self,
        sub_obs: SubObserver,
        granulation_fraction: f64,
        transit: Option<&TransitGeometry>,
    ) -> CoverageReport {
        let mu = self.get_mu(sub_obs.lat, sub_obs.lon);
        let jacobian = self.get_jacobian();
        let (mask, planet_fraction) = match transit {
            Some(t) => self.get_transit_mask(sub_obs.lat, sub_obs.lon, t),
            None => (Array2::zeros(self.grid.shape()), 1.0),
        };
        let map = self.map();

        let mut total = BTreeMap::new();
        let mut occulted = BTreeMap::new();
        let mut norm = 0.0;
        Zip::from(map)
            .and(&mu)
            .and(&jacobian)
            .and(&mask)
            .for_each(|&teff, &mu, &w, &m| {
                if mu <= 0.0 {
                    return;
                }
                let weight = w * mu;
                norm += weight;
                let bin = TeffBin::from(teff);
                *total.entry(bin).or_insert(0.0) += weight;
                *occulted.entry(bin).or_insert(0.0) += weight * m;
            });
        if norm > 0.0 {
            for value in total.values_mut().chain(occulted.values_mut()) {
                *value /= norm;
            }
        }

        let g = clamp_fraction(granulation_fraction);
        if g > 0.0 {
            let dteff = self.granulation.dteff();
            total = split_granulation(&total, g, dteff);
            occulted = split_granulation(&occulted, g, dteff);
        }

        CoverageReport {
            total,
            occulted,
            planet_fraction,
        }
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if !(0.0..=1.0).contains(&fraction) {
        warn!("granulation fraction {fraction} outside [0, 1]; clamping");
    }
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

fn split_granulation(
    bins: &BTreeMap<TeffBin, f64>,
    fraction: f64,
    dteff: Temperature,
) -> BTreeMap<TeffBin, f64> {
    let mut split = BTreeMap::new();
    for (&bin, &value) in bins {
        *split.entry(bin).or_insert(0.0) += (1.0 - fraction) * value;
        let cool = TeffBin::from(bin.temperature() - dteff);
        *split.entry(cool).or_insert(0.0) += fraction * value;
    }
    split
}
