use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;
use std::sync::Arc;
use units::{Angle, Area, Length, Temperature, Time};

use crate::config::{SpotGeneratorParams, StarParams};
use crate::coordinate_grid::{GridParams, SurfaceGrid};
use crate::error::{PhotosphereError, SpotError};
use crate::geometry::{SubObserver, TransitGeometry};
use crate::helpers::TeffBin;
use crate::processes::{FaculaOverlay, FaculaPopulation, FaculaRegion, UniformGranulation};
use crate::spots::{SpotCollection, SpotGenerator, StarSpot};
use crate::star::Star;

fn star(nlat: usize, nlon: usize) -> Star {
    Star::new(
        Temperature::from_kelvin(3000.0),
        Length::from_solar_radii(0.15),
        Time::from_days(10.0),
        Arc::new(SurfaceGrid::rectangular(nlat, nlon).unwrap()),
    )
}

fn bin(kelvin: i64) -> TeffBin {
    TeffBin::from_kelvin(kelvin)
}

fn transit(phase_deg: f64, planet_radius: Length) -> TransitGeometry {
    TransitGeometry {
        orbit_radius: Length::from_au(0.05),
        planet_radius,
        phase: Angle::from_degrees(phase_deg),
        inclination: Angle::from_degrees(90.0),
    }
}

/// A spot at the sub-observer point whose cap has the given angular radius.
fn facing_spot(star: &Star, radius_deg: f64) -> StarSpot {
    let r = star.radius().to_km();
    let area = Area::from_km2(2.0 * PI * r * r * (1.0 - radius_deg.to_radians().cos()));
    StarSpot::new(
        Angle::zero(),
        Angle::zero(),
        area,
        area,
        Temperature::from_kelvin(2700.0),
        Temperature::from_kelvin(2600.0),
        star.grid().clone(),
    )
    .with_growing(false)
}

#[derive(Debug)]
struct PolarCap {
    births: Rc<Cell<usize>>,
    ages: Rc<Cell<usize>>,
    shape_override: Option<(usize, usize)>,
}

impl FaculaPopulation for PolarCap {
    fn birth(&mut self, _dt: Time, _star_radius: Length) {
        self.births.set(self.births.get() + 1);
    }

    fn age(&mut self, _dt: Time) {
        self.ages.set(self.ages.get() + 1);
    }

    fn overlay(&self, grid: &SurfaceGrid, _star_radius: Length) -> Vec<FaculaOverlay> {
        let (lat, _) = grid.grid();
        let pixels = match self.shape_override {
            Some(shape) => Array2::from_elem(shape, true),
            None => lat.mapv(|l| l.to_degrees() > 60.0),
        };
        vec![FaculaOverlay {
            region: FaculaRegion::Wall,
            pixels,
            delta_teff: Temperature::from_kelvin(100.0),
        }]
    }
}

#[test]
fn new_star_is_pristine() {
    let star = star(50, 100);
    assert_eq!(star.teff(), Temperature::from_kelvin(3000.0));
    assert_relative_eq!(star.radius().to_solar_radii(), 0.15);
    assert_relative_eq!(star.period().to_days(), 10.0);
    assert_eq!(star.limb_darkening(), (0.0, 0.0));
    assert!(star.spots().is_empty());
    assert!(star.spot_generator().is_static());

    let map = star.map();
    assert_eq!(map.dim(), (100, 50));
    assert!(map.iter().all(|&t| t == Temperature::from_kelvin(3000.0)));
}

#[test]
fn map_is_cached_until_the_surface_changes() {
    let mut star = star(181, 360);
    let spot = StarSpot::new(
        Angle::zero(),
        Angle::zero(),
        Area::from_msh(500.0),
        Area::from_msh(10.0),
        Temperature::from_kelvin(2700.0),
        Temperature::from_kelvin(2600.0),
        star.grid().clone(),
    );
    let grid = star.grid().clone();
    star = star.with_spots(SpotCollection::from_spots(vec![spot], grid));

    let first = star.map() as *const _;
    assert_eq!(first, star.map() as *const _);
    let initial = star.map().clone();

    star.age(Time::from_days(4.0));
    assert_ne!(&initial, star.map());
    let spotted = star
        .map()
        .iter()
        .filter(|&&t| t < Temperature::from_kelvin(3000.0))
        .count();
    let before = initial
        .iter()
        .filter(|&&t| t < Temperature::from_kelvin(3000.0))
        .count();
    assert!(spotted > before);
}

#[test]
fn aging_by_zero_keeps_every_spot() {
    let mut star = star(46, 90);
    let spots = SpotCollection::from_spots(
        vec![facing_spot(&star, 5.0), facing_spot(&star, 10.0)],
        star.grid().clone(),
    );
    star = star.with_spots(spots);
    star.age(Time::zero());
    assert_eq!(star.spots().len(), 2);
}

#[test]
fn spots_from_another_grid_are_rebound() {
    let star = star(46, 90);
    let other = Arc::new(SurfaceGrid::spiral(500).unwrap());
    let spot = StarSpot::new(
        Angle::zero(),
        Angle::zero(),
        Area::from_msh(500.0),
        Area::from_msh(100.0),
        Temperature::from_kelvin(2700.0),
        Temperature::from_kelvin(2600.0),
        other.clone(),
    );
    let star = star.with_spots(SpotCollection::from_spots(vec![spot], other));
    assert!(Arc::ptr_eq(star.spots().grid(), star.grid()));
    assert_eq!(star.spots().spots()[0].distance().dim(), (90, 46));
}

#[test]
fn transit_mask_covers_planet_disk() {
    let star = star(500, 1000);
    let (mask, planet_fraction) = star.get_transit_mask(
        Angle::zero(),
        Angle::zero(),
        &transit(180.0, Length::from_earth_radii(1.0)),
    );
    assert_eq!(planet_fraction, 1.0);
    assert_eq!(mask.dim(), (1000, 500));

    let max = mask.iter().cloned().fold(f64::MIN, f64::max);
    assert_abs_diff_eq!(max, 1.0, epsilon = 1e-2);
    assert!(mask.iter().any(|&m| m == 0.0));
    assert!(mask.iter().any(|&m| m > 0.0 && m < 1.0));
}

#[test]
fn planet_behind_the_star_hides_nothing() {
    let star = star(46, 90);
    let planet = Length::from_earth_radii(1.0);

    let (mask, planet_fraction) =
        star.get_transit_mask(Angle::zero(), Angle::zero(), &transit(0.0, planet));
    assert!(mask.iter().all(|&m| m == 0.0));
    assert_abs_diff_eq!(planet_fraction, 0.0);

    let (_, planet_fraction) =
        star.get_transit_mask(Angle::zero(), Angle::zero(), &transit(90.0, planet));
    assert_abs_diff_eq!(planet_fraction, 1.0);
}

#[test]
fn coverage_without_transit() {
    let star = star(100, 200).with_limb_darkening(0.1, 0.0);
    let report = star.calc_coverage(SubObserver::from_degrees(0.0, 0.0), 0.0, None);
    assert_eq!(report.total.len(), 1);
    assert_relative_eq!(report.total[&bin(3000)], 1.0, epsilon = 1e-12);
    assert_eq!(report.occulted[&bin(3000)], 0.0);
    assert_eq!(report.planet_fraction, 1.0);
}

#[test]
fn transit_occults_radius_ratio_squared() {
    let star = star(500, 1000);
    let r = 0.1;
    let report = star.calc_coverage(
        SubObserver::from_degrees(0.0, 0.0),
        0.0,
        Some(&transit(180.0, star.radius() * r)),
    );
    assert_relative_eq!(report.total[&bin(3000)], 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.occulted[&bin(3000)], r * r, max_relative = 0.05);
    assert_eq!(report.planet_fraction, 1.0);
}

#[test]
fn spots_appear_as_cooler_bins() {
    let star = star(181, 360);
    let spots = SpotCollection::from_spots(vec![facing_spot(&star, 20.0)], star.grid().clone());
    let star = star.with_spots(spots);

    let report = star.calc_coverage(SubObserver::from_degrees(0.0, 0.0), 0.0, None);
    assert_eq!(
        report.total.keys().copied().collect::<Vec<_>>(),
        vec![bin(2600), bin(2700), bin(3000)]
    );
    assert_relative_eq!(report.total_fraction(), 1.0, epsilon = 1e-12);
    assert_eq!(report.occulted.len(), report.total.len());
    assert_eq!(report.occulted_fraction(), 0.0);

    // seen from behind, the spot is hidden
    let report = star.calc_coverage(SubObserver::from_degrees(0.0, 180.0), 0.0, None);
    assert_eq!(report.total.keys().copied().collect::<Vec<_>>(), vec![bin(3000)]);
}

#[test]
fn granulation_moves_a_fraction_to_a_cooler_bin() {
    let star = star(50, 100).with_granulation(Box::new(UniformGranulation::new(
        0.2,
        Temperature::from_kelvin(200.0),
    )));
    let g = star.granulation_fraction(Time::from_days(3.0));
    assert_eq!(g, 0.2);

    let report = star.calc_coverage(SubObserver::from_degrees(0.0, 0.0), g, None);
    assert_relative_eq!(report.total[&bin(3000)], 0.8, epsilon = 1e-12);
    assert_relative_eq!(report.total[&bin(2800)], 0.2, epsilon = 1e-12);
    assert_eq!(report.occulted[&bin(2800)], 0.0);
}

#[test]
fn granulation_fraction_is_clamped() {
    let star = star(10, 20).with_granulation(Box::new(UniformGranulation::new(
        1.5,
        Temperature::from_kelvin(200.0),
    )));
    assert_eq!(star.granulation_fraction(Time::zero()), 1.0);
    let report = star.calc_coverage(SubObserver::from_degrees(0.0, 0.0), -0.5, None);
    assert_relative_eq!(report.total[&bin(3000)], 1.0, epsilon = 1e-12);
}

#[test]
fn faculae_are_added_to_the_map_and_driven_by_the_star() {
    let births = Rc::new(Cell::new(0));
    let ages = Rc::new(Cell::new(0));
    let faculae = PolarCap {
        births: births.clone(),
        ages: ages.clone(),
        shape_override: None,
    };
    let mut star = star(19, 36).with_faculae(Box::new(faculae));

    let (lat, _) = star.grid().grid();
    for (teff, lat) in star.map().iter().zip(lat.iter()) {
        let expected = if lat.to_degrees() > 60.0 { 3100.0 } else { 3000.0 };
        assert_eq!(*teff, Temperature::from_kelvin(expected));
    }

    star.step(Time::from_days(1.0)).unwrap();
    assert_eq!(births.get(), 1);
    assert_eq!(ages.get(), 1);
}

#[test]
fn misshapen_facula_overlay_is_skipped() {
    let faculae = PolarCap {
        births: Rc::new(Cell::new(0)),
        ages: Rc::new(Cell::new(0)),
        shape_override: Some((3, 3)),
    };
    let star = star(19, 36).with_faculae(Box::new(faculae));
    assert!(
        star.map()
            .iter()
            .all(|&t| t == Temperature::from_kelvin(3000.0))
    );
}

#[test]
fn stepping_births_spots() {
    let mut star = star(46, 90);
    let generator = SpotGenerator::new(
        SpotGeneratorParams::default(),
        star.grid().clone(),
        ChaChaRng::seed_from_u64(5),
    )
    .unwrap();
    star = star.with_spot_generator(generator);

    let born: usize = (0..30)
        .map(|_| star.step(Time::from_days(1.0)).unwrap())
        .sum();
    assert!(born > 0);
    assert!(star.spots().len() <= born);
    assert!(!star.spots().is_empty());
    assert!(
        star.spots()
            .spots()
            .iter()
            .all(|s| Arc::ptr_eq(s.grid(), star.grid()))
    );
}

#[test]
fn mature_spots_bootstrap_the_surface() {
    let mut star = star(91, 180);
    let generator = SpotGenerator::new(
        SpotGeneratorParams::default(),
        Arc::new(SurfaceGrid::spiral(10).unwrap()),
        ChaChaRng::seed_from_u64(8),
    )
    .unwrap();
    star = star.with_spot_generator(generator);

    let n = star.generate_mature_spots(0.1).unwrap();
    assert_eq!(n, star.spots().len());
    assert!(n > 0);
    assert!(star.spots().coverage(star.radius()) > 0.0);
    assert!(
        star.map()
            .iter()
            .any(|&t| t < Temperature::from_kelvin(3000.0))
    );

    assert_eq!(
        star.generate_mature_spots(1.5).unwrap_err(),
        PhotosphereError::Spot(SpotError::CoverageOutOfRange(1.5))
    );
}

#[test]
fn replacing_the_grid_rebuilds_the_map() {
    let mut star = star(46, 90);
    let spots = SpotCollection::from_spots(vec![facing_spot(&star, 10.0)], star.grid().clone());
    star = star.with_spots(spots);
    assert_eq!(star.map().dim(), (90, 46));

    star.set_grid(Arc::new(SurfaceGrid::rectangular(19, 36).unwrap()));
    assert_eq!(star.map().dim(), (36, 19));
    assert_eq!(star.spots().spots()[0].distance().dim(), (36, 19));
}

#[test]
fn projection_weights() {
    let star = star(46, 90);
    assert_relative_eq!(star.get_jacobian().sum(), 1.0, epsilon = 1e-12);
    let mu = star.get_mu(Angle::from_degrees(30.0), Angle::from_degrees(45.0));
    assert_eq!(mu.dim(), (90, 46));
    assert!(mu.iter().all(|&m| (-1.0 - 1e-12..=1.0 + 1e-12).contains(&m)));
}

#[test]
fn star_from_params() {
    let params = StarParams {
        grid: GridParams::Points(400),
        u1: 0.3,
        u2: 0.1,
        ..StarParams::default()
    };
    let star = Star::from_params(&params, 1).unwrap();
    assert_eq!(star.grid().shape(), (400, 1));
    assert_eq!(star.limb_darkening(), (0.3, 0.1));
    assert_eq!(star.map().dim(), (400, 1));

    let bad = StarParams {
        grid: GridParams::Rectangular(1, 10),
        ..StarParams::default()
    };
    assert!(Star::from_params(&bad, 1).is_err());
}
