use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::PI;
use units::{Angle, Length};

use crate::geometry::{
    SubObserver, TransitGeometry, angle_between, circle_intersection_area,
    fraction_inside_unit_circle, proj_ortho,
};

#[test]
fn sub_observer_point_projects_to_origin() {
    for (lat, lon) in [(0.0, 0.0), (30.0, 45.0), (-60.0, 300.0), (89.0, 10.0)] {
        let lat = Angle::from_degrees(lat);
        let lon = Angle::from_degrees(lon);
        let (x, y) = proj_ortho(lat, lon, lat, lon);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn limb_points_project_to_unit_circle() {
    let zero = Angle::zero();
    let (x, y) = proj_ortho(zero, zero, zero, Angle::from_degrees(90.0));
    assert_relative_eq!(x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);

    let (x, y) = proj_ortho(zero, zero, Angle::from_degrees(90.0), zero);
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(y, 1.0, epsilon = 1e-12);
}

#[test]
fn angle_between_known_separations() {
    let d = angle_between(
        Angle::zero(),
        Angle::zero(),
        Angle::zero(),
        Angle::from_degrees(90.0),
    );
    assert_relative_eq!(d.to_degrees(), 90.0, epsilon = 1e-9);

    let pole = angle_between(
        Angle::from_degrees(90.0),
        Angle::zero(),
        Angle::from_degrees(-90.0),
        Angle::from_degrees(123.0),
    );
    assert_relative_eq!(pole.to_degrees(), 180.0, epsilon = 1e-9);

    // Longitude wraps cleanly across 0°/360°
    let wrap = angle_between(
        Angle::zero(),
        Angle::from_degrees(359.0),
        Angle::zero(),
        Angle::from_degrees(1.0),
    );
    assert_relative_eq!(wrap.to_degrees(), 2.0, epsilon = 1e-9);
}

#[test]
fn contained_circle_is_fully_inside() {
    assert_relative_eq!(fraction_inside_unit_circle(0.0, 0.0, 0.1), 1.0);
    assert_relative_eq!(circle_intersection_area(0.0, 1.0, 0.1), PI * 0.01);
}

#[test]
fn disjoint_circles_do_not_overlap() {
    assert_eq!(fraction_inside_unit_circle(3.0, 0.0, 0.5), 0.0);
    assert_eq!(circle_intersection_area(2.0, 0.5, 0.5), 0.0);
}

#[test]
fn half_overlap_of_small_circle_on_the_limb() {
    // A tiny circle centred exactly on the limb is almost exactly half inside
    let frac = fraction_inside_unit_circle(1.0, 0.0, 1e-3);
    assert_relative_eq!(frac, 0.5, epsilon = 1e-3);
}

#[test]
fn equal_circles_lens_area() {
    // Two unit circles one radius apart share 2π/3 − √3/2
    let area = circle_intersection_area(1.0, 1.0, 1.0);
    assert_relative_eq!(area, 2.0 * PI / 3.0 - 3.0_f64.sqrt() / 2.0, epsilon = 1e-12);
}

#[test]
fn intersection_is_symmetric() {
    let a = circle_intersection_area(0.7, 0.5, 0.4);
    let b = circle_intersection_area(0.7, 0.4, 0.5);
    assert_relative_eq!(a, b, epsilon = 1e-12);
    assert!(a > 0.0 && a < PI * 0.16);
}

#[test]
fn planet_disk_position_follows_phase() {
    let star = Length::from_solar_radii(1.0);
    let transit = TransitGeometry {
        orbit_radius: Length::from_solar_radii(10.0),
        planet_radius: Length::from_solar_radii(0.1),
        phase: Angle::from_degrees(180.0),
        inclination: Angle::from_degrees(90.0),
    };
    let (x, y, r) = transit.planet_disk(star);
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(r, 0.1, epsilon = 1e-12);
    assert!(!transit.is_behind_star());

    let quadrature = TransitGeometry {
        phase: Angle::from_degrees(90.0 + 1e-6),
        ..transit
    };
    let (x, _, _) = quadrature.planet_disk(star);
    assert_relative_eq!(x, 10.0, epsilon = 1e-9);

    let eclipse = TransitGeometry {
        phase: Angle::zero(),
        ..transit
    };
    assert!(eclipse.is_behind_star());
}

#[test]
fn sub_observer_from_degrees() {
    let obs = SubObserver::from_degrees(30.0, 90.0);
    assert_relative_eq!(obs.lat.to_degrees(), 30.0, epsilon = 1e-12);
    assert_relative_eq!(obs.lon.to_degrees(), 90.0, epsilon = 1e-12);
}
