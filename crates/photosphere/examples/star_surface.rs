//! Disk-integrated view of a spotted star, with and without a transit.
//!
//! Ten static spots are scattered over a 3300 K M dwarf. The surface is then
//! observed from the equator, first on its own and then with an Earth-sized
//! planet crossing the disk.
//!
//! Run with: cargo run --example star_surface

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use photosphere::{
    CoverageReport, SpotCollection, Star, StarSpot, SubObserver, SurfaceGrid, TransitGeometry,
};
use units::{Angle, Area, AreaRate, GrowthRate, Length, Temperature, Time};

const SEED: u64 = 10;

fn print_report(title: &str, report: &CoverageReport) {
    println!("{title}");
    println!("{:>10}  {:>10}  {:>10}", "Teff", "total", "occulted");
    for (bin, total) in &report.total {
        let occulted = report.occulted.get(bin).copied().unwrap_or(0.0);
        println!("{:>10}  {:>10.5}  {:>10.6}", bin.to_string(), total, occulted);
    }
    println!("planet visible fraction: {:.3}\n", report.planet_fraction);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut rng = ChaChaRng::seed_from_u64(SEED);

    let grid = Arc::new(SurfaceGrid::rectangular(500, 1000)?);
    let spot_area = Area::from_msh(1000.0);
    let spots = (0..10)
        .map(|_| {
            let lat = (rng.random::<f64>() - 0.5) * 120.0;
            let lon = rng.random::<f64>() * 360.0;
            StarSpot::new(
                Angle::from_degrees(lat),
                Angle::from_degrees(lon),
                spot_area,
                spot_area,
                Temperature::from_kelvin(2700.0),
                Temperature::from_kelvin(2900.0),
                grid.clone(),
            )
            .with_growing(false)
            .with_growth_rate(GrowthRate::zero())
            .with_decay_rate(AreaRate::zero())
            .with_area_over_umbra_area(5.0)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let star = Star::new(
        Temperature::from_kelvin(3300.0),
        Length::from_solar_radii(0.15),
        Time::from_days(40.0),
        grid.clone(),
    )
    .with_limb_darkening(0.3, 0.1)
    .with_spots(SpotCollection::from_spots(spots, grid));

    for spot in star.spots().spots() {
        println!("{spot}");
    }
    println!(
        "\nspot coverage: {:.2}%\n",
        100.0 * star.spots().coverage(star.radius())
    );

    let sub_obs = SubObserver::from_degrees(0.0, 0.0);
    print_report("Unobstructed disk", &star.calc_coverage(sub_obs, 0.0, None));

    let transit = TransitGeometry {
        orbit_radius: Length::from_au(0.05),
        planet_radius: Length::from_earth_radii(1.0),
        phase: Angle::from_degrees(180.4),
        inclination: Angle::from_degrees(89.8),
    };
    print_report(
        "Earth-sized planet in transit",
        &star.calc_coverage(sub_obs, 0.0, Some(&transit)),
    );
    Ok(())
}
