//! Growth and decay of a single starspot.
//!
//! A spot is born at 10 MSH, grows at 50% per day to 200 MSH and then decays
//! at 20 MSH per day. It lives in a collection, which drops it once it has
//! fully decayed.
//!
//! Run with: cargo run --example spot_growth

use std::sync::Arc;

use photosphere::{SpotCollection, StarSpot, SurfaceGrid};
use units::{Angle, Area, AreaRate, GrowthRate, Temperature, Time};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let grid = Arc::new(SurfaceGrid::spiral(1000)?);
    let spot = StarSpot::new(
        Angle::zero(),
        Angle::zero(),
        Area::from_msh(200.0),
        Area::from_msh(10.0),
        Temperature::from_kelvin(2700.0),
        Temperature::from_kelvin(2900.0),
        grid.clone(),
    )
    .with_growth_rate(GrowthRate::from_per_day(0.5))
    .with_decay_rate(AreaRate::from_msh_per_day(20.0))
    .with_area_over_umbra_area(5.0)?;

    println!(
        "The spot starts with an area of {:.0} and will grow to {:.0}.\n",
        spot.area_current(),
        spot.area_max()
    );

    let mut spots = SpotCollection::from_spots(vec![spot], grid);
    let dt = Time::from_hours(8.0);
    let total = Time::from_days(20.0);
    let n_steps = (total / dt) as usize;

    println!("{:>10}  {:>10}  {}", "time (d)", "area (MSH)", "phase");
    for step in 0..n_steps {
        let t = dt * step as f64;
        match spots.spots().first() {
            Some(spot) => {
                let phase = if spot.is_growing() { "growing" } else { "decaying" };
                println!(
                    "{:>10.2}  {:>10.1}  {}",
                    t.to_days(),
                    spot.area_current().to_msh(),
                    phase
                );
            }
            None => {
                println!("{:>10.2}  {:>10.1}  gone", t.to_days(), 0.0);
            }
        }
        spots.age(dt);
    }
    Ok(())
}
