//! Starspots: single-spot lifecycle, populations and stochastic generation.

mod collection;
mod generator;
mod spot;


pub use collection::SpotCollection;
pub use generator::{SpotDistribution, SpotGenerator};
pub use spot::{SpotFootprint, StarSpot};
