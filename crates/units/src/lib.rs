//! Dimensioned physical quantities for photosphere modelling.
//!
//! Every value that crosses a module boundary in the photosphere engine is
//! paired with its dimension through one of these newtypes, with conversion
//! performed at construction and read-out.

pub mod angle;
pub mod area;
pub mod length;
pub mod rate;
pub mod temperature;
pub mod time;

#[cfg(test)]
mod length_test;

pub use angle::Angle;
pub use area::{Area, MSH_TO_KM2};
pub use length::Length;
pub use rate::{AreaRate, GrowthRate};
pub use temperature::Temperature;
pub use time::Time;
