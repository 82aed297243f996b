//! Small helpers shared by every game.

pub mod codec;
mod rng;

pub use rng::{GameRng, random_int, shuffle};
pub use strictly_geometry::PathSet;
