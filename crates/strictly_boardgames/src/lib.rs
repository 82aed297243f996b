//! Reference games for the strictly engine.
//!
//! Three small games exercise the engine contract end to end:
//!
//! - [`NinARow`]: turn-based placement on a square grid, line detection
//! - [`Hex`]: connection on a hex rhombus, with the pie rule
//! - [`Claim`]: simultaneous placement on a hexagon of hexes, scored by
//!   largest connected group
//!
//! [`AnyGame`] wraps them for front ends that choose a game at run time.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod games;
mod registry;

pub use games::claim::{Claim, ClaimBoard};
pub use games::hex::{Hex, HexBoard};
pub use games::ninarow::{LineBoard, NinARow, Stone};
pub use registry::{AnyGame, GameId};
