//! Board geometry for abstract strategy games.
//!
//! This crate holds the spatial primitives that move generators and
//! end-of-game checks are built on. Nothing here knows about game state.
//!
//! # Architecture
//!
//! - **Labels**: bijective `coords ⇄ "a1"` conversion and natural ordering
//! - **Topologies**: rectangular, hex (rhombus and hex-of-hex), stacked
//!   square layers, directed grids and pegboards, all behind [`Topology`]
//! - **Graph**: [`CellGraph`] with shortest-path and connected-component queries
//! - **Cycles**: shortest enclosing-loop search for ring win conditions
//!
//! # Example
//!
//! ```
//! use strictly_geometry::{RectGrid, Topology, build_owned_graph};
//!
//! let grid = RectGrid::square(3).unwrap();
//! let owned = ["a1", "a2", "a3"];
//! let graph = build_owned_graph(&grid, |cell| owned.contains(&cell));
//! let path = graph.shortest_path_between(&["a1"], &["a3"]);
//! assert_eq!(path.map(|p| p.len()), Some(3));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cycles;
mod directed;
mod direction;
mod error;
mod graph;
mod hex;
mod layered;
mod path_set;
mod rect;
mod topology;

pub mod label;

pub use cycles::{enclosed_cells, find_enclosing_loop, find_loop};
pub use directed::{Peg, PegGrid, SquareDirectedGrid};
pub use direction::Direction;
pub use error::GeometryError;
pub use graph::CellGraph;
pub use hex::{HEX_DIRECTIONS, HexSlantedGrid, HexTriGrid, axial_distance, hex_delta};
pub use label::{algebraic_to_coords, compare_labels, coords_to_algebraic, sort_labels};
pub use layered::SquareStackGrid;
pub use path_set::PathSet;
pub use rect::RectGrid;
pub use topology::{Topology, build_owned_graph};
