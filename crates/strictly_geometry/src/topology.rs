//! The contract shared by every board shape.

use crate::{CellGraph, GeometryError};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, instrument};

/// A board shape: a finite set of cells, their labels, and their adjacency.
///
/// Implementations are pure descriptions of geometry; they never hold game
/// state. Every method that takes a coordinate fails with
/// [`GeometryError::OutOfBounds`] if the coordinate is not on the board.
pub trait Topology {
    /// Native coordinate type for this shape.
    type Coord: Copy + Eq + Hash + Debug;

    /// True if the coordinate is a cell of this board.
    fn contains(&self, coord: Self::Coord) -> bool;

    /// Every cell in canonical order (top row first, left to right).
    fn cells(&self) -> Vec<Self::Coord>;

    /// The label of a cell.
    fn coords_to_label(&self, coord: Self::Coord) -> Result<String, GeometryError>;

    /// The cell named by a label.
    fn label_to_coords(&self, label: &str) -> Result<Self::Coord, GeometryError>;

    /// Cells adjacent to `coord` under this board's native adjacency, never
    /// including `coord` itself.
    fn neighbours(&self, coord: Self::Coord) -> Result<Vec<Self::Coord>, GeometryError>;

    /// Every cell label in canonical order.
    fn list_cells(&self) -> Vec<String> {
        self.cells()
            .into_iter()
            .filter_map(|c| self.coords_to_label(c).ok())
            .collect()
    }

    /// Undirected graph of every cell and its native adjacency.
    fn graph(&self) -> CellGraph {
        let mut graph = CellGraph::undirected();
        let cells = self.cells();
        for &cell in &cells {
            if let Ok(label) = self.coords_to_label(cell) {
                graph.add_node(label);
            }
        }
        for &cell in &cells {
            let (Ok(from), Ok(adjacent)) = (self.coords_to_label(cell), self.neighbours(cell)) else {
                continue;
            };
            for next in adjacent {
                if let Ok(to) = self.coords_to_label(next) {
                    // Both endpoints were added above.
                    let _ = graph.add_edge(&from, &to);
                }
            }
        }
        graph
    }
}

/// Builds the graph of cells for which `owned` returns true.
///
/// This is the standard first step of every "does this player connect"
/// check: start from the full board graph and drop everything the player
/// does not hold. The board changes every move, so the graph is always built
/// fresh.
#[instrument(level = "debug", skip_all)]
pub fn build_owned_graph<T: Topology>(topology: &T, owned: impl Fn(&str) -> bool) -> CellGraph {
    let mut graph = topology.graph();
    graph.retain_nodes(owned);
    debug!(order = graph.order(), size = graph.size(), "Owned graph built");
    graph
}
