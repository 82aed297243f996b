//! Grids whose playable elements or adjacency are not plain cells.
//!
//! [`SquareDirectedGrid`] is a rectangular board whose graph only follows a
//! chosen set of directions (forward-only connection rules).
//! [`PegGrid`] is a pegboard whose playable "cells" are the lines between
//! orthogonally adjacent pegs.

use crate::label::{algebraic_to_coords, coords_to_algebraic};
use crate::{CellGraph, Direction, GeometryError, RectGrid, Topology};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A rectangular board whose edges point along permitted directions only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareDirectedGrid {
    grid: RectGrid,
    directions: Vec<Direction>,
}

impl SquareDirectedGrid {
    /// Creates a directed grid following `directions`.
    #[instrument]
    pub fn new(width: usize, height: usize, directions: Vec<Direction>) -> Result<Self, GeometryError> {
        Ok(Self {
            grid: RectGrid::new(width, height)?,
            directions,
        })
    }

    /// The underlying rectangular grid.
    pub fn grid(&self) -> &RectGrid {
        &self.grid
    }

    /// Permitted directions.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }
}

impl Topology for SquareDirectedGrid {
    type Coord = (usize, usize);

    fn contains(&self, coord: (usize, usize)) -> bool {
        self.grid.contains(coord)
    }

    fn cells(&self) -> Vec<(usize, usize)> {
        self.grid.cells()
    }

    fn coords_to_label(&self, coord: (usize, usize)) -> Result<String, GeometryError> {
        self.grid.coords_to_label(coord)
    }

    fn label_to_coords(&self, label: &str) -> Result<(usize, usize), GeometryError> {
        self.grid.label_to_coords(label)
    }

    /// Successors of `coord`: one step along each permitted direction.
    fn neighbours(&self, (x, y): (usize, usize)) -> Result<Vec<(usize, usize)>, GeometryError> {
        if !self.contains((x, y)) {
            return Err(GeometryError::out_of_bounds(x, y));
        }
        Ok(self
            .directions
            .iter()
            .filter_map(|&d| self.grid.step(x, y, d))
            .collect())
    }

    fn graph(&self) -> CellGraph {
        let mut graph = CellGraph::directed();
        for label in self.list_cells() {
            graph.add_node(label);
        }
        for cell in self.cells() {
            let (Ok(from), Ok(next)) = (self.coords_to_label(cell), self.neighbours(cell)) else {
                continue;
            };
            for to in next.into_iter().filter_map(|c| self.coords_to_label(c).ok()) {
                let _ = graph.add_edge(&from, &to);
            }
        }
        graph
    }
}

/// A peg position on a [`PegGrid`].
pub type Peg = (usize, usize);

/// A pegboard of `width × height` pegs whose cells are the lines joining
/// orthogonally adjacent pegs.
///
/// A line is written as its two pegs joined by a dash, pegs ordered by
/// column and then by row index from the top: `a1-b1`, `a2-a1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegGrid {
    width: usize,
    height: usize,
}

impl PegGrid {
    /// Creates a pegboard.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 || width * height < 2 {
            return Err(GeometryError::InvalidDimensions(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Label of a single peg.
    pub fn peg_label(&self, (x, y): Peg) -> Result<String, GeometryError> {
        coords_to_algebraic(x, y, self.width, self.height)
    }

    /// Lines touching a peg.
    pub fn lines_at(&self, (x, y): Peg) -> Result<Vec<(Peg, Peg)>, GeometryError> {
        if x >= self.width || y >= self.height {
            return Err(GeometryError::out_of_bounds(x, y));
        }
        let mut out = Vec::with_capacity(4);
        if x > 0 {
            out.push(((x - 1, y), (x, y)));
        }
        if y > 0 {
            out.push(((x, y - 1), (x, y)));
        }
        if x + 1 < self.width {
            out.push(((x, y), (x + 1, y)));
        }
        if y + 1 < self.height {
            out.push(((x, y), (x, y + 1)));
        }
        Ok(out)
    }

    fn canonical(a: Peg, b: Peg) -> (Peg, Peg) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl Topology for PegGrid {
    type Coord = (Peg, Peg);

    fn contains(&self, (a, b): (Peg, Peg)) -> bool {
        let in_bounds = |(x, y): Peg| x < self.width && y < self.height;
        let ((ax, ay), (bx, by)) = (a, b);
        in_bounds(a) && in_bounds(b) && a < b && ax.abs_diff(bx) + ay.abs_diff(by) == 1
    }

    fn cells(&self) -> Vec<(Peg, Peg)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if x + 1 < self.width {
                    out.push(((x, y), (x + 1, y)));
                }
                if y + 1 < self.height {
                    out.push(((x, y), (x, y + 1)));
                }
            }
        }
        out
    }

    fn coords_to_label(&self, (a, b): (Peg, Peg)) -> Result<String, GeometryError> {
        if !self.contains((a, b)) {
            return Err(GeometryError::out_of_bounds(a.0, a.1));
        }
        Ok(format!("{}-{}", self.peg_label(a)?, self.peg_label(b)?))
    }

    fn label_to_coords(&self, label: &str) -> Result<(Peg, Peg), GeometryError> {
        let (left, right) = label.split_once('-').ok_or_else(|| GeometryError::malformed(label))?;
        let a = algebraic_to_coords(left, self.width, self.height).map_err(|_| GeometryError::malformed(label))?;
        let b = algebraic_to_coords(right, self.width, self.height).map_err(|_| GeometryError::malformed(label))?;
        let line = Self::canonical(a, b);
        if !self.contains(line) {
            return Err(GeometryError::malformed(label));
        }
        Ok(line)
    }

    /// Lines sharing a peg with this line.
    fn neighbours(&self, (a, b): (Peg, Peg)) -> Result<Vec<(Peg, Peg)>, GeometryError> {
        if !self.contains((a, b)) {
            return Err(GeometryError::out_of_bounds(a.0, a.1));
        }
        let mut out: Vec<(Peg, Peg)> = self
            .lines_at(a)?
            .into_iter()
            .chain(self.lines_at(b)?)
            .filter(|&line| line != (a, b))
            .collect();
        out.sort();
        out.dedup();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only_graph() {
        let grid = SquareDirectedGrid::new(1, 3, vec![Direction::N]).unwrap();
        let graph = grid.graph();
        assert!(graph.is_directed());
        assert!(graph.shortest_path("a1", "a3").unwrap().is_some());
        assert!(graph.shortest_path("a3", "a1").unwrap().is_none());
    }

    #[test]
    fn test_peg_lines() {
        let pegs = PegGrid::new(3, 3).unwrap();
        assert_eq!(pegs.cells().len(), 12);
        let label = pegs.coords_to_label(((0, 2), (1, 2))).unwrap();
        assert_eq!(label, "a1-b1");
        // Either peg order parses to the same line.
        assert_eq!(pegs.label_to_coords("b1-a1").unwrap(), ((0, 2), (1, 2)));
        assert!(pegs.label_to_coords("a1-b2").is_err());
        assert!(pegs.label_to_coords("a1").is_err());
    }

    #[test]
    fn test_peg_line_neighbours() {
        let pegs = PegGrid::new(3, 3).unwrap();
        // Edge peg contributes two lines, centre peg three.
        assert_eq!(pegs.neighbours(((0, 1), (1, 1))).unwrap().len(), 5);
        assert_eq!(pegs.neighbours(((1, 1), (2, 1))).unwrap().len(), 5);
        assert_eq!(pegs.neighbours(((0, 0), (1, 0))).unwrap().len(), 3);
    }
}
