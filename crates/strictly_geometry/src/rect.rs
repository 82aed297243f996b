//! Rectangular grids.

use crate::label::{algebraic_to_coords, coords_to_algebraic};
use crate::{CellGraph, Direction, GeometryError, Topology};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A `width × height` board of square cells.
///
/// Coordinates are `(x, y)` with `(0, 0)` in the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectGrid {
    width: usize,
    height: usize,
}

impl RectGrid {
    /// Creates a grid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimensions`] if either side is zero.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Creates a square grid.
    pub fn square(size: usize) -> Result<Self, GeometryError> {
        Self::new(size, size)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn check(&self, x: usize, y: usize) -> Result<(), GeometryError> {
        if self.contains((x, y)) {
            Ok(())
        } else {
            Err(GeometryError::out_of_bounds(x, y))
        }
    }

    /// One step from `(x, y)` in `dir`, if that stays on the board.
    pub fn step(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.delta();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
            return None;
        }
        Some((nx as usize, ny as usize))
    }

    /// In-bounds neighbours, orthogonal first and then (optionally) diagonal.
    pub fn adjacencies(
        &self,
        x: usize,
        y: usize,
        include_diagonals: bool,
    ) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.check(x, y)?;
        let mut dirs = Direction::orthogonal().to_vec();
        if include_diagonals {
            dirs.extend(Direction::diagonal());
        }
        Ok(dirs.into_iter().filter_map(|d| self.step(x, y, d)).collect())
    }

    /// Cells from `(x, y)` outward in `dir` up to the board edge, origin excluded.
    pub fn ray(&self, x: usize, y: usize, dir: Direction) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.check(x, y)?;
        let mut out = Vec::new();
        let mut cursor = (x, y);
        while let Some(next) = self.step(cursor.0, cursor.1, dir) {
            out.push(next);
            cursor = next;
        }
        Ok(out)
    }

    /// Cells strictly between two points on a shared row, column or diagonal.
    ///
    /// Returns an empty list when the points are not aligned or adjacent.
    pub fn between(
        &self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    ) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.check(x1, y1)?;
        self.check(x2, y2)?;
        let Some(dir) = Self::bearing(x1, y1, x2, y2) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        let mut cursor = (x1, y1);
        while let Some(next) = self.step(cursor.0, cursor.1, dir) {
            if next == (x2, y2) {
                break;
            }
            out.push(next);
            cursor = next;
        }
        Ok(out)
    }

    /// Direction from the first point to the second, if they are aligned.
    pub fn bearing(x1: usize, y1: usize, x2: usize, y2: usize) -> Option<Direction> {
        let dx = x2 as i64 - x1 as i64;
        let dy = y2 as i64 - y1 as i64;
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx == 0 || dy == 0 || dx.abs() == dy.abs() {
            Direction::from_delta(dx, dy)
        } else {
            None
        }
    }

    /// Chebyshev (king-move) distance.
    pub fn distance(x1: usize, y1: usize, x2: usize, y2: usize) -> usize {
        x1.abs_diff(x2).max(y1.abs_diff(y2))
    }

    /// Euclidean distance.
    pub fn true_distance(x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
        let dx = x1.abs_diff(x2) as f64;
        let dy = y1.abs_diff(y2) as f64;
        dx.hypot(dy)
    }

    /// Manhattan (rook-step) distance.
    pub fn manhattan(x1: usize, y1: usize, x2: usize, y2: usize) -> usize {
        x1.abs_diff(x2) + y1.abs_diff(y2)
    }

    /// Cells on the outer ring in the given direction (e.g. `N` is the top row).
    pub fn edge(&self, side: Direction) -> Vec<(usize, usize)> {
        self.cells()
            .into_iter()
            .filter(|&(x, y)| self.step(x, y, side).is_none())
            .collect()
    }

    /// Board graph, optionally with diagonal adjacency.
    pub fn graph_with(&self, include_diagonals: bool) -> CellGraph {
        if !include_diagonals {
            return self.graph();
        }
        let mut graph = CellGraph::undirected();
        for (x, y) in self.cells() {
            graph.add_node(self.label(x, y));
        }
        for (x, y) in self.cells() {
            let from = self.label(x, y);
            for dir in Direction::all() {
                if let Some((nx, ny)) = self.step(x, y, dir) {
                    let _ = graph.add_edge(&from, &self.label(nx, ny));
                }
            }
        }
        graph
    }

    // Only called with coordinates that came from `cells()` or `step()`.
    fn label(&self, x: usize, y: usize) -> String {
        coords_to_algebraic(x, y, self.width, self.height).unwrap_or_default()
    }
}

impl Topology for RectGrid {
    type Coord = (usize, usize);

    fn contains(&self, (x, y): (usize, usize)) -> bool {
        x < self.width && y < self.height
    }

    fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .collect()
    }

    fn coords_to_label(&self, (x, y): (usize, usize)) -> Result<String, GeometryError> {
        coords_to_algebraic(x, y, self.width, self.height)
    }

    fn label_to_coords(&self, label: &str) -> Result<(usize, usize), GeometryError> {
        algebraic_to_coords(label, self.width, self.height)
    }

    fn neighbours(&self, (x, y): (usize, usize)) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.adjacencies(x, y, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_adjacency() {
        let grid = RectGrid::square(3).unwrap();
        assert_eq!(grid.adjacencies(0, 0, false).unwrap(), vec![(1, 0), (0, 1)]);
        assert_eq!(grid.adjacencies(0, 0, true).unwrap().len(), 3);
        assert_eq!(grid.adjacencies(1, 1, true).unwrap().len(), 8);
    }

    #[test]
    fn test_ray_stops_at_edge_and_excludes_origin() {
        let grid = RectGrid::new(5, 4).unwrap();
        assert_eq!(grid.ray(1, 1, Direction::E).unwrap(), vec![(2, 1), (3, 1), (4, 1)]);
        assert_eq!(grid.ray(1, 1, Direction::NW).unwrap(), vec![(0, 0)]);
        assert!(grid.ray(0, 0, Direction::N).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_bounds_origin_fails() {
        let grid = RectGrid::square(3).unwrap();
        assert!(grid.ray(3, 0, Direction::S).is_err());
        assert!(grid.adjacencies(0, 9, false).is_err());
    }

    #[test]
    fn test_between() {
        let grid = RectGrid::square(8).unwrap();
        assert_eq!(grid.between(0, 0, 3, 3).unwrap(), vec![(1, 1), (2, 2)]);
        assert_eq!(grid.between(0, 0, 0, 1).unwrap(), Vec::<(usize, usize)>::new());
        assert!(grid.between(0, 0, 1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_bearing_and_metrics() {
        assert_eq!(RectGrid::bearing(2, 2, 2, 0), Some(Direction::N));
        assert_eq!(RectGrid::bearing(2, 2, 4, 4), Some(Direction::SE));
        assert_eq!(RectGrid::bearing(0, 0, 1, 2), None);
        assert_eq!(RectGrid::bearing(1, 1, 1, 1), None);
        assert_eq!(RectGrid::distance(0, 0, 3, 1), 3);
        assert_eq!(RectGrid::manhattan(0, 0, 3, 1), 4);
        assert!((RectGrid::true_distance(0, 0, 3, 4) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_graph_sizes() {
        let grid = RectGrid::square(3).unwrap();
        assert_eq!(grid.graph().size(), 12);
        assert_eq!(grid.graph_with(true).size(), 20);
    }

    #[test]
    fn test_edges() {
        let grid = RectGrid::new(4, 3).unwrap();
        assert_eq!(grid.edge(Direction::N).len(), 4);
        assert_eq!(grid.edge(Direction::W).len(), 3);
    }
}
