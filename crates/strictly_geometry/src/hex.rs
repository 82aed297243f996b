//! Hexagonal boards.
//!
//! Both shapes use pointy-topped hexes laid out in horizontal rows and do
//! their arithmetic in axial coordinates `(q, r)`, where `r` is the row. The
//! six neighbour directions are E, W, NE, NW, SE and SW; N and S do not exist
//! on a hex row.

use crate::label::{algebraic_to_coords, column_index, column_label, coords_to_algebraic, split_label};
use crate::{Direction, GeometryError, Topology};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The six hex directions, clockwise from north-east.
pub const HEX_DIRECTIONS: [Direction; 6] = [
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::SW,
    Direction::W,
    Direction::NW,
];

/// Axial step for a hex direction.
pub fn hex_delta(dir: Direction) -> Result<(i64, i64), GeometryError> {
    match dir {
        Direction::E => Ok((1, 0)),
        Direction::W => Ok((-1, 0)),
        Direction::NE => Ok((1, -1)),
        Direction::NW => Ok((0, -1)),
        Direction::SE => Ok((0, 1)),
        Direction::SW => Ok((-1, 1)),
        other => Err(GeometryError::UnsupportedDirection(other)),
    }
}

/// Hex distance between two axial coordinates.
pub fn axial_distance((q1, r1): (i64, i64), (q2, r2): (i64, i64)) -> usize {
    let dq = q1 - q2;
    let dr = r1 - r2;
    ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as usize
}

/// Shared walking logic for both hex shapes.
trait Axial: Topology<Coord = (usize, usize)> {
    fn to_axial(&self, coord: (usize, usize)) -> (i64, i64);
    fn from_axial(&self, axial: (i64, i64)) -> Option<(usize, usize)>;

    fn hex_step(&self, coord: (usize, usize), dir: Direction) -> Result<Option<(usize, usize)>, GeometryError> {
        let (dq, dr) = hex_delta(dir)?;
        let (q, r) = self.to_axial(coord);
        Ok(self.from_axial((q + dq, r + dr)))
    }

    fn hex_neighbours(&self, coord: (usize, usize)) -> Result<Vec<(usize, usize)>, GeometryError> {
        if !self.contains(coord) {
            return Err(GeometryError::out_of_bounds(coord.0, coord.1));
        }
        let mut out = Vec::with_capacity(6);
        for dir in HEX_DIRECTIONS {
            if let Some(next) = self.hex_step(coord, dir)? {
                out.push(next);
            }
        }
        Ok(out)
    }

    fn hex_ray(&self, coord: (usize, usize), dir: Direction) -> Result<Vec<(usize, usize)>, GeometryError> {
        if !self.contains(coord) {
            return Err(GeometryError::out_of_bounds(coord.0, coord.1));
        }
        let mut out = Vec::new();
        let mut cursor = coord;
        while let Some(next) = self.hex_step(cursor, dir)? {
            out.push(next);
            cursor = next;
        }
        Ok(out)
    }
}

/// A rhombus of hexes, as used by Hex and similar connection games.
///
/// Cell `(x, y)` has axial coordinates `(x, y)`, so each row sits half a
/// cell to the right of the row above it. Labels follow the rectangular
/// scheme (`a1` is the bottom-left cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexSlantedGrid {
    width: usize,
    height: usize,
}

impl HexSlantedGrid {
    /// Creates a rhombus board.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells from `(x, y)` outward in `dir` up to the board edge, origin excluded.
    pub fn ray(&self, x: usize, y: usize, dir: Direction) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.hex_ray((x, y), dir)
    }

    /// Hex distance between two cells.
    pub fn distance(&self, a: (usize, usize), b: (usize, usize)) -> usize {
        axial_distance(self.to_axial(a), self.to_axial(b))
    }
}

impl Axial for HexSlantedGrid {
    fn to_axial(&self, (x, y): (usize, usize)) -> (i64, i64) {
        (x as i64, y as i64)
    }

    fn from_axial(&self, (q, r): (i64, i64)) -> Option<(usize, usize)> {
        let coord = (usize::try_from(q).ok()?, usize::try_from(r).ok()?);
        self.contains(coord).then_some(coord)
    }
}

impl Topology for HexSlantedGrid {
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

    fn neighbours(&self, coord: (usize, usize)) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.hex_neighbours(coord)
    }
}

/// A hexagon of hexes with `side` cells on each edge.
///
/// Rows have non-uniform length: the top row has `side` cells, the middle
/// row `2 * side - 1`. Labels are a row letter (`a` is the top row) followed
/// by a one-based position within the row, e.g. `c5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexTriGrid {
    side: usize,
}

impl HexTriGrid {
    /// Creates a hex-of-hex board.
    #[instrument]
    pub fn new(side: usize) -> Result<Self, GeometryError> {
        if side < 2 {
            return Err(GeometryError::InvalidDimensions(format!("side {side}")));
        }
        Ok(Self { side })
    }

    /// Cells per edge.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of rows (`2 * side - 1`).
    pub fn rows(&self) -> usize {
        2 * self.side - 1
    }

    /// Number of cells in row `y`.
    pub fn row_len(&self, y: usize) -> usize {
        let mid = self.side - 1;
        self.side + y.min(2 * mid - y.min(2 * mid))
    }

    /// Cells from `(x, y)` outward in `dir` up to the board edge, origin excluded.
    pub fn ray(&self, x: usize, y: usize, dir: Direction) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.hex_ray((x, y), dir)
    }

    /// Hex distance between two cells.
    pub fn distance(&self, a: (usize, usize), b: (usize, usize)) -> usize {
        axial_distance(self.to_axial(a), self.to_axial(b))
    }

    /// Cells on the outer ring of the board.
    pub fn perimeter(&self) -> Vec<(usize, usize)> {
        self.cells()
            .into_iter()
            .filter(|&c| self.hex_neighbours(c).map(|n| n.len() < 6).unwrap_or(false))
            .collect()
    }

    fn row_offset(&self, r: i64) -> i64 {
        let m = (self.side - 1) as i64;
        (-m).max(-r - m)
    }
}

impl Axial for HexTriGrid {
    fn to_axial(&self, (x, y): (usize, usize)) -> (i64, i64) {
        let r = y as i64 - (self.side - 1) as i64;
        (x as i64 + self.row_offset(r), r)
    }

    fn from_axial(&self, (q, r): (i64, i64)) -> Option<(usize, usize)> {
        let y = usize::try_from(r + (self.side - 1) as i64).ok()?;
        let x = usize::try_from(q - self.row_offset(r)).ok()?;
        self.contains((x, y)).then_some((x, y))
    }
}

impl Topology for HexTriGrid {
    type Coord = (usize, usize);

    fn contains(&self, (x, y): (usize, usize)) -> bool {
        y < self.rows() && x < self.row_len(y)
    }

    fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.rows())
            .flat_map(|y| (0..self.row_len(y)).map(move |x| (x, y)))
            .collect()
    }

    fn coords_to_label(&self, (x, y): (usize, usize)) -> Result<String, GeometryError> {
        if !self.contains((x, y)) {
            return Err(GeometryError::out_of_bounds(x, y));
        }
        Ok(format!("{}{}", column_label(y), x + 1))
    }

    fn label_to_coords(&self, label: &str) -> Result<(usize, usize), GeometryError> {
        let (letters, n) = split_label(label).ok_or_else(|| GeometryError::malformed(label))?;
        let y = column_index(letters).ok_or_else(|| GeometryError::malformed(label))?;
        let coord = (n - 1, y);
        if !self.contains(coord) {
            return Err(GeometryError::malformed(label));
        }
        Ok(coord)
    }

    fn neighbours(&self, coord: (usize, usize)) -> Result<Vec<(usize, usize)>, GeometryError> {
        self.hex_neighbours(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tri_row_lengths() {
        let grid = HexTriGrid::new(3).unwrap();
        let lens: Vec<usize> = (0..grid.rows()).map(|y| grid.row_len(y)).collect();
        assert_eq!(lens, vec![3, 4, 5, 4, 3]);
        assert_eq!(grid.cells().len(), 19);
    }

    #[test]
    fn test_tri_neighbours() {
        let grid = HexTriGrid::new(2).unwrap();
        // Centre of the seven-cell board touches every other cell.
        assert_eq!(grid.neighbours((1, 1)).unwrap().len(), 6);
        let mut top_left = grid.neighbours((0, 0)).unwrap();
        top_left.sort();
        assert_eq!(top_left, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_tri_labels() {
        let grid = HexTriGrid::new(3).unwrap();
        assert_eq!(grid.coords_to_label((4, 2)).unwrap(), "c5");
        assert_eq!(grid.label_to_coords("c5").unwrap(), (4, 2));
        assert!(grid.label_to_coords("a4").is_err());
        assert!(grid.label_to_coords("f1").is_err());
    }

    #[test]
    fn test_tri_perimeter() {
        let grid = HexTriGrid::new(3).unwrap();
        assert_eq!(grid.perimeter().len(), 12);
    }

    #[test]
    fn test_slanted_neighbours_and_ray() {
        let grid = HexSlantedGrid::new(4, 4).unwrap();
        // Acute corner at the top left, obtuse corner at the top right.
        assert_eq!(grid.neighbours((0, 0)).unwrap().len(), 2);
        let mut obtuse = grid.neighbours((3, 0)).unwrap();
        obtuse.sort();
        assert_eq!(obtuse, vec![(2, 0), (2, 1), (3, 1)]);
        assert_eq!(grid.neighbours((1, 1)).unwrap().len(), 6);
        assert_eq!(grid.ray(0, 3, Direction::NE).unwrap(), vec![(1, 2), (2, 1), (3, 0)]);
        assert!(matches!(
            grid.ray(0, 0, Direction::N),
            Err(GeometryError::UnsupportedDirection(Direction::N))
        ));
    }

    #[test]
    fn test_hex_distance() {
        let grid = HexTriGrid::new(3).unwrap();
        assert_eq!(grid.distance((0, 0), (2, 4)), 4);
        assert_eq!(grid.distance((2, 2), (0, 0)), 2);
        let slanted = HexSlantedGrid::new(5, 5).unwrap();
        assert_eq!(slanted.distance((0, 4), (4, 0)), 4);
    }
}
