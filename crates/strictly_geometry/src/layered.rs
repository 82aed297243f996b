//! Stacked square platforms.

use crate::label::{algebraic_to_coords, coords_to_algebraic};
use crate::{GeometryError, RectGrid, Topology};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A pyramid of square layers: layer `k` is `(size - k) × (size - k)` and
/// each of its cells rests on the four cells beneath it.
///
/// Coordinates are `(x, y, layer)`. Labels prefix the layer number (one-based)
/// to the rectangular label within that layer, so `1a1` is the bottom-left
/// cell of the ground floor and `2a1` the cell resting on `1a1`, `1b1`, `1a2`
/// and `1b2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareStackGrid {
    size: usize,
}

impl SquareStackGrid {
    /// Creates a pyramid with a `size × size` ground floor.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GeometryError> {
        if size == 0 {
            return Err(GeometryError::InvalidDimensions("size 0".to_string()));
        }
        Ok(Self { size })
    }

    /// Number of layers.
    pub fn layers(&self) -> usize {
        self.size
    }

    /// The square grid of one layer.
    pub fn layer_grid(&self, layer: usize) -> Result<RectGrid, GeometryError> {
        if layer >= self.size {
            return Err(GeometryError::out_of_bounds(0, layer));
        }
        RectGrid::square(self.size - layer)
    }

    /// The four cells a raised cell rests on (empty for the ground floor).
    pub fn supports(&self, coord: (usize, usize, usize)) -> Result<Vec<(usize, usize, usize)>, GeometryError> {
        let (x, y, layer) = self.check(coord)?;
        if layer == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![
            (x, y, layer - 1),
            (x + 1, y, layer - 1),
            (x, y + 1, layer - 1),
            (x + 1, y + 1, layer - 1),
        ])
    }

    /// Cells on the layer above that rest (partly) on this cell.
    pub fn supported(&self, coord: (usize, usize, usize)) -> Result<Vec<(usize, usize, usize)>, GeometryError> {
        let (x, y, layer) = self.check(coord)?;
        let above = layer + 1;
        let candidates = [
            (x.checked_sub(1), y.checked_sub(1)),
            (Some(x), y.checked_sub(1)),
            (x.checked_sub(1), Some(y)),
            (Some(x), Some(y)),
        ];
        Ok(candidates
            .into_iter()
            .filter_map(|(cx, cy)| Some((cx?, cy?, above)))
            .filter(|&c| self.contains(c))
            .collect())
    }

    fn check(&self, coord: (usize, usize, usize)) -> Result<(usize, usize, usize), GeometryError> {
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(GeometryError::out_of_bounds(coord.0, coord.1))
        }
    }
}

impl Topology for SquareStackGrid {
    type Coord = (usize, usize, usize);

    fn contains(&self, (x, y, layer): (usize, usize, usize)) -> bool {
        layer < self.size && x < self.size - layer && y < self.size - layer
    }

    fn cells(&self) -> Vec<(usize, usize, usize)> {
        (0..self.size)
            .flat_map(|layer| {
                let side = self.size - layer;
                (0..side).flat_map(move |y| (0..side).map(move |x| (x, y, layer)))
            })
            .collect()
    }

    fn coords_to_label(&self, coord: (usize, usize, usize)) -> Result<String, GeometryError> {
        let (x, y, layer) = self.check(coord)?;
        let side = self.size - layer;
        Ok(format!("{}{}", layer + 1, coords_to_algebraic(x, y, side, side)?))
    }

    fn label_to_coords(&self, label: &str) -> Result<(usize, usize, usize), GeometryError> {
        let split = label
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| GeometryError::malformed(label))?;
        let (digits, rest) = label.split_at(split);
        if digits.is_empty() || digits.starts_with('0') {
            return Err(GeometryError::malformed(label));
        }
        let layer = digits
            .parse::<usize>()
            .map_err(|_| GeometryError::malformed(label))?
            - 1;
        if layer >= self.size {
            return Err(GeometryError::malformed(label));
        }
        let side = self.size - layer;
        let (x, y) = algebraic_to_coords(rest, side, side).map_err(|_| GeometryError::malformed(label))?;
        Ok((x, y, layer))
    }

    fn neighbours(&self, coord: (usize, usize, usize)) -> Result<Vec<(usize, usize, usize)>, GeometryError> {
        let (x, y, layer) = self.check(coord)?;
        let mut out: Vec<(usize, usize, usize)> = self
            .layer_grid(layer)?
            .adjacencies(x, y, false)?
            .into_iter()
            .map(|(nx, ny)| (nx, ny, layer))
            .collect();
        out.extend(self.supports(coord)?);
        out.extend(self.supported(coord)?);
        Ok(out)
    }
}
