//! Loop detection for ring-forming win conditions.

use crate::label::compare_labels;
use crate::{CellGraph, GeometryError, PathSet};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::{debug, instrument};

/// Finds a shortest loop through `start` for which `qualifies` holds.
///
/// The search is an iterative-deepening DFS over `graph` (normally the
/// graph of one player's cells), trying loop lengths from `min_len` upward
/// and exploring neighbours in graph order. The first qualifying loop found
/// is returned, so among several loops of the same length the choice is
/// arbitrary but stable. The returned path starts at `start`; the closing
/// edge back to `start` is implied.
///
/// On an undirected graph a branch is cut as soon as the walk back to
/// `start` no longer fits in the current length, and the search stops early
/// when `start` lies on no cycle at all.
///
/// # Errors
///
/// Returns [`GeometryError::MissingNode`] if `start` is not in the graph.
#[instrument(level = "debug", skip(graph, qualifies), fields(order = graph.order()))]
pub fn find_loop(
    graph: &CellGraph,
    start: &str,
    min_len: usize,
    qualifies: impl Fn(&[String]) -> bool,
) -> Result<Option<Vec<String>>, GeometryError> {
    let reachable = graph.component_of(start)?.len();
    let min_len = min_len.max(3);
    let home = if graph.is_directed() {
        None
    } else {
        if !on_cycle(graph, start) {
            debug!("Start lies on no cycle");
            return Ok(None);
        }
        Some(distances(graph, start))
    };
    for depth in min_len..=reachable {
        let mut path = PathSet::new();
        path.push(start);
        let search = Search {
            graph,
            start,
            depth,
            home: home.as_ref(),
        };
        if let Some(found) = search.extend(&mut path, &qualifies) {
            debug!(length = found.len(), "Loop found");
            return Ok(Some(found));
        }
    }
    Ok(None)
}

struct Search<'g> {
    graph: &'g CellGraph,
    start: &'g str,
    depth: usize,
    home: Option<&'g HashMap<&'g str, usize>>,
}

impl<'g> Search<'g> {
    /// Whether a loop of `depth` cells can still close through `next` with
    /// `taken` cells already on the path.
    fn fits(&self, taken: usize, next: &str) -> bool {
        match self.home {
            Some(home) => home.get(next).is_some_and(|back| taken + back <= self.depth),
            None => true,
        }
    }

    fn extend(&self, path: &mut PathSet<&'g str>, qualifies: &impl Fn(&[String]) -> bool) -> Option<Vec<String>> {
        let last = *path.peek()?;
        if path.len() == self.depth {
            if self.graph.has_edge(last, self.start) {
                let ring: Vec<String> = path.as_slice().iter().map(|s| s.to_string()).collect();
                if qualifies(&ring) {
                    return Some(ring);
                }
            }
            return None;
        }
        for next in self.graph.neighbours(last).ok()? {
            if !self.fits(path.len(), next) {
                continue;
            }
            if path.push(next) {
                if let Some(found) = self.extend(path, qualifies) {
                    return Some(found);
                }
                path.pop();
            }
        }
        None
    }
}

/// BFS hop counts from `start`.
fn distances<'g>(graph: &'g CellGraph, start: &'g str) -> HashMap<&'g str, usize> {
    let mut dist = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let here = dist.get(current).copied().unwrap_or_default();
        for next in graph.neighbours(current).unwrap_or_default() {
            if !dist.contains_key(next) {
                dist.insert(next, here + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

/// True if two neighbours of `start` stay connected once `start` is gone.
fn on_cycle(graph: &CellGraph, start: &str) -> bool {
    let neighbours = graph.neighbours(start).unwrap_or_default();
    let Some((first, rest)) = neighbours.split_first() else {
        return false;
    };
    let mut without = graph.clone();
    without.drop_node(start);
    match without.component_of(first) {
        Ok(component) => rest.iter().any(|n| component.iter().any(|c| c.as_str() == *n)),
        Err(_) => false,
    }
}

/// Drops cells with fewer than two neighbours until none are left.
///
/// Such cells can never sit on a loop.
fn two_core(graph: &CellGraph) -> CellGraph {
    let mut core = graph.clone();
    loop {
        let leaves: Vec<String> = core
            .nodes()
            .filter(|n| core.neighbours(n).map(|ns| ns.len() < 2).unwrap_or(true))
            .map(str::to_string)
            .collect();
        if leaves.is_empty() {
            return core;
        }
        for leaf in &leaves {
            core.drop_node(leaf);
        }
    }
}

/// Cells of `full` cut off from the board edge by `ring`.
///
/// Flood-fills from every edge cell not on the ring through cells not on
/// the ring; whatever is neither ring nor reached is enclosed.
pub fn enclosed_cells<R: AsRef<str>, S: AsRef<str>>(full: &CellGraph, ring: &[R], edge: &[S]) -> Vec<String> {
    let ring: BTreeSet<&str> = ring.iter().map(|s| s.as_ref()).collect();
    let mut reached: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for cell in edge.iter().map(|s| s.as_ref()) {
        if full.has_node(cell) && !ring.contains(cell) && reached.insert(cell) {
            queue.push_back(cell);
        }
    }
    while let Some(current) = queue.pop_front() {
        for next in full.neighbours(current).unwrap_or_default() {
            if !ring.contains(next) && reached.insert(next) {
                queue.push_back(next);
            }
        }
    }
    let mut enclosed: Vec<String> = full
        .nodes()
        .filter(|n| !ring.contains(n) && !reached.contains(n))
        .map(str::to_string)
        .collect();
    enclosed.sort_by(|a, b| compare_labels(a, b));
    enclosed
}

/// Finds a shortest loop through `start` in `owned` that encloses at least
/// one cell of `full`.
///
/// A loop only walls off what the whole group around `start` walls off, so
/// when the group encloses nothing the answer is `None` without searching.
/// Otherwise the search runs over the part of the group that can carry a
/// loop at all.
///
/// # Errors
///
/// Returns [`GeometryError::MissingNode`] if `start` is not in `owned`.
#[instrument(level = "debug", skip(full, owned, edge), fields(order = owned.order()))]
pub fn find_enclosing_loop<S: AsRef<str>>(
    full: &CellGraph,
    owned: &CellGraph,
    start: &str,
    min_len: usize,
    edge: &[S],
) -> Result<Option<Vec<String>>, GeometryError> {
    let group = owned.component_of(start)?;
    if enclosed_cells(full, &group, edge).is_empty() {
        debug!(group = group.len(), "Group encloses nothing");
        return Ok(None);
    }
    let members: BTreeSet<&str> = group.iter().map(String::as_str).collect();
    let mut carrier = owned.clone();
    carrier.retain_nodes(|n| members.contains(n));
    if !carrier.is_directed() {
        carrier = two_core(&carrier);
    }
    if !carrier.has_node(start) {
        return Ok(None);
    }
    find_loop(&carrier, start, min_len, |ring| !enclosed_cells(full, ring, edge).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RectGrid, Topology, build_owned_graph};

    fn ring_board() -> (RectGrid, Vec<&'static str>) {
        // A 3x3 ring of stones around b4 on a 5x5 board.
        let grid = RectGrid::square(5).unwrap();
        let stones = vec!["a3", "a4", "a5", "b3", "b5", "c3", "c4", "c5"];
        (grid, stones)
    }

    #[test]
    fn test_ring_encloses_centre() {
        let (grid, stones) = ring_board();
        let full = grid.graph_with(true);
        let mut owned = full.clone();
        owned.retain_nodes(|l| stones.contains(&l));
        let edge: Vec<String> = grid.list_cells();
        let edge: Vec<String> = edge
            .into_iter()
            .filter(|l| grid.label_to_coords(l).map(|(x, y)| x == 0 || y == 0 || x == 4 || y == 4).unwrap_or(false))
            .collect();
        // Edge of a 5x5 board includes a3..a5 and c5, but b4 is inside the ring.
        let ring = find_enclosing_loop(&full, &owned, "a3", 4, &edge).unwrap().unwrap();
        assert!(ring.len() >= 4);
        assert_eq!(enclosed_cells(&full, &ring, &edge), vec!["b4".to_string()]);
    }

    #[test]
    fn test_short_loops_rejected_by_minimum() {
        let grid = RectGrid::square(2).unwrap();
        let owned = build_owned_graph(&grid, |_| true);
        assert_eq!(find_loop(&owned, "a1", 4, |_| true).unwrap().map(|r| r.len()), Some(4));
        assert_eq!(find_loop(&owned, "a1", 5, |_| true).unwrap(), None);
    }

    #[test]
    fn test_shortest_loop_is_chosen() {
        let grid = RectGrid::new(3, 2).unwrap();
        let owned = build_owned_graph(&grid, |_| true);
        // A 2x2 square (length 4) exists, so the 6-cell perimeter is never picked.
        let ring = find_loop(&owned, "a1", 3, |_| true).unwrap().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], "a1");
    }

    #[test]
    fn test_tree_has_no_loop() {
        let grid = RectGrid::new(3, 1).unwrap();
        let owned = build_owned_graph(&grid, |_| true);
        assert_eq!(find_loop(&owned, "b1", 3, |_| true).unwrap(), None);
        assert!(find_loop(&owned, "z1", 3, |_| true).is_err());
    }

    fn border(grid: &RectGrid) -> Vec<String> {
        grid.list_cells()
            .into_iter()
            .filter(|l| {
                grid.label_to_coords(l)
                    .map(|(x, y)| x == 0 || y == 0 || x + 1 == grid.width() || y + 1 == grid.height())
                    .unwrap_or(false)
            })
            .collect()
    }

    #[test]
    fn test_long_strip_without_enclosure_returns_quickly() {
        let grid = RectGrid::square(30).unwrap();
        let full = grid.graph_with(false);
        let owned = build_owned_graph(&grid, |l| {
            grid.label_to_coords(l)
                .map(|(x, y)| (1..29).contains(&x) && (y == 14 || y == 15))
                .unwrap_or(false)
        });
        let start = grid.coords_to_label((2, 14)).unwrap();
        let began = std::time::Instant::now();
        let found = find_enclosing_loop(&full, &owned, &start, 4, &border(&grid)).unwrap();
        assert_eq!(found, None);
        assert!(began.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_solid_block_encloses_its_centre() {
        let grid = RectGrid::square(5).unwrap();
        let full = grid.graph_with(false);
        let owned = build_owned_graph(&grid, |l| {
            grid.label_to_coords(l)
                .map(|(x, y)| (1..4).contains(&x) && (1..4).contains(&y))
                .unwrap_or(false)
        });
        let start = grid.coords_to_label((1, 1)).unwrap();
        let centre = grid.coords_to_label((2, 2)).unwrap();
        let ring = find_enclosing_loop(&full, &owned, &start, 4, &border(&grid))
            .unwrap()
            .unwrap();
        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&centre));
        assert_eq!(enclosed_cells(&full, &ring, &border(&grid)), vec![centre]);
    }

    #[test]
    fn test_missing_start_is_an_error() {
        let grid = RectGrid::square(3).unwrap();
        let full = grid.graph_with(false);
        let owned = build_owned_graph(&grid, |_| false);
        assert!(find_enclosing_loop(&full, &owned, "b2", 4, &border(&grid)).is_err());
    }
}
