//! Every label a board lists converts to coordinates and back unchanged.

use std::collections::HashSet;
use strictly_geometry::{
    HexSlantedGrid, HexTriGrid, PegGrid, RectGrid, SquareDirectedGrid, SquareStackGrid, Topology, Direction,
};

fn assert_round_trip<T: Topology>(topology: &T) {
    let labels = topology.list_cells();
    assert_eq!(labels.len(), topology.cells().len());

    let unique: HashSet<&String> = labels.iter().collect();
    assert_eq!(unique.len(), labels.len(), "labels must be unique");

    for label in &labels {
        let coords = topology.label_to_coords(label).expect("listed label parses");
        assert_eq!(&topology.coords_to_label(coords).expect("coords label"), label);
    }
}

fn assert_symmetric_graph<T: Topology>(topology: &T) {
    let graph = topology.graph();
    assert_eq!(graph.order(), topology.cells().len());
    for (from, to) in graph.edges() {
        assert!(graph.has_edge(to, from), "{from} -> {to} has no reverse edge");
    }
}

#[test]
fn test_rect_round_trip() {
    for (w, h) in [(1, 1), (3, 3), (8, 5), (30, 2)] {
        let grid = RectGrid::new(w, h).unwrap();
        assert_round_trip(&grid);
        assert_symmetric_graph(&grid);
    }
}

#[test]
fn test_hex_round_trip() {
    for size in [2, 5, 11] {
        let slanted = HexSlantedGrid::new(size, size).unwrap();
        assert_round_trip(&slanted);
        assert_symmetric_graph(&slanted);

        let tri = HexTriGrid::new(size).unwrap();
        assert_round_trip(&tri);
        assert_symmetric_graph(&tri);
    }
}

#[test]
fn test_layered_and_peg_round_trip() {
    let stack = SquareStackGrid::new(4).unwrap();
    assert_round_trip(&stack);
    assert_symmetric_graph(&stack);

    let pegs = PegGrid::new(4, 3).unwrap();
    assert_round_trip(&pegs);
    assert_symmetric_graph(&pegs);
}

#[test]
fn test_directed_round_trip() {
    let grid = SquareDirectedGrid::new(4, 4, vec![Direction::N, Direction::NE, Direction::NW]).unwrap();
    assert_round_trip(&grid);
    let graph = grid.graph();
    // Forward-only: nothing on the top row has a successor.
    for label in ["a4", "b4", "c4", "d4"] {
        assert!(graph.neighbours(label).unwrap().is_empty());
    }
}

#[test]
fn test_out_of_bounds_always_fails() {
    let rect = RectGrid::square(3).unwrap();
    assert!(rect.neighbours((3, 3)).is_err());
    assert!(rect.coords_to_label((0, 3)).is_err());

    let tri = HexTriGrid::new(3).unwrap();
    assert!(tri.neighbours((4, 0)).is_err());
    assert!(tri.ray(0, 9, Direction::E).is_err());

    let stack = SquareStackGrid::new(3).unwrap();
    assert!(stack.neighbours((2, 0, 1)).is_err());
}
