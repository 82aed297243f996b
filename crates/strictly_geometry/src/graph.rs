//! Labelled cell graph with connectivity queries.
//!
//! Nodes are cell labels. The graph is rebuilt from a topology whenever the
//! board changes and then filtered down ("drop every cell not owned by the
//! player") before connectivity questions are asked of it. Adjacency is kept
//! in ordered collections so every traversal is deterministic.

use crate::GeometryError;
use crate::label::compare_labels;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tracing::{instrument, trace};

/// An undirected or directed graph over cell labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellGraph {
    directed: bool,
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl CellGraph {
    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self {
            directed: false,
            adjacency: BTreeMap::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self {
            directed: true,
            adjacency: BTreeMap::new(),
        }
    }

    /// True if edges have a direction.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds a node; adding an existing node is a no-op.
    pub fn add_node(&mut self, label: impl Into<String>) {
        self.adjacency.entry(label.into()).or_default();
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingNode`] if either endpoint is absent.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), GeometryError> {
        if !self.has_node(to) {
            return Err(GeometryError::missing(to));
        }
        self.adjacency
            .get_mut(from)
            .ok_or_else(|| GeometryError::missing(from))?
            .insert(to.to_string());
        if !self.directed
            && let Some(back) = self.adjacency.get_mut(to)
        {
            back.insert(from.to_string());
        }
        Ok(())
    }

    /// True if the node is present.
    pub fn has_node(&self, label: &str) -> bool {
        self.adjacency.contains_key(label)
    }

    /// True if there is an edge from `from` to `to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency.get(from).is_some_and(|n| n.contains(to))
    }

    /// Removes a node and every edge touching it. Returns false if it was absent.
    pub fn drop_node(&mut self, label: &str) -> bool {
        if self.adjacency.remove(label).is_none() {
            return false;
        }
        for neighbours in self.adjacency.values_mut() {
            neighbours.remove(label);
        }
        true
    }

    /// Keeps only the nodes for which `keep` returns true.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let dropped: BTreeSet<String> = self
            .adjacency
            .keys()
            .filter(|label| !keep(label))
            .cloned()
            .collect();
        if dropped.is_empty() {
            return;
        }
        self.adjacency.retain(|label, _| !dropped.contains(label));
        for neighbours in self.adjacency.values_mut() {
            neighbours.retain(|n| !dropped.contains(n));
        }
    }

    /// Drops every node for which `drop` returns true.
    pub fn drop_nodes_where(&mut self, mut drop: impl FnMut(&str) -> bool) {
        self.retain_nodes(|label| !drop(label));
    }

    /// Node labels in graph order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges (each undirected edge counted once).
    pub fn size(&self) -> usize {
        let arcs: usize = self.adjacency.values().map(BTreeSet::len).sum();
        if self.directed { arcs } else { arcs / 2 }
    }

    /// Every edge as a `(from, to)` pair; undirected edges are listed once.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        for (from, neighbours) in &self.adjacency {
            for to in neighbours {
                if self.directed || from < to {
                    out.push((from.as_str(), to.as_str()));
                }
            }
        }
        out
    }

    /// Neighbours (successors, for a directed graph) of a node.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingNode`] if the node is absent. Callers
    /// holding possibly-dropped labels must check [`CellGraph::has_node`] first.
    pub fn neighbours(&self, label: &str) -> Result<Vec<&str>, GeometryError> {
        self.adjacency
            .get(label)
            .map(|n| n.iter().map(String::as_str).collect())
            .ok_or_else(|| GeometryError::missing(label))
    }

    /// Shortest path between two nodes, both endpoints included.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingNode`] if either node is absent.
    #[instrument(level = "debug", skip(self), fields(order = self.order()))]
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<Vec<String>>, GeometryError> {
        if !self.has_node(from) {
            return Err(GeometryError::missing(from));
        }
        if !self.has_node(to) {
            return Err(GeometryError::missing(to));
        }
        Ok(self.bfs(&[from], |label| label == to))
    }

    /// Shortest path from any node of `sources` to any node of `targets`.
    ///
    /// Labels absent from the graph are ignored, so the edge sets of a board
    /// can be passed straight in after the graph was filtered to one owner.
    #[instrument(level = "debug", skip_all, fields(order = self.order()))]
    pub fn shortest_path_between<S: AsRef<str>>(&self, sources: &[S], targets: &[S]) -> Option<Vec<String>> {
        let targets: BTreeSet<&str> = targets
            .iter()
            .map(|label| label.as_ref())
            .filter(|t| self.has_node(t))
            .collect();
        let mut starts: Vec<&str> = sources
            .iter()
            .map(|label| label.as_ref())
            .filter(|s| self.has_node(s))
            .collect();
        if starts.is_empty() || targets.is_empty() {
            return None;
        }
        starts.sort_by(|a, b| compare_labels(a, b));
        starts.dedup();
        self.bfs(&starts, |label| targets.contains(label))
    }

    fn bfs(&self, starts: &[&str], is_goal: impl Fn(&str) -> bool) -> Option<Vec<String>> {
        let mut parent: HashMap<&str, Option<&str>> = HashMap::new();
        let mut queue = VecDeque::new();
        for &start in starts {
            if parent.insert(start, None).is_none() {
                queue.push_back(start);
            }
        }
        while let Some(current) = queue.pop_front() {
            if is_goal(current) {
                let mut path = vec![current.to_string()];
                let mut cursor = current;
                while let Some(&Some(prev)) = parent.get(cursor) {
                    path.push(prev.to_string());
                    cursor = prev;
                }
                path.reverse();
                trace!(length = path.len(), "Path found");
                return Some(path);
            }
            if let Some(neighbours) = self.adjacency.get(current) {
                for next in neighbours {
                    if !parent.contains_key(next.as_str()) {
                        parent.insert(next.as_str(), Some(current));
                        queue.push_back(next.as_str());
                    }
                }
            }
        }
        None
    }

    /// Partitions the graph into maximal connected groups.
    ///
    /// Directed graphs are treated as undirected (weak connectivity). Each
    /// group is sorted with [`compare_labels`] and groups are ordered by their
    /// first label.
    #[instrument(level = "debug", skip(self), fields(order = self.order()))]
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let undirected = self.undirected_view();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut groups = Vec::new();
        for &start in undirected.keys() {
            if seen.contains(start) {
                continue;
            }
            let mut group = Vec::new();
            let mut queue = VecDeque::from([start]);
            seen.insert(start);
            while let Some(current) = queue.pop_front() {
                group.push(current.to_string());
                for &next in &undirected[current] {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            group.sort_by(|a, b| compare_labels(a, b));
            groups.push(group);
        }
        groups.sort_by(|a, b| compare_labels(&a[0], &b[0]));
        groups
    }

    /// The connected group containing `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingNode`] if the node is absent.
    pub fn component_of(&self, label: &str) -> Result<Vec<String>, GeometryError> {
        if !self.has_node(label) {
            return Err(GeometryError::missing(label));
        }
        Ok(self
            .connected_components()
            .into_iter()
            .find(|group| group.iter().any(|l| l == label))
            .unwrap_or_default())
    }

    /// True if the graph has at most one connected group.
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    fn undirected_view(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut view: BTreeMap<&str, BTreeSet<&str>> = self
            .adjacency
            .iter()
            .map(|(k, v)| (k.as_str(), v.iter().map(String::as_str).collect()))
            .collect();
        if self.directed {
            for (from, neighbours) in &self.adjacency {
                for to in neighbours {
                    if let Some(back) = view.get_mut(to.as_str()) {
                        back.insert(from.as_str());
                    }
                }
            }
        }
        view
    }
}
