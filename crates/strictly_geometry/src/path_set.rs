//! Stack-ordered set used to track the current path of a depth-first search.

use std::collections::HashSet;
use std::hash::Hash;

/// A stack that also answers membership in O(1).
///
/// Pushing an element already on the stack is refused, which is exactly the
/// "don't revisit a cell on the current path" rule of a simple-path DFS.
#[derive(Debug, Clone, Default)]
pub struct PathSet<T: Eq + Hash + Clone> {
    stack: Vec<T>,
    members: HashSet<T>,
}

impl<T: Eq + Hash + Clone> PathSet<T> {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Pushes `item`; returns false (and does nothing) if it is already present.
    pub fn push(&mut self, item: T) -> bool {
        if !self.members.insert(item.clone()) {
            return false;
        }
        self.stack.push(item);
        true
    }

    /// Pops the most recently pushed item.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.stack.pop()?;
        self.members.remove(&item);
        Some(item)
    }

    /// The most recently pushed item.
    pub fn peek(&self) -> Option<&T> {
        self.stack.last()
    }

    /// True if `item` is on the path.
    pub fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    /// Number of items on the path.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The path from first pushed to last pushed.
    pub fn as_slice(&self) -> &[T] {
        &self.stack
    }
}
