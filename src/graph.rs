//! Dependency graph builder.
//!
//! This module provides [`Sorter`], the append-only graph that nodes and
//! edges are registered into before calling [`Sorter::sort`].
//!
//! ## Performance Characteristics
//!
//! - **Node/Edge Insertion**: O(1) amortized via the value→index map
//! - **Dependency Lookups**: O(1) via cached adjacency lists of indices
//! - **Traversal**: never hashes identifiers; only plain indices are followed
//!
//! ## Memory Overhead
//!
//! Per node: one stored value, one map entry and an adjacency list header.
//! Per edge: one `usize` in the adjacency list of its source.

use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap as HashMap;

/// Values that can identify a node.
///
/// With the `std` feature this is anything `Eq + Hash + Clone`; without it
/// nodes are kept in a `BTreeMap` and must be `Ord + Clone` instead.
/// Implemented automatically for every qualifying type.
#[cfg(feature = "std")]
pub trait NodeKey: Eq + core::hash::Hash + Clone {}

#[cfg(feature = "std")]
impl<T: Eq + core::hash::Hash + Clone> NodeKey for T {}

/// Values that can identify a node.
///
/// With the `std` feature this is anything `Eq + Hash + Clone`; without it
/// nodes are kept in a `BTreeMap` and must be `Ord + Clone` instead.
/// Implemented automatically for every qualifying type.
#[cfg(not(feature = "std"))]
pub trait NodeKey: Ord + Clone {}

#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> NodeKey for T {}

/// A topological sorter.
///
/// Add nodes and edges to describe the graph, then call [`sort`](Self::sort)
/// to retrieve the nodes in dependency order. A freshly constructed sorter
/// describes the empty graph.
///
/// Nodes keep the order in which they were first seen, and every node keeps
/// its dependencies in the order the edges were added. Both orders decide
/// how ties are broken, which is what makes sorting deterministic.
///
/// # Examples
///
/// ```
/// use toposort::Sorter;
///
/// let mut sorter = Sorter::new();
/// sorter.add_edge("app", "lib");
/// sorter.add_edge("lib", "core");
/// sorter.add_node("docs");
///
/// let sorted = sorter.sort();
/// assert_eq!(sorted.order, vec!["core", "lib", "app", "docs"]);
/// assert!(sorted.cycles.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Sorter<T> {
    pub(crate) values: Vec<T>,
    pub(crate) index: HashMap<T, usize>, // value → position in `values`
    pub(crate) children: Vec<Vec<usize>>, // children[idx] = dependency indices, edge order
    pub(crate) edge_count: usize,
}

impl<T> Default for Sorter<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            index: HashMap::new(),
            children: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<T: NodeKey> Sorter<T> {
    /// Create an empty sorter.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let sorter: Sorter<u32> = Sorter::new();
    /// assert!(sorter.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sorter from pre-defined nodes and edges (batch construction).
    ///
    /// Nodes are registered first, in slice order, then every edge. Edge
    /// endpoints missing from `nodes` are registered implicitly.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let sorter = Sorter::from_edges(&[1, 2, 3], &[(3, 2), (2, 1)]);
    /// assert_eq!(sorter.sort().order, vec![1, 2, 3]);
    /// ```
    pub fn from_edges(nodes: &[T], edges: &[(T, T)]) -> Self {
        let mut sorter = Self::new();
        for node in nodes {
            sorter.add_node(node.clone());
        }
        for (from, to) in edges {
            sorter.add_edge(from.clone(), to.clone());
        }
        sorter
    }

    /// Add a node.
    ///
    /// Usually only needed for nodes without any edges, since
    /// [`add_edge`](Self::add_edge) registers its endpoints. Adding a node
    /// that already exists does nothing.
    pub fn add_node(&mut self, value: T) {
        self.get_or_add(value);
    }

    /// Add an edge meaning `from` depends on `to`.
    ///
    /// `to` will appear before `from` in the sorted output. Missing endpoints
    /// are registered implicitly, `from` first. Self edges, parallel edges and
    /// cycles are all allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let mut sorter = Sorter::new();
    /// sorter.add_edge('a', 'b'); // a depends on b
    /// assert_eq!(sorter.sort().order, vec!['b', 'a']);
    /// ```
    pub fn add_edge(&mut self, from: T, to: T) {
        let from_idx = self.get_or_add(from);
        let to_idx = self.get_or_add(to);
        self.children[from_idx].push(to_idx);
        self.edge_count += 1;
    }

    /// Look up a value, registering it if missing.
    fn get_or_add(&mut self, value: T) -> usize {
        if let Some(&idx) = self.index.get(&value) {
            return idx;
        }

        let idx = self.values.len();
        tracing::trace!(index = idx, "registering new node");
        self.index.insert(value.clone(), idx);
        self.values.push(value);
        self.children.push(Vec::new());
        idx
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no node has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of edges added, including self and parallel edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `value` has been registered, directly or through an edge.
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Iterate over all nodes in the order they were first registered.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Iterate over the direct dependencies of `value`, in edge order.
    ///
    /// Unknown values have no dependencies.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let mut sorter = Sorter::new();
    /// sorter.add_edge("deploy", "test");
    /// sorter.add_edge("deploy", "build");
    ///
    /// let deps: Vec<_> = sorter.dependencies(&"deploy").collect();
    /// assert_eq!(deps, vec![&"test", &"build"]);
    /// assert_eq!(sorter.dependencies(&"missing").count(), 0);
    /// ```
    pub fn dependencies<'s>(&'s self, value: &T) -> impl Iterator<Item = &'s T> + use<'s, T> {
        let children: &'s [usize] = match self.index.get(value) {
            Some(&idx) => &self.children[idx],
            None => &[],
        };
        children.iter().map(move |&child| &self.values[child])
    }

    /// Nodes that depend on nothing, in registration order.
    ///
    /// These can be processed first.
    pub fn roots(&self) -> Vec<&T> {
        self.values
            .iter()
            .zip(&self.children)
            .filter(|(_, children)| children.is_empty())
            .map(|(value, _)| value)
            .collect()
    }

    /// Nodes that nothing depends on, in registration order.
    ///
    /// A node whose only dependent is itself is not a leaf.
    pub fn leaves(&self) -> Vec<&T> {
        let mut depended_on = alloc::vec![false; self.values.len()];
        for &child in self.children.iter().flatten() {
            depended_on[child] = true;
        }
        self.values
            .iter()
            .zip(depended_on)
            .filter(|(_, used)| !used)
            .map(|(value, _)| value)
            .collect()
    }
}

impl<T: NodeKey> Extend<(T, T)> for Sorter<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

impl<T: NodeKey> FromIterator<(T, T)> for Sorter<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(edges: I) -> Self {
        let mut sorter = Self::new();
        sorter.extend(edges);
        sorter
    }
}
