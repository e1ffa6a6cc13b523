//! Generic topological sorting for any data structure.
//!
//! These adapters feed an arbitrary graph-like structure into a [`Sorter`]
//! through a dependency closure or the [`Sortable`] trait, so callers don't
//! have to register edges by hand.
//!
//! # Examples
//!
//! ```
//! use toposort::generic::sort_fn;
//!
//! // Example: Sort tasks by dependencies
//! let get_deps = |task: &&str| match *task {
//!     "deploy" => vec!["test", "build"],
//!     "test" => vec!["build"],
//!     "build" => vec!["compile"],
//!     _ => vec![],
//! };
//!
//! let sorted = sort_fn(&["deploy", "test", "build", "compile"], get_deps);
//! assert_eq!(sorted.order, vec!["compile", "build", "test", "deploy"]);
//! ```

use alloc::vec::Vec;

use crate::graph::{NodeKey, Sorter};
use crate::sort::Sorted;

/// Sort `items` using a function that returns the dependencies of each item.
///
/// Items are registered in slice order, then each item's dependencies are
/// added as edges in the order `get_dependencies` returns them. Dependencies
/// that are not in `items` are registered implicitly.
///
/// # Examples
///
/// ```
/// use toposort::generic::sort_fn;
///
/// let get_deps = |&id: &usize| match id {
///     1 => vec![2],
///     2 => vec![3],
///     3 => vec![1], // Cycle!
///     _ => vec![],
/// };
///
/// let sorted = sort_fn(&[1, 2, 3], get_deps);
/// assert_eq!(sorted.order, vec![3, 2, 1]);
/// assert_eq!(sorted.cycles, vec![vec![1, 3, 2, 1]]);
/// ```
pub fn sort_fn<Id, F>(items: &[Id], get_dependencies: F) -> Sorted<Id>
where
    Id: NodeKey,
    F: Fn(&Id) -> Vec<Id>,
{
    let mut sorter = Sorter::new();
    for item in items {
        sorter.add_node(item.clone());
    }
    for item in items {
        for dep in get_dependencies(item) {
            sorter.add_edge(item.clone(), dep);
        }
    }
    sorter.sort()
}

/// Trait for types that support topological sorting.
///
/// Implement this trait to get convenient [`sorted`](Self::sorted) and
/// [`has_valid_ordering`](Self::has_valid_ordering) methods.
///
/// # Examples
///
/// ```
/// use toposort::generic::Sortable;
/// use std::collections::HashMap;
///
/// struct Packages {
///     names: Vec<String>,
///     requires: HashMap<String, Vec<String>>,
/// }
///
/// impl Sortable for Packages {
///     type Id = String;
///
///     fn ids(&self) -> Vec<String> {
///         self.names.clone()
///     }
///
///     fn dependencies(&self, id: &String) -> Vec<String> {
///         self.requires.get(id).cloned().unwrap_or_default()
///     }
/// }
///
/// let packages = Packages {
///     names: vec!["app".into(), "serde".into()],
///     requires: HashMap::from([("app".into(), vec!["serde".into()])]),
/// };
/// assert_eq!(packages.sorted().order, vec!["serde", "app"]);
/// assert!(packages.has_valid_ordering());
/// ```
pub trait Sortable {
    /// The type of identifiers in the graph.
    type Id: NodeKey;

    /// Get all item IDs, in the order they should be registered.
    fn ids(&self) -> Vec<Self::Id>;

    /// Get the dependencies for a given item.
    fn dependencies(&self, id: &Self::Id) -> Vec<Self::Id>;

    /// Sort this collection, reporting any cycles.
    fn sorted(&self) -> Sorted<Self::Id> {
        sort_fn(&self.ids(), |id| self.dependencies(id))
    }

    /// Check if a valid topological ordering exists (i.e., no cycles).
    fn has_valid_ordering(&self) -> bool {
        self.sorted().is_acyclic()
    }
}
