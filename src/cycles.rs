//! Rendering of cycle witnesses.
//!
//! [`Sorter::sort`](crate::Sorter::sort) reports cycles as plain vectors of
//! nodes. This module turns them into a single human-readable line, and
//! provides [`CycleError`] for callers that treat any cycle as a failure.
//!
//! ```
//! use toposort::{Sorter, dump_cycles};
//!
//! let sorter: Sorter<_> = [(1, 2), (2, 3), (3, 1)].into_iter().collect();
//! let sorted = sorter.sort();
//!
//! let line = dump_cycles(&sorted.cycles, |n| n.to_string());
//! assert_eq!(line, "[1 <= 3 <= 2 <= 1]");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

const CYCLE_OPEN: char = '[';
const CYCLE_CLOSE: char = ']';
const DEPENDS_ON: &str = " <= ";

/// Render `cycles` on one line, using `to_string` for each node.
///
/// Every cycle is wrapped in brackets with its nodes joined by `" <= "`;
/// cycles are separated by a single space. No cycles gives an empty string.
///
/// # Examples
///
/// ```
/// use toposort::dump_cycles;
///
/// let cycles = vec![vec!["A", "E", "C", "A"], vec!["C", "F", "E", "C"]];
/// assert_eq!(
///     dump_cycles(&cycles, |n| n.to_string()),
///     "[A <= E <= C <= A] [C <= F <= E <= C]"
/// );
/// assert_eq!(dump_cycles::<&str, _>(&[], |n| n.to_string()), "");
/// ```
pub fn dump_cycles<T, F>(cycles: &[Vec<T>], to_string: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut out = String::new();
    for (cycle_idx, cycle) in cycles.iter().enumerate() {
        if cycle_idx > 0 {
            out.push(' ');
        }
        out.push(CYCLE_OPEN);
        for (node_idx, node) in cycle.iter().enumerate() {
            if node_idx > 0 {
                out.push_str(DEPENDS_ON);
            }
            out.push_str(&to_string(node));
        }
        out.push(CYCLE_CLOSE);
    }
    out
}

/// A dependency graph that was required to be acyclic had cycles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dependency graph contains {count} cycle(s): {rendered}")]
pub struct CycleError {
    /// Number of cycle witnesses found.
    pub count: usize,
    /// The witnesses as rendered by [`dump_cycles`].
    pub rendered: String,
}

impl CycleError {
    pub(crate) fn new<T, F>(cycles: &[Vec<T>], to_string: F) -> Self
    where
        F: Fn(&T) -> String,
    {
        Self {
            count: cycles.len(),
            rendered: dump_cycles(cycles, to_string),
        }
    }
}
