//! Depth-first topological sorting with cycle collection.
//!
//! The traversal is the standard DFS approach: a node is emitted only after
//! all of its dependencies have been emitted, so on acyclic graphs the output
//! is a topological order. Nodes are marked as visiting while they sit
//! on the DFS stack; reaching such a node again means a cycle.
//!
//! ## Cycle witnesses
//!
//! When a visiting node is reached, a new witness containing just that node
//! is opened. As the stack unwinds, each finished node appends itself to the
//! witnesses it carries until a witness ends with the node it started with.
//! Self edges therefore show up as `[a, a]`, and a cycle `a -> b -> c -> a`
//! discovered from `a` shows up as `[a, c, b, a]`.
//!
//! The walk uses an explicit frame stack rather than recursion, so very deep
//! dependency chains cannot overflow the call stack.

use alloc::vec::Vec;

use crate::cycles::{CycleError, dump_cycles};
use crate::graph::{NodeKey, Sorter};

/// Result of [`Sorter::sort`].
///
/// `order` holds every node exactly once. `cycles` is empty if and only if
/// the graph is acyclic; otherwise it holds at least one witness per cyclic
/// region that was visited, and `order` is best-effort: acyclic portions are
/// still ordered correctly, cyclic portions are ordered arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sorted<T> {
    /// Nodes, dependencies first.
    pub order: Vec<T>,
    /// Cycle witnesses, each starting and ending with the same node.
    pub cycles: Vec<Vec<T>>,
}

/// Per-node traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// One node on the explicit DFS stack.
struct Frame {
    node: usize,
    next_child: usize,
    cycles: Vec<Vec<usize>>, // witnesses bubbled up from children, as indices
}

impl Frame {
    fn new(node: usize) -> Self {
        Self {
            node,
            next_child: 0,
            cycles: Vec::new(),
        }
    }
}

impl<T: NodeKey> Sorter<T> {
    /// Sort the graph, returning the ordered nodes along with the cycles
    /// encountered, if any.
    ///
    /// Sorting is deterministic: the same sequence of `add_node`/`add_edge`
    /// calls always produces the same output, even when the input is only
    /// partially ordered. The graph is not modified, so sorting twice gives
    /// identical results.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let mut sorter = Sorter::new();
    /// sorter.add_edge("A", "B");
    /// sorter.add_edge("B", "C");
    /// sorter.add_edge("C", "A");
    ///
    /// let sorted = sorter.sort();
    /// assert_eq!(sorted.order, vec!["C", "B", "A"]);
    /// assert_eq!(sorted.cycles, vec![vec!["A", "C", "B", "A"]]);
    /// ```
    pub fn sort(&self) -> Sorted<T> {
        let mut marks = alloc::vec![Mark::Unvisited; self.values.len()];
        let mut order = Vec::with_capacity(self.values.len());
        let mut cycles = Vec::new();
        let mut stack = Vec::new();

        for root in 0..self.values.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::Visiting;
            stack.push(Frame::new(root));
            self.visit(&mut stack, &mut marks, &mut order, &mut cycles);
        }

        tracing::debug!(
            nodes = self.values.len(),
            edges = self.edge_count,
            cycles = cycles.len(),
            "sorted dependency graph"
        );

        Sorted {
            order: order.into_iter().map(|idx| self.values[idx].clone()).collect(),
            cycles: cycles
                .into_iter()
                .map(|cycle| cycle.into_iter().map(|idx| self.values[idx].clone()).collect())
                .collect(),
        }
    }

    /// Drain `stack` depth-first, emitting finished nodes into `order` and
    /// closed-over witnesses from the bottom frame into `cycles`.
    fn visit(
        &self,
        stack: &mut Vec<Frame>,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
        cycles: &mut Vec<Vec<usize>>,
    ) {
        while let Some(mut frame) = stack.pop() {
            if let Some(&child) = self.children[frame.node].get(frame.next_child) {
                frame.next_child += 1;
                match marks[child] {
                    Mark::Done => stack.push(frame),
                    Mark::Visiting => {
                        tracing::trace!(from = frame.node, to = child, "cycle detected");
                        frame.cycles.push(alloc::vec![child]);
                        stack.push(frame);
                    }
                    Mark::Unvisited => {
                        marks[child] = Mark::Visiting;
                        stack.push(frame);
                        stack.push(Frame::new(child));
                    }
                }
                continue;
            }

            // All children processed: emit in post-order.
            let Frame { node, cycles: mut found, .. } = frame;
            marks[node] = Mark::Done;
            order.push(node);

            // A witness is open until its last entry repeats its first; a
            // single entry is the repeated node itself and still open.
            for cycle in &mut found {
                if cycle.len() == 1 || cycle.first() != cycle.last() {
                    cycle.push(node);
                }
            }

            match stack.last_mut() {
                Some(parent) => parent.cycles.append(&mut found),
                None => cycles.append(&mut found),
            }
        }
    }
}

impl<T> Sorted<T> {
    /// Whether the sorted graph had no cycles.
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Position of `value` in [`order`](Self::order).
    pub fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.order.iter().position(|node| node == value)
    }

    /// Render the cycles on one line with [`dump_cycles`].
    pub fn dump_cycles<F>(&self, to_string: F) -> alloc::string::String
    where
        F: Fn(&T) -> alloc::string::String,
    {
        dump_cycles(&self.cycles, to_string)
    }

    /// Convert into a strict topological order, failing if any cycle was
    /// found. `to_string` is used to render the cycles into the error.
    pub fn into_result_with<F>(self, to_string: F) -> Result<Vec<T>, CycleError>
    where
        F: Fn(&T) -> alloc::string::String,
    {
        if self.cycles.is_empty() {
            Ok(self.order)
        } else {
            Err(CycleError::new(&self.cycles, to_string))
        }
    }

    /// Convert into a strict topological order, failing if any cycle was
    /// found.
    ///
    /// # Examples
    ///
    /// ```
    /// use toposort::Sorter;
    ///
    /// let sorter: Sorter<_> = [("a", "b"), ("b", "a")].into_iter().collect();
    /// let err = sorter.sort().into_result().unwrap_err();
    /// assert_eq!(err.count, 1);
    /// assert_eq!(err.rendered, "[a <= b <= a]");
    /// ```
    pub fn into_result(self) -> Result<Vec<T>, CycleError>
    where
        T: core::fmt::Display,
    {
        self.into_result_with(|node| alloc::format!("{node}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    /// The graph shared by most tests:
    ///
    /// ```text
    /// ,-->B
    /// |
    /// A-->C---->D
    /// |    \
    /// |     `-->E--.
    /// `-------------`-->F
    /// ```
    fn dag() -> Sorter<&'static str> {
        let mut sorter = Sorter::new();
        sorter.add_edge("A", "B");
        sorter.add_edge("A", "C");
        sorter.add_edge("A", "F");
        sorter.add_edge("C", "D");
        sorter.add_edge("C", "E");
        sorter.add_edge("E", "F");
        sorter
    }

    fn assert_before<'a>(sorted: &Sorted<&'a str>, before: &'a str, after: &'a str) {
        let b = sorted.position(&before).unwrap();
        let a = sorted.position(&after).unwrap();
        assert!(b < a, "expected {before} before {after} in {:?}", sorted.order);
    }

    #[test]
    fn test_empty_graph() {
        let sorted = Sorter::<u8>::new().sort();
        assert!(sorted.order.is_empty());
        assert!(sorted.is_acyclic());
    }

    #[test]
    fn test_isolated_nodes_keep_registration_order() {
        let sorter = Sorter::from_edges(&[3, 1, 2], &[]);
        assert_eq!(sorter.sort().order, vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_dag() {
        let sorted = dag().sort();

        for (before, after) in [
            ("B", "A"),
            ("C", "A"),
            ("D", "A"),
            ("E", "A"),
            ("F", "A"),
            ("D", "C"),
            ("E", "C"),
            ("F", "C"),
            ("F", "E"),
        ] {
            assert_before(&sorted, before, after);
        }
        assert_eq!(sorted.order, vec!["B", "D", "F", "E", "C", "A"]);
        assert!(sorted.cycles.is_empty());
    }

    #[test]
    fn test_sort_self_cycle() {
        let mut sorter = Sorter::new();
        sorter.add_edge("A", "A");

        let sorted = sorter.sort();
        assert_eq!(sorted.order, vec!["A"]);
        assert_eq!(sorted.cycles, vec![vec!["A", "A"]]);
    }

    #[test]
    fn test_sort_cycle() {
        // ,-->B-->C
        // |       |
        // A<------'
        let mut sorter = Sorter::new();
        sorter.add_edge("A", "B");
        sorter.add_edge("B", "C");
        sorter.add_edge("C", "A");

        let sorted = sorter.sort();
        assert_eq!(sorted.order, vec!["C", "B", "A"]);
        assert_eq!(sorted.cycles, vec![vec!["A", "C", "B", "A"]]);
    }

    #[test]
    fn test_sort_contains_cycle_through_c_and_d() {
        let mut sorter = Sorter::new();
        sorter.add_edge("A", "B");
        sorter.add_edge("A", "C");
        sorter.add_edge("A", "F");
        sorter.add_edge("C", "D");
        sorter.add_edge("C", "E");
        sorter.add_edge("D", "C"); // creates the cycle
        sorter.add_edge("E", "F");

        let sorted = sorter.sort();
        for before in ["B", "C", "D", "E", "F"] {
            assert_before(&sorted, before, "A");
        }
        // C and D may be in either order.
        assert_before(&sorted, "E", "C");
        assert_before(&sorted, "F", "C");
        assert_before(&sorted, "F", "E");
        assert_eq!(sorted.order, vec!["B", "D", "F", "E", "C", "A"]);
        assert_eq!(sorted.cycles, vec![vec!["C", "D", "C"]]);
    }

    #[test]
    fn test_sort_contains_cycle_through_f() {
        let mut sorter = dag();
        sorter.add_edge("F", "C"); // creates the cycle

        let sorted = sorter.sort();
        assert_before(&sorted, "D", "C");
        assert_eq!(sorted.order, vec!["B", "D", "F", "E", "C", "A"]);
        assert_eq!(sorted.cycles, vec![vec!["C", "F", "E", "C"]]);
    }

    #[test]
    fn test_sort_multi_cycles() {
        //    ,-->B
        //    |   ,------------.
        //    |   v            |
        // .--A-->C---->D      |
        // |  ^    \           |
        // |  |     `-->E--.   |
        // |  |         |  |   |
        // |  `---------'  |   |
        // `---------------`-->F
        let mut sorter = Sorter::new();
        sorter.add_edge("A", "B");
        sorter.add_edge("A", "C");
        sorter.add_edge("A", "F");
        sorter.add_edge("C", "D");
        sorter.add_edge("C", "E");
        sorter.add_edge("E", "A"); // creates a cycle
        sorter.add_edge("E", "F");
        sorter.add_edge("F", "C"); // creates a cycle

        let sorted = sorter.sort();
        assert_before(&sorted, "B", "A");
        assert_before(&sorted, "D", "A");
        assert_before(&sorted, "F", "A");
        assert_before(&sorted, "D", "C");
        assert_eq!(sorted.order, vec!["B", "D", "F", "E", "C", "A"]);
        assert_eq!(
            sorted.cycles,
            vec![vec!["A", "E", "C", "A"], vec!["C", "F", "E", "C"]]
        );
    }

    #[test]
    fn test_disjoint_cycles_are_reported_separately() {
        let sorter: Sorter<_> = [(1, 2), (2, 1), (3, 4), (4, 3), (5, 5)].into_iter().collect();

        let sorted = sorter.sort();
        assert_eq!(sorted.order, vec![2, 1, 4, 3, 5]);
        assert_eq!(
            sorted.cycles,
            vec![vec![1, 2, 1], vec![3, 4, 3], vec![5, 5]]
        );
    }

    #[test]
    fn test_sort_is_repeatable() {
        let mut sorter = dag();
        sorter.add_edge("D", "A");

        let first = sorter.sort();
        let second = sorter.sort();
        assert_eq!(first, second);
        assert!(!first.is_acyclic());
    }

    #[test]
    fn test_parallel_edges_do_not_change_the_result() {
        let mut sorter = dag();
        let baseline = sorter.sort();
        sorter.add_edge("A", "B");
        sorter.add_edge("C", "D");

        assert_eq!(sorter.sort(), baseline);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 100_000u32;
        // 0 depends on 1, which depends on 2, and so on.
        let sorter: Sorter<u32> = (1..depth).map(|n| (n - 1, n)).collect();

        let sorted = sorter.sort();
        assert_eq!(sorted.order.len(), depth as usize);
        assert_eq!(sorted.order.first(), Some(&(depth - 1)));
        assert_eq!(sorted.order.last(), Some(&0));
        assert!(sorted.is_acyclic());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            dag().sort().into_result().unwrap(),
            vec!["B", "D", "F", "E", "C", "A"]
        );

        let mut cyclic = dag();
        cyclic.add_edge("D", "C");
        let err = cyclic.sort().into_result_with(|n| n.to_lowercase()).unwrap_err();
        assert_eq!(err.count, 1);
        assert_eq!(err.rendered, "[c <= d <= c]");
    }

    /// Edge lists over `n` nodes named `0..n`. With `backwards` every edge
    /// points at a node with a lower or equal number.
    fn graph(
        max_nodes: usize,
        backwards: bool,
    ) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..max_nodes).prop_flat_map(move |n| {
            let edge = (0..n, 0..n).prop_map(move |(a, b)| {
                if backwards && a < b { (b, a) } else { (a, b) }
            });
            (Just(n), proptest::collection::vec(edge, 0..n * 3))
        })
    }

    fn build(n: usize, edges: &[(usize, usize)]) -> Sorter<usize> {
        let nodes: Vec<usize> = (0..n).collect();
        Sorter::from_edges(&nodes, edges)
    }

    proptest! {
        #[test]
        fn prop_dag_order_respects_every_edge((n, edges) in graph(40, true)) {
            let edges: Vec<_> = edges.into_iter().filter(|(from, to)| from != to).collect();
            let sorted = build(n, &edges).sort();

            prop_assert!(sorted.cycles.is_empty());
            prop_assert_eq!(sorted.order.len(), n);
            let mut seen = sorted.order.clone();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
            for (from, to) in edges {
                prop_assert!(sorted.position(&to) < sorted.position(&from));
            }
        }

        #[test]
        fn prop_witnesses_are_closed_walks((n, edges) in graph(25, false)) {
            let sorter = build(n, &edges);
            let sorted = sorter.sort();

            prop_assert_eq!(sorted.order.len(), n);
            for cycle in &sorted.cycles {
                prop_assert!(cycle.len() >= 2);
                prop_assert_eq!(cycle.first(), cycle.last());
                // Witnesses list nodes against the edge direction.
                for pair in cycle.windows(2) {
                    prop_assert!(edges.contains(&(pair[1], pair[0])));
                }
            }
            prop_assert_eq!(sorted, sorter.sort());
        }

        #[test]
        fn prop_cycles_found_iff_back_edge_exists((n, edges) in graph(25, false)) {
            let sorted = build(n, &edges).sort();
            // A graph is acyclic exactly when its order respects every edge.
            let respects_all = edges
                .iter()
                .all(|(from, to)| sorted.position(to) < sorted.position(from));
            prop_assert_eq!(sorted.is_acyclic(), respects_all);
        }
    }
}
