//! # toposort
//!
//! Deterministic topological sorting for dependency graphs, with cycle
//! reporting instead of failure.
//!
//! ## Features
//!
//! - **Deterministic**: ties are broken by registration order, never by hashing
//! - **Cycle tolerant**: cyclic graphs still sort best-effort and report
//!   every cyclic region as an explicit witness
//! - **Stack safe**: iterative traversal, no recursion depth limits
//! - **no_std**: works with `alloc` only (disable the `std` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use toposort::Sorter;
//!
//! let mut sorter = Sorter::new();
//! sorter.add_edge("A", "B"); // A depends on B
//! sorter.add_edge("A", "C");
//! sorter.add_edge("C", "B");
//!
//! let sorted = sorter.sort();
//! assert_eq!(sorted.order, vec!["B", "C", "A"]);
//! assert!(sorted.cycles.is_empty());
//! ```
//!
//! ## Cycles
//!
//! ```rust
//! use toposort::Sorter;
//!
//! let mut sorter = Sorter::new();
//! sorter.add_edge("A", "B");
//! sorter.add_edge("B", "A");
//! sorter.add_node("C");
//!
//! let sorted = sorter.sort();
//! assert_eq!(sorted.order, vec!["B", "A", "C"]);
//! assert_eq!(sorted.dump_cycles(|n| n.to_string()), "[A <= B <= A]");
//! ```
//!
//! ## Cargo features
//!
//! - `std` (default): hash-based node lookup; without it nodes must be `Ord`
//! - `generic` (default): closure and trait based entry points in [`generic`]
//! - `serde`: `Serialize`/`Deserialize` for [`Sorted`]

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod cycles;
pub mod graph;
pub mod sort;

#[cfg(feature = "generic")]
pub mod generic;

pub use cycles::{CycleError, dump_cycles};
pub use graph::{NodeKey, Sorter};
pub use sort::Sorted;
