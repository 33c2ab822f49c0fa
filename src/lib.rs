//! String queue on a circular doubly-linked list
//!
//! This crate provides a [`Queue`] of owned strings stored in a sentinel-based
//! circular doubly-linked list, together with a library of structural
//! algorithms that work purely by relinking nodes:
//!
//! - **Lifecycle**: insert/remove at both ends, O(1) length, iteration
//! - **Mutators**: delete the middle, delete adjacent duplicates, swap pairs,
//!   reverse, reverse in groups of `k`
//! - **Sorting**: stable merge sort, bottom-up (binary counter) or top-down
//! - **Filtering**: drop every element dominated by a greater value to its right
//! - **Merging**: merge two sorted queues, or any number through a [`QueueChain`]
//! - **Shuffling**: uniform random permutation with an injected RNG
//!
//! Nodes live in a per-queue `slotmap` arena and link to each other through
//! keys; the list primitives come from the `intrusive-circular-list` crate.
//!
//! # Example
//!
//! ```rust
//! use linked_queue::Queue;
//!
//! let mut queue: Queue = ["3", "1", "2", "1"].into_iter().collect();
//! queue.sort();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["1", "1", "2", "3"]);
//!
//! queue.delete_dup();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["2", "3"]);
//!
//! queue.reverse();
//! assert_eq!(queue.to_string(), "3 -> 2");
//! ```

pub mod descend;
pub mod element;
pub mod error;
pub mod merge;
pub mod mutators;
pub mod order;
pub mod queue;
pub mod shuffle;
pub mod sort;
mod storage;

pub use element::Element;
pub use error::QueueError;
pub use merge::{QueueChain, QueueContext};
pub use order::compare;
pub use queue::{Iter, Queue};
pub use sort::SortStrategy;
