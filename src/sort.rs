//! Stable merge sort over the queue's links
//!
//! Two strategies share the same stable merge of NULL-terminated fragments:
//!
//! - [`SortStrategy::BottomUp`] (default): iterative merge sort that keeps
//!   pending runs in a stack indexed by a binary counter. Runs are merged
//!   whenever the counter carries, so at most O(log n) runs are pending and
//!   every element takes part in O(log n) merges. The stack is threaded
//!   through the `prev` links of each run's first node, so no extra memory
//!   is needed. The last merge also rebuilds the `prev` links and closes the
//!   ring, so there is no separate fix-up pass.
//! - [`SortStrategy::TopDown`]: recursive divide and conquer. The fragment is
//!   split at its midpoint (slow/fast cursors) until single nodes remain,
//!   merged back, and the `prev` links are rebuilt in one final walk.
//!   Recursion depth is O(log n).
//!
//! Values compare with [`compare`]. Merges take from the earlier fragment on
//! ties (`<=`), which makes both strategies stable.
//!
//! While a sort runs, `next == None` marks the end of a fragment.

use std::cmp::Ordering;

use intrusive_circular_list::LinkArena;
use tracing::debug;

use crate::order::compare;
use crate::queue::Queue;
use crate::storage::{NodeArena, NodeKey};

/// Which merge sort [`Queue::sort_with`] runs.
///
/// Both produce the same, stable, ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// Iterative merge sort driven by a binary counter.
    #[default]
    BottomUp,
    /// Recursive midpoint-split merge sort.
    TopDown,
}

impl Queue {
    /// Sorts the queue in ascending order, keeping equal values in their
    /// original relative order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut queue: Queue = ["pear", "apple", "fig"].into_iter().collect();
    /// queue.sort();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["apple", "fig", "pear"]);
    /// ```
    pub fn sort(&mut self) {
        self.sort_with(SortStrategy::default());
    }

    /// Sorts the queue with an explicit strategy.
    pub fn sort_with(&mut self, strategy: SortStrategy) {
        // Zero or one element.
        if self.next(self.head) == self.prev(self.head) {
            return;
        }
        debug!(?strategy, len = self.len(), "sorting queue");

        match strategy {
            SortStrategy::BottomUp => bottom_up_sort(&mut self.nodes, self.head),
            SortStrategy::TopDown => top_down_sort(&mut self.nodes, self.head),
        }
    }
}

// ============================================================================
// Fragment helpers
// ============================================================================

#[inline]
fn next_of(nodes: &NodeArena, key: NodeKey) -> Option<NodeKey> {
    nodes.link(key).next()
}

#[inline]
fn prev_of(nodes: &NodeArena, key: NodeKey) -> Option<NodeKey> {
    nodes.link(key).prev()
}

#[inline]
fn set_next(nodes: &mut NodeArena, key: NodeKey, next: Option<NodeKey>) {
    nodes.link_mut(key).set_next(next);
}

#[inline]
fn set_prev(nodes: &mut NodeArena, key: NodeKey, prev: Option<NodeKey>) {
    nodes.link_mut(key).set_prev(prev);
}

/// Whether `a` may be placed before `b` without breaking stability.
#[inline]
fn in_order(nodes: &NodeArena, a: NodeKey, b: NodeKey) -> bool {
    compare(nodes.value(a), nodes.value(b)) != Ordering::Greater
}

/// Detaches the ring from `head`, leaving a NULL-terminated fragment.
///
/// Returns the fragment's first node.
fn open_ring(nodes: &mut NodeArena, head: NodeKey) -> Option<NodeKey> {
    let first = next_of(nodes, head)?;
    let last = prev_of(nodes, head)?;
    set_next(nodes, last, None);
    Some(first)
}

/// Stable merge of two NULL-terminated fragments, `a` being the earlier one.
///
/// Only `next` links are maintained; `prev` links are left stale.
fn merge(nodes: &mut NodeArena, mut a: NodeKey, mut b: NodeKey) -> NodeKey {
    let mut first: Option<NodeKey> = None;
    let mut tail: Option<NodeKey> = None;

    let rest = loop {
        let take = if in_order(nodes, a, b) { a } else { b };
        match tail {
            Some(tail) => set_next(nodes, tail, Some(take)),
            None => first = Some(take),
        }
        tail = Some(take);

        let advanced = next_of(nodes, take);
        if take == a {
            match advanced {
                Some(next) => a = next,
                None => break b,
            }
        } else {
            match advanced {
                Some(next) => b = next,
                None => break a,
            }
        }
    };

    // The loop appended at least one node, so `tail` is set.
    if let Some(tail) = tail {
        set_next(nodes, tail, Some(rest));
    }
    first.unwrap_or(rest)
}

/// Rebuilds the `prev` links of the fragment hung off `head` and closes the ring.
fn close_ring(nodes: &mut NodeArena, head: NodeKey) {
    let mut tail = head;
    while let Some(next) = next_of(nodes, tail) {
        set_prev(nodes, next, Some(tail));
        tail = next;
    }
    set_next(nodes, tail, Some(head));
    set_prev(nodes, head, Some(tail));
}

// ============================================================================
// Bottom-up merge sort
// ============================================================================

/// A place holding the top of a pending run stack: the stack root itself or
/// the `prev` link of a pending run.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Prev(NodeKey),
}

#[inline]
fn slot_top(nodes: &NodeArena, pending: Option<NodeKey>, slot: Slot) -> Option<NodeKey> {
    match slot {
        Slot::Root => pending,
        Slot::Prev(key) => prev_of(nodes, key),
    }
}

fn bottom_up_sort(nodes: &mut NodeArena, head: NodeKey) {
    let Some(mut list) = open_ring(nodes, head) else {
        return;
    };
    let mut pending: Option<NodeKey> = None;
    let mut count: usize = 0;

    loop {
        // Find the lowest clear bit of `count`: that many runs sit on top of
        // the stack at strictly increasing sizes, and the pair right below
        // them is the one to merge.
        let mut bits = count;
        let mut slot = Slot::Root;
        while bits & 1 == 1 {
            if let Some(run) = slot_top(nodes, pending, slot) {
                slot = Slot::Prev(run);
            }
            bits >>= 1;
        }

        if bits != 0 {
            if let Some(newer) = slot_top(nodes, pending, slot) {
                if let Some(older) = prev_of(nodes, newer) {
                    let below = prev_of(nodes, older);
                    let merged = merge(nodes, older, newer);
                    set_prev(nodes, merged, below);
                    match slot {
                        Slot::Root => pending = Some(merged),
                        Slot::Prev(key) => set_prev(nodes, key, Some(merged)),
                    }
                }
            }
        }

        // Move one node from the input onto the stack as a run of one.
        let rest = next_of(nodes, list);
        set_prev(nodes, list, pending);
        set_next(nodes, list, None);
        pending = Some(list);
        count += 1;

        match rest {
            Some(next) => list = next,
            None => break,
        }
    }

    // Merge everything that is left, newest (smallest) first.
    let Some(mut list) = pending else {
        return;
    };
    let mut pending = prev_of(nodes, list);
    while let Some(older) = pending {
        let below = prev_of(nodes, older);
        if below.is_none() {
            final_merge(nodes, head, older, list);
            return;
        }
        list = merge(nodes, older, list);
        pending = below;
    }

    // A single run: it is already sorted.
    set_next(nodes, head, Some(list));
    close_ring(nodes, head);
}

/// Last merge of the bottom-up sort: merges `a` (earlier) and `b` into the
/// list at `head`, restoring `prev` links and circularity as it goes.
fn final_merge(nodes: &mut NodeArena, head: NodeKey, mut a: NodeKey, mut b: NodeKey) {
    let mut tail = head;

    let mut rest = loop {
        let take = if in_order(nodes, a, b) { a } else { b };
        set_next(nodes, tail, Some(take));
        set_prev(nodes, take, Some(tail));
        tail = take;

        let advanced = next_of(nodes, take);
        if take == a {
            match advanced {
                Some(next) => a = next,
                None => break b,
            }
        } else {
            match advanced {
                Some(next) => b = next,
                None => break a,
            }
        }
    };

    // Splice the leftover fragment, fixing its `prev` links.
    loop {
        set_next(nodes, tail, Some(rest));
        set_prev(nodes, rest, Some(tail));
        tail = rest;
        match next_of(nodes, rest) {
            Some(next) => rest = next,
            None => break,
        }
    }

    set_next(nodes, tail, Some(head));
    set_prev(nodes, head, Some(tail));
}

// ============================================================================
// Top-down merge sort
// ============================================================================

fn top_down_sort(nodes: &mut NodeArena, head: NodeKey) {
    let Some(first) = open_ring(nodes, head) else {
        return;
    };
    let sorted = sort_fragment(nodes, first);
    set_next(nodes, head, Some(sorted));
    close_ring(nodes, head);
}

/// Sorts a NULL-terminated fragment, returning its new first node.
fn sort_fragment(nodes: &mut NodeArena, first: NodeKey) -> NodeKey {
    let Some(mut fast) = next_of(nodes, first) else {
        return first;
    };

    // `slow` stops on the last node of the left half.
    let mut slow = first;
    while let Some(step) = next_of(nodes, fast) {
        if let Some(slow_next) = next_of(nodes, slow) {
            slow = slow_next;
        }
        match next_of(nodes, step) {
            Some(next) => fast = next,
            None => break,
        }
    }

    let Some(right) = next_of(nodes, slow) else {
        return first;
    };
    set_next(nodes, slow, None);

    let left = sort_fragment(nodes, first);
    let right = sort_fragment(nodes, right);
    merge(nodes, left, right)
}
