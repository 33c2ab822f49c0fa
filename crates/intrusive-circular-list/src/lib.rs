//! Intrusive circular doubly-linked list over arena handles.
//!
//! This crate provides the link primitive and the sentinel-based operations of
//! a circular doubly-linked list. Links do not hold pointers: `next` and `prev`
//! are handles (`K`) into an arena that owns the nodes, so the structure never
//! aliases memory and a stale handle is caught by the arena instead of being
//! dereferenced.
//!
//! # Sentinel lists
//!
//! A list is anchored by a sentinel node that carries no payload:
//! - An empty list is a sentinel whose `next` and `prev` point to itself
//! - The first element is `sentinel.next`, the last is `sentinel.prev`
//! - There is no null terminator; iteration stops when it returns to the sentinel
//!
//! Every operation leaves the list circular when it returns. Callers that build
//! NULL-terminated fragments (sorting, for instance) may use the raw
//! [`CircularLink::set_next`] / [`CircularLink::set_prev`] accessors in between,
//! as long as they close the ring again before handing the list back.
//!
//! # Example
//!
//! ```rust
//! use intrusive_circular_list::{CircularLink, CircularListOps};
//!
//! // Slot 0 is the sentinel, slots 1..=3 are elements.
//! let mut arena: Vec<CircularLink<usize>> = vec![CircularLink::new(); 4];
//! let ops = CircularListOps::new();
//!
//! ops.init(&mut arena, 0);
//! assert!(ops.is_empty(&arena, 0));
//!
//! ops.insert_before(&mut arena, 0, 1); // tail
//! ops.insert_before(&mut arena, 0, 2); // tail
//! ops.insert_after(&mut arena, 0, 3); // head
//!
//! let mut order = Vec::new();
//! ops.for_each(&arena, 0, |key| order.push(key));
//! assert_eq!(order, vec![3, 1, 2]);
//!
//! ops.reverse(&mut arena, 0);
//! assert_eq!(ops.first(&arena, 0), Some(2));
//! assert!(ops.verify(&arena, 0).is_ok());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

// =============================================================================
// CircularLink
// =============================================================================

/// Handle type used to address nodes inside an arena.
pub trait LinkKey: Copy + Eq + fmt::Debug {}

impl<K: Copy + Eq + fmt::Debug> LinkKey for K {}

/// Link that allows an arena node to be inserted into a circular list.
///
/// When unlinked, both `next` and `prev` are `None`.
/// When linked (even as a sentinel of an empty list), both name valid nodes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CircularLink<K> {
    next: Option<K>,
    prev: Option<K>,
}

impl<K> CircularLink<K> {
    /// Creates a new unlinked `CircularLink`.
    #[inline]
    pub const fn new() -> CircularLink<K> {
        CircularLink {
            next: None,
            prev: None,
        }
    }

    /// Checks whether the `CircularLink` is linked into a circular list.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.is_some()
    }

    /// Forcibly unlinks this node.
    ///
    /// This does not update neighboring nodes.
    #[inline]
    pub fn force_unlink(&mut self) {
        self.next = None;
        self.prev = None;
    }
}

impl<K: Copy> CircularLink<K> {
    /// Gets the next link handle.
    #[inline]
    pub fn next(&self) -> Option<K> {
        self.next
    }

    /// Gets the previous link handle.
    #[inline]
    pub fn prev(&self) -> Option<K> {
        self.prev
    }

    /// Sets the next link handle.
    #[inline]
    pub fn set_next(&mut self, next: Option<K>) {
        self.next = next;
    }

    /// Sets the previous link handle.
    #[inline]
    pub fn set_prev(&mut self, prev: Option<K>) {
        self.prev = prev;
    }
}

impl<K> Default for CircularLink<K> {
    #[inline]
    fn default() -> Self {
        CircularLink::new()
    }
}

impl<K> fmt::Debug for CircularLink<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "CircularLink(linked)")
        } else {
            write!(f, "CircularLink(unlinked)")
        }
    }
}

// =============================================================================
// LinkArena
// =============================================================================

/// Storage that owns list nodes and hands out their links by key.
///
/// Implementations may panic when given a key that does not name a live node,
/// the same way slice indexing panics on an out-of-bounds index.
pub trait LinkArena<K> {
    /// Returns the link embedded in the node named by `key`.
    fn link(&self, key: K) -> &CircularLink<K>;

    /// Returns the link embedded in the node named by `key`, mutably.
    fn link_mut(&mut self, key: K) -> &mut CircularLink<K>;
}

impl LinkArena<usize> for Vec<CircularLink<usize>> {
    #[inline]
    fn link(&self, key: usize) -> &CircularLink<usize> {
        &self[key]
    }

    #[inline]
    fn link_mut(&mut self, key: usize) -> &mut CircularLink<usize> {
        &mut self[key]
    }
}

/// Error reported by [`CircularListOps::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError<K> {
    /// A node reachable from the sentinel has no `next` or `prev`.
    Unlinked(K),
    /// `node.next.prev != node` or `node.prev.next != node`.
    Broken(K),
}

impl<K: fmt::Debug> fmt::Display for LinkError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Unlinked(key) => write!(f, "node {key:?} is reachable but unlinked"),
            LinkError::Broken(key) => write!(f, "links around node {key:?} are not mutual"),
        }
    }
}

#[cfg(feature = "std")]
impl<K: fmt::Debug> std::error::Error for LinkError<K> {}

// =============================================================================
// CircularListOps
// =============================================================================

/// Operations for manipulating sentinel-anchored circular lists.
///
/// All operations are O(1) unless documented otherwise.
///
/// # Panics
///
/// Operations that require a node to be linked panic if it is not. This is a
/// contract violation on the caller's side (the pointer-based equivalent is
/// undefined behavior); debug builds additionally assert the preconditions on
/// nodes being inserted.
#[derive(Clone, Copy, Debug, Default)]
pub struct CircularListOps;

impl CircularListOps {
    /// Creates a new `CircularListOps`.
    #[inline]
    pub const fn new() -> Self {
        CircularListOps
    }

    /// Gets the next node of a linked node.
    #[inline]
    pub fn next<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, key: K) -> K {
        match arena.link(key).next() {
            Some(next) => next,
            None => panic!("node {key:?} is not linked"),
        }
    }

    /// Gets the previous node of a linked node.
    #[inline]
    pub fn prev<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, key: K) -> K {
        match arena.link(key).prev() {
            Some(prev) => prev,
            None => panic!("node {key:?} is not linked"),
        }
    }

    /// Makes `head` the sentinel of an empty list.
    ///
    /// After this, `head.next == head` and `head.prev == head`.
    #[inline]
    pub fn init<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, head: K) {
        let link = arena.link_mut(head);
        link.set_next(Some(head));
        link.set_prev(Some(head));
    }

    /// Returns `true` if the list anchored at `head` has no elements.
    #[inline]
    pub fn is_empty<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, head: K) -> bool {
        self.next(arena, head) == head
    }

    /// Returns `true` if the list anchored at `head` has exactly one element.
    #[inline]
    pub fn is_singular<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, head: K) -> bool {
        let next = self.next(arena, head);
        next != head && next == self.prev(arena, head)
    }

    /// Returns the first element, or `None` if the list is empty.
    #[inline]
    pub fn first<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, head: K) -> Option<K> {
        let next = self.next(arena, head);
        (next != head).then_some(next)
    }

    /// Returns the last element, or `None` if the list is empty.
    #[inline]
    pub fn last<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, head: K) -> Option<K> {
        let prev = self.prev(arena, head);
        (prev != head).then_some(prev)
    }

    #[inline]
    fn link_between<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        new: K,
        prev: K,
        next: K,
    ) {
        arena.link_mut(next).set_prev(Some(new));
        let link = arena.link_mut(new);
        link.set_next(Some(next));
        link.set_prev(Some(prev));
        arena.link_mut(prev).set_next(Some(new));
    }

    /// Inserts `new` after `at`.
    ///
    /// With `at` being a sentinel this is a head insertion.
    #[inline]
    pub fn insert_after<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, at: K, new: K) {
        debug_assert!(!arena.link(new).is_linked(), "new is already linked");
        let next = self.next(arena, at);
        self.link_between(arena, new, at, next);
    }

    /// Inserts `new` before `at`.
    ///
    /// With `at` being a sentinel this is a tail insertion.
    #[inline]
    pub fn insert_before<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        at: K,
        new: K,
    ) {
        debug_assert!(!arena.link(new).is_linked(), "new is already linked");
        let prev = self.prev(arena, at);
        self.link_between(arena, new, prev, at);
    }

    /// Removes a node from its list without releasing it.
    ///
    /// The node is left unlinked.
    #[inline]
    pub fn unlink<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, key: K) {
        let next = self.next(arena, key);
        let prev = self.prev(arena, key);
        arena.link_mut(prev).set_next(Some(next));
        arena.link_mut(next).set_prev(Some(prev));
        arena.link_mut(key).force_unlink();
    }

    /// Unlinks `key` and reinserts it after `at`.
    #[inline]
    pub fn move_after<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, key: K, at: K) {
        debug_assert_ne!(key, at, "cannot move a node after itself");
        self.unlink(arena, key);
        self.insert_after(arena, at, key);
    }

    /// Unlinks `key` and appends it to the list anchored at `head`.
    #[inline]
    pub fn move_tail<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, key: K, head: K) {
        self.unlink(arena, key);
        self.insert_before(arena, head, key);
    }

    /// Puts the unlinked node `new` in the position of the linked node `old`.
    ///
    /// `old` is left unlinked.
    #[inline]
    pub fn replace<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, old: K, new: K) {
        debug_assert!(!arena.link(new).is_linked(), "new is already linked");
        let next = self.next(arena, old);
        let prev = self.prev(arena, old);
        self.link_between(arena, new, prev, next);
        arena.link_mut(old).force_unlink();
    }

    /// Exchanges the positions of two linked nodes.
    ///
    /// Works for adjacent nodes in either order and for nodes of different
    /// lists. Swapping a node with itself is a no-op.
    pub fn swap<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, a: K, b: K) {
        if a == b {
            return;
        }
        let mut pos = self.prev(arena, b);
        self.unlink(arena, b);
        self.replace(arena, a, b);
        if pos == a {
            pos = b;
        }
        self.insert_after(arena, pos, a);
    }

    fn splice_between<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        list: K,
        prev: K,
        next: K,
    ) {
        let first = self.next(arena, list);
        let last = self.prev(arena, list);

        arena.link_mut(first).set_prev(Some(prev));
        arena.link_mut(prev).set_next(Some(first));
        arena.link_mut(last).set_next(Some(next));
        arena.link_mut(next).set_prev(Some(last));
    }

    /// Moves every element of `list` to the front of the list anchored at `head`.
    ///
    /// The sentinel `list` still points at the moved nodes afterwards; use
    /// [`splice_init`](Self::splice_init) if it is going to be reused.
    #[inline]
    pub fn splice<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, list: K, head: K) {
        if !self.is_empty(arena, list) {
            let next = self.next(arena, head);
            self.splice_between(arena, list, head, next);
        }
    }

    /// Moves every element of `list` to the back of the list anchored at `head`.
    #[inline]
    pub fn splice_tail<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        list: K,
        head: K,
    ) {
        if !self.is_empty(arena, list) {
            let prev = self.prev(arena, head);
            self.splice_between(arena, list, prev, head);
        }
    }

    /// Like [`splice`](Self::splice), then reinitializes `list` as empty.
    #[inline]
    pub fn splice_init<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        list: K,
        head: K,
    ) {
        if !self.is_empty(arena, list) {
            self.splice(arena, list, head);
            self.init(arena, list);
        }
    }

    /// Like [`splice_tail`](Self::splice_tail), then reinitializes `list` as empty.
    #[inline]
    pub fn splice_tail_init<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        list: K,
        head: K,
    ) {
        if !self.is_empty(arena, list) {
            self.splice_tail(arena, list, head);
            self.init(arena, list);
        }
    }

    /// Moves the prefix of `head` ending at `last` (inclusive) into `dest`.
    ///
    /// `dest` must be an empty sentinel or one whose contents may be
    /// discarded; it is overwritten. When `last == head` nothing moves and
    /// `dest` becomes empty.
    pub fn cut_position<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &mut A,
        dest: K,
        head: K,
        last: K,
    ) {
        if self.is_empty(arena, head) {
            return;
        }
        if self.is_singular(arena, head) && self.next(arena, head) != last && head != last {
            return;
        }
        if last == head {
            self.init(arena, dest);
            return;
        }

        let first = self.next(arena, head);
        let rest = self.next(arena, last);

        arena.link_mut(dest).set_next(Some(first));
        arena.link_mut(first).set_prev(Some(dest));
        arena.link_mut(dest).set_prev(Some(last));
        arena.link_mut(last).set_next(Some(dest));
        arena.link_mut(head).set_next(Some(rest));
        arena.link_mut(rest).set_prev(Some(head));
    }

    /// Reverses the list anchored at `head` in place.
    ///
    /// This is O(n): every node, the sentinel included, has its `next` and
    /// `prev` exchanged, which leaves the ring closed.
    pub fn reverse<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &mut A, head: K) {
        let mut node = head;
        loop {
            let link = arena.link_mut(node);
            let next = link.next();
            let prev = link.prev();
            link.set_next(prev);
            link.set_prev(next);

            node = match next {
                Some(next) => next,
                None => panic!("node {node:?} is not linked"),
            };
            if node == head {
                break;
            }
        }
    }

    /// Counts the number of elements in the list anchored at `head`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<K: LinkKey, A: LinkArena<K> + ?Sized>(&self, arena: &A, head: K) -> usize {
        let mut count = 0;
        let mut current = self.next(arena, head);

        while current != head {
            count += 1;
            current = self.next(arena, current);
        }

        count
    }

    /// Calls `f` for each element of the list anchored at `head`, front to back.
    ///
    /// The sentinel itself is not visited.
    pub fn for_each<K, A, F>(&self, arena: &A, head: K, mut f: F)
    where
        K: LinkKey,
        A: LinkArena<K> + ?Sized,
        F: FnMut(K),
    {
        let mut current = self.next(arena, head);

        while current != head {
            f(current);
            current = self.next(arena, current);
        }
    }

    /// Walks the whole ring and checks that every link is mutual.
    ///
    /// Returns the number of elements on success. O(n).
    pub fn verify<K: LinkKey, A: LinkArena<K> + ?Sized>(
        &self,
        arena: &A,
        head: K,
    ) -> Result<usize, LinkError<K>> {
        let mut count = 0;
        let mut current = head;

        loop {
            let link = arena.link(current);
            let (Some(next), Some(prev)) = (link.next(), link.prev()) else {
                return Err(LinkError::Unlinked(current));
            };
            if arena.link(next).prev() != Some(current) || arena.link(prev).next() != Some(current)
            {
                return Err(LinkError::Broken(current));
            }
            if next == head {
                return Ok(count);
            }
            count += 1;
            current = next;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
