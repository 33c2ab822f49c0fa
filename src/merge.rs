//! Merging sorted queues
//!
//! [`Queue::merge`] merges one sorted queue into another with a linear
//! two-cursor walk. [`QueueChain`] extends this to any number of queues: the
//! queues are registered in a chain of contexts (itself a circular list built
//! on the same list primitives) and merged pairwise in rounds until a single
//! sorted queue remains.
//!
//! Elements that change queues keep their `String`: ownership moves from the
//! drained queue's arena into the receiving one, the bytes are never copied.

use std::cmp::Ordering;

use intrusive_circular_list::{CircularLink, CircularListOps, LinkArena};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::order::compare;
use crate::queue::Queue;

impl Queue {
    /// Merges the sorted queue `other` into this sorted queue.
    ///
    /// `other` is left empty. On equal values, elements of `self` come first.
    /// Returns the merged length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut a: Queue = ["1", "4", "6"].into_iter().collect();
    /// let mut b: Queue = ["2", "3", "9"].into_iter().collect();
    /// assert_eq!(a.merge(&mut b), 6);
    /// assert!(b.is_empty());
    /// assert_eq!(a.iter().collect::<Vec<_>>(), ["1", "2", "3", "4", "6", "9"]);
    /// ```
    pub fn merge(&mut self, other: &mut Queue) -> usize {
        trace!(left = self.len(), right = other.len(), "merging two queues");
        let mut cursor = self.next(self.head);

        while let Some(front) = other.ops.first(&other.nodes, other.head) {
            if cursor == self.head {
                // `self` is exhausted; the rest of `other` goes to the tail.
                while let Some(element) = other.remove_head(None) {
                    self.push_tail(element.into_value());
                }
                break;
            }

            if compare(self.value(cursor), other.value(front)) != Ordering::Greater {
                cursor = self.next(cursor);
            } else {
                let element = other.take(front);
                self.push_before(cursor, element.into_value());
            }
        }

        self.len()
    }
}

new_key_type! {
    /// Key naming a context inside a [`QueueChain`].
    struct ContextKey;
}

/// One entry of a [`QueueChain`].
///
/// It borrows the queue it stands for and does not own that queue's
/// elements. Once the queue has been merged into another one the context is
/// detached (`queue` is `None`).
#[derive(Debug)]
pub struct QueueContext<'q> {
    link: CircularLink<ContextKey>,
    queue: Option<&'q mut Queue>,
    id: usize,
}

impl QueueContext<'_> {
    /// The id returned by [`QueueChain::push`] for this context.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The queue this context still refers to, if it has not been drained.
    pub fn queue(&self) -> Option<&Queue> {
        self.queue.as_deref()
    }
}

#[derive(Debug, Default)]
struct ContextArena<'q> {
    contexts: SlotMap<ContextKey, QueueContext<'q>>,
}

impl LinkArena<ContextKey> for ContextArena<'_> {
    #[inline]
    fn link(&self, key: ContextKey) -> &CircularLink<ContextKey> {
        &self.contexts[key].link
    }

    #[inline]
    fn link_mut(&mut self, key: ContextKey) -> &mut CircularLink<ContextKey> {
        &mut self.contexts[key].link
    }
}

/// A chain of sorted queues to be merged into one.
///
/// # Example
///
/// ```rust
/// use linked_queue::{Queue, QueueChain};
///
/// let mut a: Queue = ["a", "d"].into_iter().collect();
/// let mut b: Queue = ["b", "e"].into_iter().collect();
/// let mut c: Queue = ["c"].into_iter().collect();
///
/// let mut chain = QueueChain::new();
/// chain.push(&mut a);
/// chain.push(&mut b);
/// chain.push(&mut c);
/// assert_eq!(chain.merge(), 5);
/// drop(chain);
///
/// assert_eq!(a.iter().collect::<Vec<_>>(), ["a", "b", "c", "d", "e"]);
/// assert!(b.is_empty() && c.is_empty());
/// ```
#[derive(Debug)]
pub struct QueueChain<'q> {
    arena: ContextArena<'q>,
    head: ContextKey,
    ops: CircularListOps,
    next_id: usize,
}

impl<'q> QueueChain<'q> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        let ops = CircularListOps::new();
        let mut arena = ContextArena::default();
        let head = arena.contexts.insert(QueueContext {
            link: CircularLink::new(),
            queue: None,
            id: usize::MAX,
        });
        ops.init(&mut arena, head);
        Self {
            arena,
            head,
            ops,
            next_id: 0,
        }
    }

    /// Appends a queue to the chain and returns its context id.
    ///
    /// Ids count up from 0 in push order.
    pub fn push(&mut self, queue: &'q mut Queue) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let key = self.arena.contexts.insert(QueueContext {
            link: CircularLink::new(),
            queue: Some(queue),
            id,
        });
        self.ops.insert_before(&mut self.arena, self.head, key);
        id
    }

    /// Number of contexts in the chain.
    pub fn len(&self) -> usize {
        self.ops.count(&self.arena, self.head)
    }

    /// Returns `true` if no queue has been pushed.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty(&self.arena, self.head)
    }

    /// Iterates over the contexts in chain order.
    pub fn contexts(&self) -> impl Iterator<Item = &QueueContext<'q>> + '_ {
        let mut keys = Vec::new();
        self.ops.for_each(&self.arena, self.head, |key| keys.push(key));
        keys.into_iter().map(move |key| &self.arena.contexts[key])
    }

    /// Merges every queue of the chain into the first one.
    ///
    /// Every queue must already be sorted. Runs `ceil(n / 2)` rounds; in each
    /// round consecutive pairs from the front of the chain are merged, the
    /// second queue of each pair is drained into the first and its context
    /// moves to the tail. Returns the length of the merged queue, `0` for an
    /// empty chain.
    pub fn merge(&mut self) -> usize {
        let Some(first) = self.ops.first(&self.arena, self.head) else {
            return 0;
        };
        if self.ops.is_singular(&self.arena, self.head) {
            return self.arena.contexts[first].queue.as_deref().map_or(0, Queue::len);
        }

        let contexts = self.len();
        let rounds = contexts.div_ceil(2);
        debug!(contexts, rounds, "merging queue chain");

        for round in 0..rounds {
            let mut first = self.ops.next(&self.arena, self.head);
            let mut merged = 0;

            loop {
                let second = self.ops.next(&self.arena, first);
                if second == self.head
                    || self.arena.contexts[first].queue.is_none()
                    || self.arena.contexts[second].queue.is_none()
                {
                    break;
                }

                let drained = self.arena.contexts[second].queue.take();
                if let (Some(into), Some(from)) =
                    (self.arena.contexts[first].queue.as_deref_mut(), drained)
                {
                    into.merge(from);
                }
                self.ops.move_tail(&mut self.arena, second, self.head);
                merged += 1;

                first = self.ops.next(&self.arena, first);
            }

            trace!(round, merged, "merge round done");
            if merged == 0 {
                break;
            }
        }

        let first = self.ops.next(&self.arena, self.head);
        self.arena.contexts[first].queue.as_deref().map_or(0, Queue::len)
    }
}

impl Default for QueueChain<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(values: &[&str]) -> Queue {
        values.iter().collect()
    }

    fn values(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn test_merge_two_interleaved() {
        let mut a = queue(&["1", "3", "5"]);
        let mut b = queue(&["2", "4", "6", "8"]);

        assert_eq!(a.merge(&mut b), 7);
        assert_eq!(values(&a), vec!["1", "2", "3", "4", "5", "6", "8"]);
        assert!(b.is_empty());
        assert!(a.verify_links());
        assert!(b.verify_links());
    }

    #[test]
    fn test_merge_two_with_empty_sides() {
        let mut a = queue(&[]);
        let mut b = queue(&["x", "y"]);
        assert_eq!(a.merge(&mut b), 2);
        assert_eq!(values(&a), vec!["x", "y"]);

        let mut empty = Queue::new();
        assert_eq!(a.merge(&mut empty), 2);
        assert_eq!(values(&a), vec!["x", "y"]);
    }

    #[test]
    fn test_merge_two_ties_keep_left_first() {
        let mut a = queue(&["k", "k"]);
        let mut b = queue(&["k"]);
        let left: Vec<_> = {
            let mut keys = Vec::new();
            a.ops.for_each(&a.nodes, a.head, |key| keys.push(key));
            keys
        };

        a.merge(&mut b);

        let mut after = Vec::new();
        a.ops.for_each(&a.nodes, a.head, |key| after.push(key));
        assert_eq!(&after[..2], &left[..]);
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn test_chain_empty_and_single() {
        let mut chain = QueueChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.merge(), 0);

        let mut only = queue(&["b", "c"]);
        let mut chain = QueueChain::new();
        assert_eq!(chain.push(&mut only), 0);
        assert_eq!(chain.merge(), 2);
        drop(chain);
        assert_eq!(values(&only), vec!["b", "c"]);
    }

    #[test]
    fn test_chain_merges_many() {
        let mut qs: Vec<Queue> = vec![
            queue(&["1", "5", "9"]),
            queue(&["2", "6"]),
            queue(&[]),
            queue(&["3", "7", "10"]),
            queue(&["4", "8"]),
        ];

        let mut chain = QueueChain::new();
        for q in qs.iter_mut() {
            chain.push(q);
        }
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.merge(), 10);

        let first = chain.contexts().next().unwrap();
        assert_eq!(first.id(), 0);
        assert_eq!(first.queue().map(Queue::len), Some(10));
        assert_eq!(chain.contexts().filter(|c| c.queue().is_none()).count(), 4);
        drop(chain);

        assert_eq!(
            values(&qs[0]),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
        );
        assert!(qs[1..].iter().all(Queue::is_empty));
        assert!(qs.iter().all(Queue::verify_links));
    }

    #[test]
    fn test_chain_two_queues() {
        let mut a = queue(&["b"]);
        let mut b = queue(&["a"]);
        let mut chain = QueueChain::new();
        chain.push(&mut a);
        chain.push(&mut b);
        assert_eq!(chain.merge(), 2);
        drop(chain);
        assert_eq!(values(&a), vec!["a", "b"]);
    }
}
