//! Structural mutators
//!
//! In-place rearrangements that only relink nodes:
//! - [`Queue::delete_mid`]: release the middle element
//! - [`Queue::delete_dup`]: release every run of equal adjacent values
//! - [`Queue::swap_pairs`]: exchange elements 1<->2, 3<->4, ...
//! - [`Queue::reverse`]: reverse the whole queue
//! - [`Queue::reverse_k`]: reverse consecutive groups of `k` elements

use tracing::debug;

use crate::error::QueueError;
use crate::queue::Queue;

impl Queue {
    /// Releases the middle element.
    ///
    /// For `n` elements this is the one at 0-based index `n / 2`: the exact
    /// middle for odd `n`, the second of the two central elements for even `n`.
    /// Returns `false` if the queue is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut queue: Queue = ["a", "b", "c", "d"].into_iter().collect();
    /// assert!(queue.delete_mid());
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "d"]);
    /// ```
    pub fn delete_mid(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }

        // Walk inward from both ends until the cursors meet (odd) or touch (even).
        let mut front = self.next(self.head);
        let mut back = self.prev(self.head);
        while front != back && self.next(front) != back {
            front = self.next(front);
            back = self.prev(back);
        }

        self.release(back);
        true
    }

    /// Releases every element whose value equals a neighbor's value.
    ///
    /// Each maximal run of two or more equal adjacent values is removed
    /// entirely, first occurrence included. On a sorted queue this removes
    /// every value that occurs more than once. Returns the number of elements
    /// released.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut queue: Queue = ["1", "1", "2", "3", "3"].into_iter().collect();
    /// assert_eq!(queue.delete_dup(), 4);
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["2"]);
    /// ```
    pub fn delete_dup(&mut self) -> usize {
        let mut released = 0;
        let mut in_run = false;
        let mut current = self.next(self.head);

        while current != self.head {
            let next = self.next(current);
            let same_as_next = next != self.head && self.value(current) == self.value(next);

            if same_as_next || in_run {
                self.release(current);
                released += 1;
            }
            in_run = same_as_next;
            current = next;
        }

        released
    }

    /// Swaps every two adjacent elements.
    ///
    /// An odd trailing element stays in place.
    pub fn swap_pairs(&mut self) {
        let mut first = self.next(self.head);

        loop {
            let second = self.next(first);
            if first == self.head || second == self.head {
                break;
            }
            self.ops.move_after(&mut self.nodes, first, second);
            first = self.next(first);
        }
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.ops.reverse(&mut self.nodes, self.head);
    }

    /// Reverses each consecutive group of `k` elements.
    ///
    /// A trailing group shorter than `k` keeps its order. `k == 1` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidArgument`] for `k == 0`; the queue is not
    /// touched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut queue: Queue = ["1", "2", "3", "4", "5"].into_iter().collect();
    /// queue.reverse_k(2).unwrap();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_k(&mut self, k: usize) -> Result<(), QueueError> {
        if k == 0 {
            return Err(QueueError::InvalidArgument("group size must be positive"));
        }
        let groups = self.len() / k;
        if k == 1 || groups == 0 {
            return Ok(());
        }
        debug!(k, groups, "reversing queue in groups");

        let group = self.alloc_scratch();
        let done = self.alloc_scratch();

        for _ in 0..groups {
            // `last` ends on the final node of the next group.
            let mut last = self.head;
            for _ in 0..k {
                last = self.next(last);
            }
            self.ops.cut_position(&mut self.nodes, group, self.head, last);
            self.ops.reverse(&mut self.nodes, group);
            self.ops.splice_tail_init(&mut self.nodes, group, done);
        }
        self.ops.splice_init(&mut self.nodes, done, self.head);

        self.free_scratch(group);
        self.free_scratch(done);
        Ok(())
    }
}
