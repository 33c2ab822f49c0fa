//! Random permutation of a queue
//!
//! Fisher-Yates over links: walking from the tail, each position swaps with a
//! uniformly chosen node among the ones not yet fixed. Nodes trade places
//! through [`CircularListOps::swap`](intrusive_circular_list::CircularListOps::swap),
//! so values are never moved.

use rand::Rng;

use crate::queue::Queue;

impl Queue {
    /// Shuffles the queue uniformly at random.
    ///
    /// The random source is supplied by the caller, so a seeded generator
    /// gives a reproducible permutation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut queue: Queue = ["a", "b", "c", "d"].into_iter().collect();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// queue.shuffle(&mut rng);
    ///
    /// let mut values: Vec<_> = queue.iter().collect();
    /// values.sort();
    /// assert_eq!(values, ["a", "b", "c", "d"]);
    /// ```
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut remaining = self.len();
        if remaining < 2 {
            return;
        }

        // Everything after `fixed` is already in its final place.
        let mut fixed = self.head;
        while remaining > 0 {
            let index = rng.gen_range(0..remaining);
            let current = self.prev(fixed);
            let mut chosen = current;
            for _ in 0..index {
                chosen = self.prev(chosen);
            }

            self.ops.swap(&mut self.nodes, current, chosen);
            // `chosen` now sits where `current` was.
            fixed = chosen;
            remaining -= 1;
        }
    }
}
