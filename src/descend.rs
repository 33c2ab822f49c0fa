//! Descending filter
//!
//! Removes every element that has a strictly greater value somewhere to its
//! right. What remains reads as a non-increasing sequence from head to tail.

use std::cmp::Ordering;

use crate::order::compare;
use crate::queue::Queue;

impl Queue {
    /// Releases every element dominated by a strictly greater value to its
    /// right and returns the number of elements left.
    ///
    /// The scan runs from the tail leftward, comparing each candidate with
    /// the nearest kept element on its right. Equal values are kept.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_queue::Queue;
    ///
    /// let mut queue: Queue = ["5", "2", "13", "3", "8"].into_iter().collect();
    /// assert_eq!(queue.remove_descending(), 2);
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["13", "8"]);
    /// ```
    pub fn remove_descending(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut kept = self.prev(self.head);
        let mut candidate = self.prev(kept);

        while candidate != self.head {
            let left = self.prev(candidate);
            if compare(self.value(candidate), self.value(kept)) == Ordering::Less {
                self.release(candidate);
            } else {
                kept = candidate;
            }
            candidate = left;
        }

        self.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::Queue;

    fn run(values: &[&str]) -> (usize, Vec<String>) {
        let mut queue: Queue = values.iter().collect();
        let left = queue.remove_descending();
        assert!(queue.verify_links());
        (left, queue.iter().map(str::to_owned).collect())
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(run(&[]), (0, vec![]));
        assert_eq!(run(&["a"]), (1, vec!["a".to_owned()]));
    }

    #[test]
    fn test_mixed() {
        let (left, values) = run(&["5", "2", "13", "3", "8"]);
        assert_eq!(left, 2);
        assert_eq!(values, ["13", "8"]);
    }

    #[test]
    fn test_equal_values_are_kept() {
        let (left, values) = run(&["b", "b", "a", "b"]);
        assert_eq!(left, 3);
        assert_eq!(values, ["b", "b", "b"]);
    }

    #[test]
    fn test_ascending_collapses_to_last() {
        let (left, values) = run(&["a", "b", "c", "d"]);
        assert_eq!(left, 1);
        assert_eq!(values, ["d"]);
    }

    #[test]
    fn test_descending_is_untouched() {
        let (left, values) = run(&["d", "c", "b", "a"]);
        assert_eq!(left, 4);
        assert_eq!(values, ["d", "c", "b", "a"]);
    }
}
