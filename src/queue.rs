//! Queue of strings on a sentinel-anchored circular list
//!
//! A [`Queue`] owns a [`NodeArena`] whose first node is the sentinel. Each
//! element is a node carrying its own `String`; insertion duplicates the
//! caller's string, removal hands ownership back as an [`Element`].
//!
//! The structural algorithms (reversal, sorting, merging, ...) live in sibling
//! modules as further `impl Queue` blocks. They all relink nodes through
//! [`CircularListOps`] and never copy payloads.

use std::fmt;
use std::iter::FusedIterator;

use intrusive_circular_list::{CircularListOps, LinkArena};

use crate::element::{duplicate, Element};
use crate::error::QueueError;
use crate::storage::{NodeArena, NodeKey};

/// A double-ended queue of strings.
///
/// # Example
///
/// ```rust
/// use linked_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.len(), 3);
///
/// let mut buf = [0u8; 8];
/// let head = queue.remove_head(Some(&mut buf)).unwrap();
/// assert_eq!(head.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
///
/// assert_eq!(queue.iter().collect::<Vec<_>>(), ["b", "c"]);
/// ```
pub struct Queue {
    pub(crate) nodes: NodeArena,
    pub(crate) head: NodeKey,
    pub(crate) ops: CircularListOps,
}

impl Queue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let ops = CircularListOps::new();
        let mut nodes = NodeArena::new();
        let head = nodes.insert_sentinel();
        ops.init(&mut nodes, head);
        Self { nodes, head, ops }
    }

    /// Returns the number of elements.
    #[doc(alias = "size")]
    #[inline]
    pub fn len(&self) -> usize {
        // Temporary sentinels never outlive a single operation.
        self.nodes.len() - 1
    }

    /// Returns `true` if the queue has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty(&self.nodes, self.head)
    }

    /// Returns the value at the head, if any.
    pub fn front(&self) -> Option<&str> {
        self.ops
            .first(&self.nodes, self.head)
            .map(|key| self.nodes.value(key))
    }

    /// Returns the value at the tail, if any.
    pub fn back(&self) -> Option<&str> {
        self.ops
            .last(&self.nodes, self.head)
            .map(|key| self.nodes.value(key))
    }

    /// Inserts a copy of `s` at the head.
    ///
    /// On allocation failure the queue is left unchanged.
    pub fn insert_head(&mut self, s: &str) -> Result<(), QueueError> {
        let value = duplicate(s)?;
        let key = self.nodes.insert_element(value);
        self.ops.insert_after(&mut self.nodes, self.head, key);
        Ok(())
    }

    /// Inserts a copy of `s` at the tail.
    ///
    /// On allocation failure the queue is left unchanged.
    pub fn insert_tail(&mut self, s: &str) -> Result<(), QueueError> {
        let value = duplicate(s)?;
        self.push_tail(value);
        Ok(())
    }

    /// Removes the head element.
    ///
    /// If `buf` is given, the value is also copied into it (see
    /// [`Element::copy_to`]). Returns `None` if the queue is empty.
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let key = self.ops.first(&self.nodes, self.head)?;
        let element = self.take(key);
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Removes the tail element.
    ///
    /// If `buf` is given, the value is also copied into it (see
    /// [`Element::copy_to`]). Returns `None` if the queue is empty.
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let key = self.ops.last(&self.nodes, self.head)?;
        let element = self.take(key);
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Releases every element. The queue stays usable.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = self.nodes.insert_sentinel();
        self.ops.init(&mut self.nodes, self.head);
    }

    /// Returns a front-to-back iterator over the values.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            front: self.ops.next(&self.nodes, self.head),
            back: self.ops.prev(&self.nodes, self.head),
            remaining: self.len(),
        }
    }

    /// Walks the ring and checks every link is mutual and the element count
    /// matches [`len`](Self::len).
    pub fn verify_links(&self) -> bool {
        self.ops.verify(&self.nodes, self.head) == Ok(self.len())
    }

    // ------------------------------------------------------------------------
    // Crate-internal node helpers shared by the algorithm modules
    // ------------------------------------------------------------------------

    /// Links an already-owned value at the tail.
    pub(crate) fn push_tail(&mut self, value: String) -> NodeKey {
        let key = self.nodes.insert_element(value);
        self.ops.insert_before(&mut self.nodes, self.head, key);
        key
    }

    /// Links an already-owned value right before `at`.
    pub(crate) fn push_before(&mut self, at: NodeKey, value: String) -> NodeKey {
        let key = self.nodes.insert_element(value);
        self.ops.insert_before(&mut self.nodes, at, key);
        key
    }

    /// Unlinks `key` and hands its value to the caller.
    pub(crate) fn take(&mut self, key: NodeKey) -> Element {
        debug_assert_ne!(key, self.head, "the sentinel is not an element");
        self.ops.unlink(&mut self.nodes, key);
        Element::new(self.nodes.remove(key).unwrap_or_default())
    }

    /// Unlinks `key` and frees it.
    pub(crate) fn release(&mut self, key: NodeKey) {
        drop(self.take(key));
    }

    /// Allocates an empty scratch list inside this queue's arena.
    ///
    /// Must be handed back through [`free_scratch`](Self::free_scratch) before
    /// the calling operation returns, or [`len`](Self::len) drifts.
    pub(crate) fn alloc_scratch(&mut self) -> NodeKey {
        let key = self.nodes.insert_sentinel();
        self.ops.init(&mut self.nodes, key);
        key
    }

    pub(crate) fn free_scratch(&mut self, key: NodeKey) {
        debug_assert!(self.ops.is_empty(&self.nodes, key), "scratch list not drained");
        self.nodes.link_mut(key).force_unlink();
        self.nodes.remove(key);
    }

    #[inline]
    pub(crate) fn next(&self, key: NodeKey) -> NodeKey {
        self.ops.next(&self.nodes, key)
    }

    #[inline]
    pub(crate) fn prev(&self, key: NodeKey) -> NodeKey {
        self.ops.prev(&self.nodes, key)
    }

    #[inline]
    pub(crate) fn value(&self, key: NodeKey) -> &str {
        self.nodes.value(key)
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Queue {
    /// Formats the values front to back as `a -> b -> c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}

impl<S: AsRef<str>> Extend<S> for Queue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for s in iter {
            self.push_tail(s.as_ref().to_owned());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Queue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`Queue`].
pub struct Iter<'a> {
    queue: &'a Queue,
    front: NodeKey,
    back: NodeKey,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front;
        self.front = self.queue.next(key);
        self.remaining -= 1;
        Some(self.queue.value(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.back;
        self.back = self.queue.prev(key);
        self.remaining -= 1;
        Some(self.queue.value(key))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn test_new_is_empty() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.front(), None);
        assert_eq!(queue.back(), None);
        assert!(queue.remove_head(None).is_none());
        assert!(queue.remove_tail(None).is_none());
        assert!(queue.verify_links());
    }

    #[test]
    fn test_insert_both_ends() {
        let mut queue = Queue::new();
        queue.insert_head("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();

        assert_eq!(values(&queue), vec!["a", "b", "c"]);
        assert_eq!(queue.front(), Some("a"));
        assert_eq!(queue.back(), Some("c"));
        assert_eq!(queue.len(), 3);
        assert!(queue.verify_links());
    }

    #[test]
    fn test_remove_with_buffer() {
        let mut queue: Queue = ["alpha", "beta"].into_iter().collect();
        let mut buf = [0xffu8; 4];

        let tail = queue.remove_tail(Some(&mut buf)).unwrap();
        assert_eq!(tail.value(), "beta");
        assert_eq!(&buf, b"bet\0");

        let head = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(head.into_value(), "alpha");
        assert_eq!(&buf, b"alp\0");

        assert!(queue.is_empty());
        assert!(queue.verify_links());
    }

    #[test]
    fn test_remove_with_empty_buffer() {
        let mut queue: Queue = ["x"].into_iter().collect();
        let mut buf: [u8; 0] = [];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(element.value(), "x");
    }

    #[test]
    fn test_clear() {
        let mut queue: Queue = ["1", "2", "3"].into_iter().collect();
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.verify_links());

        queue.insert_tail("4").unwrap();
        assert_eq!(values(&queue), vec!["4"]);
    }

    #[test]
    fn test_iter_double_ended() {
        let queue: Queue = ["1", "2", "3", "4"].into_iter().collect();
        let mut iter = queue.iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some("1"));
        assert_eq!(iter.next_back(), Some("4"));
        assert_eq!(iter.next(), Some("2"));
        assert_eq!(iter.next_back(), Some("3"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        assert_eq!(queue.iter().rev().collect::<Vec<_>>(), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn test_display_and_debug() {
        let queue: Queue = ["a", "b", "c"].into_iter().collect();
        assert_eq!(queue.to_string(), "a -> b -> c");
        assert_eq!(format!("{queue:?}"), r#"["a", "b", "c"]"#);
        assert_eq!(Queue::new().to_string(), "");
    }

    #[test]
    fn test_scratch_lists_do_not_count() {
        let mut queue: Queue = ["a"].into_iter().collect();
        let scratch = queue.alloc_scratch();
        queue.free_scratch(scratch);
        assert_eq!(queue.len(), 1);
        assert!(queue.verify_links());
    }
}
