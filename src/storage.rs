//! Arena storage for queue nodes
//!
//! Every queue owns one [`NodeArena`]: a `slotmap` of nodes, each carrying a
//! [`CircularLink`] and an optional string payload. The queue's sentinel is a
//! node without payload; elements always carry one.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than boxed nodes)
//! - Generational keys detect stale references instead of dangling
//! - Links are keys, so relinking never aliases payload memory
//!
//! Releasing an element means removing its slot, which drops the `String`.

use intrusive_circular_list::{CircularLink, LinkArena};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key naming a node (sentinel or element) inside a [`NodeArena`].
    pub struct NodeKey;
}

/// A node of the queue's list.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) link: CircularLink<NodeKey>,
    pub(crate) value: Option<String>,
}

/// Slotmap-backed node arena.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: SlotMap<NodeKey, Node>,
}

impl NodeArena {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Allocates a payload-less node to anchor a list.
    ///
    /// The node is unlinked; the caller initializes it.
    pub(crate) fn insert_sentinel(&mut self) -> NodeKey {
        self.nodes.insert(Node {
            link: CircularLink::new(),
            value: None,
        })
    }

    /// Allocates an unlinked element node owning `value`.
    pub(crate) fn insert_element(&mut self, value: String) -> NodeKey {
        self.nodes.insert(Node {
            link: CircularLink::new(),
            value: Some(value),
        })
    }

    /// Frees a node, returning its payload if it had one.
    ///
    /// The node must already be unlinked.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<String> {
        let node = self.nodes.remove(key)?;
        debug_assert!(!node.link.is_linked(), "removing a linked node");
        node.value
    }

    /// Returns the payload of an element node.
    ///
    /// Sentinels read as the empty string; callers never compare them.
    #[inline]
    pub(crate) fn value(&self, key: NodeKey) -> &str {
        self.nodes[key].value.as_deref().unwrap_or_default()
    }

    /// Drops every node, the sentinel included.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Number of nodes, sentinels included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl LinkArena<NodeKey> for NodeArena {
    #[inline]
    fn link(&self, key: NodeKey) -> &CircularLink<NodeKey> {
        &self.nodes[key].link
    }

    #[inline]
    fn link_mut(&mut self, key: NodeKey) -> &mut CircularLink<NodeKey> {
        &mut self.nodes[key].link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_roundtrip() {
        let mut arena = NodeArena::new();

        let key = arena.insert_element("hello".to_string());
        assert_eq!(arena.value(key), "hello");
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.remove(key), Some("hello".to_string()));
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_sentinel_has_no_payload() {
        let mut arena = NodeArena::new();

        let key = arena.insert_sentinel();
        assert_eq!(arena.value(key), "");
        assert!(!arena.link(key).is_linked());
        assert_eq!(arena.remove(key), None);
    }

    #[test]
    fn test_stale_key_is_detected() {
        let mut arena = NodeArena::new();

        let key = arena.insert_element("a".to_string());
        arena.remove(key);
        assert_eq!(arena.remove(key), None);

        // The freed slot is reused under a new generation.
        let other = arena.insert_element("b".to_string());
        assert_ne!(key, other);
    }
}
