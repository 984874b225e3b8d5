//! Ordered entity collections
//!
//! Every entity category lives in an [`EntityList`]: a generational arena
//! threaded by a singly-linked `next` chain. The chain starts at a sentinel
//! head (never removed, never holds data) and keeps a tail link so appends
//! are O(1). Removal is a single forward sweep with a trailing link, which
//! lets entities die and spawn mid-frame without invalidating anything a
//! caller holds: keys of freed slots simply stop resolving.

use slotmap::{Key, SlotMap};
use thiserror::Error;

/// A position in the chain: the sentinel head or a live node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link<K> {
    Head,
    Node(K),
}

/// Arena slot carrying the intrusive successor link
#[derive(Debug, Clone)]
struct Node<K, T> {
    value: T,
    next: Option<K>,
}

/// Chain integrity failures reported by [`EntityList::check_links`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("walked {walked} nodes but the list holds {len}")]
    LengthMismatch { walked: usize, len: usize },
    #[error("chain references a freed slot")]
    Dangling,
    #[error("tail node has a successor")]
    TailNotTerminal,
    #[error("tail does not designate the last node")]
    TailMismatch,
}

/// Insertion-ordered collection with stable generational keys
#[derive(Debug, Clone)]
pub struct EntityList<K: Key, T> {
    nodes: SlotMap<K, Node<K, T>>,
    /// Successor of the sentinel head
    head: Option<K>,
    /// Last live node, or the sentinel when empty
    tail: Link<K>,
}

impl<K: Key, T> Default for EntityList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, T> EntityList<K, T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: Link::Head,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// First live node after the sentinel
    pub fn first(&self) -> Option<K> {
        self.head
    }

    pub fn tail(&self) -> Link<K> {
        self.tail
    }

    /// Append a value at the tail and return its key
    pub fn spawn(&mut self, value: T) -> K {
        let key = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Link::Head => self.head = Some(key),
            Link::Node(tail) => self.nodes[tail].next = Some(key),
        }
        self.tail = Link::Node(key);
        key
    }

    /// Single forward pass that frees every node for which `remove` returns
    /// true. The callback gets mutable access first, so one pass can both
    /// advance an entity and decide whether it dies.
    ///
    /// Returns the number of freed nodes.
    pub fn sweep(&mut self, mut remove: impl FnMut(K, &mut T) -> bool) -> usize {
        let mut prev = Link::Head;
        let mut cursor = self.head;
        let mut removed = 0;

        while let Some(key) = cursor {
            let node = &mut self.nodes[key];
            let next = node.next;

            if remove(key, &mut node.value) {
                match prev {
                    Link::Head => self.head = next,
                    Link::Node(p) => self.nodes[p].next = next,
                }
                if self.tail == Link::Node(key) {
                    self.tail = prev;
                }
                self.nodes.remove(key);
                removed += 1;
                // prev stays put: its successor now skips the freed node
            } else {
                prev = Link::Node(key);
            }

            cursor = next;
        }

        debug_assert_eq!(self.check_links(), Ok(()));
        removed
    }

    /// Free every node; the tail returns to the sentinel
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = Link::Head;
    }

    /// Generation-checked lookup; keys of freed nodes resolve to `None`
    pub fn get(&self, key: K) -> Option<&T> {
        self.nodes.get(key).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.nodes.get_mut(key).map(|node| &mut node.value)
    }

    pub fn contains(&self, key: K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Walk the chain from the sentinel in insertion order
    pub fn iter(&self) -> Iter<'_, K, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Key of the first node (in chain order) matching `pred`
    pub fn find(&self, mut pred: impl FnMut(K, &T) -> bool) -> Option<K> {
        self.iter().find(|&(key, value)| pred(key, value)).map(|(key, _)| key)
    }

    /// Visit every node mutably in chain order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(K, &mut T)) {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = &mut self.nodes[key];
            f(key, &mut node.value);
            cursor = node.next;
        }
    }

    /// Verify that walking from the sentinel reaches the tail in exactly
    /// `len()` steps and that the tail ends the chain.
    pub fn check_links(&self) -> Result<(), LinkError> {
        let len = self.nodes.len();
        let mut walked = 0;
        let mut last = Link::Head;
        let mut cursor = self.head;

        while let Some(key) = cursor {
            let node = self.nodes.get(key).ok_or(LinkError::Dangling)?;
            walked += 1;
            if walked > len {
                // cycle or stray node
                return Err(LinkError::LengthMismatch { walked, len });
            }
            last = Link::Node(key);
            cursor = node.next;
        }

        if walked != len {
            return Err(LinkError::LengthMismatch { walked, len });
        }
        if let Link::Node(tail) = self.tail {
            match self.nodes.get(tail) {
                None => return Err(LinkError::Dangling),
                Some(node) if node.next.is_some() => return Err(LinkError::TailNotTerminal),
                Some(_) => {}
            }
        }
        if last != self.tail {
            return Err(LinkError::TailMismatch);
        }
        Ok(())
    }
}

/// Chain-order iterator over `(key, value)` pairs
pub struct Iter<'a, K: Key, T> {
    nodes: &'a SlotMap<K, Node<K, T>>,
    cursor: Option<K>,
}

impl<'a, K: Key, T> Iterator for Iter<'a, K, T> {
    type Item = (K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.nodes.get(key)?;
        self.cursor = node.next;
        Some((key, &node.value))
    }
}
