//! Recency List Module
//!
//! Implements Least Recently Used ordering for cache eviction.
//!
//! Nodes live in a `Vec` arena and link to each other by index, so the map
//! can hold plain `Handle`s instead of references. Two sentinel nodes at fixed
//! slots bracket the live nodes:
//! - `HEAD.next` = Most recently used
//! - `TAIL.prev` = Least recently used

const HEAD: usize = 0;
const TAIL: usize = 1;

// == Handle ==
/// Stable position of a node in a `RecencyList`.
///
/// Valid from `push_front` until the node is removed. Using a handle after
/// that is a bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Node<K> {
    /// None for sentinels and freed slots
    key: Option<K>,
    prev: usize,
    next: usize,
}

impl<K> Node<K> {
    fn sentinel() -> Self {
        Self {
            key: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

// == Recency List ==
/// Doubly linked list ordering keys from most to least recently used.
///
/// Every structural operation is O(1).
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Node<K>>,
    /// Slots freed by removals, reused before growing the arena
    free: Vec<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts `key` at the most recently used end and returns its handle.
    pub fn push_front(&mut self, key: K) -> Handle {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].key = Some(key);
                idx
            }
            None => {
                self.nodes.push(Node {
                    key: Some(key),
                    prev: HEAD,
                    next: TAIL,
                });
                self.nodes.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Move To Front ==
    /// Marks the node as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = self.linked(handle);
        if self.nodes[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Detaches the node and returns its key.
    pub fn remove(&mut self, handle: Handle) -> K {
        let idx = self.linked(handle);
        self.detach(idx)
    }

    // == Remove Tail ==
    /// Detaches and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn remove_tail(&mut self) -> Option<K> {
        let last = self.nodes[TAIL].prev;
        if last == HEAD {
            return None;
        }
        Some(self.detach(last))
    }

    // == Peek Tail ==
    /// Returns the least recently used key without removing it.
    pub fn peek_tail(&self) -> Option<&K> {
        self.nodes[self.nodes[TAIL].prev].key.as_ref()
    }

    // == Clear ==
    /// Drops every node and releases the arena slots.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iterate ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    fn linked(&self, handle: Handle) -> usize {
        let idx = handle.0;
        if idx <= TAIL || self.nodes.get(idx).map_or(true, |n| n.key.is_none()) {
            panic!("recency handle {idx} is not linked");
        }
        idx
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn detach(&mut self, idx: usize) -> K {
        self.unlink(idx);
        let key = match self.nodes[idx].key.take() {
            Some(key) => key,
            None => panic!("recency handle {idx} is not linked"),
        };
        self.free.push(idx);
        self.len -= 1;
        key
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Borrowing iterator over a `RecencyList`, most recent first.
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        node.key.as_ref()
    }
}
