//! Identifiers and a simple allocator for graph entities.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LinkId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for NodeId and LinkId.
/// IDs are opaque externally; hosts restoring a saved graph call
/// [`IdAllocator::resync`] so fresh allocations never collide.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next_node: u64,
    next_link: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node = self.next_node.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_link(&mut self) -> LinkId {
        let id = LinkId(self.next_link);
        self.next_link = self.next_link.wrapping_add(1);
        id
    }

    /// Bump both counters past every id currently present in a restored graph.
    pub fn resync(&mut self, nodes: impl Iterator<Item = NodeId>, links: impl Iterator<Item = LinkId>) {
        for NodeId(n) in nodes {
            self.next_node = self.next_node.max(n.wrapping_add(1));
        }
        for LinkId(l) in links {
            self.next_link = self.next_link.max(l.wrapping_add(1));
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_node(), NodeId(0));
        assert_eq!(alloc.alloc_node(), NodeId(1));
        assert_eq!(alloc.alloc_link(), LinkId(0));
        assert_eq!(alloc.alloc_link(), LinkId(1));
    }

    #[test]
    fn resync_skips_restored_ids() {
        let mut alloc = IdAllocator::new();
        alloc.resync(
            [NodeId(4), NodeId(2)].into_iter(),
            [LinkId(7)].into_iter(),
        );
        assert_eq!(alloc.alloc_node(), NodeId(5));
        assert_eq!(alloc.alloc_link(), LinkId(8));
    }
}
