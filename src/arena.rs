use std::vec::Vec;

use super::{
  node::{Node, NodePtr},
  Error,
};

/// The most nodes an arena can address through a [`NodePtr`].
const MAX_NODES: usize = u32::MAX as usize;

/// Node storage addressed by stable [`NodePtr`]s.
///
/// Released slots are kept on a free list and handed out again by later allocations, a
/// [`NodePtr`] stays valid until the node it refers to is deallocated.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
  slots: Vec<Option<Node<K, V>>>,
  free: Vec<u32>,
  limit: usize,
}

impl<K, V> Arena<K, V> {
  #[inline]
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      free: Vec::new(),
      limit: MAX_NODES,
    }
  }

  /// An arena which refuses to hold more than `limit` live nodes.
  #[cfg(test)]
  pub(crate) fn with_limit(limit: usize) -> Self {
    Self {
      limit,
      ..Self::with_capacity(0)
    }
  }

  /// Stores `node` and returns its handle.
  ///
  /// Returns [`Error::Full`] if every addressable slot is taken, the node is dropped.
  pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Result<NodePtr, Error> {
    if let Some(offset) = self.free.pop() {
      let slot = &mut self.slots[offset as usize];
      debug_assert!(slot.is_none(), "free list points at an occupied slot");
      *slot = Some(node);
      return Ok(NodePtr::new(offset));
    }

    if self.slots.len() >= self.limit {
      return Err(Error::Full);
    }
    let offset = u32::try_from(self.slots.len()).map_err(|_| Error::Full)?;
    self.slots.push(Some(node));
    Ok(NodePtr::new(offset))
  }

  /// Takes the node out of the arena, the slot becomes reusable.
  ///
  /// ## Panics
  /// - If `ptr` does not refer to a live node.
  pub(crate) fn dealloc(&mut self, ptr: NodePtr) -> Node<K, V> {
    let node = self.slots[ptr.offset()]
      .take()
      .expect("dealloc of a released node");
    self.free.push(ptr.offset() as u32);
    node
  }

  /// ## Panics
  /// - If `ptr` does not refer to a live node.
  #[inline]
  pub(crate) fn get(&self, ptr: NodePtr) -> &Node<K, V> {
    self.slots[ptr.offset()]
      .as_ref()
      .expect("dangling node pointer")
  }

  /// ## Panics
  /// - If `ptr` does not refer to a live node.
  #[inline]
  pub(crate) fn get_mut(&mut self, ptr: NodePtr) -> &mut Node<K, V> {
    self.slots[ptr.offset()]
      .as_mut()
      .expect("dangling node pointer")
  }

  /// Drops every node and forgets all slots.
  #[inline]
  pub(crate) fn reset(&mut self) {
    self.slots.clear();
    self.free.clear();
  }

  /// Number of live nodes.
  #[cfg(test)]
  pub(crate) fn live(&self) -> usize {
    self.slots.len() - self.free.len()
  }
}
