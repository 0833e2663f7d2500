use std::{boxed::Box, vec};

/// A forward reference, `None` marks the end of a level.
pub(crate) type Link = Option<NodePtr>;

/// A stable handle to a node stored in the [`Arena`](crate::arena::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodePtr(u32);

impl NodePtr {
  #[inline]
  pub(crate) const fn new(offset: u32) -> Self {
    Self(offset)
  }

  #[inline]
  pub(crate) const fn offset(&self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug)]
pub(crate) struct Node<K, V> {
  // Immutable after creation.
  key: K,
  value: V,
  // `tower[i]` is the next node at level `i`, `tower.len() == level + 1`.
  tower: Box<[Link]>,
}

impl<K, V> Node<K, V> {
  /// Creates an unlinked node which participates in levels `0..=level`.
  #[inline]
  pub(crate) fn new(key: K, value: V, level: usize) -> Self {
    Self {
      key,
      value,
      tower: vec![None; level + 1].into_boxed_slice(),
    }
  }

  #[inline]
  pub(crate) const fn key(&self) -> &K {
    &self.key
  }

  #[inline]
  pub(crate) const fn value(&self) -> &V {
    &self.value
  }

  #[inline]
  pub(crate) fn value_mut(&mut self) -> &mut V {
    &mut self.value
  }

  #[inline]
  pub(crate) fn set_value(&mut self, value: V) -> V {
    core::mem::replace(&mut self.value, value)
  }

  /// The highest level this node is linked at.
  #[inline]
  pub(crate) fn level(&self) -> usize {
    self.tower.len() - 1
  }

  #[inline]
  pub(crate) fn next(&self, level: usize) -> Link {
    self.tower[level]
  }

  #[inline]
  pub(crate) fn set_next(&mut self, level: usize, link: Link) {
    self.tower[level] = link;
  }

  #[inline]
  pub(crate) fn into_value(self) -> V {
    self.value
  }
}
