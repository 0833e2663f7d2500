use core::iter::FusedIterator;

use super::{Arena, Link};

/// An entry visited by an [`Iter`].
#[derive(Debug)]
pub struct EntryRef<'a, K, V> {
  key: &'a K,
  value: &'a V,
  level: usize,
}

impl<K, V> Clone for EntryRef<'_, K, V> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for EntryRef<'_, K, V> {}

impl<'a, K, V> EntryRef<'a, K, V> {
  /// Returns the key of the entry.
  #[inline]
  pub const fn key(&self) -> &'a K {
    self.key
  }

  /// Returns the value of the entry.
  #[inline]
  pub const fn value(&self) -> &'a V {
    self.value
  }

  /// Returns the highest level the entry's node is linked at.
  #[inline]
  pub const fn level(&self) -> usize {
    self.level
  }
}

/// An iterator over the entries linked at a single level of a skiplist.
pub struct Iter<'a, K, V> {
  arena: &'a Arena<K, V>,
  next: Link,
  level: usize,
}

impl<K, V> core::fmt::Debug for Iter<'_, K, V> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Iter")
      .field("next", &self.next)
      .field("level", &self.level)
      .finish()
  }
}

impl<'a, K, V> Iter<'a, K, V> {
  #[inline]
  pub(super) const fn new(arena: &'a Arena<K, V>, next: Link, level: usize) -> Self {
    Self { arena, next, level }
  }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
  type Item = EntryRef<'a, K, V>;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let node = self.arena.get(self.next?);
    self.next = node.next(self.level);
    Some(EntryRef {
      key: node.key(),
      value: node.value(),
      level: node.level(),
    })
  }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
