use core::{borrow::Borrow, fmt};

use rand::{rngs::SmallRng, RngCore, SeedableRng};
use std::{boxed::Box, vec};

use super::{
  arena::Arena,
  node::{Link, Node, NodePtr},
  random_level, Error, Insert, Options, LEVEL_LIMIT,
};

mod iterator;
pub use iterator::{EntryRef, Iter};

#[cfg(feature = "std")]
mod persist;
#[cfg(feature = "std")]
pub use persist::LoadStats;


/// A position a search can stand on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
  Head,
  Node(NodePtr),
}

/// `update[i]` is the last position at level `i` whose key is less than the searched key.
type Update = [Cursor; LEVEL_LIMIT + 1];

/// An ordered map backed by a randomly leveled skiplist.
///
/// Nodes are stored in an arena owned by the map and linked through stable indices. Every
/// node is present at level 0, a node drawn at level `L` is also linked at levels `1..=L`,
/// so lookups descend from the highest populated level towards level 0.
///
/// The level of a new node is drawn from the `R` randomness source, which can be supplied
/// with [`SkipMap::with_rng`] to make node levels reproducible.
///
/// ## Example
///
/// ```
/// use kvskl::{unsync::SkipMap, Insert};
///
/// let mut map = SkipMap::new();
/// assert_eq!(map.insert(5u64, 50u64).unwrap(), Insert::Inserted);
/// assert_eq!(map.insert(5, 55).unwrap(), Insert::AlreadyPresent);
/// assert_eq!(map.get(&5), Some(&50));
/// assert_eq!(map.remove(&5), Some(50));
/// assert!(map.is_empty());
/// ```
#[derive(Debug)]
pub struct SkipMap<K, V, R = SmallRng> {
  head: Box<[Link]>,
  arena: Arena<K, V>,
  current_level: Option<usize>,
  len: usize,
  max_level: usize,
  rng: R,
}

impl<K, V> Default for SkipMap<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> SkipMap<K, V> {
  /// Creates an empty skiplist with the default [`Options`], seeded from the OS.
  #[inline]
  pub fn new() -> Self {
    Self::with_rng(SmallRng::from_os_rng())
  }

  /// Creates an empty skiplist with the given [`Options`], seeded from the OS.
  ///
  /// ## Example
  ///
  /// ```
  /// use kvskl::{unsync::SkipMap, Options};
  ///
  /// let map = SkipMap::<u64, u64>::with_options(Options::new().with_max_level(4)).unwrap();
  /// assert_eq!(map.max_level(), 4);
  /// ```
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    Self::with_options_and_rng(opts, SmallRng::from_os_rng())
  }
}

impl<K, V, R> SkipMap<K, V, R> {
  /// Creates an empty skiplist with the default [`Options`] which draws node levels from `rng`.
  #[inline]
  pub fn with_rng(rng: R) -> Self {
    Self::construct(Options::new(), rng)
  }

  /// Creates an empty skiplist with the given [`Options`] which draws node levels from `rng`.
  pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self, Error> {
    opts.validate()?;
    Ok(Self::construct(opts, rng))
  }

  fn construct(opts: Options, rng: R) -> Self {
    #[cfg(feature = "tracing")]
    tracing::debug!(
      max_level = opts.max_level(),
      capacity = opts.capacity(),
      "allocate skipmap"
    );

    Self {
      head: vec![None; opts.max_level() + 1].into_boxed_slice(),
      arena: Arena::with_capacity(opts.capacity()),
      current_level: None,
      len: 0,
      max_level: opts.max_level(),
      rng,
    }
  }

  /// Returns the number of entries in the skiplist.
  #[inline]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` if the skiplist holds no entries.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns the highest level populated by at least one node, `None` when the skiplist is empty.
  #[inline]
  pub const fn current_level(&self) -> Option<usize> {
    self.current_level
  }

  /// Returns the maximum level a node can be promoted to.
  #[inline]
  pub const fn max_level(&self) -> usize {
    self.max_level
  }

  /// Returns an iterator over all entries in ascending key order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, K, V> {
    Iter::new(&self.arena, self.head[0], 0)
  }

  /// Returns an iterator over the entries linked at `level`, in ascending key order.
  ///
  /// Levels above [`current_level`](SkipMap::current_level) yield nothing.
  #[inline]
  pub fn level_iter(&self, level: usize) -> Iter<'_, K, V> {
    Iter::new(&self.arena, self.head.get(level).copied().flatten(), level)
  }

  /// Removes all entries, releasing nodes one by one along level 0.
  pub fn clear(&mut self) {
    let mut next = self.head[0];
    while let Some(ptr) = next {
      next = self.arena.dealloc(ptr).next(0);
    }

    self.arena.reset();
    self.head.iter_mut().for_each(|link| *link = None);
    self.current_level = None;
    self.len = 0;
  }

  /// Writes the level-by-level rendering of [`Display`](fmt::Display) to standard output.
  #[cfg(feature = "std")]
  #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
  pub fn display(&self)
  where
    K: fmt::Display,
    V: fmt::Display,
  {
    std::print!("{self}");
  }

  #[inline]
  fn next(&self, cursor: Cursor, level: usize) -> Link {
    match cursor {
      Cursor::Head => self.head[level],
      Cursor::Node(ptr) => self.arena.get(ptr).next(level),
    }
  }

  #[inline]
  fn set_next(&mut self, cursor: Cursor, level: usize, link: Link) {
    match cursor {
      Cursor::Head => self.head[level] = link,
      Cursor::Node(ptr) => self.arena.get_mut(ptr).set_next(level, link),
    }
  }

  /// Lowers `current_level` past every level the head no longer links to anything.
  fn shrink_level(&mut self) {
    while let Some(level) = self.current_level {
      if self.head[level].is_some() {
        break;
      }
      self.current_level = level.checked_sub(1);
    }
  }
}

impl<K: Ord, V, R> SkipMap<K, V, R> {
  /// Returns `true` if the skiplist contains the key.
  #[inline]
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.find(key).is_some()
  }

  /// Returns the value stored for the key.
  #[inline]
  pub fn get<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.find(key).map(|ptr| self.arena.get(ptr).value())
  }

  /// Returns a mutable reference to the value stored for the key.
  #[inline]
  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let ptr = self.find(key)?;
    Some(self.arena.get_mut(ptr).value_mut())
  }

  /// Replaces the value of an existing key and returns the previous one.
  ///
  /// Returns `None` and leaves the skiplist untouched if the key is absent.
  pub fn update<Q>(&mut self, key: &Q, value: V) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let ptr = self.find(key)?;
    Some(self.arena.get_mut(ptr).set_value(value))
  }

  /// Removes the key from the skiplist and returns its value.
  ///
  /// Removing an absent key is a no-op which returns `None`.
  pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let update = self.predecessors(key);
    let target = self
      .next(update[0], 0)
      .filter(|ptr| self.arena.get(*ptr).key().borrow() == key)?;

    let level = self.arena.get(target).level();
    for (l, pred) in update.iter().enumerate().take(level + 1) {
      debug_assert_eq!(self.next(*pred, l), Some(target));
      let next = self.arena.get(target).next(l);
      self.set_next(*pred, l, next);
    }

    let node = self.arena.dealloc(target);
    self.len -= 1;
    self.shrink_level();

    #[cfg(feature = "tracing")]
    tracing::trace!(node_level = level, current_level = ?self.current_level, "release node");

    Some(node.into_value())
  }

  /// Collects the predecessors of `key` at every populated level, descending from the top.
  fn predecessors<Q>(&self, key: &Q) -> Update
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let mut update = [Cursor::Head; LEVEL_LIMIT + 1];
    let Some(top) = self.current_level else {
      return update;
    };

    let mut cursor = Cursor::Head;
    for level in (0..=top).rev() {
      while let Some(next) = self.next(cursor, level) {
        if self.arena.get(next).key().borrow() < key {
          cursor = Cursor::Node(next);
        } else {
          break;
        }
      }
      update[level] = cursor;
    }
    update
  }

  fn find<Q>(&self, key: &Q) -> Option<NodePtr>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    let pred = self.predecessors(key)[0];
    self
      .next(pred, 0)
      .filter(|ptr| self.arena.get(*ptr).key().borrow() == key)
  }

  /// Links a new node drawn at the level `level` returns, unless the key is already present.
  fn insert_in(
    &mut self,
    key: K,
    value: V,
    level: impl FnOnce(&mut Self) -> usize,
  ) -> Result<Insert, Error> {
    let mut update = self.predecessors(&key);
    if self
      .next(update[0], 0)
      .is_some_and(|ptr| *self.arena.get(ptr).key() == key)
    {
      return Ok(Insert::AlreadyPresent);
    }

    let level = level(self);
    if level > self.max_level {
      return Err(Error::LevelOverflow {
        level,
        max_level: self.max_level,
      });
    }

    let ptr = self.arena.alloc(Node::new(key, value, level))?;

    let first_unseen = self.current_level.map_or(0, |l| l + 1);
    if level >= first_unseen {
      for cursor in &mut update[first_unseen..=level] {
        *cursor = Cursor::Head;
      }

      #[cfg(feature = "tracing")]
      tracing::trace!(from = ?self.current_level, to = level, "raise current level");

      self.current_level = Some(level);
    }

    for (l, pred) in update.iter().enumerate().take(level + 1) {
      let next = self.next(*pred, l);
      self.arena.get_mut(ptr).set_next(l, next);
      self.set_next(*pred, l, Some(ptr));
    }

    self.len += 1;
    Ok(Insert::Inserted)
  }

  /// Inserts a node at a fixed level, bypassing the randomness source.
  #[cfg(test)]
  pub(crate) fn insert_at_level(&mut self, key: K, value: V, level: usize) -> Result<Insert, Error> {
    self.insert_in(key, value, |_| level)
  }
}

impl<K: Ord, V, R: RngCore> SkipMap<K, V, R> {
  /// Inserts a new entry.
  ///
  /// Returns [`Insert::AlreadyPresent`] without touching the stored value if the key exists,
  /// use [`update`](SkipMap::update) to replace a value.
  ///
  /// ## Errors
  /// - [`Error::LevelOverflow`] if the drawn level is above the maximum level, nothing is inserted.
  /// - [`Error::Full`] if the arena cannot address another node, nothing is inserted.
  pub fn insert(&mut self, key: K, value: V) -> Result<Insert, Error> {
    self.insert_in(key, value, |this| random_level(&mut this.rng, this.max_level))
  }
}

impl<K, V, R> Drop for SkipMap<K, V, R> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<'a, K, V, R> IntoIterator for &'a SkipMap<K, V, R> {
  type Item = EntryRef<'a, K, V>;
  type IntoIter = Iter<'a, K, V>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Renders one line per populated level, from the top level down to level 0.
///
/// ```text
/// Level 1: [3,30] [8,80]
/// Level 0: [1,10] [3,30] [5,50] [8,80]
/// ```
impl<K: fmt::Display, V: fmt::Display, R> fmt::Display for SkipMap<K, V, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(top) = self.current_level else {
      return Ok(());
    };

    for level in (0..=top).rev() {
      write!(f, "Level {level}: ")?;
      for ent in self.level_iter(level) {
        write!(f, "[{},{}] ", ent.key(), ent.value())?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
