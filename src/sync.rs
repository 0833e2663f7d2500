use core::{borrow::Borrow, fmt, str::FromStr};
use std::{
  io::{BufRead, Write},
  path::Path,
  sync::Arc,
  vec::Vec,
};

use parking_lot::{RwLock, RwLockReadGuard};
use rand::{rngs::SmallRng, RngCore};

use super::{unsync, EntryRef, Error, Insert, LoadStats, Options};


/// A cloneable handle to a skiplist shared between threads.
///
/// The whole structure is one resource behind one [`RwLock`]: operations which relink nodes
/// (insert, update, remove, clear, load) hold the write lock for their entire duration, and
/// lookups, enumeration and dumps hold the read lock, so a lookup never observes a half
/// spliced node.
///
/// ## Example
///
/// ```
/// use kvskl::sync::SkipMap;
///
/// let map = SkipMap::new();
/// let handles = (0..4u64)
///   .map(|t| {
///     let map = map.clone();
///     std::thread::spawn(move || {
///       for i in 0..100 {
///         map.insert(t * 100 + i, i).unwrap();
///       }
///     })
///   })
///   .collect::<Vec<_>>();
/// handles.into_iter().for_each(|h| h.join().unwrap());
///
/// assert_eq!(map.len(), 400);
/// assert!(map.contains_key(&399));
/// ```
pub struct SkipMap<K, V, R = SmallRng> {
  inner: Arc<RwLock<unsync::SkipMap<K, V, R>>>,
}

impl<K, V, R> Clone for SkipMap<K, V, R> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<K: fmt::Debug, V: fmt::Debug, R: fmt::Debug> fmt::Debug for SkipMap<K, V, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SkipMap")
      .field("inner", &*self.inner.read())
      .finish()
  }
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
    Self::from_unsync(unsync::SkipMap::new())
  }

  /// Creates an empty skiplist with the given [`Options`], seeded from the OS.
  #[inline]
  pub fn with_options(opts: Options) -> Result<Self, Error> {
    unsync::SkipMap::with_options(opts).map(Self::from_unsync)
  }
}

impl<K, V, R> SkipMap<K, V, R> {
  /// Creates an empty skiplist with the default [`Options`] which draws node levels from `rng`.
  #[inline]
  pub fn with_rng(rng: R) -> Self {
    Self::from_unsync(unsync::SkipMap::with_rng(rng))
  }

  /// Creates an empty skiplist with the given [`Options`] which draws node levels from `rng`.
  #[inline]
  pub fn with_options_and_rng(opts: Options, rng: R) -> Result<Self, Error> {
    unsync::SkipMap::with_options_and_rng(opts, rng).map(Self::from_unsync)
  }

  /// Wraps a single-threaded skiplist.
  #[inline]
  pub fn from_unsync(map: unsync::SkipMap<K, V, R>) -> Self {
    Self {
      inner: Arc::new(RwLock::new(map)),
    }
  }

  /// Acquires the read lock, writers are blocked until the guard is dropped.
  #[inline]
  pub fn read(&self) -> RwLockReadGuard<'_, unsync::SkipMap<K, V, R>> {
    self.inner.read()
  }

  /// Returns the number of entries in the skiplist.
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.read().len()
  }

  /// Returns `true` if the skiplist holds no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.inner.read().is_empty()
  }

  /// Returns the highest populated level, `None` when the skiplist is empty.
  #[inline]
  pub fn current_level(&self) -> Option<usize> {
    self.inner.read().current_level()
  }

  /// Returns the maximum level a node can be promoted to.
  #[inline]
  pub fn max_level(&self) -> usize {
    self.inner.read().max_level()
  }

  /// Removes all entries.
  #[inline]
  pub fn clear(&self) {
    self.inner.write().clear();
  }

  /// Calls `f` on every entry in ascending key order while holding the read lock.
  pub fn for_each<F>(&self, mut f: F)
  where
    F: FnMut(EntryRef<'_, K, V>),
  {
    let map = self.inner.read();
    map.iter().for_each(&mut f);
  }

  /// Clones every entry out in ascending key order.
  pub fn entries(&self) -> Vec<(K, V)>
  where
    K: Clone,
    V: Clone,
  {
    let map = self.inner.read();
    map
      .iter()
      .map(|ent| (ent.key().clone(), ent.value().clone()))
      .collect()
  }

  /// Writes the level-by-level rendering to standard output.
  #[inline]
  pub fn display(&self)
  where
    K: fmt::Display,
    V: fmt::Display,
  {
    self.inner.read().display();
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
    self.inner.read().contains_key(key)
  }

  /// Returns a clone of the value stored for the key.
  #[inline]
  pub fn get<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
    V: Clone,
  {
    self.inner.read().get(key).cloned()
  }

  /// Replaces the value of an existing key and returns the previous one.
  #[inline]
  pub fn update<Q>(&self, key: &Q, value: V) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.inner.write().update(key, value)
  }

  /// Removes the key from the skiplist and returns its value.
  #[inline]
  pub fn remove<Q>(&self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
  {
    self.inner.write().remove(key)
  }
}

impl<K: Ord, V, R: RngCore> SkipMap<K, V, R> {
  /// Inserts a new entry, see [`unsync::SkipMap::insert`].
  #[inline]
  pub fn insert(&self, key: K, value: V) -> Result<Insert, Error> {
    self.inner.write().insert(key, value)
  }
}

impl<K: fmt::Display, V: fmt::Display, R> SkipMap<K, V, R> {
  /// Dumps every entry under the read lock, see [`unsync::SkipMap::dump`].
  #[inline]
  pub fn dump<W: Write>(&self, writer: W) -> Result<usize, Error> {
    self.inner.read().dump(writer)
  }

  /// Dumps every entry into the file at `path` under the read lock, see
  /// [`unsync::SkipMap::dump_file`].
  #[inline]
  pub fn dump_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, Error> {
    self.inner.read().dump_file(path)
  }
}

impl<K, V, R> SkipMap<K, V, R>
where
  K: Ord + FromStr,
  V: FromStr,
  R: RngCore,
{
  /// Loads records under the write lock, see [`unsync::SkipMap::load`].
  #[inline]
  pub fn load<B: BufRead>(&self, reader: B) -> Result<LoadStats, Error> {
    self.inner.write().load(reader)
  }

  /// Loads records from the file at `path` under the write lock, see
  /// [`unsync::SkipMap::load_file`].
  #[inline]
  pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadStats, Error> {
    self.inner.write().load_file(path)
  }
}

impl<K: fmt::Display, V: fmt::Display, R> fmt::Display for SkipMap<K, V, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&*self.inner.read(), f)
  }
}
