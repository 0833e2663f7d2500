#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use rand::RngCore;

mod arena;
mod node;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod codec;

mod error;
pub use error::{Error, Malformed};

mod options;
pub use options::Options;

/// A skiplist map which requires `&mut self` for every mutation.
pub mod unsync;

/// A skiplist map guarded by a single reader/writer lock, which can be shared between threads.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod sync;

pub use rand;
pub use unsync::{EntryRef, Iter};

#[cfg(feature = "std")]
pub use unsync::LoadStats;

/// The default maximum level of a skiplist.
///
/// `2^14` comfortably exceeds the element counts the map is tuned for.
pub const MAX_LEVEL: usize = 14;

/// The highest value [`Options::with_max_level`] accepts.
pub const LEVEL_LIMIT: usize = 31;

/// The file name used by the dump and load demo.
pub const DEFAULT_FILE: &str = "kv.txt";

/// The outcome of a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Insert {
  /// A new node was linked into the skiplist.
  Inserted,
  /// The key was already present, nothing changed and the stored value was kept.
  AlreadyPresent,
}

impl Insert {
  /// Returns `true` if a new node was linked.
  #[inline]
  pub const fn is_inserted(&self) -> bool {
    matches!(self, Self::Inserted)
  }

  /// Turns [`Insert::AlreadyPresent`] into [`Error::Duplicated`].
  #[inline]
  pub fn into_result(self) -> Result<(), Error> {
    match self {
      Self::Inserted => Ok(()),
      Self::AlreadyPresent => Err(Error::Duplicated),
    }
  }
}

/// Draws a level for a new node.
///
/// Starting from 0, a fair coin is flipped while the candidate is below `max_level`;
/// heads raises the candidate by one, tails stops. The probability of reaching level `L`
/// is `(1/2)^L`, independent of how many entries the skiplist holds.
fn random_level<R: RngCore + ?Sized>(rng: &mut R, max_level: usize) -> usize {
  let mut level = 0;
  while level < max_level && rng.next_u32() & 1 == 1 {
    level += 1;
  }
  level
}
