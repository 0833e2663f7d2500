use super::{Error, LEVEL_LIMIT, MAX_LEVEL};

/// Options for [`SkipMap`](crate::unsync::SkipMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
  max_level: usize,
  capacity: usize,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_level: MAX_LEVEL,
      capacity: 0,
    }
  }

  /// Sets the maximum level a node can be promoted to.
  ///
  /// Default is `14`. The maximum is [`LEVEL_LIMIT`]. A maximum level of `0` degrades the
  /// skiplist to a sorted linked list.
  ///
  /// ## Example
  ///
  /// ```
  /// use kvskl::Options;
  ///
  /// let opts = Options::new().with_max_level(10);
  /// assert_eq!(opts.max_level(), 10);
  /// ```
  #[inline]
  pub const fn with_max_level(mut self, max_level: usize) -> Self {
    self.max_level = max_level;
    self
  }

  /// Sets how many nodes the arena reserves room for up front.
  ///
  /// Default is `0`, the arena grows on demand.
  ///
  /// ## Example
  ///
  /// ```
  /// use kvskl::Options;
  ///
  /// let opts = Options::new().with_capacity(1024);
  /// assert_eq!(opts.capacity(), 1024);
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Returns the maximum level.
  #[inline]
  pub const fn max_level(&self) -> usize {
    self.max_level
  }

  /// Returns the reserved node capacity.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  pub(crate) fn validate(&self) -> Result<(), Error> {
    if self.max_level > LEVEL_LIMIT {
      return Err(Error::LevelOverflow {
        level: self.max_level,
        max_level: LEVEL_LIMIT,
      });
    }

    Ok(())
  }
}
