/// Error type for the kvskl crate.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
  /// Indicates that the arena is full and cannot hold any more nodes.
  #[error("allocation failed because arena is full")]
  Full,

  /// Indicates that an entry with the specified key already exists in the skiplist.
  ///
  /// [`insert`](crate::unsync::SkipMap::insert) reports duplicates through
  /// [`Insert::AlreadyPresent`](crate::Insert::AlreadyPresent), this variant is produced by
  /// [`Insert::into_result`](crate::Insert::into_result).
  #[error("key already exists in the skiplist")]
  Duplicated,

  /// Indicates that a level is above the permitted maximum.
  #[error("level {level} exceeds the maximum level {max_level}")]
  LevelOverflow {
    /// The offending level.
    level: usize,
    /// The maximum level permitted.
    max_level: usize,
  },

  /// Indicates that a dump or load could not access its file.
  #[cfg(feature = "std")]
  #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Indicates that a persisted record could not be parsed.
  #[error("malformed record at line {line}: {reason}")]
  Malformed {
    /// The 1-based line number of the record.
    line: usize,
    /// What is wrong with the record.
    reason: Malformed,
  },
}

/// The reason a persisted record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Malformed {
  /// The line has no `:` separator.
  MissingSeparator,
  /// Nothing follows the separator.
  EmptyValue,
  /// The key does not parse.
  InvalidKey,
  /// The value does not parse.
  InvalidValue,
  /// The line is not valid UTF-8.
  InvalidUtf8,
}

impl core::fmt::Display for Malformed {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::MissingSeparator => write!(f, "missing `:` separator"),
      Self::EmptyValue => write!(f, "empty value"),
      Self::InvalidKey => write!(f, "invalid key"),
      Self::InvalidValue => write!(f, "invalid value"),
      Self::InvalidUtf8 => write!(f, "invalid UTF-8"),
    }
  }
}
