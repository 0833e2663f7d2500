//! The plain-text record format used by [`dump`](crate::unsync::SkipMap::dump) and
//! [`load`](crate::unsync::SkipMap::load).
//!
//! Every entry is one line, `<key>:<value>\n`, with the key and value rendered through
//! [`Display`] and parsed back through [`FromStr`]. There is no header, checksum or version.
//! Keys whose rendering contains the separator cannot be read back.

use core::{fmt::Display, str::FromStr};
use std::io::{self, Write};

use crate::{Error, Malformed};

/// Separates the key from the value in a record.
pub const SEPARATOR: char = ':';

/// Writes one record, terminated by `\n`.
#[inline]
pub fn write_record<W, K, V>(writer: &mut W, key: &K, value: &V) -> io::Result<()>
where
  W: Write + ?Sized,
  K: Display + ?Sized,
  V: Display + ?Sized,
{
  writeln!(writer, "{key}{SEPARATOR}{value}")
}

/// Parses one record.
///
/// The line is split at the first separator and a trailing `\n` or `\r\n` is trimmed from
/// the value. `line` is the 1-based line number reported in [`Error::Malformed`].
///
/// ## Example
///
/// ```
/// use kvskl::{codec::parse_record, Error, Malformed};
///
/// let (k, v): (u64, i64) = parse_record(1, "42:-7\n").unwrap();
/// assert_eq!((k, v), (42, -7));
///
/// let err = parse_record::<u64, u64>(2, "42:").unwrap_err();
/// assert!(matches!(err, Error::Malformed { line: 2, reason: Malformed::EmptyValue }));
/// ```
pub fn parse_record<K, V>(line: usize, record: &str) -> Result<(K, V), Error>
where
  K: FromStr,
  V: FromStr,
{
  let malformed = |reason: Malformed| Error::Malformed { line, reason };

  let record = record.strip_suffix('\n').unwrap_or(record);
  let record = record.strip_suffix('\r').unwrap_or(record);
  let (key, value) = record
    .split_once(SEPARATOR)
    .ok_or_else(|| malformed(Malformed::MissingSeparator))?;

  if value.is_empty() {
    return Err(malformed(Malformed::EmptyValue));
  }

  let key = key
    .parse::<K>()
    .map_err(|_| malformed(Malformed::InvalidKey))?;
  let value = value
    .parse::<V>()
    .map_err(|_| malformed(Malformed::InvalidValue))?;
  Ok((key, value))
}
