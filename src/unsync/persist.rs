use core::{fmt::Display, str::FromStr};
use std::{
  fs::File,
  io::{BufRead, BufReader, BufWriter, Write},
  path::Path,
  vec::Vec,
};

use rand::RngCore;

use super::SkipMap;
use crate::{codec, Error, Insert, Malformed};

/// What a [`load`](SkipMap::load) did with the records it read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadStats {
  /// Records inserted as new entries.
  pub inserted: usize,
  /// Records whose key was already present, the stored value was kept.
  pub duplicates: usize,
  /// Records skipped because they could not be parsed.
  pub malformed: usize,
}

impl LoadStats {
  #[inline]
  fn skip(&mut self, err: Error) {
    self.malformed += 1;

    #[cfg(feature = "tracing")]
    tracing::warn!(%err, "skip malformed record");
    #[cfg(not(feature = "tracing"))]
    drop(err);
  }
}

impl<K: Display, V: Display, R> SkipMap<K, V, R> {
  /// Writes every entry in ascending key order as `<key>:<value>` lines and returns how many
  /// records were written.
  pub fn dump<W: Write>(&self, mut writer: W) -> Result<usize, Error> {
    let mut written = 0;
    for ent in self.iter() {
      codec::write_record(&mut writer, ent.key(), ent.value())?;
      written += 1;
    }
    writer.flush()?;
    Ok(written)
  }

  /// Truncates the file at `path` and [`dump`](SkipMap::dump)s into it.
  ///
  /// The file is rewritten in place, a failure midway leaves a partial file behind.
  ///
  /// ## Errors
  /// - [`Error::Io`] if the file cannot be created or written.
  pub fn dump_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, Error> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let written = self.dump(BufWriter::new(file))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), records = written, "dump skipmap");

    Ok(written)
  }
}

impl<K, V, R> SkipMap<K, V, R>
where
  K: Ord + FromStr,
  V: FromStr,
  R: RngCore,
{
  /// Reads `<key>:<value>` lines and inserts every record.
  ///
  /// Blank lines are ignored. Lines which are not valid UTF-8 or do not parse are skipped and
  /// counted in [`LoadStats::malformed`], loading continues with the next line. Keys which are
  /// already present keep their value and are counted in [`LoadStats::duplicates`].
  ///
  /// ## Errors
  /// - [`Error::Io`] if reading fails, records inserted before the failure stay in the skiplist.
  /// - [`Error::LevelOverflow`] if an insert draws a level above the maximum.
  /// - [`Error::Full`] if the arena cannot address another node.
  pub fn load<B: BufRead>(&mut self, mut reader: B) -> Result<LoadStats, Error> {
    let mut stats = LoadStats::default();
    let mut buf = Vec::new();
    let mut line = 0;
    loop {
      buf.clear();
      if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(stats);
      }
      line += 1;

      let record = match core::str::from_utf8(&buf) {
        Ok(record) => record,
        Err(_) => {
          stats.skip(Error::Malformed {
            line,
            reason: Malformed::InvalidUtf8,
          });
          continue;
        }
      };
      if record.trim_end_matches(['\n', '\r']).is_empty() {
        continue;
      }

      match codec::parse_record::<K, V>(line, record) {
        Ok((key, value)) => match self.insert(key, value)? {
          Insert::Inserted => stats.inserted += 1,
          Insert::AlreadyPresent => stats.duplicates += 1,
        },
        Err(err) => stats.skip(err),
      }
    }
  }

  /// Opens the file at `path` and [`load`](SkipMap::load)s from it.
  ///
  /// ## Errors
  /// - [`Error::Io`] if the file cannot be opened, the skiplist is left unchanged.
  pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadStats, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let stats = self.load(BufReader::new(file))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      path = %path.display(),
      inserted = stats.inserted,
      duplicates = stats.duplicates,
      malformed = stats.malformed,
      "load skipmap"
    );

    Ok(stats)
  }
}
