use integration::{key, new_value};
use kvskl::{unsync::SkipMap, DEFAULT_FILE};
use std::time::Instant;

fn main() {
  const N: usize = 1000;

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(DEFAULT_FILE);

  let mut l = SkipMap::new();
  for i in 0..N {
    l.insert(key(i), new_value(i)).unwrap();
  }

  let start = Instant::now();
  let written = l.dump_file(&path).unwrap();
  let elapsed = start.elapsed();
  assert_eq!(written, N);
  println!(
    "Serialization to disk took {} milliseconds.",
    elapsed.as_millis()
  );

  let mut restored = SkipMap::<u64, u64>::new();
  let start = Instant::now();
  let stats = restored.load_file(&path).unwrap();
  println!(
    "Loading {} records from disk took {} milliseconds.",
    stats.inserted,
    start.elapsed().as_millis()
  );

  assert_eq!(stats.inserted, N);
  assert!(l
    .iter()
    .zip(restored.iter())
    .all(|(a, b)| a.key() == b.key() && a.value() == b.value()));
}
