use kvskl::{unsync::SkipMap, Error, Insert, LoadStats, DEFAULT_FILE};

fn entries(map: &SkipMap<i32, i32>) -> Vec<(i32, i32)> {
  map.iter().map(|ent| (*ent.key(), *ent.value())).collect()
}

#[test]
fn round_trip_thousand_entries() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(DEFAULT_FILE);

  let mut map = SkipMap::new();
  for i in 0..1000 {
    assert_eq!(map.insert(i, i).unwrap(), Insert::Inserted);
  }
  assert_eq!(map.dump_file(&path).unwrap(), 1000);

  let mut restored = SkipMap::new();
  let stats = restored.load_file(&path).unwrap();
  assert_eq!(
    stats,
    LoadStats {
      inserted: 1000,
      duplicates: 0,
      malformed: 0,
    }
  );
  assert_eq!(restored.len(), 1000);
  assert_eq!(entries(&restored), entries(&map));
  assert_eq!(
    entries(&restored),
    (0..1000).map(|i| (i, i)).collect::<Vec<_>>()
  );
}

#[test]
fn dump_format_is_one_record_per_line() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(DEFAULT_FILE);

  let mut map = SkipMap::new();
  for k in [5, 3, 8, 1] {
    map.insert(k, -k).unwrap();
  }
  map.dump_file(&path).unwrap();

  let content = std::fs::read_to_string(&path).unwrap();
  assert_eq!(content, "1:-1\n3:-3\n5:-5\n8:-8\n");
}

#[test]
fn load_into_populated_map_merges() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(DEFAULT_FILE);
  std::fs::write(&path, "1:100\n2:200\ngarbage\n3:\n").unwrap();

  let mut map = SkipMap::new();
  map.insert(2, 2).unwrap();

  let stats = map.load_file(&path).unwrap();
  assert_eq!(stats.inserted, 1);
  assert_eq!(stats.duplicates, 1);
  assert_eq!(stats.malformed, 2);
  assert_eq!(entries(&map), vec![(1, 100), (2, 2)]);
}

#[test]
fn unreadable_paths_report_io_errors() {
  let dir = tempfile::tempdir().unwrap();

  let mut map = SkipMap::new();
  map.insert(1, 1).unwrap();

  let err = map.load_file(dir.path().join("missing.txt")).unwrap_err();
  assert!(matches!(err, Error::Io(_)));
  // A directory cannot be opened for writing.
  let err = map.dump_file(dir.path()).unwrap_err();
  assert!(matches!(err, Error::Io(_)));
  assert_eq!(entries(&map), vec![(1, 1)]);
}
