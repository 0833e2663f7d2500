use integration::{key, new_value, scattered};
use kvskl::sync::SkipMap;
use std::sync::Arc;

fn main() {
  const N: usize = 1000;
  let l = SkipMap::<u64, u64>::new();
  let wg = Arc::new(());
  for i in 0..N {
    let w = wg.clone();
    let l = l.clone();
    std::thread::spawn(move || {
      let i = scattered(i, N);
      l.insert(key(i), new_value(i)).unwrap();
      drop(w);
    });
  }
  while Arc::strong_count(&wg) > 1 {}
  assert_eq!(N, l.len());

  for i in 0..N {
    let w = wg.clone();
    let l = l.clone();
    std::thread::spawn(move || {
      assert_eq!(l.get(&key(i)).unwrap(), new_value(i), "broken: {i}");
      if i % 2 == 0 {
        assert_eq!(l.remove(&key(i)), Some(new_value(i)));
      }
      drop(w);
    });
  }
  while Arc::strong_count(&wg) > 1 {}
  assert_eq!(N / 2, l.len());

  let mut prev = None;
  l.for_each(|ent| {
    assert!(prev < Some(*ent.key()), "out of order at {}", ent.key());
    assert_eq!(ent.key() % 2, 1);
    prev = Some(*ent.key());
  });
}
