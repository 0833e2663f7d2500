use criterion::*;
use kvskl::{sync::SkipMap, unsync};
use rand::prelude::*;
use std::{
  sync::{atomic::*, *},
  thread,
};

fn skiplist_round(l: &SkipMap<u64, u64>, case: &(u64, bool), exp: u64) {
  if case.1 {
    if let Some(v) = l.get(&case.0) {
      assert_eq!(v, exp);
    }
  } else {
    l.insert(case.0, exp).unwrap();
  }
}

fn bench_read_write_skiplist_frac(b: &mut Bencher<'_>, frac: &usize) {
  let frac = *frac;
  let value = 123u64;
  let list = SkipMap::new();
  let l = list.clone();
  let stop = Arc::new(AtomicBool::new(false));
  let s = stop.clone();
  let j = thread::spawn(move || {
    let mut rng = rand::rng();
    while !s.load(Ordering::SeqCst) {
      let case = (rng.random::<u64>(), frac > rng.random_range(0..11));
      skiplist_round(&l, &case, value);
    }
  });
  let mut rng = rand::rng();
  b.iter_batched_ref(
    || (rng.random::<u64>(), frac > rng.random_range(0..11)),
    |case| skiplist_round(&list, case, value),
    BatchSize::SmallInput,
  );
  stop.store(true, Ordering::SeqCst);
  j.join().unwrap();
}

fn bench_read_write_skiplist(c: &mut Criterion) {
  let mut group = c.benchmark_group("skiplist_read_write");
  for i in 0..=10 {
    group.bench_with_input(
      BenchmarkId::from_parameter(i),
      &i,
      bench_read_write_skiplist_frac,
    );
  }
  group.finish();
}

fn bench_write_unsync_skiplist(c: &mut Criterion) {
  let mut list = unsync::SkipMap::new();
  let mut rng = rand::rng();
  c.bench_function("unsync_skiplist_write", |b| {
    b.iter_batched(
      || rng.random::<u64>(),
      |key| {
        let _ = list.insert(key, key).unwrap();
      },
      BatchSize::SmallInput,
    )
  });
}

fn bench_dump_skiplist(c: &mut Criterion) {
  let mut list = unsync::SkipMap::new();
  for i in 0..1000u64 {
    list.insert(i, i).unwrap();
  }
  let mut buf = Vec::with_capacity(16 << 10);
  c.bench_function("skiplist_dump_1000", |b| {
    b.iter(|| {
      buf.clear();
      list.dump(&mut buf).unwrap();
    })
  });
}

criterion_group!(
  benches,
  bench_read_write_skiplist,
  bench_write_unsync_skiplist,
  bench_dump_skiplist,
);
criterion_main!(benches);
