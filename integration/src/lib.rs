/// Only used for testing
pub fn key(i: usize) -> u64 {
  i as u64
}

/// Only used for testing
pub fn new_value(i: usize) -> u64 {
  (i as u64) * 10
}

/// Only used for testing
pub fn scattered(i: usize, n: usize) -> usize {
  // 7919 is prime and larger than every `n` the binaries use.
  (i * 7919) % n
}
