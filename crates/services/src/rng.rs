use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, PoisonError};

use drill_core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Adapts any `rand` generator to the core `RandomSource` trait.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible generator for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.0.random_range(range)
    }
}

/// Cloneable handle to one random source shared across services.
#[derive(Clone)]
pub struct SharedRandom {
    inner: Arc<Mutex<Box<dyn RandomSource + Send>>>,
}

impl SharedRandom {
    #[must_use]
    pub fn new(source: impl RandomSource + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(source))),
        }
    }

    #[must_use]
    pub fn from_os() -> Self {
        Self::new(RngSource::from_os())
    }

    /// Run `f` with exclusive access to the source.
    pub fn with<T>(&self, f: impl FnOnce(&mut dyn RandomSource) -> T) -> T {
        // Sources keep no invariants between draws; a poisoned lock is still usable.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::ScriptedSource;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        let left: Vec<u32> = (0..16).map(|_| a.next_in(1..=999)).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_in(1..=999)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|v| (1..=999).contains(v)));
    }

    #[test]
    fn shared_source_is_consumed_in_order() {
        let shared = SharedRandom::new(ScriptedSource::new([4, 5, 6]));
        let clone = shared.clone();
        assert_eq!(shared.with(|rng| rng.next_in(1..=9)), 4);
        assert_eq!(clone.with(|rng| rng.next_in(1..=9)), 5);
    }
}
