//! Process-wide random source.
//!
//! Helpers that draw random numbers without being handed a generator share
//! one `StdRng`, seeded from entropy on first use. [`reseed`] resets it so
//! draws made from a single thread become reproducible.

use std::sync::{LazyLock, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

static SHARED: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_entropy()));

fn lock() -> MutexGuard<'static, StdRng> {
    // A panic while holding the lock cannot leave a StdRng half-updated in a
    // way that matters here.
    SHARED.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reset the shared generator to a fixed seed
pub fn reseed(seed: u64) {
    log::debug!("reseeding shared random source with {}", seed);
    *lock() = StdRng::seed_from_u64(seed);
}

/// Run `f` with exclusive access to the shared generator
pub fn with_shared<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
    f(&mut lock())
}

/// A non-negative 63-bit random integer from the shared generator
pub fn rand_i63() -> i64 {
    with_shared(|rng| rng.gen_range(0..=i64::MAX))
}

/// Handle to the shared generator, usable wherever an `Rng` is expected.
///
/// Each call locks the shared state for a single draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedRng;

impl RngCore for SharedRng {
    fn next_u32(&mut self) -> u32 {
        with_shared(|rng| rng.next_u32())
    }

    fn next_u64(&mut self) -> u64 {
        with_shared(|rng| rng.next_u64())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        with_shared(|rng| rng.fill_bytes(dest))
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        with_shared(|rng| rng.try_fill_bytes(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_i63_is_non_negative() {
        for _ in 0..1000 {
            assert!(rand_i63() >= 0);
        }
    }

    #[test]
    fn test_shared_rng_draws_in_range() {
        let mut rng = SharedRng;
        for _ in 0..1000 {
            let n = rng.gen_range(0..256i64);
            assert!((0..256).contains(&n));
        }
    }
}
