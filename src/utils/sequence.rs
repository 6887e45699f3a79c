//! Counters for numbering things inside a single template run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Monotonic counter; the first call returns 1
#[derive(Debug, Default)]
pub struct Sequencer {
    last: AtomicI64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// One independent [`Sequencer`]-like counter per key
#[derive(Debug, Default)]
pub struct KeySequencer {
    counters: Mutex<HashMap<String, i64>>,
}

impl KeySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, key: &str) -> i64 {
        let mut counters = self.counters.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let counter = counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }
}
