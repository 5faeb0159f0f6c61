//! Per-key mutual exclusion.
//!
//! Writes to the same item run one at a time so a read-compute-write cycle
//! never loses a concurrent update. Different items do not contend.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// A table of lazily created per-key locks.
///
/// An entry lives only while some caller holds or waits on it.
pub struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Copy + Eq + Hash> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// The table entry is released even if `f` panics.
    pub fn with_lock<R>(&self, key: K, f: impl FnOnce() -> R) -> R {
        let entry = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Release {
                locks: self,
                key,
                slot: table.entry(key).or_default().clone(),
            }
        };
        let _held = entry.slot.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of keys currently locked or awaited.
    pub fn active(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Drops the table entry for `key` once its last user leaves.
struct Release<'a, K: Copy + Eq + Hash> {
    locks: &'a KeyedLocks<K>,
    key: K,
    slot: Arc<Mutex<()>>,
}

impl<K: Copy + Eq + Hash> Drop for Release<'_, K> {
    fn drop(&mut self) {
        let mut table = self
            .locks
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // One reference in the table plus ours: nobody else is waiting.
        if Arc::strong_count(&self.slot) == 2 {
            table.remove(&self.key);
        }
    }
}

impl<K: Copy + Eq + Hash> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn entries_released_after_use() {
        let locks = KeyedLocks::new();
        let out = locks.with_lock(7u64, || {
            assert_eq!(locks.active(), 1);
            42
        });
        assert_eq!(out, 42);
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn entry_released_when_closure_panics() {
        let locks = KeyedLocks::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            locks.with_lock(3u64, || panic!("boom"));
        }));
        assert!(outcome.is_err());
        assert_eq!(locks.active(), 0);
        // The key is usable again afterwards.
        assert_eq!(locks.with_lock(3u64, || 5), 5);
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_seen = max_seen.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        locks.with_lock(1u64, || {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            max_seen.fetch_max(now, Ordering::SeqCst);
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }
}
