//! Shard: one mutex guarding one ordered map.

use crate::reentrancy::{self, HeldShard};
use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeMap;

/// An independently lockable slice of a `ShardedMap`.
///
/// Invariant: every key stored here partitions to this shard's index.
pub(crate) struct Shard<K, V> {
    entries: Mutex<BTreeMap<K, V>>,
}

/// A locked shard. Field order matters: the mutex guard is released before
/// the reentrancy marker is forgotten.
pub(crate) struct ShardGuard<'a, K, V> {
    pub(crate) entries: MutexGuard<'a, BTreeMap<K, V>>,
    pub(crate) held: HeldShard,
}

impl<K, V> Shard<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Block until this shard is exclusively held by the caller.
    pub(crate) fn lock(&self) -> ShardGuard<'_, K, V> {
        // Record before blocking so a same-thread relock panics instead of hanging.
        let held = reentrancy::enter(self as *const Self as usize);
        ShardGuard {
            entries: self.entries.lock(),
            held,
        }
    }
}

impl<K: Ord, V> Shard<K, V> {
    /// Number of entries, taken under the shard lock.
    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }
}
