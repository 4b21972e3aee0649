//! ShardedMap: public API over a fixed array of shards.

use crate::access::Access;
use crate::error::{Error, Result};
use crate::hint::{AvailableParallelism, ParallelismHint, DEFAULT_SHARD_COUNT};
use crate::partition::{partition, ShardKey};
use crate::shard::Shard;
use core::fmt;
use core::num::NonZeroUsize;
use std::collections::BTreeMap;

/// A concurrent ordered map split into independently locked shards.
///
/// Keys are integers (see [`ShardKey`]); each key lives in the shard chosen
/// by [`partition`]. Operations on keys in different shards never contend.
/// Operations on keys in the same shard are serialized by that shard's mutex,
/// so the shard count trades memory (one mutex and one map header per shard)
/// against contention. `1` gives a single global lock. Per-key locking is not
/// provided.
///
/// No operation holds more than one shard lock at a time.
pub struct ShardedMap<K, V> {
    pub(crate) shards: Box<[Shard<K, V>]>,
    shard_count: NonZeroUsize,
}

impl<K, V> ShardedMap<K, V>
where
    K: ShardKey,
{
    /// Create a map with one shard per available hardware thread.
    pub fn new() -> Self {
        let shard_count = NonZeroUsize::new(AvailableParallelism.recommended_shards())
            .or(NonZeroUsize::new(DEFAULT_SHARD_COUNT))
            .unwrap_or(NonZeroUsize::MIN);
        Self::from_count(shard_count)
    }

    /// Create a map with exactly `shard_count` shards.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when `shard_count` is zero.
    pub fn with_shards(shard_count: usize) -> Result<Self> {
        NonZeroUsize::new(shard_count)
            .map(Self::from_count)
            .ok_or(Error::InvalidConfiguration { shard_count })
    }

    /// Create a map sized by `hint`.
    pub fn with_hint<H>(hint: &H) -> Result<Self>
    where
        H: ParallelismHint + ?Sized,
    {
        Self::with_shards(hint.recommended_shards())
    }

    fn from_count(shard_count: NonZeroUsize) -> Self {
        let shards: Vec<Shard<K, V>> = (0..shard_count.get()).map(|_| Shard::new()).collect();
        Self {
            shards: shards.into_boxed_slice(),
            shard_count,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shard_count.get()
    }

    /// Index of the shard that holds (or would hold) `key`.
    #[inline]
    pub fn shard_of(&self, key: &K) -> usize {
        partition(key, self.shard_count)
    }

    #[inline]
    fn shard(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_of(key)]
    }

    /// Lock `key`'s shard and return a handle to its value, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// Never fails on a missing key. Because it may insert, this is not a
    /// read-only operation; use [`get`](Self::get) or
    /// [`contains`](Self::contains) to look without creating.
    ///
    /// ```
    /// use sharded_map::ShardedMap;
    ///
    /// let map: ShardedMap<i32, u64> = ShardedMap::with_shards(8).unwrap();
    /// *map.access(-3) += 1;
    /// *map.access(-3) += 1;
    /// assert_eq!(map.get(&-3), Ok(2));
    /// ```
    pub fn access(&self, key: K) -> Access<'_, K, V>
    where
        V: Default,
    {
        Access::acquire(self.shard(&key), key)
    }

    /// Clone of the value stored under `key`.
    ///
    /// Fails with [`Error::KeyNotFound`] when absent; never inserts.
    pub fn get(&self, key: &K) -> Result<V>
    where
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Apply `f` to the value stored under `key` while its shard is locked.
    ///
    /// Fails with [`Error::KeyNotFound`] when absent; never inserts.
    pub fn get_with<F, R>(&self, key: &K, f: F) -> Result<R>
    where
        F: FnOnce(&V) -> R,
    {
        let guard = self.shard(key).lock();
        guard.entries.get(key).map(f).ok_or(Error::KeyNotFound)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().entries.contains_key(key)
    }

    /// Merge every shard into one ordered map.
    ///
    /// Shards are visited in index order and locked one at a time: each
    /// shard's lock is released before the next is taken. Every shard's
    /// contribution is exact as of the moment it was locked, but the result
    /// as a whole is not an atomic snapshot. A concurrent write to a shard
    /// not yet visited shows up in the result; a write to a shard already
    /// visited does not.
    pub fn to_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in self.shards.iter() {
            let guard = shard.lock();
            result.extend(guard.entries.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }

    /// Total number of entries, summed shard by shard with the same
    /// consistency as [`to_map`](Self::to_map).
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.len() == 0)
    }
}

impl<K, V> Default for ShardedMap<K, V>
where
    K: ShardKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ShardedMap<K, V>
where
    K: ShardKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<usize> = self.shards.iter().map(Shard::len).collect();
        f.debug_struct("ShardedMap")
            .field("shard_count", &self.shard_count)
            .field("shard_sizes", &sizes)
            .finish()
    }
}
