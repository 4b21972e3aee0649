//! sharded-map: a concurrent ordered map whose keyspace is split across a
//! fixed number of independently locked shards.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let many threads mutate and look up integer-keyed entries without
//!   a single global lock, while still offering map-wide reads with a
//!   well-defined (if relaxed) consistency.
//! - Layers:
//!   - `partition`: pure key -> shard index function (`key mod shard_count`
//!     over an unsigned view of the key).
//!   - `Shard<K, V>`: a `parking_lot::Mutex` around a `BTreeMap`; the unit
//!     of concurrency control.
//!   - `Access<'a, K, V>`: RAII handle holding one shard's lock narrowed to
//!     one value slot, created insert-or-get style.
//!   - `ShardedMap<K, V>`: public API (`access`, `get`, `contains`,
//!     `to_map`) over a boxed slice of shards.
//!
//! Constraints
//! - Shard count is fixed at construction; no resizing.
//! - Keys are primitive integers, enforced by the sealed `ShardKey` trait.
//! - No operation holds two shard locks at once, so there is no lock
//!   ordering to get wrong.
//! - Granularity is per shard, not per key: an `Access` blocks every other
//!   key that shares its shard until it is dropped.
//!
//! Consistency
//! - Single-key operations are linearizable: they run entirely under the
//!   key's shard lock.
//! - `to_map`, `len` and `is_empty` visit shards in index order, one lock at
//!   a time. Each shard is read consistently, but the combined result is not
//!   a point-in-time snapshot of the whole map.
//!
//! Negative keys
//! - Signed keys are sign-extended to 64 bits and reinterpreted as `u64`
//!   before the modulo (128-bit keys go through `u128`), so `-1` lands where
//!   `u64::MAX` would.
//!
//! Reentrancy policy
//! - Shard mutexes are not reentrant. Debug builds record held shards per
//!   thread and panic when a thread tries to lock a shard it already holds
//!   (for example by calling `get` on a same-shard key while an `Access` is
//!   alive), instead of deadlocking.
//!
//! Configuration
//! - The default shard count comes from an injected `ParallelismHint`
//!   (`AvailableParallelism` for `ShardedMap::new`), never from global
//!   state.
//!
//! ```
//! use sharded_map::ShardedMap;
//! use std::thread;
//!
//! let map: ShardedMap<i32, u32> = ShardedMap::with_shards(16).unwrap();
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for k in -10..10 {
//!                 *map.access(k) += 1;
//!             }
//!         });
//!     }
//! });
//! assert!(map.to_map().values().all(|&v| v == 4));
//! ```

mod access;
mod error;
pub mod hint;
pub mod partition;
mod reentrancy;
mod shard;
mod sharded_map;
mod sharded_map_proptest;

// Public surface
pub use access::Access;
pub use error::{Error, Result};
pub use hint::{AvailableParallelism, FixedHint, ParallelismHint, DEFAULT_SHARD_COUNT};
pub use partition::{partition, ShardKey};
pub use sharded_map::ShardedMap;
