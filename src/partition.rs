//! Key-to-shard partitioning.
//!
//! A key's shard is `key mod shard_count`, taken over an unsigned view of the
//! key. Integers up to 64 bits are sign-extended to 64 bits and reinterpreted
//! as `u64`, so `-1` behaves like `u64::MAX`; 128-bit integers are
//! reinterpreted as `u128`. The mapping depends only on the key and the shard
//! count, so a key never changes shard for the lifetime of a map.

use core::num::NonZeroUsize;

mod sealed {
    pub trait Sealed {}
}

/// Key types accepted by [`ShardedMap`](crate::ShardedMap).
///
/// Sealed: implemented for the primitive integer types only.
pub trait ShardKey: Ord + Copy + sealed::Sealed {
    /// Index of the shard owning `self` among `shard_count` shards.
    fn shard_index(&self, shard_count: NonZeroUsize) -> usize;
}

macro_rules! impl_shard_key_64 {
    ($($t:ty => $via:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl ShardKey for $t {
                #[inline]
                fn shard_index(&self, shard_count: NonZeroUsize) -> usize {
                    let bits = *self as $via as u64;
                    (bits % shard_count.get() as u64) as usize
                }
            }
        )*
    };
}

macro_rules! impl_shard_key_128 {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl ShardKey for $t {
                #[inline]
                fn shard_index(&self, shard_count: NonZeroUsize) -> usize {
                    let bits = *self as u128;
                    (bits % shard_count.get() as u128) as usize
                }
            }
        )*
    };
}

impl_shard_key_64! {
    u8 => u64, u16 => u64, u32 => u64, u64 => u64, usize => u64,
    i8 => i64, i16 => i64, i32 => i64, i64 => i64, isize => i64,
}
impl_shard_key_128!(u128, i128);

/// Shard index of `key` among `shard_count` shards. Always `< shard_count`.
#[inline]
pub fn partition<K: ShardKey>(key: &K, shard_count: NonZeroUsize) -> usize {
    key.shard_index(shard_count)
}
