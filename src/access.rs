//! Access: scoped insert-or-get handle onto one value slot.

use crate::reentrancy::HeldShard;
use crate::shard::{Shard, ShardGuard};
use core::fmt;
use core::ops::{Deref, DerefMut};
use parking_lot::{MappedMutexGuard, MutexGuard};

/// Exclusive access to the value stored under one key.
///
/// Holds the lock of the key's whole shard: other keys that share the shard
/// are blocked too until the handle is dropped, so keep it short-lived.
/// The lock is released when the handle goes out of scope on any path,
/// including early returns and unwinding.
///
/// `Access` is `!Send`; it must be dropped on the thread that created it.
pub struct Access<'a, K, V> {
    // Declared first so the lock is released before the reentrancy marker.
    value: MappedMutexGuard<'a, V>,
    key: K,
    _held: HeldShard,
}

impl<'a, K, V> Access<'a, K, V>
where
    K: Ord + Copy,
    V: Default,
{
    /// Lock `shard` and return the slot for `key`, inserting `V::default()`
    /// if the key is absent.
    pub(crate) fn acquire(shard: &'a Shard<K, V>, key: K) -> Self {
        let ShardGuard { entries, held } = shard.lock();
        let value = MutexGuard::map(entries, |entries| entries.entry(key).or_default());
        Self {
            value,
            key,
            _held: held,
        }
    }
}

impl<'a, K: Copy, V> Access<'a, K, V> {
    /// The key this handle was created for.
    pub fn key(&self) -> K {
        self.key
    }
}

impl<'a, K, V> Deref for Access<'a, K, V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &V {
        &self.value
    }
}

impl<'a, K, V> DerefMut for Access<'a, K, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for Access<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Access")
            .field("key", &self.key)
            .field("value", &*self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_inserts_default_once() {
        let shard: Shard<u32, u64> = Shard::new();
        {
            let mut a = Access::acquire(&shard, 5);
            assert_eq!(*a, 0);
            *a += 2;
        }
        {
            let mut a = Access::acquire(&shard, 5);
            assert_eq!(a.key(), 5);
            *a += 3;
        }
        let g = shard.lock();
        assert_eq!(g.entries.get(&5), Some(&5));
        assert_eq!(g.entries.len(), 1);
    }

    #[test]
    fn lock_is_released_when_handle_drops_during_unwind() {
        let shard: Shard<u32, String> = Shard::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut a = Access::acquire(&shard, 1);
            a.push('x');
            panic!("caller bailed out while holding the handle");
        }));
        assert!(res.is_err());
        // Would block forever if the guard had leaked.
        let a = Access::acquire(&shard, 1);
        assert_eq!(a.as_str(), "x");
    }

    #[test]
    fn debug_shows_key_and_value() {
        let shard: Shard<i8, i32> = Shard::new();
        let mut a = Access::acquire(&shard, -1);
        *a = 9;
        assert_eq!(format!("{:?}", a), "Access { key: -1, value: 9 }");
    }
}
