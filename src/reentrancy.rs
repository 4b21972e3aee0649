//! Debug-only detection of a thread re-locking a shard it already holds.
//!
//! `parking_lot` mutexes are not reentrant: locking a shard twice from the
//! same thread (say, calling `get` for a same-shard key while an `Access` is
//! alive) blocks forever. In debug builds every shard acquisition is recorded
//! in a per-thread list first, and a second acquisition of the same shard
//! panics instead. In release builds this compiles to a zero-cost no-op.

use core::marker::PhantomData;

#[cfg(debug_assertions)]
use std::cell::RefCell;

#[cfg(debug_assertions)]
std::thread_local! {
    // Addresses of the shards currently locked by this thread.
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Record that the current thread is about to lock the shard at `addr`.
/// In debug builds, panics if that shard is already held by this thread.
#[inline]
pub(crate) fn enter(addr: usize) -> HeldShard {
    #[cfg(debug_assertions)]
    {
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            assert!(
                !held.contains(&addr),
                "reentrancy detected: shard lock already held by this thread"
            );
            held.push(addr);
        });
        HeldShard {
            addr,
            _nosend: PhantomData,
        }
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = addr;
        HeldShard {
            _nosend: PhantomData,
        }
    }
}

/// RAII marker returned by [`enter`]; forgets the shard when dropped.
///
/// `!Send` so it is always dropped on the thread that recorded it.
#[derive(Debug)]
pub(crate) struct HeldShard {
    #[cfg(debug_assertions)]
    addr: usize,
    _nosend: PhantomData<*mut ()>,
}

impl Drop for HeldShard {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            // try_with: the thread-local may already be gone during thread teardown.
            let _ = HELD.try_with(|held| {
                let mut held = held.borrow_mut();
                if let Some(pos) = held.iter().rposition(|&a| a == self.addr) {
                    held.swap_remove(pos);
                }
            });
        }
    }
}
