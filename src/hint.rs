//! Default shard-count selection.
//!
//! The recommended shard count is queried through [`ParallelismHint`] at
//! construction time rather than read from process-wide state, so each map
//! can be given its own source (or a fixed value in tests).

/// Shard count used when the platform cannot report its parallelism.
pub const DEFAULT_SHARD_COUNT: usize = 4;

/// Source of a recommended shard count.
pub trait ParallelismHint {
    /// Number of shards a new map should use. Zero is rejected by the map.
    fn recommended_shards(&self) -> usize;
}

/// Queries `std::thread::available_parallelism`, falling back to
/// [`DEFAULT_SHARD_COUNT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableParallelism;

impl ParallelismHint for AvailableParallelism {
    fn recommended_shards(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_SHARD_COUNT)
    }
}

/// A constant hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHint(pub usize);

impl ParallelismHint for FixedHint {
    fn recommended_shards(&self) -> usize {
        self.0
    }
}

impl<F> ParallelismHint for F
where
    F: Fn() -> usize,
{
    fn recommended_shards(&self) -> usize {
        self()
    }
}
