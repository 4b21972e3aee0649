//! Error type shared by every fallible `ShardedMap` operation.

use thiserror::Error;

/// Errors surfaced by [`ShardedMap`](crate::ShardedMap).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Construction asked for a shard count the map cannot use.
    #[error("invalid configuration: shard count must be at least 1 (got {shard_count})")]
    InvalidConfiguration {
        /// The rejected shard count.
        shard_count: usize,
    },

    /// A read-only lookup found no entry for the key.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias for `ShardedMap` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_rejected_count() {
        let err = Error::InvalidConfiguration { shard_count: 0 };
        assert_eq!(
            err.to_string(),
            "invalid configuration: shard count must be at least 1 (got 0)"
        );
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
    }

    #[test]
    fn usable_as_std_error() {
        fn boxed() -> std::result::Result<(), Box<dyn std::error::Error>> {
            Err(Error::KeyNotFound)?;
            Ok(())
        }
        assert!(boxed().is_err());
    }
}
