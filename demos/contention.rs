//! Demonstration driver: the shuffled concurrent-update workload, timed
//! against a single global lock and against 100 shards.
//!
//! Run with `cargo run --release --example contention`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sharded_map::ShardedMap;
use std::thread;
use std::time::Instant;
use tracing::{error, info};

const THREAD_COUNT: usize = 4;
const KEY_COUNT: i32 = 50_000;
const ROUNDS: usize = 2;

/// Logs the time elapsed between construction and drop.
struct LogDuration {
    label: &'static str,
    start: Instant,
}

impl LogDuration {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(label = self.label, elapsed_ms = elapsed.as_millis() as u64, "finished");
    }
}

fn run_concurrent_updates(map: &ShardedMap<i32, i32>) {
    thread::scope(|s| {
        for seed in 0..THREAD_COUNT as u64 {
            s.spawn(move || {
                let mut updates: Vec<i32> = (-KEY_COUNT / 2..KEY_COUNT / 2).collect();
                updates.shuffle(&mut StdRng::seed_from_u64(seed));
                for _ in 0..ROUNDS {
                    for &key in &updates {
                        *map.access(key) += 1;
                    }
                }
            });
        }
    });
}

// Every key must have been incremented once per thread per round.
fn verify(label: &str, map: &ShardedMap<i32, i32>) -> bool {
    let expected = (THREAD_COUNT * ROUNDS) as i32;
    let snapshot = map.to_map();
    let wrong = snapshot.values().filter(|&&v| v != expected).count();
    if snapshot.len() != KEY_COUNT as usize || wrong != 0 {
        error!(label, keys = snapshot.len(), wrong, "lost updates");
        return false;
    }
    info!(label, keys = snapshot.len(), expected, "totals verified");
    true
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let mut ok = true;
    for (label, shards) in [("single lock", 1usize), ("100 locks", 100)] {
        let map = match ShardedMap::with_shards(shards) {
            Ok(map) => map,
            Err(e) => {
                error!(label, error = %e, "cannot build map");
                std::process::exit(1);
            }
        };
        {
            let _timer = LogDuration::new(label);
            run_concurrent_updates(&map);
        }
        ok &= verify(label, &map);
    }

    let default_map: ShardedMap<i32, i32> = ShardedMap::new();
    info!(shards = default_map.shard_count(), "default shard count from available parallelism");

    if !ok {
        std::process::exit(1);
    }
}
