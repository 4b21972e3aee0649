#![cfg(test)]

// Property tests for ShardedMap kept inside the crate so they can inspect
// shard placement directly.

use crate::{Error, ShardedMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Add(i64, i64),
    Touch(i64),
    Get(i64),
    Contains(i64),
    Snapshot,
}

// Keys come from a small symmetric range so sign mixing and collisions are common.
fn arb_op() -> impl Strategy<Value = Op> {
    let key = -40i64..40;
    prop_oneof![
        (key.clone(), -1000i64..1000).prop_map(|(k, d)| Op::Add(k, d)),
        key.clone().prop_map(Op::Touch),
        key.clone().prop_map(Op::Get),
        key.prop_map(Op::Contains),
        Just(Op::Snapshot),
    ]
}

// Property: State-machine equivalence against BTreeMap.
// Invariants exercised across random operation sequences:
// - `access` inserts the default on first touch and accumulates updates.
// - `get` reports `KeyNotFound` for absent keys and never inserts.
// - `contains` parity with the model.
// - `to_map` equals the model exactly (sorted, no dropped or doubled keys).
// - Every stored key sits in the shard `shard_of` names; `len` parity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(shards in 1usize..=16, ops in proptest::collection::vec(arb_op(), 1..80)) {
        let sut: ShardedMap<i64, i64> = ShardedMap::with_shards(shards).unwrap();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(k, d) => {
                    let mut slot = sut.access(k);
                    *slot += d;
                    *model.entry(k).or_default() += d;
                    prop_assert_eq!(*slot, model[&k]);
                }
                Op::Touch(k) => {
                    let slot = sut.access(k);
                    let expected = *model.entry(k).or_default();
                    prop_assert_eq!(*slot, expected);
                }
                Op::Get(k) => {
                    match model.get(&k) {
                        Some(&v) => prop_assert_eq!(sut.get(&k), Ok(v)),
                        None => {
                            prop_assert_eq!(sut.get(&k), Err(Error::KeyNotFound));
                            prop_assert!(!sut.contains(&k), "get must not insert");
                        }
                    }
                }
                Op::Contains(k) => {
                    prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
                }
                Op::Snapshot => {
                    prop_assert_eq!(sut.to_map(), model.clone());
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        for (idx, shard) in sut.shards.iter().enumerate() {
            let g = shard.lock();
            for k in g.entries.keys() {
                prop_assert_eq!(sut.shard_of(k), idx);
            }
        }
    }
}
