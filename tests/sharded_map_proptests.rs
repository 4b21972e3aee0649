// ShardedMap property tests.
//
// Property 1: partition totality and stability.
//  - For any key and any non-zero shard count, the index is in range and
//    repeated calls agree; the map's `shard_of` agrees with `partition`.
//  - Signed widths agree: a value partitions the same as i8/i16/i32/i64
//    whenever it fits.
//
// Property 2: shard-count invariance.
//  - The same sequence of operations applied to a 1-shard map and an
//    N-shard map produces identical observations and identical `to_map`.
use core::num::NonZeroUsize;
use proptest::prelude::*;
use sharded_map::{partition, ShardedMap};

// Property 1: partition is total, in range and stable.
proptest! {
    #[test]
    fn prop_partition_in_range_and_stable(key in any::<i64>(), shards in 1usize..=1024) {
        let n = NonZeroUsize::new(shards).unwrap();
        let first = partition(&key, n);
        prop_assert!(first < shards);
        prop_assert_eq!(partition(&key, n), first);

        let map: ShardedMap<i64, ()> = ShardedMap::with_shards(shards).unwrap();
        prop_assert_eq!(map.shard_of(&key), first);
    }

    #[test]
    fn prop_partition_agrees_across_signed_widths(key in any::<i8>(), shards in 1usize..=300) {
        let n = NonZeroUsize::new(shards).unwrap();
        let expected = partition(&(key as i64), n);
        prop_assert_eq!(partition(&key, n), expected);
        prop_assert_eq!(partition(&(key as i16), n), expected);
        prop_assert_eq!(partition(&(key as i32), n), expected);
        prop_assert_eq!(partition(&(key as isize), n), expected);
    }

    #[test]
    fn prop_partition_unsigned_is_plain_modulo(key in any::<u64>(), shards in 1usize..=1024) {
        let n = NonZeroUsize::new(shards).unwrap();
        prop_assert_eq!(partition(&key, n), (key % shards as u64) as usize);
        prop_assert_eq!(partition(&(key as u128), n), (key % shards as u64) as usize);
    }
}

// Operation on key index `k` in a symmetric key range.
#[derive(Clone, Debug)]
enum Op {
    Append(i32, char),
    Get(i32),
    Contains(i32),
    Snapshot,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = -64i32..64;
    let op = prop_oneof![
        (key.clone(), proptest::char::range('a', 'e')).prop_map(|(k, c)| Op::Append(k, c)),
        key.clone().prop_map(Op::Get),
        key.prop_map(Op::Contains),
        Just(Op::Snapshot),
    ];
    proptest::collection::vec(op, 1..120)
}

// Property 2: results never depend on the shard count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_shard_count_invariance(shards in 2usize..=100, ops in arb_ops()) {
        let single: ShardedMap<i32, String> = ShardedMap::with_shards(1).unwrap();
        let many: ShardedMap<i32, String> = ShardedMap::with_shards(shards).unwrap();

        for op in ops {
            match op {
                Op::Append(k, c) => {
                    single.access(k).push(c);
                    many.access(k).push(c);
                }
                Op::Get(k) => prop_assert_eq!(single.get(&k), many.get(&k)),
                Op::Contains(k) => prop_assert_eq!(single.contains(&k), many.contains(&k)),
                Op::Snapshot => prop_assert_eq!(single.to_map(), many.to_map()),
            }
        }

        prop_assert_eq!(single.to_map(), many.to_map());
        prop_assert_eq!(single.len(), many.len());
    }
}
