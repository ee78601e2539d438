mod common;

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use voltroute_lib::{FrequencyIndex, RouteKey, RouteTracker};

use common::seeded;

fn avl_height_bound(len: usize) -> usize {
    (1.4405 * ((len + 2) as f64).log2()).floor() as usize
}

#[test]
fn random_workload_matches_btreemap() {
    let mut rng = seeded(7);
    let mut index = FrequencyIndex::new();
    let mut expected: BTreeMap<RouteKey, u64> = BTreeMap::new();

    for _ in 0..2_000 {
        let len = rng.gen_range(1..=4);
        let key = RouteKey::new((0..len).map(|_| rng.gen_range(0..6)).collect());
        let delta = rng.gen_range(1..=3);

        let count = index.insert_or_increment(key.clone(), delta);
        let slot = expected.entry(key).or_insert(0);
        *slot += delta;
        assert_eq!(count, *slot);
        assert!(index.height() <= avl_height_bound(index.len()));
    }

    assert_eq!(index.len(), expected.len());
    let in_order: Vec<(RouteKey, u64)> = index.iter().map(|(k, c)| (k.clone(), c)).collect();
    let reference: Vec<(RouteKey, u64)> = expected.into_iter().collect();
    assert_eq!(in_order, reference);
}

#[test]
fn in_order_keys_strictly_ascend() {
    let mut rng = seeded(11);
    let mut keys: Vec<RouteKey> = (0..300).map(|i| RouteKey::new(vec![i % 17, i])).collect();
    keys.shuffle(&mut rng);

    let mut index = FrequencyIndex::new();
    for key in keys {
        index.insert_or_increment(key, 1);
    }

    let visited: Vec<&RouteKey> = index.iter().map(|(key, _)| key).collect();
    assert_eq!(visited.len(), 300);
    assert!(visited.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn removals_keep_the_tree_balanced() {
    let mut rng = seeded(23);
    let mut index = FrequencyIndex::new();
    let mut keys: Vec<RouteKey> = (0..500).map(|i| RouteKey::new(vec![i])).collect();
    for key in &keys {
        index.insert_or_increment(key.clone(), 2);
    }

    keys.shuffle(&mut rng);
    for (removed, key) in keys.iter().enumerate() {
        assert_eq!(index.remove(key), Some(2));
        assert_eq!(index.len(), 500 - removed - 1);
        assert!(index.height() <= avl_height_bound(index.len()));
    }
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
}

#[test]
fn registration_counts_are_additive() {
    let mut once = RouteTracker::new();
    let mut split = RouteTracker::new();
    for _ in 0..5 {
        once.register_route(&[3, 1, 4], 12).unwrap();
    }
    for _ in 0..2 {
        split.register_route(&[3, 1, 4], 12).unwrap();
    }
    for _ in 0..3 {
        split.register_route(&[3, 1, 4], 12).unwrap();
    }

    assert_eq!(once.route_count(&[3, 1, 4]), Some(5));
    assert_eq!(split.route_count(&[3, 1, 4]), Some(5));
    assert_eq!(once.top_routes(1), split.top_routes(1));
}

#[test]
fn top_routes_example() {
    let mut tracker = RouteTracker::new();
    for _ in 0..3 {
        tracker.register_route(&[0, 1, 2], 20).unwrap();
    }
    tracker.register_route(&[0, 3, 2], 25).unwrap();

    let top = tracker.top_routes(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0.to_string(), "0→1→2");
    assert_eq!(top[0].1, 3);

    let parsed: RouteKey = "0→1→2".parse().unwrap();
    assert_eq!(parsed, top[0].0);
}

#[test]
fn keys_with_multi_digit_sites_do_not_collide() {
    let mut index = FrequencyIndex::new();
    index.insert_or_increment(RouteKey::new(vec![1, 23]), 1);
    index.insert_or_increment(RouteKey::new(vec![12, 3]), 1);
    assert_eq!(index.len(), 2);
}
