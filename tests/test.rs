use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rbtree_map::RedBlackTree;
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    // Every test calls this; only the first call installs the logger.
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn keys<K: Clone, V>(map: &RedBlackTree<K, V>) -> Vec<K> {
    let mut out = Vec::new();
    map.walk_in_order(|k, _| out.push(k.clone()));
    out
}

fn height_bound(len: usize) -> usize {
    let mut log = 0;
    while (len + 1) >> (log + 1) > 0 {
        log += 1;
    }
    2 * log
}

#[test]
fn test_rand_large() {
    init_logging();
    let n: usize = 50;
    let mut map = RedBlackTree::new();
    let mut rng = ChaCha8Rng::seed_from_u64(50);
    let mut log = Vec::new();

    for _ in 0..n {
        let i = rng.gen::<usize>() % (2 * n);
        if !map.contains_key(&i) {
            log.push(i);
            map.insert(i, i);
        }
        map.validate().unwrap();
    }

    for i in log {
        assert_eq!(map.search(&i).cloned(), Some(i));
    }
}

#[test]
fn test_basic_large() {
    init_logging();
    let mut map = RedBlackTree::new();
    let size = 10000;
    assert_eq!(map.len(), 0);

    for i in 0..size {
        map.insert(i, 10 * i);
        assert_eq!(map.len(), i + 1);
    }
    map.validate().unwrap();
    assert!(map.height() <= height_bound(size));

    for i in 0..size {
        assert_eq!(map.search(&i).unwrap(), &(i * 10));
    }

    for i in size..size * 2 {
        assert_eq!(map.search(&i), None);
    }

    for i in 0..size {
        *map.search_mut(&i).unwrap() = 100 * i;
    }

    for i in 0..size {
        assert_eq!(map[&i], i * 100);
    }

    for i in (0..size).step_by(2) {
        assert_eq!(map.delete(&i), Some(100 * i));
    }
    assert_eq!(map.len(), size / 2);
    map.validate().unwrap();
    assert!(map.height() <= height_bound(size / 2));

    for i in 0..size {
        assert_eq!(map.contains_key(&i), i % 2 == 1);
    }
}

#[test]
fn test_basic_small() {
    init_logging();
    let mut map = RedBlackTree::new();
    assert_eq!(map.search(&1), None);
    map.insert(1, 1);
    assert_eq!(map.search(&1), Some(&1));
    assert_eq!(map.delete(&1), Some(1));
    assert_eq!(map.search(&1), None);
    assert!(map.is_empty());
    map.insert(2, 4);
    assert_eq!(map.search(&2), Some(&4));
    assert_eq!(map.root_value(), Some(&4));
    assert_eq!(map.height(), 1);
}

#[test]
fn test_empty() {
    let mut map: RedBlackTree<i32, i32> = RedBlackTree::new();
    assert_eq!(map.find_min(), None);
    assert_eq!(map.find_max(), None);
    assert_eq!(map.find_min_recursive(), None);
    assert_eq!(map.find_max_recursive(), None);
    assert_eq!(map.root_value(), None);
    assert_eq!(map.height(), 0);
    assert_eq!(map.delete(&3), None);
    assert!(!map.change_key(&3, 4));
    assert_eq!(map.validate(), Ok(0));
    assert_eq!(map.iter().next(), None);

    let mut visited = 0;
    map.walk_pre_order(|_, _| visited += 1);
    map.walk_in_order(|_, _| visited += 1);
    map.walk_post_order(|_, _| visited += 1);
    map.walk_in_order_iterative(|_, _| visited += 1);
    assert_eq!(visited, 0);
}

#[test]
fn test_iter() {
    init_logging();
    let size = 10000;
    let mut rng = ChaCha8Rng::seed_from_u64(10000);

    let mut map = RedBlackTree::new();
    let mut log = Vec::new();
    for _ in 0..size {
        let key: usize = rng.gen();
        let val: usize = rng.gen();
        if !map.contains_key(&key) {
            log.push((key, val));
            map.insert(key, val);
        }
    }
    log.sort();

    fn test<T>(size: usize, mut iter: T, log: Vec<(usize, usize)>)
    where
        T: ExactSizeIterator<Item = (usize, usize)>,
    {
        for (i, kv) in log.into_iter().enumerate() {
            assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
            assert_eq!(iter.next().unwrap(), kv);
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert_eq!(iter.next(), None);
    }
    let len = map.len();
    test(len, map.iter().map(|(&k, &v)| (k, v)), log);
}

// The worked example: keys 10, 1, 5, 6, 9, 7, 12 inserted in that order.
fn sample() -> RedBlackTree<i32, String> {
    let mut map = RedBlackTree::new();
    for k in [10, 1, 5, 6, 9, 7, 12] {
        map.insert(k, format!("v{}", k));
        map.validate().unwrap();
    }
    map
}

#[test]
fn test_sample_tree() {
    init_logging();
    let mut map = sample();

    assert_eq!(map.len(), 7);
    assert_eq!(map.find_min().map(String::as_str), Some("v1"));
    assert_eq!(map.find_max().map(String::as_str), Some("v12"));
    assert_eq!(map.find_min_recursive().map(String::as_str), Some("v1"));
    assert_eq!(map.find_max_recursive().map(String::as_str), Some("v12"));
    assert_eq!(map.first_key_value().map(|(k, _)| *k), Some(1));
    assert_eq!(map.last_key_value().map(|(k, _)| *k), Some(12));
    assert_eq!(keys(&map), [1, 5, 6, 7, 9, 10, 12]);

    assert_eq!(map.delete(&10).as_deref(), Some("v10"));
    map.validate().unwrap();
    assert_eq!(keys(&map), [1, 5, 6, 7, 9, 12]);
    assert_eq!(map.search(&10), None);
    assert_eq!(map.len(), 6);
}

#[test]
fn test_sample_walk_orders() {
    let map = sample();
    //      5B
    //     /  \
    //   1B    9R
    //        /  \
    //      6B    10B
    //        \     \
    //         7R    12R
    let mut pre = Vec::new();
    map.walk_pre_order(|k, _| pre.push(*k));
    assert_eq!(pre, [5, 1, 9, 6, 7, 10, 12]);

    let mut post = Vec::new();
    map.walk_post_order(|k, _| post.push(*k));
    assert_eq!(post, [1, 7, 6, 12, 10, 9, 5]);

    let mut iterative = Vec::new();
    map.walk_in_order_iterative(|k, _| iterative.push(*k));
    assert_eq!(iterative, keys(&map));

    assert_eq!(map.root_value().map(String::as_str), Some("v5"));
    assert_eq!(map.height(), 4);
    assert_eq!(map.validate(), Ok(2));
}

#[test]
fn test_delete_absent_is_noop() {
    let mut map = sample();
    let before = map.pretty().to_string();
    assert_eq!(map.delete(&8), None);
    assert_eq!(map.delete(&100), None);
    assert_eq!(map.len(), 7);
    assert_eq!(map.pretty().to_string(), before);
}

#[test]
fn test_change_key() {
    init_logging();
    let mut map = sample();
    assert!(map.change_key(&1, 20));
    map.validate().unwrap();
    assert_eq!(keys(&map), [5, 6, 7, 9, 10, 12, 20]);
    assert_eq!(map.search(&20).map(String::as_str), Some("v1"));
    assert_eq!(map.search(&1), None);
    assert_eq!(map.len(), 7);

    assert!(!map.change_key(&1, 30));
    assert_eq!(map.len(), 7);

    // Rekeying onto an existing key keeps both entries.
    assert!(map.change_key(&5, 6));
    assert_eq!(keys(&map), [6, 6, 7, 9, 10, 12, 20]);
    map.validate().unwrap();
}

#[test]
fn test_duplicates() {
    init_logging();
    let mut map = RedBlackTree::new();
    for i in 0..100 {
        map.insert(i % 10, i);
        map.validate().unwrap();
    }
    assert_eq!(map.len(), 100);

    // Equal keys come out in insertion order.
    let values: Vec<_> = map.iter().filter(|&(&k, _)| k == 3).map(|(_, &v)| v).collect();
    assert_eq!(values, (0..10).map(|i| 3 + 10 * i).collect::<Vec<_>>());

    let mut removed = 0;
    while map.delete(&3).is_some() {
        removed += 1;
        map.validate().unwrap();
    }
    assert_eq!(removed, 10);
    assert_eq!(map.len(), 90);
    assert!(!map.contains_key(&3));
}

#[test]
fn test_rand_insert_delete() {
    init_logging();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut map = RedBlackTree::new();
    let mut model = std::collections::BTreeMap::new();

    for step in 0..5000 {
        let key = rng.gen_range(0..500u32);
        if rng.gen_bool(0.55) {
            if !model.contains_key(&key) {
                model.insert(key, step);
                map.insert(key, step);
            }
        } else {
            assert_eq!(map.delete(&key), model.remove(&key));
        }
        assert_eq!(map.len(), model.len());
    }

    map.validate().unwrap();
    assert!(map.height() <= height_bound(map.len()));
    assert!(map.iter().eq(model.iter()));
}

#[test]
fn test_shuffled_teardown() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut order: Vec<u32> = (0..2000).collect();
    order.shuffle(&mut rng);

    let mut map: RedBlackTree<_, _> = order.iter().map(|&k| (k, k * 2)).collect();
    map.validate().unwrap();

    order.shuffle(&mut rng);
    for (removed, k) in order.iter().enumerate() {
        assert_eq!(map.delete(k), Some(k * 2));
        assert_eq!(map.len(), 2000 - removed - 1);
        if removed % 97 == 0 {
            map.validate().unwrap();
        }
    }
    assert!(map.is_empty());
    assert_eq!(map.validate(), Ok(0));
}

#[test]
fn test_clear_and_reuse() {
    let mut map = sample();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.find_min(), None);
    assert_eq!(map.validate(), Ok(0));

    map.extend((0..10).map(|k| (k, k.to_string())));
    assert_eq!(map.len(), 10);
    assert_eq!(keys(&map), (0..10).collect::<Vec<_>>());
    map.validate().unwrap();
}

#[test]
fn test_formatting() {
    let map: RedBlackTree<_, _> = [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b", 3: "c"}"#);
    assert_eq!(
        map.pretty().to_string(),
        "2 -> \"b\" (B)\n  1 -> \"a\" (R)\n  3 -> \"c\" (R)\n"
    );
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn test_index_missing() {
    let map = sample();
    let _ = &map[&42];
}
