//! Multi-threaded access to the cache.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use routing_metadata_cache::sync::{CacheSubscriber, DataEvent, EventAction};
use routing_metadata_cache::RoutingMetadataCache;

mod common;

const THREADS: usize = 8;
const PER_THREAD: usize = 100;

#[test]
fn test_distinct_plugins_do_not_interfere() {
    let cache = RoutingMetadataCache::new().shared();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let plugin = format!("plugin-{t}");
                barrier.wait();
                for i in 0..PER_THREAD {
                    cache.cache_selector(common::selector(&format!("s{i}"), &plugin, i as i32));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..THREADS {
        let selectors = cache.obtain_selectors(&format!("plugin-{t}")).unwrap();
        assert_eq!(selectors.len(), PER_THREAD);
        assert!(selectors.iter().all(|s| s.plugin_name.as_str() == format!("plugin-{t}")));
    }
}

#[test]
fn test_same_plugin_distinct_ids_all_survive() {
    let cache = RoutingMetadataCache::new().shared();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let sort = fastrand::i32(0..20);
                    cache.cache_selector(common::selector(&format!("{t}-{i}"), "shared", sort));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let selectors = cache.obtain_selectors("shared").unwrap();
    assert_eq!(selectors.len(), THREADS * PER_THREAD);
    common::assert_ordered_unique(selectors.iter().map(|s| (s.sort, s.id.as_str())));
}

#[test]
fn test_concurrent_removes_and_puts_on_same_selector() {
    let cache = RoutingMetadataCache::new().shared();
    for i in 0..PER_THREAD {
        cache.cache_rule(common::rule(&format!("keep-{i}"), "s1", i as i32));
        cache.cache_rule(common::rule(&format!("drop-{i}"), "s1", i as i32));
    }

    let remover = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..PER_THREAD {
                cache.remove_rule(&common::rule(&format!("drop-{i}"), "s1", 0));
            }
        })
    };
    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..PER_THREAD {
                cache.cache_rule(common::rule(&format!("new-{i}"), "s1", i as i32));
            }
        })
    };
    remover.join().unwrap();
    writer.join().unwrap();

    let rules = cache.obtain_rules("s1").unwrap();
    assert_eq!(rules.len(), 2 * PER_THREAD);
    assert!(rules.iter().all(|r| !r.id.as_str().starts_with("drop-")));
    common::assert_ordered_unique(rules.iter().map(|r| (r.sort, r.id.as_str())));
}

#[test]
fn test_readers_always_see_complete_sorted_snapshots() {
    let cache = RoutingMetadataCache::new().shared();
    cache.cache_selector(common::selector("seed", "p1", 0));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) {
                    let snapshot = cache.obtain_selectors("p1").unwrap();
                    common::assert_ordered_unique(snapshot.iter().map(|s| (s.sort, s.id.as_str())));
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for i in 0..500 {
        let id = format!("s{}", i % 50);
        if i % 3 == 0 {
            cache.remove_selector(&common::selector(&id, "p1", 0));
        } else {
            cache.cache_selector(common::selector(&id, "p1", fastrand::i32(-10..10)));
        }
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    let snapshot = cache.obtain_selectors("p1").unwrap();
    common::assert_ordered_unique(snapshot.iter().map(|s| (s.sort, s.id.as_str())));
}

#[test]
fn test_held_snapshot_survives_concurrent_writes() {
    let cache = RoutingMetadataCache::new().shared();
    cache.cache_selector(common::selector("a", "p1", 1));
    cache.cache_selector(common::selector("b", "p1", 2));
    let held = cache.obtain_selectors("p1").unwrap();

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            cache.remove_selector(&common::selector("a", "p1", 1));
            cache.cache_selector(common::selector("c", "p1", 0));
        })
    };
    writer.join().unwrap();

    let ids: Vec<&str> = held.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_refresh_never_hides_keys_present_on_both_sides() {
    let cache = RoutingMetadataCache::new().shared();
    let subscriber = CacheSubscriber::new(Arc::clone(&cache));
    subscriber.apply(DataEvent::Plugin {
        action: EventAction::Create,
        data: vec![common::plugin("divide")],
    });
    subscriber.apply(DataEvent::Selector {
        action: EventAction::Create,
        data: vec![common::selector("s0", "divide", 0)],
    });
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let cache = Arc::clone(&cache);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut misses = 0usize;
            while !done.load(Ordering::Acquire) {
                if cache.obtain_plugin("divide").is_none() {
                    misses += 1;
                }
                match cache.obtain_selectors("divide") {
                    Some(selectors) if !selectors.is_empty() => {}
                    _ => misses += 1,
                }
            }
            misses
        })
    };

    for round in 0..2_000 {
        let extra = format!("extra-{}", round % 7);
        subscriber.apply(DataEvent::Plugin {
            action: EventAction::Refresh,
            data: vec![common::plugin("divide"), common::plugin(&extra)],
        });
        subscriber.apply(DataEvent::Selector {
            action: EventAction::Refresh,
            data: vec![
                common::selector(&format!("s{}", round % 3), "divide", round % 5),
                common::selector("s0", &extra, 0),
            ],
        });
    }
    done.store(true, Ordering::Release);

    assert_eq!(reader.join().unwrap(), 0);
    assert_eq!(cache.stats().plugins, 2);
    assert_eq!(cache.obtain_selectors("divide").unwrap().len(), 1);
}
