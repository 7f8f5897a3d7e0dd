//! Collector invariants exercised through the facade crate rather than
//! `idio-gc`'s own unit tests, so they also stand as a regression check
//! on the public re-export surface (spec §4.1).

use std::cell::Cell;
use std::rc::Rc;

use idio::{GcStats, HashEntry, HashRecord, Heap, Idio, Payload};

#[test]
fn reading_then_dropping_roots_lets_collection_reclaim_everything() {
    let mut heap = Heap::new();
    let a = heap.alloc(Payload::Pair(Idio::nil(), Idio::nil()));
    let b = heap.alloc(Payload::Pair(a, Idio::nil()));
    heap.roots.add_root(b);
    heap.collect();
    assert_eq!(heap.live_count(), 2);

    heap.roots = idio::RootSet::new();
    heap.collect();
    assert_eq!(heap.live_count(), 0);
}

#[test]
fn stats_sink_observes_every_collection() {
    let mut heap = Heap::new();
    let seen: Rc<Cell<u64>> = Rc::new(Cell::new(0));
    let seen2 = seen.clone();
    heap.set_stats_sink(Box::new(move |stats: GcStats| seen2.set(stats.collections)));
    heap.collect();
    heap.collect();
    assert_eq!(seen.get(), 2);
}

#[test]
fn weak_keyed_table_drops_orphaned_entries_across_a_collection() {
    let mut heap = Heap::new();
    let key = heap.alloc(Payload::Pair(Idio::nil(), Idio::nil()));
    let value = heap.alloc(Payload::Pair(Idio::nil(), Idio::nil()));
    let table = heap.alloc(Payload::Hash(HashRecord {
        weak_keyed: true,
        entries: vec![HashEntry { key, value }],
    }));
    heap.roots.add_root(table);
    heap.collect();
    // Neither key nor value is rooted independently, so both die even
    // though the weak-keyed table that referenced them survives.
    assert_eq!(heap.live_count(), 1);
}

#[test]
fn finalizer_fires_exactly_once_when_its_record_dies() {
    let mut heap = Heap::new();
    let p = heap.alloc(Payload::Pair(Idio::nil(), Idio::nil()));
    let runs = Rc::new(Cell::new(0u32));
    let runs2 = runs.clone();
    heap.register_finalizer(p.as_heap_ref().unwrap(), Box::new(move |_| runs2.set(runs2.get() + 1)))
        .unwrap();
    heap.collect();
    heap.collect();
    assert_eq!(runs.get(), 1);
}
