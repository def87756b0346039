//! Performance benchmarks for quiz-order-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quiz_order_engine::{Item, OrderedCollection};
use serde_json::json;

fn seeded(len: usize) -> OrderedCollection {
    OrderedCollection::from_items(
        (0..len)
            .map(|i| Item::new(format!("q{}", i), json!({"title": "Question"})))
            .collect(),
    )
}

fn bench_collection_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_operations");

    for size in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("move_last_to_first", size), &size, |b, &size| {
            let mut collection = seeded(size);
            let last = format!("q{}", size - 1);
            b.iter(|| {
                let _ = collection.move_item(black_box(&last), black_box(0));
                let _ = collection.move_item(black_box(&last), black_box(size - 1));
            })
        });

        group.bench_with_input(BenchmarkId::new("begin_move_rollback", size), &size, |b, &size| {
            let mut collection = seeded(size);
            let last = format!("q{}", size - 1);
            b.iter(|| {
                collection.begin_move(black_box(&last), black_box(0)).ok();
                collection.rollback().ok();
            })
        });

        group.bench_with_input(BenchmarkId::new("snapshot", size), &size, |b, &size| {
            let collection = seeded(size);
            b.iter(|| black_box(collection.snapshot()))
        });
    }

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    group.bench_function("reorder_request_100", |b| {
        let collection = seeded(100);
        b.iter(|| serde_json::to_string(&black_box(collection.reorder_request())))
    });

    group.bench_function("load_items_100", |b| {
        let json = serde_json::to_string(&seeded(100).snapshot()).unwrap_or_default();
        b.iter(|| {
            let items: Vec<Item> = serde_json::from_str(black_box(&json)).unwrap_or_default();
            OrderedCollection::from_items(items)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_collection_operations, bench_serialization);
criterion_main!(benches);
