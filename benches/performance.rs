//! Performance benchmarks for the subscription store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::sync::Arc;
use subtrack::{NewSubscription, Store, SubscriptionId, SubscriptionPatch, SubscriptionService};

const CATEGORIES: [&str; 5] = ["Entertainment", "Music", "Storage", "News", "Fitness"];

fn create_store(size: usize) -> Store {
    let store = Store::new();
    for i in 0..size {
        store.insert(NewSubscription::new(
            format!("sub-{i}"),
            (i % 50) as f64 + 0.99,
            CATEGORIES[i % CATEGORIES.len()],
            "2025-09-01",
        ));
    }
    store
}

/// Benchmark appending records to stores of varying size
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("store_size", size), &size, |b, &size| {
            let store = create_store(size);
            b.iter(|| {
                black_box(store.insert(NewSubscription::new(
                    "bench",
                    1.0,
                    "Bench",
                    "2025-09-01",
                )));
            });
        });
    }

    group.finish();
}

/// Benchmark lookup of the last record (worst case for a linear scan)
fn bench_find_by_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_id");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("store_size", size), &size, |b, &size| {
            let store = create_store(size);
            let last = store.list_all().last().map(|r| r.id.clone()).unwrap();
            b.iter(|| {
                black_box(store.find_by_id(&last));
            });
        });
    }

    group.finish();
}

fn bench_categories(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_categories");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("store_size", size), &size, |b, &size| {
            let store = create_store(size);
            b.iter(|| {
                black_box(store.list_categories());
            });
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let store = create_store(1000);
    let id: SubscriptionId = store.list_all()[500].id.clone();

    c.bench_function("update_single_field", |b| {
        b.iter(|| {
            black_box(
                store
                    .update(&id, SubscriptionPatch::default().with_price(12.5))
                    .unwrap(),
            );
        });
    });
}

/// Benchmark name-based dispatch including argument validation
fn bench_service_call(c: &mut Criterion) {
    let service = SubscriptionService::new(Arc::new(create_store(100)));

    c.bench_function("call_edit_subscription", |b| {
        let id = service.subscriptions()[50].id.clone();
        b.iter(|| {
            black_box(
                service
                    .call(
                        "editSubscription",
                        json!({"id": id.as_str(), "name": "renamed"}),
                    )
                    .unwrap(),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_find_by_id,
    bench_categories,
    bench_update,
    bench_service_call,
);

criterion_main!(benches);
