//! Benchmark for InsensitiveMap vs standard HashMap.
//!
//! Measures the cost of key normalization and original-key bookkeeping
//! against a plain `HashMap<String, i64>` for the common operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use insensitive_map::{InsensitiveMap, PlainMap, Value, plain_map};
use std::collections::HashMap;
use std::hint::black_box;

// =============================================================================
// set Benchmark
// =============================================================================

fn benchmark_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("InsensitiveMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = InsensitiveMap::new();
                    for index in 0..size {
                        map.set(format!("Key {index}"), black_box(index));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = HashMap::new();
                for index in 0..size {
                    map.insert(format!("Key {index}"), black_box(index));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100_i64, 1_000, 10_000] {
        let insensitive: InsensitiveMap =
            (0..size).map(|index| (format!("Key {index}"), index)).collect();
        let standard: HashMap<String, i64> =
            (0..size).map(|index| (format!("Key {index}"), index)).collect();
        let lookups: Vec<String> = (0..size).map(|index| format!("KEY_{index}")).collect();
        let exact: Vec<String> = (0..size).map(|index| format!("Key {index}")).collect();

        group.bench_with_input(
            BenchmarkId::new("InsensitiveMap", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in &lookups {
                        if let Some(Value::Integer(value)) = insensitive.get(black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in &exact {
                    if let Some(value) = standard.get(black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// merge_recursive Benchmark
// =============================================================================

fn nested_plain(width: i64, depth: usize) -> PlainMap {
    let mut plain = PlainMap::new();
    for index in 0..width {
        let value = if depth == 0 {
            Value::Integer(index)
        } else {
            Value::Plain(nested_plain(width, depth - 1))
        };
        plain.insert(format!("Field {index}").into(), value);
    }
    plain
}

fn benchmark_merge_recursive(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("merge_recursive");

    for depth in [1, 2, 3] {
        let source = nested_plain(8, depth);
        for safe_mode in [false, true] {
            let label = if safe_mode { "safe" } else { "unsafe" };
            group.bench_with_input(BenchmarkId::new(label, depth), &source, |bencher, source| {
                bencher.iter(|| {
                    let mut map = InsensitiveMap::new();
                    map.set_safe_mode(safe_mode);
                    map.merge_recursive(black_box(source.clone())).ok();
                    black_box(map)
                });
            });
        }
    }

    group.finish();
}

// =============================================================================
// to_plain_mapping Benchmark
// =============================================================================

fn benchmark_to_plain_mapping(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("to_plain_mapping");

    let map = InsensitiveMap::from_plain(plain_map! {
        "Outer" => nested_plain(8, 2),
        "List" => vec![nested_plain(4, 1), nested_plain(4, 1)],
    });

    group.bench_function("shallow", |bencher| {
        bencher.iter(|| black_box(map.to_plain_mapping()));
    });
    group.bench_function("deep", |bencher| {
        bencher.iter(|| black_box(map.to_plain_mapping_deep()));
    });

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_set,
    benchmark_get,
    benchmark_merge_recursive,
    benchmark_to_plain_mapping
);

criterion_main!(benches);
