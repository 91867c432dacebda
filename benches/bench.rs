use std::hint::black_box;

use chaintable::HashTable;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rustc_hash::FxBuildHasher;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key_{i}")).collect()
}

fn filled(keys: &[String]) -> HashTable<String, usize> {
    let mut table = HashTable::new();
    for (i, key) in keys.iter().enumerate() {
        let _ = table.insert(key.clone(), i);
    }
    table
}

// Growing from the default capacity rehashes every entry at each threshold crossing, while a
// reserved table absorbs the same insertions without a single resize.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [100, 1_000, 10_000] {
        let keys = keys(size);

        group.bench_with_input(
            BenchmarkId::new("from_default_cap", size),
            &size,
            |b, _| {
                b.iter_batched(
                    || keys.clone(),
                    |keys| {
                        let mut table = HashTable::new();
                        for (i, key) in keys.into_iter().enumerate() {
                            let _ = table.insert(key, i);
                        }
                        black_box(table)
                    },
                    BatchSize::SmallInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("reserved", size), &size, |b, &size| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table = HashTable::new();
                    table.reserve(size);
                    for (i, key) in keys.into_iter().enumerate() {
                        let _ = table.insert(key, i);
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    let keys = keys(10_000);
    let table = filled(&keys);

    group.bench_function("hit", |b| {
        b.iter(|| black_box(table.get(black_box("key_5000"))));
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(table.get(black_box("key_missing"))));
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = keys(1_000);

    c.bench_function("remove_all", |b| {
        b.iter_batched(
            || filled(&keys),
            |mut table| {
                for key in &keys {
                    black_box(table.remove(key.as_str()));
                }
                table
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_traverse(c: &mut Criterion) {
    let keys = keys(10_000);
    let table = filled(&keys);

    c.bench_function("traverse", |b| {
        b.iter(|| {
            let mut sum = 0_usize;
            for (_, value) in &table {
                sum += value;
            }
            black_box(sum)
        });
    });
}

// The same workload under a faster (non-SipHash) hasher, for comparing hashing cost against
// bucket management cost.
fn bench_fx_hasher(c: &mut Criterion) {
    let keys = keys(10_000);

    c.bench_function("fx_insert_10000", |b| {
        b.iter_batched(
            || keys.clone(),
            |keys| {
                let mut table = HashTable::with_hasher(FxBuildHasher);
                for (i, key) in keys.into_iter().enumerate() {
                    let _ = table.insert(key, i);
                }
                black_box(table)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_remove,
    bench_traverse,
    bench_fx_hasher
);
criterion_main!(benches);
