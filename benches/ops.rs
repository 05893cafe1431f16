use std::collections::BTreeSet;

use rand::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl::AvlTree;

/// Deterministically generates `nvalues` values
///
/// All values are guaranteed to be unique and ordered randomly.
fn generate_values(nvalues: usize) -> Vec<i64> {
    // Want to spread values out so we generate interesting trees. Trying not
    // to generate consecutive values or values that are strictly increasing
    // in magnitude.
    let n = nvalues as i64;
    let mut values: Vec<i64> = (0..n).map(|i| (i - n/2) * 10).collect();

    // Use seed to make this deterministic
    let mut rng = StdRng::seed_from_u64(45930923092);
    // Shuffle to ensure that values are in a uniformly random order
    values.shuffle(&mut rng);

    values
}

fn bench_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("inserts");

    for &size in &[100usize, 1000, 10000] {
        let values = generate_values(size);

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &values, |b, values| {
            b.iter(|| {
                let mut tree = AvlTree::new();
                for &value in values {
                    tree.insert(value as f64);
                }
                black_box(tree)
            })
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &values, |b, values| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &value in values {
                    set.insert(value);
                }
                black_box(set)
            })
        });
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    for &size in &[100usize, 1000, 10000] {
        let values = generate_values(size);

        let tree: AvlTree = values.iter().map(|&value| value as f64).collect();
        group.bench_with_input(BenchmarkId::new("AvlTree", size), &values, |b, values| {
            b.iter(|| {
                for &value in values {
                    black_box(tree.contains(value as f64));
                }
            })
        });

        let set: BTreeSet<i64> = values.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &values, |b, values| {
            b.iter(|| {
                for &value in values {
                    black_box(set.contains(&value));
                }
            })
        });
    }

    group.finish();
}

fn bench_removes(c: &mut Criterion) {
    let mut group = c.benchmark_group("removes");

    for &size in &[100usize, 1000, 10000] {
        let values = generate_values(size);

        let tree: AvlTree = values.iter().map(|&value| value as f64).collect();
        group.bench_with_input(BenchmarkId::new("AvlTree", size), &values, |b, values| {
            b.iter(|| {
                let mut tree = tree.clone();
                for &value in values {
                    tree.remove(value as f64);
                }
                black_box(tree.is_empty())
            })
        });

        let set: BTreeSet<i64> = values.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &values, |b, values| {
            b.iter(|| {
                let mut set = set.clone();
                for &value in values {
                    set.remove(&value);
                }
                black_box(set.is_empty())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inserts, bench_contains, bench_removes);
criterion_main!(benches);
