//! Benchmarks for WEAT operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weat::stats::{
    effect_size, permutation_test, statistic, AssociationCache, Partitions, PermutationOptions,
};
use weat::{Embeddings, VectorManager, Weat, WordSet};

// =============================================================================
// Synthetic test setup
// =============================================================================

struct Fixture {
    store: Embeddings,
    x: WordSet,
    y: WordSet,
    a: WordSet,
    b: WordSet,
}

fn fixture(targets: usize, attributes: usize) -> Fixture {
    let names = |prefix: &str, n: usize| -> WordSet { (0..n).map(|i| format!("{}{}", prefix, i)).collect() };
    let x = names("x", targets);
    let y = names("y", targets);
    let a = names("a", attributes);
    let b = names("b", attributes);
    let store = VectorManager::with_seed(300, 42).embeddings(x.iter().chain(&y).chain(&a).chain(&b));
    Fixture { store, x, y, a, b }
}

fn benchmark_vector_generation(c: &mut Criterion) {
    let vm = VectorManager::new(300);

    c.bench_function("vector_manager_vector", |b| {
        b.iter(|| vm.vector(black_box("test_word")))
    });
}

fn benchmark_association(c: &mut Criterion) {
    let f = fixture(8, 25);

    c.bench_function("sigma_cold_25_attributes", |b| {
        b.iter(|| {
            let cache = AssociationCache::new(&f.store, &f.a, &f.b).unwrap();
            cache.sigma(black_box("x0")).unwrap()
        })
    });

    let cache = AssociationCache::new(&f.store, &f.a, &f.b).unwrap();
    cache.warm(&f.x).unwrap();
    c.bench_function("sigma_warm", |b| b.iter(|| cache.sigma(black_box("x3")).unwrap()));
}

fn benchmark_statistic(c: &mut Criterion) {
    let f = fixture(8, 8);
    let cache = AssociationCache::new(&f.store, &f.a, &f.b).unwrap();
    cache.warm(f.x.iter().chain(&f.y)).unwrap();

    c.bench_function("statistic_8_vs_8", |b| {
        b.iter(|| statistic(&cache, black_box(f.x.as_slice()), black_box(f.y.as_slice())).unwrap())
    });

    c.bench_function("effect_size_8_vs_8", |b| {
        b.iter(|| effect_size(&cache, black_box(f.x.as_slice()), black_box(f.y.as_slice())).unwrap())
    });
}

fn benchmark_partitions(c: &mut Criterion) {
    let f = fixture(8, 1);

    c.bench_function("enumerate_partitions_16_choose_8", |b| {
        b.iter(|| {
            let mut partitions = Partitions::new(&f.x, &f.y).unwrap();
            let mut n = 0u64;
            while let Some((g1, _)) = partitions.advance() {
                n += g1.len() as u64;
            }
            n
        })
    });
}

fn benchmark_permutation_test(c: &mut Criterion) {
    let f = fixture(8, 8);
    let cache = AssociationCache::new(&f.store, &f.a, &f.b).unwrap();

    let mut group = c.benchmark_group("permutation_test_16_choose_8");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter(|| permutation_test(&cache, &f.x, &f.y, &PermutationOptions::default()).unwrap())
    });
    group.bench_function("parallel", |b| {
        let options = PermutationOptions {
            parallel: true,
            deadline: None,
        };
        b.iter(|| permutation_test(&cache, &f.x, &f.y, &options).unwrap())
    });
    group.finish();
}

fn benchmark_full_run(c: &mut Criterion) {
    let f = fixture(6, 6);
    let weat = Weat::new(&f.store);

    c.bench_function("weat_run_6_vs_6", |b| {
        b.iter(|| weat.run(&f.x, &f.y, &f.a, &f.b).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_vector_generation,
    benchmark_association,
    benchmark_statistic,
    benchmark_partitions,
    benchmark_permutation_test,
    benchmark_full_run,
);
criterion_main!(benches);
