use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use muhash::accumulator::muhash::MuHash3072;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Random byte-strings about the size of a serialized P2WPKH utxo.
fn generate_test_elements(count: usize, seed: u64) -> Vec<[u8; 70]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut bytes = [0u8; 70];
            rng.fill(&mut bytes[..]);
            bytes
        })
        .collect()
}

fn muhash_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("muhash_updates");

    for count in [1, 100].iter() {
        let elements = generate_test_elements(*count, 42);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("insert", count), count, |b, _| {
            b.iter(|| {
                let mut acc = MuHash3072::new();
                acc.insert_all(black_box(&elements));
                black_box(acc)
            });
        });
        group.bench_with_input(BenchmarkId::new("remove", count), count, |b, _| {
            b.iter(|| {
                let mut acc = MuHash3072::new();
                for element in elements.iter() {
                    acc.remove(black_box(element));
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn muhash_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("muhash_combine");

    let left: MuHash3072 = generate_test_elements(10, 1).iter().collect();
    let right: MuHash3072 = generate_test_elements(10, 2).iter().collect();
    group.bench_function("combine", |b| {
        b.iter(|| {
            let mut acc = left.clone();
            acc.combine(black_box(&right));
            black_box(acc)
        });
    });
    group.finish();
}

fn muhash_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("muhash_finalize");

    let mut acc: MuHash3072 = generate_test_elements(10, 3).iter().collect();
    acc.remove(b"spent");
    group.bench_function("finalize", |b| {
        b.iter(|| black_box(acc.finalize()));
    });
    group.finish();
}

criterion_group!(benches, muhash_updates, muhash_combine, muhash_finalize);
criterion_main!(benches);
