use criterion::{Criterion, criterion_group, criterion_main};
use cryptogram_core::*;
use std::hint::black_box;

const QUOTE: &str = "It was the best of times, it was the worst of times, it was the age of \
                     wisdom, it was the age of foolishness.";

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for policy in [KeyPolicy::Permissive, KeyPolicy::Derangement] {
        group.bench_function(format!("key/{policy:?}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomKeyGenerator::new(seed, policy).generate(black_box(QUOTE)))
            })
        });
    }

    group.bench_function("puzzle", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(PuzzleState::new_at(
                black_box(QUOTE),
                GameConfig::default(),
                seed,
                Timestamp::default(),
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
