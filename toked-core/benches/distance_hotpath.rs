use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toked_core::Config;

fn bench_distance(c: &mut Criterion) {
    let config = Config::default();

    let short = ("dog", "dogs");
    let medium = ("the quick brown fox", "the quick brown fix");
    let long = (
        "the quick brown fox jumps over the lazy dog while the cat watches",
        "the quick brown fox jump over the lazy dog while a cat watches on",
    );

    c.bench_function("distance/short", |b| {
        b.iter(|| black_box(config.distance(black_box(short.0), black_box(short.1))));
    });

    c.bench_function("distance/medium", |b| {
        b.iter(|| black_box(config.distance(black_box(medium.0), black_box(medium.1))));
    });

    c.bench_function("distance/long", |b| {
        b.iter(|| black_box(config.distance(black_box(long.0), black_box(long.1))));
    });
}

criterion_group!(benches, bench_distance);
criterion_main!(benches);
