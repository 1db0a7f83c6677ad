//! Criterion micro-benchmarks for replay buffer store/sample.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warren_replay::ReplayBuffer;

const STATE_LEN: usize = 12;

fn filled_buffer(capacity: usize) -> ReplayBuffer {
    let buffer = ReplayBuffer::new(capacity, STATE_LEN, 1, 7).unwrap();
    let state = [0.5f32; STATE_LEN];
    for i in 0..capacity {
        buffer
            .store(&state, &[0.0], i as f32, &state, false)
            .unwrap();
    }
    buffer
}

/// Benchmark: 10K stores into a full 1K-slot ring (pure overwrite path).
fn bench_store_10k(c: &mut Criterion) {
    let buffer = filled_buffer(1_000);
    let state = [0.5f32; STATE_LEN];
    c.bench_function("buffer_store_10k", |b| {
        b.iter(|| {
            for i in 0..10_000 {
                buffer
                    .store(&state, &[1.0], i as f32, &state, i % 100 == 0)
                    .unwrap();
            }
        });
    });
}

/// Benchmark: 1K minibatches of 64 from a full 10K-slot ring.
fn bench_sample_64_x1k(c: &mut Criterion) {
    let buffer = filled_buffer(10_000);
    c.bench_function("buffer_sample_64_x1k", |b| {
        b.iter(|| {
            for _ in 0..1_000 {
                let batch = buffer.sample(64).unwrap();
                black_box(&batch);
            }
        });
    });
}

criterion_group!(benches, bench_store_10k, bench_sample_64_x1k);
criterion_main!(benches);
