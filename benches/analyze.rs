//! benches/analyze.rs
//! Fingerprinting cost by buffer size, single and batched.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use spadeace::FileFingerprintAnalyzer;
use std::hint::black_box;

fn random_buffer(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

fn analyze_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = FileFingerprintAnalyzer::new();

    for &size in &[1_024usize, 64 * 1_024, 1_024 * 1_024] {
        let data = random_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("random", size), &data, |b, data| {
            b.iter(|| black_box(analyzer.analyze(black_box(data))));
        });
    }

    #[cfg(feature = "batch-ops")]
    {
        let buffers: Vec<Vec<u8>> = (0..32).map(|_| random_buffer(64 * 1_024)).collect();
        let batch: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
        group.throughput(Throughput::Bytes(32 * 64 * 1_024));
        group.bench_function("batch_32x64k", |b| {
            b.iter(|| black_box(spadeace::analyze_batch(black_box(&batch))));
        });
    }

    group.finish();
}

criterion_group!(benches, analyze_benches);
criterion_main!(benches);
