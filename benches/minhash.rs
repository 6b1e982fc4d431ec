//! Throughput benchmarks for MinHash signature computation and
//! bucketization.
//!
//! Run with: `cargo bench --bench minhash`

use corpussift::minhash::{bucketize, compute_signature, MinHashConfig};
use corpussift::textprep::prepare_ngrams;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn make_document(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{}", i % 500))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_signature(c: &mut Criterion) {
    let config = MinHashConfig::default();
    let mut group = c.benchmark_group("minhash_signature");
    for &words in &[50usize, 500, 5_000] {
        let doc = make_document(words);
        let ngrams = prepare_ngrams(&doc, config.ngram, config.normalize).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(words), &ngrams, |b, ngrams| {
            b.iter(|| black_box(compute_signature(black_box(ngrams), &config)));
        });
    }
    group.finish();
}

fn bench_bucketize(c: &mut Criterion) {
    let config = MinHashConfig::default();
    let doc = make_document(500);
    let ngrams = prepare_ngrams(&doc, config.ngram, config.normalize).unwrap();
    let sig = compute_signature(&ngrams, &config);
    c.bench_function("minhash_bucketize", |b| {
        b.iter(|| black_box(bucketize(black_box(&sig))));
    });
}

criterion_group!(benches, bench_signature, bench_bucketize);
criterion_main!(benches);
