#![allow(missing_docs)]
//! Benchmarks for the MRZ library.
//!
//! Measures detection, decoding, encoding and batch decoding of the ICAO
//! specimen documents using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mrzc::batch::parse_batch;
use mrzc::cleaner::clean;
use mrzc::{parse, MrzFormat, RecoveryMode};

const PASSPORT: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                        L898902C36UTO7408122F1204159ZE184226B<<<<<10";

const TD1: &str = "I<UTOD231458907<<<<<<<<<<<<<<<\n\
                   7408122F1204159UTO<<<<<<<<<<<6\n\
                   ERIKSSON<<ANNA<MARIA<<<<<<<<<<";

/// Build `count` inputs alternating between the passport and TD1 specimens.
fn mixed_inputs(count: usize) -> Vec<&'static str> {
    (0..count)
        .map(|i| if i % 2 == 0 { PASSPORT } else { TD1 })
        .collect()
}

fn benchmark_detect(c: &mut Criterion) {
    c.bench_function("detect_td1", |b| {
        b.iter(|| MrzFormat::detect(black_box(TD1)));
    });
}

/// Benchmark decoding a TD3 passport.
fn benchmark_decode_passport(c: &mut Criterion) {
    c.bench_function("decode_passport", |b| {
        b.iter(|| parse(black_box(PASSPORT)));
    });
}

/// Benchmark decoding a TD1 card.
fn benchmark_decode_td1(c: &mut Criterion) {
    c.bench_function("decode_td1", |b| {
        b.iter(|| parse(black_box(TD1)));
    });
}

/// Benchmark re-encoding a decoded passport.
fn benchmark_encode_passport(c: &mut Criterion) {
    let record = parse(PASSPORT).unwrap_or_else(|e| panic!("specimen must decode: {e}"));
    c.bench_function("encode_passport", |b| {
        b.iter(|| black_box(&record).to_mrz());
    });
}

fn benchmark_clean(c: &mut Criterion) {
    let ocr = format!("passport\n{}\n\n", PASSPORT.replacen("<<<<<<<<", "<<<K<<<<", 1));
    c.bench_function("clean_ocr_passport", |b| {
        b.iter(|| clean(black_box(&ocr)));
    });
}

/// Benchmark sequential against parallel decoding of 10,000 documents.
fn benchmark_batch_10k(c: &mut Criterion) {
    let inputs = mixed_inputs(10_000);

    c.bench_function("decode_10k_sequential", |b| {
        b.iter(|| {
            black_box(&inputs)
                .iter()
                .filter(|mrz| parse(mrz).is_ok())
                .count()
        });
    });

    c.bench_function("decode_10k_parallel", |b| {
        b.iter(|| {
            parse_batch(black_box(&inputs), RecoveryMode::Strict)
                .iter()
                .filter(|result| result.is_ok())
                .count()
        });
    });
}

criterion_group!(
    benches,
    benchmark_detect,
    benchmark_decode_passport,
    benchmark_decode_td1,
    benchmark_encode_passport,
    benchmark_clean,
    benchmark_batch_10k,
);
criterion_main!(benches);
