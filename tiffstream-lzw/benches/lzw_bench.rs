//! Throughput benchmarks for the LZW codec across input patterns and
//! framing dialects.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tiffstream_lzw::{LzwConfig, compress, decompress};

/// Generate test data patterns for benchmarking.
mod test_data {
    /// Uniform data - all bytes are the same (best compression).
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression).
    pub fn random(size: usize) -> Vec<u8> {
        // Linear congruential generator for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario.
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

const SIZE: usize = 256 * 1024;

fn patterns() -> [(&'static str, Vec<u8>); 3] {
    [
        ("uniform", test_data::uniform(SIZE)),
        ("random", test_data::random(SIZE)),
        ("text", test_data::text_like(SIZE)),
    ]
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for (dialect_name, config) in [("tiff", LzwConfig::TIFF), ("pdf", LzwConfig::PDF)] {
        for (pattern_name, data) in patterns() {
            let id = format!("{}/{}", dialect_name, pattern_name);
            group.throughput(Throughput::Bytes(SIZE as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| {
                    let packed = compress(black_box(data), config).unwrap();
                    black_box(packed);
                });
            });
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for (dialect_name, config) in [("tiff", LzwConfig::TIFF), ("pdf", LzwConfig::PDF)] {
        for (pattern_name, data) in patterns() {
            let packed = compress(&data, config).unwrap();
            let id = format!("{}/{}", dialect_name, pattern_name);
            group.throughput(Throughput::Bytes(SIZE as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &packed, |b, packed| {
                b.iter(|| {
                    let unpacked = decompress(black_box(packed), config).unwrap();
                    black_box(unpacked);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
