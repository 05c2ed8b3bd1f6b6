//! PackBits integration tests.

use tiffstream_packbits::{PackBitsConfig, pack, pack_stream, unpack, unpack_stream};

/// Deterministic bytes with mixed run lengths.
fn runny_noise(len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    let mut seed: u64 = 0x9E3779B97F4A7C15;
    while data.len() < len {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let byte = (seed >> 32) as u8;
        let run = ((seed >> 40) % 7 + 1) as usize;
        for _ in 0..run.min(len - data.len()) {
            data.push(byte);
        }
    }
    data
}

#[test]
fn test_roundtrip_reference_stream() {
    let original = b"111aaaaaaaabbbdccc5555555555s";
    let packed = pack(original, PackBitsConfig::TIFF).expect("packing failed");
    assert_eq!(
        packed,
        b"\xfe\x31\xf9\x61\xfe\x62\x00\x64\xfe\x63\xf7\x35\x00\x73"
    );
    assert_eq!(unpack(&packed).expect("unpacking failed"), original);
}

#[test]
fn test_roundtrip_mixed_runs() {
    let original = runny_noise(100_000);
    for config in [PackBitsConfig::TIFF, PackBitsConfig::PDF] {
        let packed = pack(&original, config).expect("packing failed");
        assert_eq!(unpack(&packed).expect("unpacking failed"), original);
    }
}

#[test]
fn test_roundtrip_pathological_shapes() {
    let cases: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0u8],
        vec![7u8; 2],
        vec![7u8; 3],
        vec![7u8; 127],
        vec![7u8; 128],
        vec![7u8; 129],
        vec![7u8; 256],
        (0..=255u8).collect(),
        (0..=255u8).flat_map(|b| [b, b]).collect(),
        b"ab".repeat(300),
    ];
    for original in cases {
        let packed = pack(&original, PackBitsConfig::TIFF).expect("packing failed");
        assert_eq!(
            unpack(&packed).expect("unpacking failed"),
            original,
            "length {}",
            original.len()
        );
    }
}

#[test]
fn test_streaming_matches_slice_api() {
    let original = runny_noise(10_000);
    let packed = pack(&original, PackBitsConfig::TIFF).expect("packing failed");

    let mut streamed = Vec::new();
    let written = pack_stream(&original[..], &mut streamed, PackBitsConfig::TIFF)
        .expect("packing failed");
    assert_eq!(streamed, packed);
    assert_eq!(written, packed.len() as u64);

    let mut unpacked = Vec::new();
    let written = unpack_stream(&packed[..], &mut unpacked).expect("unpacking failed");
    assert_eq!(unpacked, original);
    assert_eq!(written, original.len() as u64);
}

#[test]
fn test_packed_size_bound() {
    // Worst case is one header per 128 literal bytes.
    let original: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
    let packed = pack(&original, PackBitsConfig::TIFF).expect("packing failed");
    assert!(packed.len() <= original.len() + original.len().div_ceil(128));
}
