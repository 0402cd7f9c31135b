//! Performance benchmarks for the frame decoder pipeline.
//!
//! The decoder is fed one byte at a time by the reader loop, so per-byte
//! overhead is what matters here more than bulk throughput.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench decoder_bench
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vport_protocol::{FrameDecoder, extract_card_id};

/// A well-formed 14-byte reference frame carrying "ABCDEF78".
fn reference_frame() -> Vec<u8> {
    let mut data = vec![0x02, 0x30, 0x31];
    data.extend_from_slice(b"ABCDEF78");
    data.extend_from_slice(&[0x32, 0x33, 0x03]);
    data
}

/// A stream of frames interleaved with inter-frame noise.
fn noisy_stream(frames: usize) -> Vec<u8> {
    let frame = reference_frame();
    let mut stream = Vec::with_capacity(frames * (frame.len() + 4));
    for i in 0..frames {
        stream.extend_from_slice(&[0x00, i as u8, 0xFF]);
        stream.extend_from_slice(&frame);
    }
    stream
}

fn bench_push_bytewise(c: &mut Criterion) {
    let stream = noisy_stream(100);

    let mut group = c.benchmark_group("decode_bytewise");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("noisy_stream_100_frames", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::new();
            let mut count = 0usize;
            for &byte in &stream {
                if decoder.push(black_box(byte)).is_some() {
                    count += 1;
                }
            }
            black_box(count)
        });
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let frame_bytes = reference_frame();

    let mut group = c.benchmark_group("decode_and_validate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("single_frame", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::new();
            let frame = decoder.feed(black_box(&frame_bytes)).pop().unwrap();
            black_box(extract_card_id(&frame).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_push_bytewise, bench_full_pipeline);
criterion_main!(benches);
