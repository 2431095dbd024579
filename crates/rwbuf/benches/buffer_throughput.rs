//! Benchmark – `rwbuf::ByteBuffer` field and bulk throughput
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rwbuf::{BufferOptions, ByteBuffer};

/// Writes `count` frames of a 2 byte tag, 4 byte length, and 8 byte value,
/// then reads them all back. Returns the sum of the values so the work
/// cannot be optimised away.
fn fields_round_trip(count: u32, growth: usize) -> u64 {
    let mut buf = ByteBuffer::with_options(BufferOptions {
        growth_factor: growth,
        initial_capacity: 0,
        ..BufferOptions::default()
    });
    for i in 0..count {
        buf.write2(7).unwrap();
        buf.write4(i).unwrap();
        buf.write8(u64::from(i) * 3).unwrap();
    }
    let mut sum = 0;
    for _ in 0..count {
        buf.read2().unwrap();
        buf.read4().unwrap();
        sum += buf.read8().unwrap();
    }
    sum
}

fn lines_round_trip(text: &[u8]) -> usize {
    let mut buf = ByteBuffer::from(text);
    buf.lines().map(|line| line.unwrap().len()).sum()
}

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("fields_round_trip");
    let count = 10_000;
    group.throughput(Throughput::Bytes(u64::from(count) * 14));
    for &growth in &[16usize, 512, 64 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(growth), &growth, |b, &g| {
            b.iter(|| black_box(fields_round_trip(black_box(count), g)));
        });
    }
    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let text: Vec<u8> = (0..5_000)
        .flat_map(|i| format!("line number {i} with some padding\r\n").into_bytes())
        .collect();
    let mut group = c.benchmark_group("read_line");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("crlf", |b| b.iter(|| black_box(lines_round_trip(black_box(&text)))));
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let payload = vec![0x5Au8; 1 << 20];
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for &chunk in &[512usize, 8192] {
        group.bench_with_input(BenchmarkId::new("read_write", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut buf = ByteBuffer::with_options(BufferOptions {
                    copy_chunk: chunk,
                    ..BufferOptions::default()
                });
                buf.read_from(black_box(payload.as_slice())).unwrap();
                let mut sink = Vec::with_capacity(payload.len());
                black_box(buf.write_to(&mut sink).unwrap())
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_fields, bench_lines, bench_transfer }
criterion_main!(benches);
