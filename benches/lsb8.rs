extern crate criterion;
extern crate giflzw;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use giflzw::{compress, decompress};

fn synthetic(len: usize, alphabet: u8) -> Vec<u8> {
    fastrand::seed(0x5eed_0000 + u64::from(alphabet));
    (0..len).map(|_| fastrand::u8(0..alphabet)).collect()
}

pub fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode-lsb8");
    for &alphabet in &[4u8, 64] {
        let data = synthetic(1 << 18, alphabet);
        let id = BenchmarkId::new("alphabet", alphabet);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(id, &data, |b, data| {
            b.iter(|| compress(black_box(data)).expect("Error"))
        });
    }
    group.finish();
}

pub fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode-lsb8");
    for &alphabet in &[4u8, 64] {
        let data = synthetic(1 << 18, alphabet);
        let compressed = compress(&data).expect("Error");
        let id = BenchmarkId::new("alphabet", alphabet);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(id, &compressed, |b, compressed| {
            b.iter(|| decompress(black_box(compressed)).expect("Error"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
