//! FIPS 202 Benchmarks
//!
//! Single-lane permutation and sponges against the four-way batch on every
//! backend available on this machine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mldsa_fips202::{
    f1600, shake128, shake256, Backend, Shake128x4, Xof, XofX4, LANES, SHAKE128_RATE,
};

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Keccak-f[1600]");

    group.throughput(Throughput::Elements(1));
    group.bench_function("x1", |b| {
        let mut state = [0u64; LANES];
        b.iter(|| f1600(black_box(&mut state)))
    });

    group.throughput(Throughput::Elements(4));
    for backend in Backend::available() {
        group.bench_function(BenchmarkId::new("x4", backend), |b| {
            let mut states = [[0u64; LANES]; 4];
            b.iter(|| backend.permute_x4(black_box(&mut states)))
        });
    }

    group.finish();
}

fn bench_shake(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHAKE");
    let input = [0xA5u8; 1024];
    let mut out = [0u8; 1024];

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("SHAKE128 1 KiB", |b| {
        b.iter(|| shake128(black_box(&mut out), black_box(&input)))
    });
    group.bench_function("SHAKE256 1 KiB", |b| {
        b.iter(|| shake256(black_box(&mut out), black_box(&input)))
    });

    group.finish();
}

/// Four ExpandA-sized SHAKE128 streams: one batch versus four sponges.
fn bench_expand_like(c: &mut Criterion) {
    const BLOCKS: usize = 5;
    let mut group = c.benchmark_group("SHAKE128 4 x 34-byte seed");
    group.throughput(Throughput::Bytes((4 * BLOCKS * SHAKE128_RATE) as u64));

    let seed = [7u8; 34];
    let lane: &[u8] = &seed;

    group.bench_function("x4 batch", |b| {
        let mut outs = [[0u8; BLOCKS * SHAKE128_RATE]; 4];
        b.iter(|| {
            let mut xof = <Shake128x4 as XofX4>::init();
            xof.absorb_once([lane; 4]);
            let [o0, o1, o2, o3] = &mut outs;
            xof.squeeze_blocks([&mut o0[..], &mut o1[..], &mut o2[..], &mut o3[..]], BLOCKS);
            xof.release();
            black_box(&outs);
        })
    });

    group.bench_function("4 x sequential", |b| {
        let mut outs = [[0u8; BLOCKS * SHAKE128_RATE]; 4];
        b.iter(|| {
            for out in &mut outs {
                let mut xof = <mldsa_fips202::Shake128 as Xof>::init();
                xof.absorb(&seed);
                xof.finalize();
                xof.squeeze(out);
                xof.release();
            }
            black_box(&outs);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_permutation, bench_shake, bench_expand_like);
criterion_main!(benches);
