use criterion::{Criterion, criterion_group, criterion_main};
use ghash::universal_hash::{KeyInit, UniversalHash};
use std::hint::black_box;

const H: [u8; 16] = [0x66; 16];

pub fn bench_ghash(c: &mut Criterion) {
    let data = [0u8; 1024];

    c.bench_function("sm4gcm::GHash 1024 bytes", |b| {
        b.iter(|| {
            let mut ghash = sm4gcm::mac::GHash::new(&H);
            ghash.update_padded(black_box(&data));
            ghash.finalize()
        })
    });
}

pub fn bench_ghash_crate(c: &mut Criterion) {
    let data = [0u8; 1024];

    c.bench_function("ghash::GHash 1024 bytes", |b| {
        b.iter(|| {
            let mut ghash = ghash::GHash::new(&H.into());
            ghash.update_padded(black_box(&data));
            ghash.finalize()
        })
    });
}

criterion_group!(benches, bench_ghash, bench_ghash_crate);
criterion_main!(benches);
