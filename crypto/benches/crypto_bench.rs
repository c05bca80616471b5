use criterion::{black_box, criterion_group, criterion_main, Criterion};

use veriseal_crypto::{decrypt_symmetric, encrypt_symmetric, generate_keypair, open, seal};
use veriseal_types::UserKey;

fn seal_bench(c: &mut Criterion) {
    let kp = generate_keypair();
    let payload = vec![0xABu8; 1024];

    c.bench_function("seal_1KB", |b| {
        b.iter(|| seal(black_box(&payload), &kp.public).unwrap())
    });
}

fn open_bench(c: &mut Criterion) {
    let kp = generate_keypair();
    let payload = vec![0xCDu8; 1024];
    let sealed = seal(&payload, &kp.public).unwrap();

    c.bench_function("open_1KB", |b| {
        b.iter(|| open(black_box(&sealed), &kp).unwrap())
    });
}

fn symmetric_roundtrip_bench(c: &mut Criterion) {
    let key = UserKey::from_bytes([7u8; 32]);
    let payload = vec![0xEFu8; 1024];
    let ciphertext = encrypt_symmetric(&payload, &key).unwrap();

    c.bench_function("encrypt_symmetric_1KB", |b| {
        b.iter(|| encrypt_symmetric(black_box(&payload), &key).unwrap())
    });
    c.bench_function("decrypt_symmetric_1KB", |b| {
        b.iter(|| decrypt_symmetric(black_box(&ciphertext), &key).unwrap())
    });
}

fn keypair_generation_bench(c: &mut Criterion) {
    c.bench_function("keypair_generate", |b| b.iter(generate_keypair));
}

criterion_group!(
    benches,
    seal_bench,
    open_bench,
    symmetric_roundtrip_bench,
    keypair_generation_bench
);
criterion_main!(benches);
