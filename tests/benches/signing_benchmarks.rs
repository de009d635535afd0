//! Criterion benchmarks for the signing engine hot paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stark_crypto::{hash2, FieldElement};
use stark_signing::api::{
    hash_transfer, private_key_from_seed, private_key_to_public_key_xy, sign, verify_signature,
};

const SEED: &str = "stark-tests deterministic signer seed";
const TRANSFER_JSON: &str = r#"
{
    "nonce": "0",
    "public_key": "0x01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca",
    "expiration_timestamp": "0",
    "sender_position_id": "0",
    "receiver_public_key": "0x0",
    "receiver_position_id": "0",
    "amount": "0",
    "asset_id": "0xa"
}
"#;

fn bench_pedersen(c: &mut Criterion) {
    let a = FieldElement::from_u64(0x1234_5678_9abc_def0);
    let b = FieldElement::from_u64(0x0fed_cba9_8765_4321);
    // Warm the window tables outside the measurement.
    let _ = hash2(&a, &b);
    c.bench_function("pedersen_hash2", |bencher| {
        bencher.iter(|| hash2(black_box(&a), black_box(&b)))
    });
}

fn bench_hash_transfer(c: &mut Criterion) {
    let _ = hash_transfer(TRANSFER_JSON);
    c.bench_function("hash_transfer", |bencher| {
        bencher.iter(|| hash_transfer(black_box(TRANSFER_JSON)).unwrap())
    });
}

fn bench_sign(c: &mut Criterion) {
    let private_key = private_key_from_seed(SEED).unwrap();
    let hash = hash_transfer(TRANSFER_JSON).unwrap();
    c.bench_function("sign", |bencher| {
        bencher.iter(|| sign(black_box(&private_key), black_box(&hash)).unwrap())
    });
}

fn bench_verify(c: &mut Criterion) {
    let private_key = private_key_from_seed(SEED).unwrap();
    let public_key = private_key_to_public_key_xy(&private_key).unwrap();
    let hash = hash_transfer(TRANSFER_JSON).unwrap();
    let sig = sign(&private_key, &hash).unwrap();
    c.bench_function("verify", |bencher| {
        bencher.iter(|| {
            verify_signature(
                black_box(&sig.r),
                black_box(&sig.s),
                &public_key.x,
                &public_key.y,
                &hash,
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_pedersen,
    bench_hash_transfer,
    bench_sign,
    bench_verify
);
criterion_main!(benches);
