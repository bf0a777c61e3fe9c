use ghash::universal_hash::{KeyInit, UniversalHash};
use sm4gcm::mac::{GHash, gf128_mul};

/// Deterministic filler so each test is reproducible.
fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

fn reference(h: &[u8; 16], sections: &[&[u8]]) -> [u8; 16] {
    let mut ghash = ghash::GHash::new(&(*h).into());
    for section in sections {
        ghash.update_padded(section);
    }
    ghash.finalize().into()
}

// -------------------------------------------------------
// 1. FIELD MULTIPLICATION
// -------------------------------------------------------

#[test]
fn gf128_mul_nist_example() {
    let x = [
        0x03, 0x88, 0xda, 0xce, 0x60, 0xb6, 0xa3, 0x92, 0xf3, 0x28, 0xc2, 0xb9, 0x71, 0xb2, 0xfe,
        0x78,
    ];
    let h = [
        0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34, 0x2b,
        0x2e,
    ];
    let expected = [
        0x5e, 0x2e, 0xc7, 0x46, 0x91, 0x70, 0x62, 0x88, 0x2c, 0x85, 0xb0, 0x68, 0x53, 0x53, 0xde,
        0xb7,
    ];

    assert_eq!(gf128_mul(&x, &h), expected);
    assert_eq!(gf128_mul(&h, &x), expected);
}

#[test]
fn gf128_mul_identity_and_zero() {
    let mut one = [0u8; 16];
    one[0] = 0x80;

    let x: [u8; 16] = pattern(16, 7).try_into().unwrap();
    assert_eq!(gf128_mul(&x, &one), x);
    assert_eq!(gf128_mul(&x, &[0u8; 16]), [0u8; 16]);
}

#[test]
fn gf128_mul_is_commutative_and_distributive() {
    for seed in 0..16u8 {
        let a: [u8; 16] = pattern(16, seed).try_into().unwrap();
        let b: [u8; 16] = pattern(16, seed.wrapping_mul(13).wrapping_add(1)).try_into().unwrap();
        let c: [u8; 16] = pattern(16, seed ^ 0x5a).try_into().unwrap();

        assert_eq!(gf128_mul(&a, &b), gf128_mul(&b, &a));

        let mut b_plus_c = b;
        for (x, y) in b_plus_c.iter_mut().zip(&c) {
            *x ^= y;
        }
        let mut ab_plus_ac = gf128_mul(&a, &b);
        for (x, y) in ab_plus_ac.iter_mut().zip(&gf128_mul(&a, &c)) {
            *x ^= y;
        }
        assert_eq!(gf128_mul(&a, &b_plus_c), ab_plus_ac);
    }
}

// -------------------------------------------------------
// 2. ACCUMULATOR AGAINST THE RustCrypto GHASH
// -------------------------------------------------------

#[test]
fn ghash_matches_reference_for_single_sections() {
    let h: [u8; 16] = pattern(16, 0x42).try_into().unwrap();

    for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 1000] {
        let data = pattern(len, len as u8);

        let mut ours = GHash::new(&h);
        ours.update_padded(&data);

        assert_eq!(ours.finalize(), reference(&h, &[&data]), "len {len}");
    }
}

#[test]
fn ghash_matches_reference_for_two_sections() {
    let h: [u8; 16] = pattern(16, 0x99).try_into().unwrap();
    let aad = pattern(20, 1);
    let ct = pattern(45, 2);

    let mut ours = GHash::new(&h);
    ours.update_padded(&aad);
    ours.update_padded(&ct);

    assert_eq!(ours.finalize(), reference(&h, &[&aad, &ct]));
}

// -------------------------------------------------------
// 3. STREAMING
// -------------------------------------------------------

#[test]
fn ghash_chunking_does_not_change_result() {
    let h: [u8; 16] = pattern(16, 3).try_into().unwrap();
    let data = pattern(257, 9);

    let mut whole = GHash::new(&h);
    whole.update_padded(&data);
    let expected = whole.finalize();

    for chunk in [1usize, 3, 7, 15, 16, 17, 64] {
        let mut ghash = GHash::new(&h);
        for piece in data.chunks(chunk) {
            ghash.update(piece);
        }
        ghash.pad();
        assert_eq!(ghash.finalize(), expected, "chunk {chunk}");
    }
}

#[test]
fn ghash_pad_is_idempotent_on_block_boundary() {
    let h: [u8; 16] = pattern(16, 5).try_into().unwrap();
    let data = pattern(32, 0);

    let mut a = GHash::new(&h);
    a.update(&data);
    let before = a.state();
    a.pad();
    a.pad();

    assert_eq!(a.state(), before);
}

#[test]
fn ghash_update_block_ends_pending_section() {
    let h: [u8; 16] = pattern(16, 11).try_into().unwrap();
    let section = pattern(5, 1);
    let block: [u8; 16] = pattern(16, 2).try_into().unwrap();

    let mut a = GHash::new(&h);
    a.update(&section);
    a.update_block(&block);

    assert_eq!(a.finalize(), reference(&h, &[&section, &block]));
}
