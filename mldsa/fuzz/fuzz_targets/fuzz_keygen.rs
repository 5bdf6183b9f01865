//! Fuzz target for ML-DSA key generation.
//!
//! KeyGen must be deterministic in its seed, produce keys of the declared
//! sizes, and agree between the native and serial FIPS 202 suites.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mldsa::fips202::{Native, Serial};
use mldsa::sign::keygen_internal;
use mldsa::{ParameterSet, Params44, Params65, Params87};

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    seed: [u8; 32],
    variant: u8, // 0 = ML-DSA-44, 1 = ML-DSA-65, 2 = ML-DSA-87
}

fn check<P: ParameterSet>(seed: &[u8; 32]) {
    let (sk, pk) = keygen_internal::<P, Native>(seed);
    let (sk2, pk2) = keygen_internal::<P, Serial>(seed);
    assert_eq!(sk, sk2, "{}: suites disagree on sk", P::NAME);
    assert_eq!(pk, pk2, "{}: suites disagree on pk", P::NAME);
    assert_eq!(pk.len(), P::PK_BYTES, "{} pk size mismatch", P::NAME);
    assert_eq!(sk.len(), P::SK_BYTES, "{} sk size mismatch", P::NAME);
}

fuzz_target!(|input: KeyGenInput| {
    match input.variant % 3 {
        0 => check::<Params44>(&input.seed),
        1 => check::<Params65>(&input.seed),
        _ => check::<Params87>(&input.seed),
    }
});
