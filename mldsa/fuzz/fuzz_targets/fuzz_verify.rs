//! Fuzz target for ML-DSA verification on untrusted input.
//!
//! Arbitrary public keys, signatures and μ values must never panic, and
//! malformed lengths must always be rejected.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mldsa::fips202::Native;
use mldsa::sign::{verify_extmu, verify_internal};
use mldsa::{ParameterSet, Params44, Params65, Params87};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    pk: Vec<u8>,
    signature: Vec<u8>,
    message: Vec<u8>,
    mu: [u8; 64],
    variant: u8,
}

fn verify<P: ParameterSet>(input: &VerifyInput) {
    let ok = verify_internal::<P, Native>(&input.pk, &[&input.message[..]], &input.signature);
    let ok_mu = verify_extmu::<P, Native>(&input.pk, &input.mu, &input.signature);
    if input.pk.len() != P::PK_BYTES || input.signature.len() != P::SIG_BYTES {
        assert!(!ok && !ok_mu, "{}: wrong-length input accepted", P::NAME);
    }
}

fuzz_target!(|input: VerifyInput| {
    if input.message.len() > 10000 {
        return;
    }

    match input.variant % 3 {
        0 => verify::<Params44>(&input),
        1 => verify::<Params65>(&input),
        _ => verify::<Params87>(&input),
    }
});
