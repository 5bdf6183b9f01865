//! Fuzz target for ML-DSA roundtrip (keygen -> sign -> verify).
//!
//! A fresh signature must verify under its own context, fail under a
//! modified message, and be reproducible from the same `rnd`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mldsa::fips202::Native;
use mldsa::sign::{keygen_internal, pure_header, sign_internal, verify_internal};
use mldsa::{ParameterSet, Params44, Params65, Params87};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
    flip: Option<(usize, u8)>,
    variant: u8,
}

fn roundtrip<P: ParameterSet>(input: &RoundtripInput) {
    let Ok(header) = pure_header(&input.context) else {
        assert!(input.context.len() > 255);
        return;
    };
    let (sk, pk) = keygen_internal::<P, Native>(&input.seed);
    let message: [&[u8]; 3] = [&header[..], &input.context[..], &input.message[..]];

    let sig = sign_internal::<P, Native>(&sk, &message, &input.rnd).expect("signing failed");
    assert_eq!(sig.len(), P::SIG_BYTES);
    assert!(
        verify_internal::<P, Native>(&pk, &message, &sig),
        "Roundtrip failed: valid signature rejected for {}",
        P::NAME
    );

    let again = sign_internal::<P, Native>(&sk, &message, &input.rnd).expect("signing failed");
    assert_eq!(sig, again, "Sign should be deterministic with same rnd");

    if let Some((position, xor_value)) = input.flip {
        if xor_value != 0 && !input.message.is_empty() {
            let mut tampered = input.message.clone();
            tampered[position % tampered.len()] ^= xor_value;
            let message: [&[u8]; 3] = [&header[..], &input.context[..], &tampered[..]];
            assert!(
                !verify_internal::<P, Native>(&pk, &message, &sig),
                "Modified message should fail verification"
            );
        }
    }
}

fuzz_target!(|input: RoundtripInput| {
    // Limit message size to prevent excessive memory usage
    if input.message.len() > 10000 {
        return;
    }

    match input.variant % 3 {
        0 => roundtrip::<Params44>(&input),
        1 => roundtrip::<Params65>(&input),
        _ => roundtrip::<Params87>(&input),
    }
});
