//! Fuzz target for the batched sponge and the x4 permutation backends.
//!
//! Every lane of the batched sponge must equal a single-lane sponge fed the
//! same input, and every available backend must agree with the scalar
//! permutation.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mldsa_fips202::{f1600, shake128, Backend, Shake128x4, LANES, SHAKE128_RATE};

#[derive(Debug, Arbitrary)]
struct X4Input {
    states: [[u64; LANES]; 4],
    seed: Vec<u8>,
    nblocks: u8,
}

fuzz_target!(|input: X4Input| {
    let mut expected = input.states;
    for state in &mut expected {
        f1600(state);
    }
    for backend in Backend::available() {
        let mut got = input.states;
        backend.permute_x4(&mut got);
        assert_eq!(got, expected, "{backend} diverged from scalar permutation");
    }

    if input.seed.len() > 1024 {
        return;
    }
    let nblocks = usize::from(input.nblocks % 4);
    let inputs: Vec<Vec<u8>> = (0..4u8)
        .map(|lane| input.seed.iter().map(|b| b.wrapping_add(lane)).collect())
        .collect();

    let mut x4 = Shake128x4::new();
    x4.absorb_once([&inputs[0], &inputs[1], &inputs[2], &inputs[3]]);
    let mut outs = vec![vec![0u8; nblocks * SHAKE128_RATE]; 4];
    {
        let mut lanes = outs.iter_mut();
        let (Some(a), Some(b), Some(c), Some(d)) =
            (lanes.next(), lanes.next(), lanes.next(), lanes.next())
        else {
            return;
        };
        x4.squeeze_blocks([a, b, c, d], nblocks);
    }

    for (lane, out) in inputs.iter().zip(&outs) {
        let mut single = vec![0u8; nblocks * SHAKE128_RATE];
        shake128(&mut single, lane);
        assert_eq!(out, &single, "batched lane diverged from single-lane sponge");
    }
});
