//! Fuzz target for the incremental sponge.
//!
//! Absorbs and squeezes the same data through arbitrary chunkings and checks
//! that the output matches the one-shot functions.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mldsa_fips202::{shake128, shake256, Shake128, Shake256};

#[derive(Debug, Arbitrary)]
struct SpongeInput {
    message: Vec<u8>,
    absorb_chunks: Vec<u16>,
    squeeze_chunks: Vec<u16>,
    out_len: u16,
    use_shake256: bool,
}

fn chunk_lengths(total: usize, hints: &[u16]) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut left = total;
    for &hint in hints {
        if left == 0 {
            break;
        }
        let take = (hint as usize % (left + 1)).max(1);
        lengths.push(take);
        left -= take;
    }
    if left > 0 {
        lengths.push(left);
    }
    lengths
}

macro_rules! check {
    ($xof:ty, $one_shot:ident, $input:expr) => {{
        let input = $input;
        let out_len = input.out_len as usize;

        let mut expected = vec![0u8; out_len];
        $one_shot(&mut expected, &input.message);

        let mut xof = <$xof>::new();
        let mut rest = &input.message[..];
        for len in chunk_lengths(rest.len(), &input.absorb_chunks) {
            let (chunk, tail) = rest.split_at(len);
            xof.absorb(chunk);
            rest = tail;
        }
        xof.finalize();

        let mut got = vec![0u8; out_len];
        let mut start = 0;
        for len in chunk_lengths(out_len, &input.squeeze_chunks) {
            xof.squeeze(&mut got[start..start + len]);
            start += len;
        }
        assert_eq!(got, expected, "chunked sponge diverged from one-shot");

        xof.release();
    }};
}

fuzz_target!(|input: SpongeInput| {
    if input.message.len() > 1 << 16 {
        return;
    }

    if input.use_shake256 {
        check!(Shake256, shake256, &input);
    } else {
        check!(Shake128, shake128, &input);
    }
});
