//! Portable 4-way permutation.
//!
//! Four states are interleaved lane by lane (`[[u64; 4]; 25]`) and pushed
//! through the shared round function as one value per lane position. Besides
//! being the fallback on every target, this is the form LLVM most readily
//! autovectorizes on targets without a hand-written backend.

use crate::keccak::{keccak_p1600, Lanes, LANES};

impl Lanes for [u64; 4] {
    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        [self[0] ^ rhs[0], self[1] ^ rhs[1], self[2] ^ rhs[2], self[3] ^ rhs[3]]
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        [!self[0] & rhs[0], !self[1] & rhs[1], !self[2] & rhs[2], !self[3] & rhs[3]]
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        [
            self[0].rotate_left(n),
            self[1].rotate_left(n),
            self[2].rotate_left(n),
            self[3].rotate_left(n),
        ]
    }

    #[inline(always)]
    fn xor_const(self, rc: u64) -> Self {
        [self[0] ^ rc, self[1] ^ rc, self[2] ^ rc, self[3] ^ rc]
    }
}

/// Permute four independent states.
pub(crate) fn f1600_x4(states: &mut [[u64; LANES]; 4]) {
    let mut lanes: [[u64; 4]; LANES] =
        core::array::from_fn(|i| [states[0][i], states[1][i], states[2][i], states[3][i]]);

    keccak_p1600(&mut lanes);

    for (i, lane) in lanes.iter().enumerate() {
        for (state, &word) in states.iter_mut().zip(lane) {
            state[i] = word;
        }
    }
}

/// Four sequential scalar permutations, the model every 4-way backend is
/// checked against.
#[cfg(test)]
pub(crate) fn f1600_x4_serial(states: &mut [[u64; LANES]; 4]) {
    for state in states.iter_mut() {
        crate::keccak::f1600(state);
    }
}
