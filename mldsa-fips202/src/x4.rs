//! Batched sponges over four independent lanes.
//!
//! [`KeccakX4`] keeps four states side by side and permutes them together
//! with [`f1600_x4`]. [`SerialX4`] drives four single-lane contexts instead.
//! Both behave exactly like four separate sponges fed the same inputs.
//!
//! Input is taken once: `absorb_once` absorbs and finalizes in one step, and
//! output is produced in whole blocks. This matches how the rejection
//! samplers use the batched path, with fixed-length seeds and block-sized
//! reads.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::backend::f1600_x4;
use crate::keccak::{extract_bytes, xor_bytes, LANES, STATE_BYTES};
use crate::sponge::Phase;
use crate::traits::Xof;
use crate::{MAX_BUFFER_SIZE, SHAKE128_RATE, SHAKE256_RATE, SHAKE_PAD};

/// Four Keccak sponges permuted together.
#[derive(Clone)]
pub struct KeccakX4<const RATE: usize, const DS: u8> {
    states: [[u64; LANES]; 4],
    phase: Phase,
}

/// Four SHAKE128 instances in lockstep.
pub type Shake128x4 = KeccakX4<SHAKE128_RATE, SHAKE_PAD>;
/// Four SHAKE256 instances in lockstep.
pub type Shake256x4 = KeccakX4<SHAKE256_RATE, SHAKE_PAD>;

impl<const RATE: usize, const DS: u8> KeccakX4<RATE, DS> {
    const VALID_RATE: () = assert!(RATE > 0 && RATE < STATE_BYTES && RATE % 8 == 0);

    /// Four fresh contexts in the `Absorbing` phase.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::VALID_RATE;
        Self {
            states: [[0u64; LANES]; 4],
            phase: Phase::Absorbing,
        }
    }

    /// Zero all four states and start absorbing again.
    pub fn init(&mut self) {
        self.states.zeroize();
        self.phase = Phase::Absorbing;
    }

    /// Current lifecycle phase, shared by all four lanes.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Absorb one equal-length input per lane and finalize all four.
    pub fn absorb_once(&mut self, inputs: [&[u8]; 4]) {
        contract!(
            self.phase == Phase::Absorbing,
            "absorb_once called in {:?} phase",
            self.phase
        );
        let len = inputs[0].len();
        contract!(
            inputs.iter().all(|input| input.len() == len),
            "absorb_once inputs differ in length"
        );
        contract!(
            len <= MAX_BUFFER_SIZE,
            "absorb_once input of {} bytes exceeds the buffer guard",
            len
        );

        let mut offset = 0;
        while len - offset >= RATE {
            for (state, input) in self.states.iter_mut().zip(&inputs) {
                xor_bytes(state, 0, &input[offset..offset + RATE]);
            }
            f1600_x4(&mut self.states);
            offset += RATE;
        }

        let tail = len - offset;
        for (state, input) in self.states.iter_mut().zip(&inputs) {
            xor_bytes(state, 0, &input[offset..]);
            xor_bytes(state, tail, &[DS]);
            xor_bytes(state, RATE - 1, &[0x80]);
        }
        f1600_x4(&mut self.states);
        self.phase = Phase::Squeezing;
    }

    /// Write `nblocks` blocks of `RATE` bytes to each output.
    ///
    /// Each output must hold at least `nblocks * RATE` bytes; anything past
    /// that is left untouched.
    pub fn squeeze_blocks(&mut self, mut outputs: [&mut [u8]; 4], nblocks: usize) {
        contract!(
            self.phase == Phase::Squeezing,
            "squeeze_blocks called in {:?} phase",
            self.phase
        );
        contract!(
            outputs.iter().all(|out| out.len() >= nblocks * RATE),
            "squeeze_blocks output shorter than {} blocks",
            nblocks
        );

        for block in 0..nblocks {
            let range = block * RATE..(block + 1) * RATE;
            for (state, out) in self.states.iter().zip(outputs.iter_mut()) {
                extract_bytes(state, 0, &mut out[range.clone()]);
            }
            f1600_x4(&mut self.states);
        }
    }

    /// Wipe all four states and move to `Reset`.
    pub fn release(&mut self) {
        self.zeroize();
    }
}

impl<const RATE: usize, const DS: u8> Default for KeccakX4<RATE, DS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RATE: usize, const DS: u8> Zeroize for KeccakX4<RATE, DS> {
    fn zeroize(&mut self) {
        self.states.zeroize();
        self.phase = Phase::Reset;
    }
}

impl<const RATE: usize, const DS: u8> Drop for KeccakX4<RATE, DS> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const RATE: usize, const DS: u8> ZeroizeOnDrop for KeccakX4<RATE, DS> {}

impl<const RATE: usize, const DS: u8> fmt::Debug for KeccakX4<RATE, DS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeccakX4")
            .field("rate", &RATE)
            .field("ds", &DS)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Four single-lane contexts driven through the batched API.
///
/// Useful when an [`Xof`] has no batched permutation of its own.
#[derive(Clone, Debug, Default)]
pub struct SerialX4<X> {
    lanes: [X; 4],
}

impl<X: Xof> SerialX4<X> {
    /// Four fresh contexts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lanes: [X::init(), X::init(), X::init(), X::init()],
        }
    }

    /// Restart all four lanes.
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Absorb one equal-length input per lane and finalize all four.
    pub fn absorb_once(&mut self, inputs: [&[u8]; 4]) {
        let len = inputs[0].len();
        contract!(
            inputs.iter().all(|input| input.len() == len),
            "absorb_once inputs differ in length"
        );

        for (lane, input) in self.lanes.iter_mut().zip(inputs) {
            lane.absorb(input);
            lane.finalize();
        }
    }

    /// Write `nblocks` blocks of `X::RATE` bytes to each output.
    pub fn squeeze_blocks(&mut self, outputs: [&mut [u8]; 4], nblocks: usize) {
        for (lane, out) in self.lanes.iter_mut().zip(outputs) {
            contract!(
                out.len() >= nblocks * X::RATE,
                "squeeze_blocks output shorter than {} blocks",
                nblocks
            );
            lane.squeeze(&mut out[..nblocks * X::RATE]);
        }
    }

    /// Release all four lanes.
    pub fn release(&mut self) {
        for lane in &mut self.lanes {
            lane.release();
        }
    }
}
