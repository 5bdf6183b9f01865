//! Pluggable FIPS 202 interfaces.
//!
//! Code that only needs SHAKE goes through these traits instead of the
//! concrete sponges, so another Keccak implementation (hardware, a vetted
//! external crate, a test double) can be dropped in by implementing
//! [`Xof`], [`XofX4`] and a [`Fips202`] suite.
//!
//! # Example
//!
//! ```
//! use mldsa_fips202::{Fips202, Native, Xof};
//!
//! fn derive<H: Fips202>(seed: &[u8]) -> [u8; 32] {
//!     let mut xof = H::Shake256::init();
//!     xof.absorb(seed);
//!     xof.finalize();
//!     let mut out = [0u8; 32];
//!     xof.squeeze(&mut out);
//!     out
//! }
//!
//! let a = derive::<Native>(b"seed");
//! let b = derive::<mldsa_fips202::Serial>(b"seed");
//! assert_eq!(a, b);
//! ```

use crate::sponge::{self, Keccak};
use crate::x4::{self, KeccakX4, SerialX4};

/// Incremental extendable-output function.
///
/// Implementations follow the sponge lifecycle: `absorb*`, `finalize`,
/// `squeeze*`, `release`.
pub trait Xof {
    /// Block size in bytes.
    const RATE: usize;

    /// Fresh context ready to absorb.
    fn init() -> Self;

    /// Absorb more input.
    fn absorb(&mut self, data: &[u8]);

    /// Pad, permute and switch to output.
    fn finalize(&mut self);

    /// Produce the next `out.len()` bytes.
    fn squeeze(&mut self, out: &mut [u8]);

    /// Wipe the context.
    fn release(&mut self);
}

/// Four extendable-output functions with a one-shot input and block output.
pub trait XofX4 {
    /// Block size in bytes.
    const RATE: usize;

    /// Four fresh contexts.
    fn init() -> Self;

    /// Absorb one equal-length input per lane and finalize.
    fn absorb_once(&mut self, inputs: [&[u8]; 4]);

    /// Write `nblocks * RATE` bytes to each output.
    fn squeeze_blocks(&mut self, outputs: [&mut [u8]; 4], nblocks: usize);

    /// Wipe all four contexts.
    fn release(&mut self);
}

/// A complete set of the SHAKE instances ML-DSA needs.
pub trait Fips202 {
    /// SHAKE128.
    type Shake128: Xof;
    /// SHAKE256.
    type Shake256: Xof;
    /// Four SHAKE128 lanes.
    type Shake128x4: XofX4;
    /// Four SHAKE256 lanes.
    type Shake256x4: XofX4;
}

/// This crate's sponges with batched four-way permutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl Fips202 for Native {
    type Shake128 = sponge::Shake128;
    type Shake256 = sponge::Shake256;
    type Shake128x4 = x4::Shake128x4;
    type Shake256x4 = x4::Shake256x4;
}

/// This crate's sponges, with the four-way variants run lane by lane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl Fips202 for Serial {
    type Shake128 = sponge::Shake128;
    type Shake256 = sponge::Shake256;
    type Shake128x4 = SerialX4<sponge::Shake128>;
    type Shake256x4 = SerialX4<sponge::Shake256>;
}

impl<const RATE: usize, const DS: u8> Xof for Keccak<RATE, DS> {
    const RATE: usize = RATE;

    fn init() -> Self {
        Self::new()
    }

    fn absorb(&mut self, data: &[u8]) {
        Keccak::absorb(self, data);
    }

    fn finalize(&mut self) {
        Keccak::finalize(self);
    }

    fn squeeze(&mut self, out: &mut [u8]) {
        Keccak::squeeze(self, out);
    }

    fn release(&mut self) {
        Keccak::release(self);
    }
}

impl<const RATE: usize, const DS: u8> XofX4 for KeccakX4<RATE, DS> {
    const RATE: usize = RATE;

    fn init() -> Self {
        Self::new()
    }

    fn absorb_once(&mut self, inputs: [&[u8]; 4]) {
        KeccakX4::absorb_once(self, inputs);
    }

    fn squeeze_blocks(&mut self, outputs: [&mut [u8]; 4], nblocks: usize) {
        KeccakX4::squeeze_blocks(self, outputs, nblocks);
    }

    fn release(&mut self) {
        KeccakX4::release(self);
    }
}

impl<X: Xof> XofX4 for SerialX4<X> {
    const RATE: usize = X::RATE;

    fn init() -> Self {
        Self::new()
    }

    fn absorb_once(&mut self, inputs: [&[u8]; 4]) {
        SerialX4::absorb_once(self, inputs);
    }

    fn squeeze_blocks(&mut self, outputs: [&mut [u8]; 4], nblocks: usize) {
        SerialX4::squeeze_blocks(self, outputs, nblocks);
    }

    fn release(&mut self) {
        SerialX4::release(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SHAKE128_RATE, SHAKE256_RATE};

    fn batched_blocks<X: XofX4>(seed: &[u8]) -> [[u8; 2 * SHAKE128_RATE]; 4] {
        let mut inputs = [[0u8; 34]; 4];
        for (lane, input) in inputs.iter_mut().enumerate() {
            input[..32].copy_from_slice(&seed[..32]);
            input[32] = lane as u8;
        }

        let mut x = X::init();
        x.absorb_once([&inputs[0], &inputs[1], &inputs[2], &inputs[3]]);
        let mut out = [[0u8; 2 * SHAKE128_RATE]; 4];
        let [a, b, c, d] = &mut out;
        x.squeeze_blocks([a, b, c, d], 2);
        x.release();
        out
    }

    #[test]
    fn test_rates() {
        assert_eq!(<Native as Fips202>::Shake128::RATE, SHAKE128_RATE);
        assert_eq!(<Native as Fips202>::Shake256::RATE, SHAKE256_RATE);
        assert_eq!(<Serial as Fips202>::Shake128x4::RATE, SHAKE128_RATE);
        assert_eq!(<Native as Fips202>::Shake256x4::RATE, SHAKE256_RATE);
    }

    #[test]
    fn test_native_and_serial_suites_agree() {
        let seed = [0x42u8; 32];
        let native = batched_blocks::<<Native as Fips202>::Shake128x4>(&seed);
        let serial = batched_blocks::<<Serial as Fips202>::Shake128x4>(&seed);
        assert_eq!(native, serial);
    }

    #[test]
    fn test_generic_xof_matches_one_shot() {
        fn run<X: Xof>(input: &[u8], out: &mut [u8]) {
            let mut x = X::init();
            x.absorb(input);
            x.finalize();
            x.squeeze(out);
            x.release();
        }

        let mut a = [0u8; 100];
        let mut b = [0u8; 100];
        run::<<Native as Fips202>::Shake256>(b"generic", &mut a);
        crate::shake256(&mut b, b"generic");
        assert_eq!(a, b);
    }
}
