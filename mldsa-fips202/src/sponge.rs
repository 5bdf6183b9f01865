//! Single-lane sponge state machine.
//!
//! ```text
//! new/init ──► Absorbing ──finalize──► Squeezing ──release──► Reset
//!                  ▲                                            │
//!                  └──────────────────── init ◄─────────────────┘
//! ```
//!
//! Calls outside their phase are contract violations. They are asserted in
//! debug builds and with the `checked` feature, and otherwise left to the
//! caller.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::keccak::{extract_bytes, f1600, xor_bytes, LANES, STATE_BYTES};
use crate::{
    MAX_BUFFER_SIZE, SHA3_256_BYTES, SHA3_256_RATE, SHA3_512_BYTES, SHA3_512_RATE, SHA3_PAD,
    SHAKE128_RATE, SHAKE256_RATE, SHAKE_PAD,
};

/// Lifecycle tag carried by every sponge context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Released. Only `init` is meaningful.
    Reset = 0,
    /// Accepting input.
    Absorbing = 1,
    /// Padded and permuted; producing output.
    Squeezing = 2,
}

/// Keccak sponge with a fixed rate in bytes and domain-separation byte.
///
/// `DS` holds the domain bits followed by the first padding bit, e.g. `0x1F`
/// for SHAKE and `0x06` for SHA-3.
#[derive(Clone)]
pub struct Keccak<const RATE: usize, const DS: u8> {
    state: [u64; LANES],
    pos: usize,
    phase: Phase,
}

/// SHAKE128 extendable-output function.
pub type Shake128 = Keccak<SHAKE128_RATE, SHAKE_PAD>;
/// SHAKE256 extendable-output function.
pub type Shake256 = Keccak<SHAKE256_RATE, SHAKE_PAD>;
/// SHA3-256 fixed-output hash.
pub type Sha3_256 = Sha3<SHA3_256_RATE, SHA3_256_BYTES>;
/// SHA3-512 fixed-output hash.
pub type Sha3_512 = Sha3<SHA3_512_RATE, SHA3_512_BYTES>;

impl<const RATE: usize, const DS: u8> Keccak<RATE, DS> {
    const VALID_RATE: () = assert!(RATE > 0 && RATE < STATE_BYTES && RATE % 8 == 0);

    /// Fresh context in the `Absorbing` phase.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::VALID_RATE;
        Self {
            state: [0u64; LANES],
            pos: 0,
            phase: Phase::Absorbing,
        }
    }

    /// Zero the state and cursor and start absorbing again.
    ///
    /// Valid from any phase, typically after `release`.
    pub fn init(&mut self) {
        self.state.zeroize();
        self.pos = 0;
        self.phase = Phase::Absorbing;
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Absorb `data`, permuting whenever a full block has been taken in.
    ///
    /// May be called any number of times before `finalize`.
    pub fn absorb(&mut self, data: &[u8]) {
        contract!(self.phase == Phase::Absorbing, "absorb called in {:?} phase", self.phase);
        contract!(
            data.len() <= MAX_BUFFER_SIZE,
            "absorb input of {} bytes exceeds the buffer guard",
            data.len()
        );

        let mut data = data;
        while !data.is_empty() {
            let take = (RATE - self.pos).min(data.len());
            let (block, rest) = data.split_at(take);
            xor_bytes(&mut self.state, self.pos, block);
            self.pos += take;
            data = rest;

            if self.pos == RATE {
                f1600(&mut self.state);
                self.pos = 0;
            }
        }
    }

    /// Pad the pending block, permute once and switch to `Squeezing`.
    pub fn finalize(&mut self) {
        contract!(self.phase == Phase::Absorbing, "finalize called in {:?} phase", self.phase);

        xor_bytes(&mut self.state, self.pos, &[DS]);
        xor_bytes(&mut self.state, RATE - 1, &[0x80]);
        f1600(&mut self.state);
        self.pos = 0;
        self.phase = Phase::Squeezing;
    }

    /// Write the next `out.len()` bytes of output.
    ///
    /// Output is a single stream: any split of the same total length into
    /// successive calls yields the same bytes.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        contract!(self.phase == Phase::Squeezing, "squeeze called in {:?} phase", self.phase);

        let mut out = out;
        while !out.is_empty() {
            if self.pos == RATE {
                f1600(&mut self.state);
                self.pos = 0;
            }
            let take = (RATE - self.pos).min(out.len());
            let (chunk, rest) = out.split_at_mut(take);
            extract_bytes(&self.state, self.pos, chunk);
            self.pos += take;
            out = rest;
        }
    }

    /// Wipe the context and move to `Reset`. Valid from any phase.
    pub fn release(&mut self) {
        self.zeroize();
    }
}

impl<const RATE: usize, const DS: u8> Default for Keccak<RATE, DS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RATE: usize, const DS: u8> Zeroize for Keccak<RATE, DS> {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.pos.zeroize();
        self.phase = Phase::Reset;
    }
}

impl<const RATE: usize, const DS: u8> Drop for Keccak<RATE, DS> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const RATE: usize, const DS: u8> ZeroizeOnDrop for Keccak<RATE, DS> {}

impl<const RATE: usize, const DS: u8> fmt::Debug for Keccak<RATE, DS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keccak")
            .field("rate", &RATE)
            .field("ds", &DS)
            .field("pos", &self.pos)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Fixed-output SHA-3 hash of `OUT` bytes.
///
/// Wraps a SHA-3 sponge but exposes no `squeeze`: the digest is produced
/// exactly once, at its fixed length.
#[derive(Clone, Debug)]
pub struct Sha3<const RATE: usize, const OUT: usize> {
    sponge: Keccak<RATE, SHA3_PAD>,
}

impl<const RATE: usize, const OUT: usize> Sha3<RATE, OUT> {
    const VALID_OUT: () = assert!(OUT > 0 && OUT <= RATE);

    /// Fresh context in the `Absorbing` phase.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::VALID_OUT;
        Self {
            sponge: Keccak::new(),
        }
    }

    /// Zero the state and start absorbing again.
    pub fn init(&mut self) {
        self.sponge.init();
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.sponge.phase()
    }

    /// Absorb more input.
    pub fn absorb(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Pad, permute and write the digest into `out`.
    ///
    /// `out` must be exactly `OUT` bytes, and the context must still be
    /// absorbing: a second call without `init` is a contract violation.
    pub fn finalize_into(&mut self, out: &mut [u8]) {
        contract!(
            out.len() == OUT,
            "digest length {} does not match the {}-byte output",
            out.len(),
            OUT
        );
        self.sponge.finalize();
        self.sponge.squeeze(out);
    }

    /// Finalize and return the digest, consuming the context.
    #[must_use]
    pub fn digest(mut self) -> [u8; OUT] {
        let mut out = [0u8; OUT];
        self.finalize_into(&mut out);
        out
    }

    /// Wipe the context and move to `Reset`.
    pub fn release(&mut self) {
        self.sponge.release();
    }
}

impl<const RATE: usize, const OUT: usize> Default for Sha3<RATE, OUT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RATE: usize, const OUT: usize> ZeroizeOnDrop for Sha3<RATE, OUT> {}

/// SHAKE128 of `input`, filling `out`.
pub fn shake128(out: &mut [u8], input: &[u8]) {
    let mut xof = Shake128::new();
    xof.absorb(input);
    xof.finalize();
    xof.squeeze(out);
}

/// SHAKE256 of `input`, filling `out`.
pub fn shake256(out: &mut [u8], input: &[u8]) {
    let mut xof = Shake256::new();
    xof.absorb(input);
    xof.finalize();
    xof.squeeze(out);
}

/// SHA3-256 of `input`.
#[must_use]
pub fn sha3_256(input: &[u8]) -> [u8; SHA3_256_BYTES] {
    let mut h = Sha3_256::new();
    h.absorb(input);
    h.digest()
}

/// SHA3-512 of `input`.
#[must_use]
pub fn sha3_512(input: &[u8]) -> [u8; SHA3_512_BYTES] {
    let mut h = Sha3_512::new();
    h.absorb(input);
    h.digest()
}
