//! SHA-3 and SHAKE (FIPS 202) for ML-DSA
//!
//! This crate provides the Keccak-f[1600] permutation, the sponge state
//! machine built on it, and batched four-lane sponges used by the ML-DSA
//! rejection samplers.
//!
//! # Components
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`f1600`] | Permutation on one state |
//! | [`f1600_x4`] / [`Backend`] | Permutation on four states (portable, AVX2, NEON) |
//! | [`Shake128`], [`Shake256`] | Incremental sponges |
//! | [`Sha3_256`], [`Sha3_512`] | Incremental fixed-output hashes |
//! | [`Shake128x4`], [`Shake256x4`] | Batched sponges |
//! | [`Xof`], [`XofX4`], [`Fips202`] | Interfaces for plugging in another implementation |
//!
//! # Example
//!
//! ```
//! use mldsa_fips202::{sha3_256, Shake128};
//!
//! let digest = sha3_256(b"abc");
//! assert_eq!(digest[0], 0x3a);
//!
//! let mut xof = Shake128::new();
//! xof.absorb(b"hello ");
//! xof.absorb(b"world");
//! xof.finalize();
//! let mut out = [0u8; 64];
//! xof.squeeze(&mut out);
//! ```
//!
//! # Features
//!
//! - `std` (default): runtime CPU feature detection
//! - `simd` (default): AVX2 and NEON backends
//! - `checked`: keep lifecycle contract assertions in release builds
//! - `log`: report backend selection through the `log` crate

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::inline_always,
    clippy::module_name_repetitions,
    clippy::many_single_char_names
)]

/// Assert a caller contract in debug builds or with the `checked` feature.
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "checked")) {
            assert!($cond, $($arg)+);
        }
    };
}

mod backend;
mod keccak;
mod sponge;
mod traits;
mod x4;

pub use backend::{f1600_x4, Backend};
pub use keccak::{f1600, LANES, RHO_OFFSETS, ROUNDS, ROUND_CONSTANTS, STATE_BYTES};
pub use sponge::{sha3_256, sha3_512, shake128, shake256, Keccak, Phase, Sha3};
pub use sponge::{Sha3_256, Sha3_512, Shake128, Shake256};
pub use traits::{Fips202, Native, Serial, Xof, XofX4};
pub use x4::{KeccakX4, SerialX4, Shake128x4, Shake256x4};

/// SHAKE128 rate in bytes.
pub const SHAKE128_RATE: usize = 168;
/// SHAKE256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;
/// SHA3-256 rate in bytes.
pub const SHA3_256_RATE: usize = 136;
/// SHA3-512 rate in bytes.
pub const SHA3_512_RATE: usize = 72;

/// SHA3-256 digest size in bytes.
pub const SHA3_256_BYTES: usize = 32;
/// SHA3-512 digest size in bytes.
pub const SHA3_512_BYTES: usize = 64;

/// Domain separation and first padding bit for SHAKE.
pub const SHAKE_PAD: u8 = 0x1F;
/// Domain separation and first padding bit for SHA-3.
pub const SHA3_PAD: u8 = 0x06;

/// Largest input accepted by a single absorb call.
pub const MAX_BUFFER_SIZE: usize = usize::MAX / 8;
