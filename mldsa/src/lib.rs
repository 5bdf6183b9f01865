//! ML-DSA (FIPS 204) digital signatures.
//!
//! Pure Rust implementation of the three ML-DSA parameter sets. Matrix
//! expansion, secret sampling and mask sampling run four SHAKE instances
//! at once on the batched Keccak backend of [`mldsa_fips202`].
//!
//! # Supported Parameter Sets
//!
//! | Variant | Security Level | Public Key | Secret Key | Signature |
//! |---------|----------------|------------|------------|-----------|
//! | ML-DSA-44 | Level 2 | 1,312 bytes | 2,560 bytes | 2,420 bytes |
//! | ML-DSA-65 | Level 3 | 1,952 bytes | 4,032 bytes | 3,309 bytes |
//! | ML-DSA-87 | Level 5 | 2,592 bytes | 4,896 bytes | 4,627 bytes |
//!
//! # Example
//!
//! ```
//! use mldsa::{MlDsa65, Signer};
//!
//! let mut rng = rand::rng();
//! let (sk, pk) = MlDsa65::keygen(&mut rng).unwrap();
//!
//! let message = b"Hello, post-quantum world!";
//! let signature = MlDsa65::sign(&sk, message, b"example").unwrap();
//!
//! assert!(MlDsa65::verify(&pk, message, b"example", &signature).is_ok());
//! assert!(MlDsa65::verify(&pk, message, b"other", &signature).is_err());
//! ```
//!
//! The algorithms in [`sign`] are generic over the [`ParameterSet`] and the
//! [`Fips202`](mldsa_fips202::Fips202) suite, so the portable
//! [`Serial`](mldsa_fips202::Serial) backend can be used directly.
//!
//! # Features
//!
//! - `std` (default): standard library support; without it the crate is
//!   `no_std` and needs only `alloc` (`cargo check-no-std`)
//! - `simd` (default): batched AVX2 and NEON Keccak backends
//! - `ml-dsa-44`, `ml-dsa-65`, `ml-dsa-87` (default): parameter sets
//! - `keygen-pct`: pairwise consistency test on every generated key pair
//! - `checked`: keep sponge contract assertions in release builds
//! - `log`: report backend selection through the `log` crate

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod hash;
mod ntt;
mod packing;
mod poly;
mod polyvec;
mod reduce;
mod rounding;
mod sample;
mod types;

pub mod params;
pub mod sign;

#[cfg(feature = "ml-dsa-44")]
mod ml_dsa_44;
#[cfg(feature = "ml-dsa-65")]
mod ml_dsa_65;
#[cfg(feature = "ml-dsa-87")]
mod ml_dsa_87;

#[cfg(feature = "ml-dsa-44")]
pub use ml_dsa_44::MlDsa44;
#[cfg(feature = "ml-dsa-65")]
pub use ml_dsa_65::MlDsa65;
#[cfg(feature = "ml-dsa-87")]
pub use ml_dsa_87::MlDsa87;

/// ML-DSA-44 (NIST Security Level 2) - 128-bit classical security.
#[cfg(feature = "ml-dsa-44")]
pub mod dsa44 {
    pub use crate::ml_dsa_44::*;
}

/// ML-DSA-65 (NIST Security Level 3) - 192-bit classical security.
#[cfg(feature = "ml-dsa-65")]
pub mod dsa65 {
    pub use crate::ml_dsa_65::*;
}

/// ML-DSA-87 (NIST Security Level 5) - 256-bit classical security.
#[cfg(feature = "ml-dsa-87")]
pub mod dsa87 {
    pub use crate::ml_dsa_87::*;
}

pub use mldsa_core::{Error, Result, Signer, MAX_CONTEXT_BYTES};
pub use mldsa_fips202 as fips202;
pub use params::ParameterSet;
pub use sign::HashAlg;
#[cfg(feature = "ml-dsa-44")]
pub use params::Params44;
#[cfg(feature = "ml-dsa-65")]
pub use params::Params65;
#[cfg(feature = "ml-dsa-87")]
pub use params::Params87;
