//! # mldsa-core
//!
//! Shared pieces of the mldsa workspace.
//!
//! This crate provides:
//! - The common [`Error`] and [`Result`] types
//! - The [`Signer`] trait implemented by every ML-DSA parameter set
//! - Secure memory handling with zeroize integration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::{Signer, MAX_CONTEXT_BYTES};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
