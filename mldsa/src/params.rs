//! ML-DSA parameter sets.
//!
//! Each security level is a zero-sized marker implementing [`ParameterSet`].
//! Only the table values are spelled out per level; every encoded size is
//! derived from them.

use crate::poly::N;
use crate::reduce::Q;

/// Seed length for ρ, K and rnd.
pub const SEED_BYTES: usize = 32;

/// Length of ρ' and of the message representative μ.
pub const CRH_BYTES: usize = 64;

/// Length of tr = H(pk).
pub const TR_BYTES: usize = 64;

/// Bits dropped from t by Power2Round.
pub const D: u32 = 13;

/// Packed t1 polynomial (10 bits per coefficient).
pub const POLY_T1_PACKED_BYTES: usize = N * 10 / 8;

/// Packed t0 polynomial (13 bits per coefficient).
pub const POLY_T0_PACKED_BYTES: usize = N * 13 / 8;

/// γ2 for ML-DSA-44.
pub const GAMMA2_88: i32 = (Q - 1) / 88;

/// γ2 for ML-DSA-65 and ML-DSA-87.
pub const GAMMA2_32: i32 = (Q - 1) / 32;

/// Constants of one ML-DSA security level.
pub trait ParameterSet: 'static {
    /// Human-readable name, e.g. `"ML-DSA-65"`.
    const NAME: &'static str;
    /// Rows of A (length of t, s2, w).
    const K: usize;
    /// Columns of A (length of s1, y, z).
    const L: usize;
    /// Secret coefficient bound.
    const ETA: i32;
    /// Nonzero coefficients of the challenge.
    const TAU: usize;
    /// τ·η.
    const BETA: i32;
    /// log2 γ1.
    const GAMMA1_BITS: u32;
    /// Low-order rounding range.
    const GAMMA2: i32;
    /// Maximum number of hint bits.
    const OMEGA: usize;
    /// Length of the commitment hash c̃.
    const CTILDE_BYTES: usize;

    /// Mask coefficient range.
    const GAMMA1: i32 = 1 << Self::GAMMA1_BITS;
    /// Bits per packed secret coefficient.
    const ETA_BITS: u32 = if Self::ETA == 2 { 3 } else { 4 };
    /// Bits per packed w1 coefficient.
    const W1_BITS: u32 = if Self::GAMMA2 == GAMMA2_88 { 6 } else { 4 };

    /// Packed η-bounded polynomial.
    const POLY_ETA_PACKED_BYTES: usize = N * Self::ETA_BITS as usize / 8;
    /// Packed z polynomial.
    const POLY_Z_PACKED_BYTES: usize = N * (Self::GAMMA1_BITS as usize + 1) / 8;
    /// Packed w1 polynomial.
    const POLY_W1_PACKED_BYTES: usize = N * Self::W1_BITS as usize / 8;

    /// Encoded verification key.
    const PK_BYTES: usize = SEED_BYTES + Self::K * POLY_T1_PACKED_BYTES;
    /// Encoded signing key.
    const SK_BYTES: usize = 2 * SEED_BYTES
        + TR_BYTES
        + (Self::K + Self::L) * Self::POLY_ETA_PACKED_BYTES
        + Self::K * POLY_T0_PACKED_BYTES;
    /// Encoded signature.
    const SIG_BYTES: usize =
        Self::CTILDE_BYTES + Self::L * Self::POLY_Z_PACKED_BYTES + Self::OMEGA + Self::K;
}

/// ML-DSA-44 (NIST security category 2).
#[cfg(feature = "ml-dsa-44")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Params44;

#[cfg(feature = "ml-dsa-44")]
impl ParameterSet for Params44 {
    const NAME: &'static str = "ML-DSA-44";
    const K: usize = 4;
    const L: usize = 4;
    const ETA: i32 = 2;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const GAMMA1_BITS: u32 = 17;
    const GAMMA2: i32 = GAMMA2_88;
    const OMEGA: usize = 80;
    const CTILDE_BYTES: usize = 32;
}

/// ML-DSA-65 (NIST security category 3).
#[cfg(feature = "ml-dsa-65")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Params65;

#[cfg(feature = "ml-dsa-65")]
impl ParameterSet for Params65 {
    const NAME: &'static str = "ML-DSA-65";
    const K: usize = 6;
    const L: usize = 5;
    const ETA: i32 = 4;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const GAMMA1_BITS: u32 = 19;
    const GAMMA2: i32 = GAMMA2_32;
    const OMEGA: usize = 55;
    const CTILDE_BYTES: usize = 48;
}

/// ML-DSA-87 (NIST security category 5).
#[cfg(feature = "ml-dsa-87")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Params87;

#[cfg(feature = "ml-dsa-87")]
impl ParameterSet for Params87 {
    const NAME: &'static str = "ML-DSA-87";
    const K: usize = 8;
    const L: usize = 7;
    const ETA: i32 = 2;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const GAMMA1_BITS: u32 = 19;
    const GAMMA2: i32 = GAMMA2_32;
    const OMEGA: usize = 75;
    const CTILDE_BYTES: usize = 64;
}
