//! Byte encodings of polynomials, keys and signatures.
//!
//! Every polynomial encoding is the same little-endian bit stream: each
//! coefficient is mapped to an unsigned `bits`-bit value and appended
//! least-significant bit first.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::params::{
    ParameterSet, D, POLY_T0_PACKED_BYTES, POLY_T1_PACKED_BYTES, SEED_BYTES, TR_BYTES,
};
use crate::poly::{Poly, N};
use crate::polyvec::PolyVec;
use zeroize::{Zeroize, ZeroizeOnDrop};

fn pack_with(p: &Poly, bits: u32, out: &mut [u8], map: impl Fn(i32) -> u32) {
    debug_assert_eq!(out.len(), N * bits as usize / 8);
    let mask = (1u64 << bits) - 1;
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut pos = 0;
    for &c in &p.coeffs {
        acc |= (u64::from(map(c)) & mask) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            filled -= 8;
        }
    }
}

fn unpack_with(input: &[u8], bits: u32, map: impl Fn(u32) -> i32) -> Poly {
    debug_assert_eq!(input.len(), N * bits as usize / 8);
    let mask = (1u64 << bits) - 1;
    let mut p = Poly::zero();
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut bytes = input.iter();
    for c in &mut p.coeffs {
        while filled < bits {
            if let Some(&b) = bytes.next() {
                acc |= u64::from(b) << filled;
            }
            filled += 8;
        }
        *c = map((acc & mask) as u32);
        acc >>= bits;
        filled -= bits;
    }
    p
}

/// t1 coefficients in `[0, 2^10)`.
pub fn pack_t1(p: &Poly, out: &mut [u8]) {
    pack_with(p, 10, out, |c| c as u32);
}

/// Inverse of [`pack_t1`].
pub fn unpack_t1(input: &[u8]) -> Poly {
    unpack_with(input, 10, |v| v as i32)
}

/// t0 coefficients in `(-2^12, 2^12]`, stored as `2^12 - c`.
pub fn pack_t0(p: &Poly, out: &mut [u8]) {
    pack_with(p, D, out, |c| ((1 << (D - 1)) - c) as u32);
}

/// Inverse of [`pack_t0`].
pub fn unpack_t0(input: &[u8]) -> Poly {
    unpack_with(input, D, |v| (1 << (D - 1)) - v as i32)
}

/// Secret coefficients in `[-η, η]`, stored as `η - c`.
pub fn pack_eta(p: &Poly, eta: i32, bits: u32, out: &mut [u8]) {
    pack_with(p, bits, out, |c| (eta - c) as u32);
}

/// Inverse of [`pack_eta`].
pub fn unpack_eta(input: &[u8], eta: i32, bits: u32) -> Poly {
    unpack_with(input, bits, |v| eta - v as i32)
}

/// Mask or response coefficients in `(-γ1, γ1]`, stored as `γ1 - c`.
pub fn pack_z(p: &Poly, gamma1_bits: u32, out: &mut [u8]) {
    let gamma1 = 1i32 << gamma1_bits;
    pack_with(p, gamma1_bits + 1, out, |c| (gamma1 - c) as u32);
}

/// Inverse of [`pack_z`].
pub fn unpack_z(input: &[u8], gamma1_bits: u32) -> Poly {
    let gamma1 = 1i32 << gamma1_bits;
    unpack_with(input, gamma1_bits + 1, |v| gamma1 - v as i32)
}

/// High bits w1, 4 or 6 bits per coefficient.
pub fn pack_w1(p: &Poly, bits: u32, out: &mut [u8]) {
    pack_with(p, bits, out, |c| c as u32);
}

/// Encode the commitment `w1` for hashing into c̃.
pub fn pack_w1_vec<P: ParameterSet>(w1: &PolyVec) -> Vec<u8> {
    let mut out = vec![0u8; P::K * P::POLY_W1_PACKED_BYTES];
    for (p, chunk) in w1.polys.iter().zip(out.chunks_exact_mut(P::POLY_W1_PACKED_BYTES)) {
        pack_w1(p, P::W1_BITS, chunk);
    }
    out
}

/// Decoded verification key.
#[derive(Clone, Debug)]
pub struct PublicKeyParts {
    /// Matrix seed.
    pub rho: [u8; SEED_BYTES],
    /// High bits of t.
    pub t1: PolyVec,
}

impl PublicKeyParts {
    /// Encode as `ρ || t1`.
    pub fn encode<P: ParameterSet>(&self) -> Vec<u8> {
        let mut out = vec![0u8; P::PK_BYTES];
        out[..SEED_BYTES].copy_from_slice(&self.rho);
        for (p, chunk) in self
            .t1
            .polys
            .iter()
            .zip(out[SEED_BYTES..].chunks_exact_mut(POLY_T1_PACKED_BYTES))
        {
            pack_t1(p, chunk);
        }
        out
    }

    /// Decode `ρ || t1`; `pk` must be exactly `PK_BYTES` long.
    pub fn decode<P: ParameterSet>(pk: &[u8]) -> Option<Self> {
        if pk.len() != P::PK_BYTES {
            return None;
        }
        let mut rho = [0u8; SEED_BYTES];
        rho.copy_from_slice(&pk[..SEED_BYTES]);
        let polys = pk[SEED_BYTES..]
            .chunks_exact(POLY_T1_PACKED_BYTES)
            .map(unpack_t1)
            .collect();
        Some(Self {
            rho,
            t1: PolyVec { polys },
        })
    }
}

/// Decoded signing key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts {
    /// Matrix seed.
    pub rho: [u8; SEED_BYTES],
    /// Signing seed K.
    pub key: [u8; SEED_BYTES],
    /// H(pk).
    pub tr: [u8; TR_BYTES],
    /// Secret vector s1 (length L).
    pub s1: PolyVec,
    /// Secret vector s2 (length K).
    pub s2: PolyVec,
    /// Low bits of t (length K).
    pub t0: PolyVec,
}

impl SecretKeyParts {
    /// Encode as `ρ || K || tr || s1 || s2 || t0`.
    pub fn encode<P: ParameterSet>(&self) -> Vec<u8> {
        let mut out = vec![0u8; P::SK_BYTES];
        let (head, rest) = out.split_at_mut(2 * SEED_BYTES + TR_BYTES);
        head[..SEED_BYTES].copy_from_slice(&self.rho);
        head[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&self.key);
        head[2 * SEED_BYTES..].copy_from_slice(&self.tr);

        let (eta_part, t0_part) = rest.split_at_mut((P::K + P::L) * P::POLY_ETA_PACKED_BYTES);
        let secrets = self.s1.polys.iter().chain(&self.s2.polys);
        for (p, chunk) in secrets.zip(eta_part.chunks_exact_mut(P::POLY_ETA_PACKED_BYTES)) {
            pack_eta(p, P::ETA, P::ETA_BITS, chunk);
        }
        for (p, chunk) in self.t0.polys.iter().zip(t0_part.chunks_exact_mut(POLY_T0_PACKED_BYTES)) {
            pack_t0(p, chunk);
        }
        out
    }

    /// Decode a signing key; `sk` must be exactly `SK_BYTES` long.
    pub fn decode<P: ParameterSet>(sk: &[u8]) -> Option<Self> {
        if sk.len() != P::SK_BYTES {
            return None;
        }
        let mut rho = [0u8; SEED_BYTES];
        let mut key = [0u8; SEED_BYTES];
        let mut tr = [0u8; TR_BYTES];
        rho.copy_from_slice(&sk[..SEED_BYTES]);
        key.copy_from_slice(&sk[SEED_BYTES..2 * SEED_BYTES]);
        tr.copy_from_slice(&sk[2 * SEED_BYTES..2 * SEED_BYTES + TR_BYTES]);

        let rest = &sk[2 * SEED_BYTES + TR_BYTES..];
        let (eta_part, t0_part) = rest.split_at((P::K + P::L) * P::POLY_ETA_PACKED_BYTES);
        let mut secrets = eta_part
            .chunks_exact(P::POLY_ETA_PACKED_BYTES)
            .map(|chunk| unpack_eta(chunk, P::ETA, P::ETA_BITS));
        let s1 = PolyVec {
            polys: secrets.by_ref().take(P::L).collect(),
        };
        let s2 = PolyVec {
            polys: secrets.collect(),
        };
        let t0 = PolyVec {
            polys: t0_part.chunks_exact(POLY_T0_PACKED_BYTES).map(unpack_t0).collect(),
        };
        Some(Self {
            rho,
            key,
            tr,
            s1,
            s2,
            t0,
        })
    }
}

/// Encode `c̃ || z || h`. `h` holds 0/1 coefficients of total weight at most ω.
pub fn pack_signature<P: ParameterSet>(c_tilde: &[u8], z: &PolyVec, h: &PolyVec) -> Vec<u8> {
    let mut out = vec![0u8; P::SIG_BYTES];
    out[..P::CTILDE_BYTES].copy_from_slice(c_tilde);

    let z_end = P::CTILDE_BYTES + P::L * P::POLY_Z_PACKED_BYTES;
    for (p, chunk) in z
        .polys
        .iter()
        .zip(out[P::CTILDE_BYTES..z_end].chunks_exact_mut(P::POLY_Z_PACKED_BYTES))
    {
        pack_z(p, P::GAMMA1_BITS, chunk);
    }

    let hints = &mut out[z_end..];
    let mut k = 0;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, &bit) in p.coeffs.iter().enumerate() {
            if bit != 0 {
                hints[k] = j as u8;
                k += 1;
            }
        }
        hints[P::OMEGA + i] = k as u8;
    }
    out
}

/// Decode `c̃ || z || h`.
///
/// Rejects any hint encoding that is not the unique canonical one: per-
/// polynomial counts must be non-decreasing and at most ω, indices must be
/// strictly increasing within a polynomial, and unused index slots must be
/// zero.
pub fn unpack_signature<P: ParameterSet>(sig: &[u8]) -> Option<(&[u8], PolyVec, PolyVec)> {
    if sig.len() != P::SIG_BYTES {
        return None;
    }
    let (c_tilde, rest) = sig.split_at(P::CTILDE_BYTES);
    let (z_part, hints) = rest.split_at(P::L * P::POLY_Z_PACKED_BYTES);

    let z = PolyVec {
        polys: z_part
            .chunks_exact(P::POLY_Z_PACKED_BYTES)
            .map(|chunk| unpack_z(chunk, P::GAMMA1_BITS))
            .collect(),
    };

    let mut h = PolyVec::zero(P::K);
    let mut k = 0usize;
    for (i, p) in h.polys.iter_mut().enumerate() {
        let end = hints[P::OMEGA + i] as usize;
        if end < k || end > P::OMEGA {
            return None;
        }
        for j in k..end {
            if j > k && hints[j] <= hints[j - 1] {
                return None;
            }
            p.coeffs[hints[j] as usize] = 1;
        }
        k = end;
    }
    if hints[k..P::OMEGA].iter().any(|&b| b != 0) {
        return None;
    }
    Some((c_tilde, z, h))
}
