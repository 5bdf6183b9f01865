//! SHAKE256-based hashing (the H function of FIPS 204).
//!
//! All calls go through the incremental single-lane [`Xof`] of the chosen
//! [`Fips202`] suite: absorb every part, finalize, squeeze, release.

use crate::params::{CRH_BYTES, SEED_BYTES, TR_BYTES};
use mldsa_fips202::{Fips202, Xof};

/// `SHAKE256(parts[0] || parts[1] || ...)` written to `out`.
pub fn h<H: Fips202>(parts: &[&[u8]], out: &mut [u8]) {
    let mut xof = H::Shake256::init();
    for part in parts {
        xof.absorb(part);
    }
    xof.finalize();
    xof.squeeze(out);
    xof.release();
}

/// tr = H(pk, 64).
pub fn hash_pk<H: Fips202>(pk: &[u8]) -> [u8; TR_BYTES] {
    let mut tr = [0u8; TR_BYTES];
    h::<H>(&[pk], &mut tr);
    tr
}

/// μ = H(tr || M', 64), where M' is given as consecutive pieces.
pub fn hash_message<H: Fips202>(tr: &[u8; TR_BYTES], message: &[&[u8]]) -> [u8; CRH_BYTES] {
    let mut xof = H::Shake256::init();
    xof.absorb(tr);
    for part in message {
        xof.absorb(part);
    }
    xof.finalize();
    let mut mu = [0u8; CRH_BYTES];
    xof.squeeze(&mut mu);
    xof.release();
    mu
}

/// ρ'' = H(K || rnd || μ, 64).
pub fn derive_rho_prime<H: Fips202>(
    key: &[u8; SEED_BYTES],
    rnd: &[u8; SEED_BYTES],
    mu: &[u8; CRH_BYTES],
) -> [u8; CRH_BYTES] {
    let mut out = [0u8; CRH_BYTES];
    h::<H>(&[key, rnd, mu], &mut out);
    out
}
