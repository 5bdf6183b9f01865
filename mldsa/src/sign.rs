//! ML-DSA key generation, signing and verification (FIPS 204 §6-§7).
//!
//! Everything here is generic over the parameter set `P` and the FIPS 202
//! suite `H`. Keys and signatures are plain byte strings; the typed
//! per-level wrappers live in the `MlDsa44`/`MlDsa65`/`MlDsa87` modules.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::hash::{derive_rho_prime, h, hash_message, hash_pk};
use crate::packing::{
    pack_signature, pack_w1_vec, unpack_signature, PublicKeyParts, SecretKeyParts,
};
use crate::params::{ParameterSet, CRH_BYTES, D, SEED_BYTES};
use crate::polyvec::PolyVec;
use crate::rounding::{decompose_vec, make_hint_vec, power2round_vec, use_hint_poly};
use crate::sample::{expand_a, expand_mask, expand_s, sample_in_ball};
use mldsa_core::{Error, Result, MAX_CONTEXT_BYTES};
use mldsa_fips202::{sha3_256, sha3_512, Fips202, Xof, MAX_BUFFER_SIZE};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Length of the SHAKE256 pre-hash.
pub const PREHASH_BYTES: usize = 64;

/// Shared DER prefix of the NIST hash algorithm OIDs (2.16.840.1.101.3.4.2).
const HASH_OID_PREFIX: [u8; 10] = [0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02];

/// Pre-hash functions accepted by HashML-DSA (FIPS 204 §5.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    /// SHA2-224.
    Sha2_224,
    /// SHA2-256.
    Sha2_256,
    /// SHA2-384.
    Sha2_384,
    /// SHA2-512.
    Sha2_512,
    /// SHA2-512/224.
    Sha2_512_224,
    /// SHA2-512/256.
    Sha2_512_256,
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
    /// SHAKE128 with 256 bits of output.
    Shake128,
    /// SHAKE256 with 512 bits of output.
    Shake256,
}

impl HashAlg {
    /// DER-encoded object identifier placed in M'.
    #[must_use]
    pub const fn oid(self) -> [u8; 11] {
        let arc = match self {
            HashAlg::Sha2_256 => 0x01,
            HashAlg::Sha2_384 => 0x02,
            HashAlg::Sha2_512 => 0x03,
            HashAlg::Sha2_224 => 0x04,
            HashAlg::Sha2_512_224 => 0x05,
            HashAlg::Sha2_512_256 => 0x06,
            HashAlg::Sha3_224 => 0x07,
            HashAlg::Sha3_256 => 0x08,
            HashAlg::Sha3_384 => 0x09,
            HashAlg::Sha3_512 => 0x0A,
            HashAlg::Shake128 => 0x0B,
            HashAlg::Shake256 => 0x0C,
        };
        let p = HASH_OID_PREFIX;
        [p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], p[8], p[9], arc]
    }

    /// Length of the pre-hash in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            HashAlg::Sha2_224 | HashAlg::Sha2_512_224 | HashAlg::Sha3_224 => 28,
            HashAlg::Sha2_256
            | HashAlg::Sha2_512_256
            | HashAlg::Sha3_256
            | HashAlg::Shake128 => 32,
            HashAlg::Sha2_384 | HashAlg::Sha3_384 => 48,
            HashAlg::Sha2_512 | HashAlg::Sha3_512 | HashAlg::Shake256 => 64,
        }
    }

    /// Pre-hash `message` with this function, when it is a FIPS 202 one.
    ///
    /// Returns `None` for the SHA-2 family, SHA3-224 and SHA3-384; hash those
    /// elsewhere and pass the result to the pre-hash signing functions.
    #[must_use]
    pub fn digest<H: Fips202>(self, message: &[u8]) -> Option<Vec<u8>> {
        let ph = match self {
            HashAlg::Sha3_256 => sha3_256(message).to_vec(),
            HashAlg::Sha3_512 => sha3_512(message).to_vec(),
            HashAlg::Shake128 => {
                let mut ph = vec![0u8; self.output_len()];
                let mut xof = H::Shake128::init();
                xof.absorb(message);
                xof.finalize();
                xof.squeeze(&mut ph);
                xof.release();
                ph
            }
            HashAlg::Shake256 => prehash_shake256::<H>(message).to_vec(),
            _ => return None,
        };
        Some(ph)
    }
}

/// Masks are indexed by a 16-bit nonce.
const NONCE_SPACE: usize = 1 << 16;

/// Header of M' for pure signing: `0 || len(ctx)`.
pub fn pure_header(context: &[u8]) -> Result<[u8; 2]> {
    if context.len() > MAX_CONTEXT_BYTES {
        return Err(Error::ContextTooLong { len: context.len() });
    }
    Ok([0, context.len() as u8])
}

/// Header of M' for pre-hash signing: `1 || len(ctx)`.
pub fn prehash_header(context: &[u8]) -> Result<[u8; 2]> {
    let [_, len] = pure_header(context)?;
    Ok([1, len])
}

/// Reject messages beyond the sponge input guard.
pub fn check_message_len(message: &[u8]) -> Result<()> {
    if message.len() > MAX_BUFFER_SIZE {
        return Err(Error::InputTooLong {
            len: message.len(),
            max: MAX_BUFFER_SIZE,
        });
    }
    Ok(())
}

/// Reject a pre-hash whose length does not match `alg`.
pub fn check_prehash(alg: HashAlg, ph: &[u8]) -> Result<()> {
    if ph.len() != alg.output_len() {
        return Err(Error::InvalidPrehashLength {
            expected: alg.output_len(),
            actual: ph.len(),
        });
    }
    Ok(())
}

/// SHAKE256 pre-hash of a message, 64 bytes.
pub fn prehash_shake256<H: Fips202>(message: &[u8]) -> [u8; PREHASH_BYTES] {
    let mut ph = [0u8; PREHASH_BYTES];
    h::<H>(&[message], &mut ph);
    ph
}

/// ML-DSA.KeyGen_internal (Algorithm 6). Returns `(sk, pk)`.
pub fn keygen_internal<P: ParameterSet, H: Fips202>(
    seed: &[u8; SEED_BYTES],
) -> (Vec<u8>, Vec<u8>) {
    let mut seedbuf = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    h::<H>(&[seed, &[P::K as u8, P::L as u8]], &mut seedbuf[..]);

    let mut rho = [0u8; SEED_BYTES];
    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    let mut key = [0u8; SEED_BYTES];
    rho.copy_from_slice(&seedbuf[..SEED_BYTES]);
    rho_prime.copy_from_slice(&seedbuf[SEED_BYTES..SEED_BYTES + CRH_BYTES]);
    key.copy_from_slice(&seedbuf[SEED_BYTES + CRH_BYTES..]);

    let a_hat = expand_a::<P, H>(&rho);
    let (s1, s2) = expand_s::<P, H>(&rho_prime);

    let mut s1_hat = Zeroizing::new(s1.clone());
    s1_hat.ntt();
    let mut t = a_hat.mul_vec(&s1_hat);
    t.reduce();
    t.inv_ntt();
    t.add_assign(&s2);
    t.caddq();
    let (t1, t0) = power2round_vec(&t);
    t.zeroize();

    let pk = PublicKeyParts { rho, t1 }.encode::<P>();
    let tr = hash_pk::<H>(&pk);
    let sk_parts = SecretKeyParts {
        rho,
        key,
        tr,
        s1,
        s2,
        t0,
    };
    key.zeroize();
    (sk_parts.encode::<P>(), pk)
}

/// ML-DSA.Sign_internal (Algorithm 7) with M' given as consecutive pieces.
pub fn sign_internal<P: ParameterSet, H: Fips202>(
    sk: &[u8],
    message: &[&[u8]],
    rnd: &[u8; SEED_BYTES],
) -> Result<Vec<u8>> {
    let sk = decode_sk::<P>(sk)?;
    let mu = hash_message::<H>(&sk.tr, message);
    sign_mu::<P, H>(&sk, &mu, rnd)
}

/// Sign a caller-computed message representative μ.
pub fn sign_extmu<P: ParameterSet, H: Fips202>(
    sk: &[u8],
    mu: &[u8; CRH_BYTES],
    rnd: &[u8; SEED_BYTES],
) -> Result<Vec<u8>> {
    let sk = decode_sk::<P>(sk)?;
    sign_mu::<P, H>(&sk, mu, rnd)
}

fn decode_sk<P: ParameterSet>(sk: &[u8]) -> Result<SecretKeyParts> {
    SecretKeyParts::decode::<P>(sk).ok_or(Error::InvalidKeyLength {
        expected: P::SK_BYTES,
        actual: sk.len(),
    })
}

fn sign_mu<P: ParameterSet, H: Fips202>(
    sk: &SecretKeyParts,
    mu: &[u8; CRH_BYTES],
    rnd: &[u8; SEED_BYTES],
) -> Result<Vec<u8>> {
    let rho_pp = Zeroizing::new(derive_rho_prime::<H>(&sk.key, rnd, mu));
    let a_hat = expand_a::<P, H>(&sk.rho);

    let mut s1_hat = Zeroizing::new(sk.s1.clone());
    let mut s2_hat = Zeroizing::new(sk.s2.clone());
    let mut t0_hat = Zeroizing::new(sk.t0.clone());
    s1_hat.ntt();
    s2_hat.ntt();
    t0_hat.ntt();

    let mut c_tilde = Zeroizing::new(vec![0u8; P::CTILDE_BYTES]);
    let mut kappa = 0usize;
    loop {
        if kappa + P::L > NONCE_SPACE {
            return Err(Error::NonceExhausted);
        }
        let y = Zeroizing::new(expand_mask::<P, H>(&rho_pp, kappa as u16));
        kappa += P::L;

        // w = A·y, split into high and low bits.
        let mut y_hat = Zeroizing::new(y.clone());
        y_hat.ntt();
        let mut w = Zeroizing::new(a_hat.mul_vec(&y_hat));
        w.reduce();
        w.inv_ntt();
        w.caddq();
        let (w1, w0) = decompose_vec(&w, P::GAMMA2);
        let mut w0 = Zeroizing::new(w0);

        h::<H>(&[mu, &pack_w1_vec::<P>(&w1)], &mut c_tilde[..]);
        let mut c_hat = sample_in_ball::<H>(&c_tilde, P::TAU);
        c_hat.ntt();

        // z = y + c·s1
        let mut z = Zeroizing::new(s1_hat.scale_ntt(&c_hat));
        z.inv_ntt();
        z.add_assign(&y);
        z.reduce();
        if !z.check_norm(P::GAMMA1 - P::BETA) {
            continue;
        }

        // r0 = LowBits(w - c·s2)
        let mut cs2 = Zeroizing::new(s2_hat.scale_ntt(&c_hat));
        cs2.inv_ntt();
        w0.sub_assign(&cs2);
        w0.reduce();
        if !w0.check_norm(P::GAMMA2 - P::BETA) {
            continue;
        }

        let mut ct0 = Zeroizing::new(t0_hat.scale_ntt(&c_hat));
        ct0.inv_ntt();
        ct0.reduce();
        if !ct0.check_norm(P::GAMMA2) {
            continue;
        }

        w0.add_assign(&ct0);
        let (hints, count) = make_hint_vec(&w0, &w1, P::GAMMA2);
        if count > P::OMEGA {
            continue;
        }

        return Ok(pack_signature::<P>(&c_tilde, &z, &hints));
    }
}

/// ML-DSA.Verify_internal (Algorithm 8) with M' given as consecutive pieces.
pub fn verify_internal<P: ParameterSet, H: Fips202>(
    pk: &[u8],
    message: &[&[u8]],
    sig: &[u8],
) -> bool {
    if pk.len() != P::PK_BYTES {
        return false;
    }
    let tr = hash_pk::<H>(pk);
    let mu = hash_message::<H>(&tr, message);
    verify_extmu::<P, H>(pk, &mu, sig)
}

/// Verify a signature over a caller-computed message representative μ.
pub fn verify_extmu<P: ParameterSet, H: Fips202>(
    pk: &[u8],
    mu: &[u8; CRH_BYTES],
    sig: &[u8],
) -> bool {
    let Some(pk) = PublicKeyParts::decode::<P>(pk) else {
        return false;
    };
    let Some((c_tilde, z, hints)) = unpack_signature::<P>(sig) else {
        return false;
    };
    if !z.check_norm(P::GAMMA1 - P::BETA) {
        return false;
    }

    let a_hat = expand_a::<P, H>(&pk.rho);
    let mut c_hat = sample_in_ball::<H>(c_tilde, P::TAU);
    c_hat.ntt();

    // w' = A·z - c·t1·2^d
    let mut z_hat = z;
    z_hat.ntt();
    let mut w = a_hat.mul_vec(&z_hat);
    let mut t1 = pk.t1;
    t1.shift_left(D);
    t1.ntt();
    w.sub_assign(&t1.scale_ntt(&c_hat));
    w.reduce();
    w.inv_ntt();
    w.caddq();

    let w1 = PolyVec {
        polys: w
            .polys
            .iter()
            .zip(&hints.polys)
            .map(|(wp, hp)| use_hint_poly(wp, hp, P::GAMMA2))
            .collect(),
    };

    let mut c_tilde_prime = vec![0u8; P::CTILDE_BYTES];
    h::<H>(&[mu, &pack_w1_vec::<P>(&w1)], &mut c_tilde_prime);
    bool::from(c_tilde.ct_eq(&c_tilde_prime))
}

/// μ = H(H(pk) || 0 || len(ctx) || ctx || M, 64) for the external-μ API.
pub fn compute_mu<P: ParameterSet, H: Fips202>(
    pk: &[u8],
    message: &[u8],
    context: &[u8],
) -> Result<[u8; CRH_BYTES]> {
    if pk.len() != P::PK_BYTES {
        return Err(Error::InvalidKeyLength {
            expected: P::PK_BYTES,
            actual: pk.len(),
        });
    }
    check_message_len(message)?;
    let header = pure_header(context)?;
    let tr = hash_pk::<H>(pk);
    Ok(hash_message::<H>(&tr, &[&header, context, message]))
}

/// Sign and immediately verify a fixed message with a fresh key pair.
#[cfg(feature = "keygen-pct")]
pub fn pairwise_consistency<P: ParameterSet, H: Fips202>(sk: &[u8], pk: &[u8]) -> Result<()> {
    const PCT_MESSAGE: &[u8] = b"ML-DSA pairwise consistency test";
    let rnd = [0u8; SEED_BYTES];
    let header = [0u8, 0u8];
    let sig = sign_internal::<P, H>(sk, &[&header, PCT_MESSAGE], &rnd)?;
    if verify_internal::<P, H>(pk, &[&header, PCT_MESSAGE], &sig) {
        Ok(())
    } else {
        Err(Error::PairwiseConsistency)
    }
}
