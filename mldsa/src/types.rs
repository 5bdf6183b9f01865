//! Per-level key types and API.
//!
//! Every security level exposes the same surface; [`define_variant!`]
//! stamps it out for one [`ParameterSet`](crate::params::ParameterSet)
//! on top of the generic algorithms in [`crate::sign`], using the
//! [`Native`](mldsa_fips202::Native) FIPS 202 suite.

/// Generate the algorithm marker, key types and operations of one level.
macro_rules! define_variant {
    ($name:ident, $params:ty) => {
        use $crate::params::ParameterSet;
        use $crate::sign::{self, HashAlg};
        use mldsa_core::{Error, Result, Signer};
        use mldsa_fips202::Native;
        use rand_core::CryptoRng;
        use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

        #[cfg(not(feature = "std"))]
        use alloc::vec::Vec;

        type Params = $params;

        /// Signing key size in bytes.
        pub const SK_BYTES: usize = <Params as ParameterSet>::SK_BYTES;
        /// Verification key size in bytes.
        pub const PK_BYTES: usize = <Params as ParameterSet>::PK_BYTES;
        /// Signature size in bytes.
        pub const SIG_BYTES: usize = <Params as ParameterSet>::SIG_BYTES;

        /// Algorithm marker.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        /// Signing key (secret key).
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SigningKey {
            bytes: [u8; SK_BYTES],
        }

        impl SigningKey {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != SK_BYTES {
                    return Err(Error::InvalidKeyLength {
                        expected: SK_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; SK_BYTES];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; SK_BYTES] {
                &self.bytes
            }
        }

        /// Verification key (public key).
        #[derive(Clone, PartialEq, Eq, Debug)]
        pub struct VerificationKey {
            bytes: [u8; PK_BYTES],
        }

        impl VerificationKey {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != PK_BYTES {
                    return Err(Error::InvalidKeyLength {
                        expected: PK_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut key = [0u8; PK_BYTES];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; PK_BYTES] {
                &self.bytes
            }
        }

        /// Signature.
        #[derive(Clone, PartialEq, Eq, Debug)]
        pub struct Signature {
            bytes: [u8; SIG_BYTES],
        }

        impl Signature {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != SIG_BYTES {
                    return Err(Error::InvalidSignatureLength {
                        expected: SIG_BYTES,
                        actual: bytes.len(),
                    });
                }
                let mut sig = [0u8; SIG_BYTES];
                sig.copy_from_slice(bytes);
                Ok(Self { bytes: sig })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; SIG_BYTES] {
                &self.bytes
            }
        }

        fn finish_keygen(sk: Vec<u8>, pk: Vec<u8>) -> Result<(SigningKey, VerificationKey)> {
            let sk = Zeroizing::new(sk);
            #[cfg(feature = "keygen-pct")]
            sign::pairwise_consistency::<Params, Native>(&sk, &pk)?;
            Ok((SigningKey::from_bytes(&sk)?, VerificationKey::from_bytes(&pk)?))
        }

        fn sign_pure(
            sk: &SigningKey,
            message: &[u8],
            context: &[u8],
            rnd: &[u8; 32],
        ) -> Result<Signature> {
            sign::check_message_len(message)?;
            let header = sign::pure_header(context)?;
            let sig = sign::sign_internal::<Params, Native>(
                sk.as_bytes(),
                &[&header, context, message],
                rnd,
            )?;
            Signature::from_bytes(&sig)
        }

        fn verdict(valid: bool) -> Result<()> {
            if valid {
                Ok(())
            } else {
                Err(Error::VerificationFailed)
            }
        }

        impl Signer for $name {
            type SigningKey = SigningKey;
            type VerificationKey = VerificationKey;
            type Signature = Signature;

            const SIGNING_KEY_SIZE: usize = SK_BYTES;
            const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
            const SIGNATURE_SIZE: usize = SIG_BYTES;

            fn keygen(
                rng: &mut impl CryptoRng,
            ) -> Result<(Self::SigningKey, Self::VerificationKey)> {
                let mut xi = Zeroizing::new([0u8; 32]);
                rng.fill_bytes(&mut xi[..]);
                Self::keygen_internal(&xi)
            }

            fn sign(sk: &Self::SigningKey, message: &[u8], context: &[u8]) -> Result<Self::Signature> {
                sign_pure(sk, message, context, &[0u8; 32])
            }

            fn sign_hedged(
                sk: &Self::SigningKey,
                message: &[u8],
                context: &[u8],
                rng: &mut impl CryptoRng,
            ) -> Result<Self::Signature> {
                let mut rnd = Zeroizing::new([0u8; 32]);
                rng.fill_bytes(&mut rnd[..]);
                sign_pure(sk, message, context, &rnd)
            }

            fn verify(
                pk: &Self::VerificationKey,
                message: &[u8],
                context: &[u8],
                signature: &Self::Signature,
            ) -> Result<()> {
                sign::check_message_len(message)?;
                let header = sign::pure_header(context)?;
                verdict(sign::verify_internal::<Params, Native>(
                    pk.as_bytes(),
                    &[&header, context, message],
                    signature.as_bytes(),
                ))
            }
        }

        impl $name {
            /// Deterministic key generation from a 32-byte seed ξ.
            pub fn keygen_internal(seed: &[u8; 32]) -> Result<(SigningKey, VerificationKey)> {
                let (sk, pk) = sign::keygen_internal::<Params, Native>(seed);
                finish_keygen(sk, pk)
            }

            /// Sign an already formatted message M' with explicit randomness.
            pub fn sign_internal(
                sk: &SigningKey,
                message: &[u8],
                rnd: &[u8; 32],
            ) -> Result<Signature> {
                sign::check_message_len(message)?;
                let sig = sign::sign_internal::<Params, Native>(sk.as_bytes(), &[message], rnd)?;
                Signature::from_bytes(&sig)
            }

            /// Verify a signature over an already formatted message M'.
            pub fn verify_internal(
                pk: &VerificationKey,
                message: &[u8],
                signature: &Signature,
            ) -> Result<()> {
                sign::check_message_len(message)?;
                verdict(sign::verify_internal::<Params, Native>(
                    pk.as_bytes(),
                    &[message],
                    signature.as_bytes(),
                ))
            }

            /// Message representative μ for [`Self::sign_extmu`] and
            /// [`Self::verify_extmu`].
            pub fn compute_mu(
                pk: &VerificationKey,
                message: &[u8],
                context: &[u8],
            ) -> Result<[u8; 64]> {
                sign::compute_mu::<Params, Native>(pk.as_bytes(), message, context)
            }

            /// Sign a precomputed μ.
            pub fn sign_extmu(sk: &SigningKey, mu: &[u8; 64], rnd: &[u8; 32]) -> Result<Signature> {
                let sig = sign::sign_extmu::<Params, Native>(sk.as_bytes(), mu, rnd)?;
                Signature::from_bytes(&sig)
            }

            /// Verify a signature over a precomputed μ.
            pub fn verify_extmu(
                pk: &VerificationKey,
                mu: &[u8; 64],
                signature: &Signature,
            ) -> Result<()> {
                verdict(sign::verify_extmu::<Params, Native>(
                    pk.as_bytes(),
                    mu,
                    signature.as_bytes(),
                ))
            }

            /// HashML-DSA over a caller-computed pre-hash `ph` of `alg`.
            ///
            /// `ph` must be exactly `alg.output_len()` bytes. M' is
            /// `1 || len(ctx) || ctx || OID(alg) || ph`.
            pub fn sign_prehash(
                sk: &SigningKey,
                ph: &[u8],
                context: &[u8],
                alg: HashAlg,
                rnd: &[u8; 32],
            ) -> Result<Signature> {
                sign::check_prehash(alg, ph)?;
                let header = sign::prehash_header(context)?;
                let sig = sign::sign_internal::<Params, Native>(
                    sk.as_bytes(),
                    &[&header, context, &alg.oid(), ph],
                    rnd,
                )?;
                Signature::from_bytes(&sig)
            }

            /// Verify a HashML-DSA signature over a pre-hash `ph` of `alg`.
            pub fn verify_prehash(
                pk: &VerificationKey,
                ph: &[u8],
                context: &[u8],
                alg: HashAlg,
                signature: &Signature,
            ) -> Result<()> {
                sign::check_prehash(alg, ph)?;
                let header = sign::prehash_header(context)?;
                verdict(sign::verify_internal::<Params, Native>(
                    pk.as_bytes(),
                    &[&header, context, &alg.oid(), ph],
                    signature.as_bytes(),
                ))
            }

            /// HashML-DSA with a SHAKE256 pre-hash, deterministic.
            pub fn sign_prehash_shake256(
                sk: &SigningKey,
                message: &[u8],
                context: &[u8],
            ) -> Result<Signature> {
                sign::check_message_len(message)?;
                let ph = sign::prehash_shake256::<Native>(message);
                Self::sign_prehash(sk, &ph, context, HashAlg::Shake256, &[0u8; 32])
            }

            /// Verify a HashML-DSA signature with a SHAKE256 pre-hash.
            pub fn verify_prehash_shake256(
                pk: &VerificationKey,
                message: &[u8],
                context: &[u8],
                signature: &Signature,
            ) -> Result<()> {
                sign::check_message_len(message)?;
                let ph = sign::prehash_shake256::<Native>(message);
                Self::verify_prehash(pk, &ph, context, HashAlg::Shake256, signature)
            }

            /// Sign and return `signature || message`.
            pub fn sign_attached(
                sk: &SigningKey,
                message: &[u8],
                context: &[u8],
            ) -> Result<Vec<u8>> {
                let sig = <Self as Signer>::sign(sk, message, context)?;
                let mut signed = Vec::with_capacity(SIG_BYTES + message.len());
                signed.extend_from_slice(sig.as_bytes());
                signed.extend_from_slice(message);
                Ok(signed)
            }

            /// Verify `signature || message` and return the message.
            pub fn open(pk: &VerificationKey, signed: &[u8], context: &[u8]) -> Result<Vec<u8>> {
                if signed.len() < SIG_BYTES {
                    return Err(Error::InvalidSignatureLength {
                        expected: SIG_BYTES,
                        actual: signed.len(),
                    });
                }
                let (sig, message) = signed.split_at(SIG_BYTES);
                let sig = Signature::from_bytes(sig)?;
                <Self as Signer>::verify(pk, message, context, &sig)?;
                Ok(message.to_vec())
            }
        }
    };
}

pub(crate) use define_variant;
