//! Signature scheme trait.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Longest context string accepted by [`Signer`] operations.
pub const MAX_CONTEXT_BYTES: usize = 255;

/// Digital signature trait.
///
/// This trait defines the interface for digital signature schemes
/// as specified in NIST post-quantum cryptography standards. Every
/// operation takes a context string (at most [`MAX_CONTEXT_BYTES`] bytes)
/// that binds the signature to an application domain; pass `&[]` for none.
///
/// # Example
///
/// ```ignore
/// use mldsa_core::Signer;
///
/// let (sk, pk) = MySigner::keygen(&mut rng)?;
/// let sig = MySigner::sign(&sk, message, b"my-app")?;
/// MySigner::verify(&pk, message, b"my-app", &sig)?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (signing_key, verification_key).
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Sign a message deterministically.
    ///
    /// The same key, message and context always give the same signature.
    fn sign(sk: &Self::SigningKey, message: &[u8], context: &[u8]) -> Result<Self::Signature>;

    /// Sign a message with fresh randomness mixed into the mask seed.
    fn sign_hedged(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
        rng: &mut impl CryptoRng,
    ) -> Result<Self::Signature>;

    /// Verify a signature.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the signature is valid, `Err(Error::VerificationFailed)` otherwise.
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Signature,
    ) -> Result<()>;
}
