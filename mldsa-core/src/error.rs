//! Error types for ML-DSA operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during signature operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid signature length.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Context string longer than 255 bytes.
    ContextTooLong {
        /// Length of the rejected context in bytes.
        len: usize,
    },

    /// Message or other input larger than the accepted maximum.
    InputTooLong {
        /// Length of the rejected input in bytes.
        len: usize,
        /// Largest accepted length in bytes.
        max: usize,
    },

    /// Pre-hash length does not match the named hash function.
    InvalidPrehashLength {
        /// Output length of the hash function in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// The signing loop used up its 16-bit mask nonce space.
    NonceExhausted,

    /// A freshly generated key pair failed its sign/verify self-test.
    PairwiseConsistency,

    /// Signature verification failed.
    VerificationFailed,

    /// Encoding or decoding error.
    EncodingError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::ContextTooLong { len } => {
                write!(f, "context string too long: {len} bytes, at most 255 allowed")
            }
            Error::InputTooLong { len, max } => {
                write!(f, "input too long: {len} bytes, at most {max} allowed")
            }
            Error::InvalidPrehashLength { expected, actual } => {
                write!(f, "invalid pre-hash length: expected {expected}, got {actual}")
            }
            Error::NonceExhausted => write!(f, "signing nonce space exhausted"),
            Error::PairwiseConsistency => write!(f, "key pair failed pairwise consistency test"),
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::EncodingError => write!(f, "encoding or decoding error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
