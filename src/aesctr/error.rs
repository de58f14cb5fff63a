use rand::rand_core;
use thiserror::Error;

/// AES-CTR Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES-CTR Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Requested a key size other than 128, 192, or 256 bits.
    #[error("invalid key size: {bits} bits (expected 128, 192, or 256)")]
    InvalidKeySize { bits: u32 },

    /// Attempted to build an AES key from a slice that is not 16, 24, or 32 bytes long.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// Passed a slice that is not exactly one 16-byte block to the block cipher.
    #[error("invalid block length: {len} bytes (expected 16)")]
    InvalidBlockLength { len: usize },

    /// Envelope is too short to contain the nonce prefix.
    #[error("malformed ciphertext: {len} bytes ({context})")]
    MalformedCiphertext { len: usize, context: &'static str },

    /// Ciphertext text is not valid Base64.
    #[error("malformed ciphertext: invalid base64 ({0})")]
    Base64(#[from] base64::DecodeError),

    /// The 64-bit block counter would wrap before the input was consumed.
    #[error("input size caused counter overflow (64 bit block counter exhausted)")]
    CounterOverflow,

    /// OS RNG failed while drawing the random part of a nonce.
    #[error("OS RNG failed in nonce generation")]
    Rng(#[from] rand_core::OsError),

    /// A progress observer asked for the operation to stop. No output is returned.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// True for both kinds of undecodable ciphertext: bad Base64 text and an envelope
    /// shorter than its nonce.
    pub fn is_malformed_ciphertext(&self) -> bool {
        matches!(self, Self::MalformedCiphertext { .. } | Self::Base64(_))
    }
}
