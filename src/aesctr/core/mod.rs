//! Core AES implementation: forward cipher for a single 16 byte block. CTR mode only ever
//! runs the cipher forwards, so there is no inverse cipher here.

pub(crate) mod constants;
mod encryption;
mod util;

pub use encryption::encrypt_block;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;
