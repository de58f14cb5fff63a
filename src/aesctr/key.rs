//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits, and
//! [`KeySize`]. Keys are built from an existing byte slice or derived from a password.

use std::fmt;

use zeroize::Zeroize;

use crate::aesctr::core::encrypt_block;
use crate::aesctr::error::{Error, Result};
use crate::aesctr::schedule::KeySchedule;

/// Supported AES key sizes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Key size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }

    /// Key size in bytes.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Parses a bit count. Anything other than 128, 192, or 256 is an InvalidKeySize error.
impl TryFrom<u32> for KeySize {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(Self::Bits128),
            192 => Ok(Self::Bits192),
            256 => Ok(Self::Bits256),
            _ => Err(Error::InvalidKeySize { bits }),
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

#[derive(Clone, PartialEq, Eq)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Contains a valid AES key. Built from a slice of bytes that is 16, 24, or 32 bytes long,
/// or derived from a password with [Key::from_password].
/// A `Key` is required to instantiate a [Cipher](crate::Cipher).
///
/// ## Examples
/// ```
/// # fn main() -> aesctr::Result<()> {
/// use aesctr::{Key, KeySize};
///
/// let key_bytes: [u8; 32] = [0xBA, 0x32, 0x82, 0x9A, 0x43, 0x8A, 0x48, 0xED,
///                            0xC2, 0xEA, 0x10, 0x73, 0x26, 0xF8, 0xA9, 0x62,
///                            0xDE, 0x82, 0x06, 0xBA, 0x53, 0xC2, 0xC7, 0x55,
///                            0x2C, 0x72, 0xC5, 0x37, 0xBF, 0xD4, 0xDB, 0x5E];
/// let my_key_128 = Key::try_from_slice(&key_bytes[..16])?;
/// let my_key_256 = Key::try_from_slice(&key_bytes)?;
/// assert_eq!(my_key_128.as_bytes(), &key_bytes[..16]);
/// assert_eq!(my_key_256.size(), KeySize::Bits256);
///
/// // Anything other than 16, 24, or 32 bytes is an InvalidKeyLength error:
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
///
/// // Password keys are always the requested size, whatever the password length:
/// let pw_key = Key::from_password("correct horse", KeySize::Bits192);
/// assert_eq!(pw_key.as_bytes().len(), 24);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let size = match bytes.len() {
            16 => KeySize::Bits128,
            24 => KeySize::Bits192,
            32 => KeySize::Bits256,
            len => return Err(Error::InvalidKeyLength { len }),
        };
        Ok(Self::zero_padded(bytes, size))
    }

    /// Derives a key from a password the way the JavaScript `Aes.Ctr` text format does.
    ///
    /// 1. The first `size.bytes()` bytes of the UTF-8 password are taken, zero-padded if the
    ///    password is shorter.
    /// 2. Those bytes are expanded into a key schedule and their first 16 bytes are encrypted
    ///    under it, giving a 16 byte block.
    /// 3. For 192 and 256 bit keys the block is repeated to fill the remaining bytes.
    ///
    /// **This is not a real KDF.** There is no salt or work factor, and the upper half of a
    /// 256 bit key repeats the lower half. It is kept for compatibility with existing
    /// ciphertexts only.
    pub fn from_password(password: &str, size: KeySize) -> Self {
        let padded = Self::zero_padded(password.as_bytes(), size);
        let schedule = KeySchedule::expand(&padded);

        let mut block = [0u8; 16];
        block.copy_from_slice(&padded.as_bytes()[..16]);
        let mut seed = encrypt_block(&block, &schedule);

        let mut buf = [0u8; 32];
        buf[..16].copy_from_slice(&seed);
        buf[16..].copy_from_slice(&seed);
        let key = Self::zero_padded(&buf, size);

        block.zeroize();
        seed.zeroize();
        buf.zeroize();
        key
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    /// Key size implied by the length of the key.
    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }

    // copies at most size.bytes() from source; the rest of the key stays zero
    fn zero_padded(source: &[u8], size: KeySize) -> Self {
        let take = source.len().min(size.bytes());
        let bytes = match size {
            KeySize::Bits128 => {
                let mut k = [0u8; 16];
                k[..take].copy_from_slice(&source[..take]);
                KeyBytes::K128(k)
            }
            KeySize::Bits192 => {
                let mut k = [0u8; 24];
                k[..take].copy_from_slice(&source[..take]);
                KeyBytes::K192(k)
            }
            KeySize::Bits256 => {
                let mut k = [0u8; 32];
                k[..take].copy_from_slice(&source[..take]);
                KeyBytes::K256(k)
            }
        };
        Self { bytes }
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        match &mut self.bytes {
            KeyBytes::K128(k) => k.zeroize(),
            KeyBytes::K192(k) => k.zeroize(),
            KeyBytes::K256(k) => k.zeroize(),
        }
    }
}

// never print key material
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").field("size", &self.size()).finish_non_exhaustive()
    }
}
