use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aesctr::error::Result;

/// Length of the nonce prefix of every ciphertext envelope.
pub const NONCE_LEN: usize = 8;

/// The 8 byte nonce that fills the first half of every counter block.
///
/// Generated once per encryption and sent in front of the ciphertext, so decryption can
/// rebuild the same counter blocks. The default layout ([Nonce::generate]) follows
/// NIST SP 800-38A B.2 as used by the JavaScript `Aes.Ctr` text format:
///
/// | bytes  | content                                  |
/// |--------|------------------------------------------|
/// | `0..2` | milliseconds within the second, LE       |
/// | `2..4` | random 16 bit value, LE                  |
/// | `4..8` | seconds since the Unix epoch mod 2^32, LE |
///
/// Uniqueness is only probabilistic (same millisecond and same random draw collide) and
/// the seconds field wraps in 2106. [Nonce::random] draws all 8 bytes from the OS RNG
/// instead; decryption treats both the same way.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Timestamp nonce for the current wall clock time. Returns Error if OsRng fails.
    pub fn generate() -> Result<Self> {
        // a clock set before 1970 degrades to the all-zero timestamp
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let mut rnd = [0u8; 2];
        OsRng.try_fill_bytes(&mut rnd)?;

        Ok(Self::from_timestamp(now, u16::from_le_bytes(rnd)))
    }

    /// Timestamp nonce for an explicit time since the epoch and random value.
    pub fn from_timestamp(since_epoch: Duration, random: u16) -> Self {
        let millis = since_epoch.subsec_millis() as u16;
        let secs = since_epoch.as_secs() as u32; // truncation is part of the format

        let mut bytes = [0u8; NONCE_LEN];
        bytes[0..2].copy_from_slice(&millis.to_le_bytes());
        bytes[2..4].copy_from_slice(&random.to_le_bytes());
        bytes[4..8].copy_from_slice(&secs.to_le_bytes());
        Self(bytes)
    }

    /// Nonce drawn entirely from the OS RNG. Returns Error if OsRng fails.
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_layout() {
        let t = Duration::new(0x0102_0304, 987_654_321);
        let nonce = Nonce::from_timestamp(t, 0xBEEF);

        assert_eq!(
            nonce.as_bytes(),
            &[
                0xdb, 0x03, // 987 ms
                0xef, 0xbe, // random
                0x04, 0x03, 0x02, 0x01, // seconds
            ]
        );
    }

    #[test]
    fn seconds_wrap_at_32_bits() {
        let t = Duration::from_secs((1u64 << 32) + 5);
        let nonce = Nonce::from_timestamp(t, 0);
        assert_eq!(&nonce.as_bytes()[4..], &[5, 0, 0, 0]);
    }

    #[test]
    fn generate_uses_current_time() -> Result<()> {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as u32;
        let nonce = Nonce::generate()?;
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as u32;

        let b = nonce.as_bytes();
        let secs = u32::from_le_bytes([b[4], b[5], b[6], b[7]]);
        let millis = u16::from_le_bytes([b[0], b[1]]);
        assert!(before <= secs && secs <= after);
        assert!(millis < 1000);
        Ok(())
    }

    #[test]
    fn random_nonces_differ() -> Result<()> {
        // 2^-64 chance of a false failure
        assert_ne!(Nonce::random()?, Nonce::random()?);
        Ok(())
    }
}
