//! AES key expansion (FIPS-197 section 5.2).

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aesctr::core::constants::{RCON, SBOX};
use crate::aesctr::error::Result;
use crate::aesctr::key::Key;

/// Expanded AES key: `4 * (Nr + 1)` four-byte words, where `Nr` is 10, 12, or 14 for
/// 128, 192, and 256 bit keys. Each group of four words is one round key.
///
/// Only obtainable by expanding a valid [Key], so a schedule always matches the round
/// count of the key it came from. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeySchedule {
    words: Vec<[u8; 4]>,
    rounds: usize,
}

impl KeySchedule {
    /// AES key schedule.
    pub fn expand(key: &Key) -> Self {
        let key = key.as_bytes();

        // Variable names match FIPS-197, NIST specification: https://doi.org/10.6028/NIST.FIPS.197-upd1
        // Nk   The number of 32-bit words comprising the key
        // Nr   The number of rounds. 10, 12, and 14 for AES-128, AES-192, and AES-256, respectively
        // w    The result of the key schedule, an array of words that form round keys
        // Nw   The total number of words generated by the key schedule (including initial key)
        let nk = key.len() / 4;
        let nr = nk + 6;
        let nw = (nr + 1) * 4;

        let mut w: Vec<[u8; 4]> = vec![[0u8; 4]; nw];

        // first nk words of w are filled with the initial key
        for (i, byte) in key.iter().enumerate() {
            w[i / 4][i % 4] = *byte;
        }

        for i in nk..nw {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                // rot_word, sub_word, and rcon on temp
                temp = [
                    SBOX[temp[1] as usize] ^ RCON[i / nk],
                    SBOX[temp[2] as usize],
                    SBOX[temp[3] as usize],
                    SBOX[temp[0] as usize],
                ];
            } else if nk > 6 && i % nk == 4 {
                // additional substitution for AES-256 only
                temp = temp.map(|b| SBOX[b as usize]);
            }

            // w[i] = temp ⊕ w[i − Nk]
            let prev = w[i - nk];
            w[i] = [
                temp[0] ^ prev[0],
                temp[1] ^ prev[1],
                temp[2] ^ prev[2],
                temp[3] ^ prev[3],
            ];
        }

        Self { words: w, rounds: nr }
    }

    /// Expands raw key bytes. Returns an InvalidKeyLength error unless `bytes` is 16, 24,
    /// or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let key = Key::try_from_slice(bytes)?;
        Ok(Self::expand(&key))
    }

    /// Number of cipher rounds (`Nr`).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Every word of the schedule, in order.
    pub fn words(&self) -> &[[u8; 4]] {
        &self.words
    }

    /// Round key `round` as 16 bytes, column-major like the cipher state.
    ///
    /// # Panics
    /// If `round > self.rounds()`.
    pub fn round_key(&self, round: usize) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (col, word) in self.round_words(round).iter().enumerate() {
            out[col * 4..col * 4 + 4].copy_from_slice(word);
        }
        out
    }

    #[inline(always)]
    pub(crate) fn round_words(&self, round: usize) -> &[[u8; 4]] {
        &self.words[round * 4..round * 4 + 4]
    }
}
