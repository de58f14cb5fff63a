use std::ops::ControlFlow;

use log::debug;

use crate::aesctr::core::{BLOCK_LEN, encrypt_block};
use crate::aesctr::error::{Error, Result};
use crate::aesctr::key::{Key, KeySize};
use crate::aesctr::modes::{Progress, ctr_core, ctr_core_observed};
use crate::aesctr::nonce::{NONCE_LEN, Nonce};
use crate::aesctr::schedule::KeySchedule;

/// AES in counter mode over byte envelopes of the form `Nonce (8 bytes) || Ciphertext`.
/// Instantiated with an AES [Key], which is expanded once and stored in the instance.
///
/// ## Examples
/// ```
/// # fn main() -> aesctr::Result<()> {
/// use aesctr::{Cipher, KeySize};
///
/// let cipher = Cipher::from_password("pāşšŵōřđ", KeySize::Bits256);
/// let envelope = cipher.encrypt_ctr(b"big secret")?;
/// assert_eq!(envelope.len(), 8 + 10);
/// assert_eq!(cipher.decrypt_ctr(&envelope)?, b"big secret");
/// # Ok(())
/// # }
/// ```
pub struct Cipher {
    schedule: KeySchedule,
}

impl Cipher {
    /// Generates round keys from provided key and stores in the returned instance.
    pub fn new(key: &Key) -> Self {
        Self {
            schedule: KeySchedule::expand(key),
        }
    }

    /// Cipher for a password key, see [Key::from_password].
    pub fn from_password(password: &str, size: KeySize) -> Self {
        Self::new(&Key::from_password(password, size))
    }

    /// The expanded round keys this cipher encrypts with.
    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Encrypts a single block. Returns InvalidBlockLength unless `block` is exactly 16 bytes.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<[u8; BLOCK_LEN]> {
        let block: &[u8; BLOCK_LEN] = block
            .try_into()
            .map_err(|_| Error::InvalidBlockLength { len: block.len() })?;
        Ok(encrypt_block(block, &self.schedule))
    }

    /// **Counter mode** encryption.
    ///
    /// Generates a timestamp [Nonce]. For each 16-byte block of plaintext:
    /// 1. The block index (starting at zero) is written big-endian after the nonce.
    /// 2. The `Nonce || Counter` block is encrypted using the round keys.
    /// 3. The plaintext block is `XOR`'d with the encrypted counter block.
    ///
    /// The final block may be shorter than 16 bytes; no padding is added, so the output is
    /// always `8 + plaintext.len()` bytes.
    ///
    /// Output is formatted as `Nonce (8 bytes) || Ciphertext`
    pub fn encrypt_ctr(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_ctr_with_nonce(plaintext, Nonce::generate()?)
    }

    /// Counter mode encryption under a caller-chosen nonce. Gives reproducible output; the
    /// caller is responsible for never reusing a nonce with the same key.
    pub fn encrypt_ctr_with_nonce(&self, plaintext: &[u8], nonce: Nonce) -> Result<Vec<u8>> {
        let mut envelope = Vec::with_capacity(NONCE_LEN + plaintext.len());
        envelope.extend_from_slice(nonce.as_bytes());
        envelope.append(&mut ctr_core(plaintext, &self.schedule, &nonce, 0)?);
        Ok(envelope)
    }

    /// **Counter mode** decryption.
    ///
    /// Assumes format matches output of encryption: `Nonce (8 bytes) || Ciphertext`.
    /// There is no integrity check: a wrong key or modified ciphertext decrypts to garbage
    /// without an error.
    pub fn decrypt_ctr(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        let (nonce, ciphertext) = split_envelope(envelope)?;
        ctr_core(ciphertext, &self.schedule, &nonce, 0)
    }

    /// As [encrypt_ctr_with_nonce](Cipher::encrypt_ctr_with_nonce), reporting progress to
    /// `observer` every [PROGRESS_INTERVAL](crate::PROGRESS_INTERVAL) blocks. The observer
    /// can cancel by returning `ControlFlow::Break(())`, which yields [Error::Cancelled].
    pub fn encrypt_ctr_observed<F>(
        &self,
        plaintext: &[u8],
        nonce: Nonce,
        observer: F,
    ) -> Result<Vec<u8>>
    where
        F: FnMut(Progress) -> ControlFlow<()>,
    {
        let mut envelope = Vec::with_capacity(NONCE_LEN + plaintext.len());
        envelope.extend_from_slice(nonce.as_bytes());
        envelope.append(&mut ctr_core_observed(
            plaintext,
            &self.schedule,
            &nonce,
            0,
            observer,
        )?);
        Ok(envelope)
    }

    /// As [decrypt_ctr](Cipher::decrypt_ctr), reporting progress to `observer`.
    pub fn decrypt_ctr_observed<F>(&self, envelope: &[u8], observer: F) -> Result<Vec<u8>>
    where
        F: FnMut(Progress) -> ControlFlow<()>,
    {
        let (nonce, ciphertext) = split_envelope(envelope)?;
        ctr_core_observed(ciphertext, &self.schedule, &nonce, 0, observer)
    }
}

// extract the nonce from the front of an envelope
fn split_envelope(envelope: &[u8]) -> Result<(Nonce, &[u8])> {
    if envelope.len() < NONCE_LEN {
        return Err(Error::MalformedCiphertext {
            len: envelope.len(),
            context: "CTR: missing 8-byte nonce",
        });
    }

    let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(nonce_bytes);
    debug!("ctr envelope: {} ciphertext bytes", ciphertext.len());

    Ok((Nonce::from_bytes(nonce), ciphertext))
}
