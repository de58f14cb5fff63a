use log::debug;

use crate::aesctr::cipher::Cipher;
use crate::aesctr::encoding::{base64_decode, base64_encode, utf8_decode, utf8_encode};
use crate::aesctr::error::Result;
use crate::aesctr::key::KeySize;

/// Encrypts `plaintext` under a key derived from `password` and returns the Base64
/// envelope `Base64(Nonce || Ciphertext)`.
///
/// `bits` must be 128, 192, or 256, otherwise an InvalidKeySize error is returned. A
/// fresh timestamp nonce is used for every call, so encrypting the same text twice gives
/// different output.
///
/// ## Examples
/// ```
/// # fn main() -> aesctr::Result<()> {
/// let envelope = aesctr::encrypt("big secret", "pāşšŵōřđ", 256)?;
/// assert_eq!(aesctr::decrypt(&envelope, "pāşšŵōřđ", 256)?, "big secret");
///
/// // envelopes from other implementations of the same format decrypt too
/// assert_eq!(aesctr::decrypt("lwGl66VVwVObKIr6of8HVqJr", "pāşšŵōřđ", 256)?, "big secret");
/// # Ok(())
/// # }
/// ```
pub fn encrypt(plaintext: &str, password: &str, bits: u32) -> Result<String> {
    let size = KeySize::try_from(bits)?;
    let envelope = encrypt_bytes(&utf8_encode(plaintext), password, size)?;
    Ok(base64_encode(&envelope))
}

/// Decrypts a Base64 envelope produced by [encrypt].
///
/// Whitespace in the Base64 text is ignored. A wrong password or key size is not detected:
/// the result is garbage text rather than an error. Bytes that are not valid UTF-8 are read
/// as Latin-1, see [utf8_decode](crate::utf8_decode).
pub fn decrypt(ciphertext: &str, password: &str, bits: u32) -> Result<String> {
    let size = KeySize::try_from(bits)?;
    let envelope = base64_decode(ciphertext)?;
    let plaintext = decrypt_bytes(&envelope, password, size)?;
    Ok(utf8_decode(plaintext))
}

/// Byte level [encrypt]: returns the raw `Nonce || Ciphertext` envelope.
pub fn encrypt_bytes(plaintext: &[u8], password: &str, size: KeySize) -> Result<Vec<u8>> {
    debug!("{size} encrypt: {} bytes", plaintext.len());
    Cipher::from_password(password, size).encrypt_ctr(plaintext)
}

/// Byte level [decrypt]: takes a raw `Nonce || Ciphertext` envelope.
pub fn decrypt_bytes(envelope: &[u8], password: &str, size: KeySize) -> Result<Vec<u8>> {
    debug!("{size} decrypt: {} bytes", envelope.len());
    Cipher::from_password(password, size).decrypt_ctr(envelope)
}
