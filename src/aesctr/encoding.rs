//! Text codecs for the envelope format: UTF-8 for plaintext and passwords, standard
//! Base64 for the envelope.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::aesctr::error::Result;

// accepts missing or partial padding and nonzero trailing bits, like browser atob()
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// UTF-8 bytes of `text`.
pub fn utf8_encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decodes UTF-8, never failing.
///
/// Bytes that are not valid UTF-8 (typically a wrong password) are read as Latin-1
/// instead: each byte becomes the character with the same code point. No bytes are lost
/// or replaced, so the result always has one character per input byte in that case.
pub fn utf8_decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Standard Base64 (RFC 4648 alphabet, `=` padded).
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard Base64. ASCII whitespace (including line breaks) is ignored and
/// padding is optional. Anything else outside the alphabet is a [Base64](crate::Error::Base64)
/// error.
pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(LENIENT.decode(compact)?)
}
