mod cipher;
mod core;
mod encoding;
mod error;
mod interface;
mod key;
mod modes;
mod nonce;
mod schedule;

pub use self::core::{BLOCK_LEN, encrypt_block};
pub use cipher::Cipher;
pub use encoding::{base64_decode, base64_encode, utf8_decode, utf8_encode};
pub use error::{Error, Result};
pub use interface::{decrypt, decrypt_bytes, encrypt, encrypt_bytes};
pub use key::{Key, KeySize};
pub use modes::{PROGRESS_INTERVAL, Progress};
pub use nonce::{NONCE_LEN, Nonce};
pub use schedule::KeySchedule;
