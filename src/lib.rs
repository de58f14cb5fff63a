mod aesctr;

pub use aesctr::{
    BLOCK_LEN, Cipher, Error, Key, KeySchedule, KeySize, NONCE_LEN, Nonce, PROGRESS_INTERVAL,
    Progress, Result, base64_decode, base64_encode, decrypt, decrypt_bytes, encrypt,
    encrypt_block, encrypt_bytes, utf8_decode, utf8_encode,
};
