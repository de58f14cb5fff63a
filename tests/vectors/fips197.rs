#![cfg(feature = "test-vectors")]

// block cipher and counter mode known-answer tests
// FIPS-197 Appendix C: https://doi.org/10.6028/NIST.FIPS.197-upd1
// AESAVS GFSbox / KeySbox / VarTxt: https://csrc.nist.gov/projects/cryptographic-algorithm-validation-program/block-ciphers#AES
// SP 800-38A F.5: https://doi.org/10.6028/NIST.SP.800-38A

use std::error::Error;

use aesctr::{Cipher, Key, KeySchedule};
use hex_literal::hex;

fn check_block(key: &[u8], pt: &[u8; 16], ct: &[u8; 16]) -> Result<(), Box<dyn Error>> {
    let cipher = Cipher::new(&Key::try_from_slice(key)?);
    let got = cipher.encrypt_block(pt)?;
    if &got != ct {
        return Err(format!(
            "block mismatch\n  KEY={}\n  PT ={}\n  EXP={}\n  GOT={}",
            hex_str(key),
            hex_str(pt),
            hex_str(ct),
            hex_str(&got)
        )
        .into());
    }
    Ok(())
}

fn hex_str(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn fips197_appendix_c() -> Result<(), Box<dyn Error>> {
    let pt = hex!("00112233445566778899aabbccddeeff");

    check_block(
        &hex!("000102030405060708090a0b0c0d0e0f"),
        &pt,
        &hex!("69c4e0d86a7b0430d8cdb78070b4c55a"),
    )?;
    check_block(
        &hex!("000102030405060708090a0b0c0d0e0f1011121314151617"),
        &pt,
        &hex!("dda97ca4864cdfe06eaf70a0ec0d7191"),
    )?;
    check_block(
        &hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"),
        &pt,
        &hex!("8ea2b7ca516745bfeafc49904b496089"),
    )?;
    Ok(())
}

#[test]
fn aesavs_128_samples() -> Result<(), Box<dyn Error>> {
    let zero = [0u8; 16];

    // GFSbox: zero key, chosen plaintexts
    check_block(
        &zero,
        &hex!("f34481ec3cc627bacd5dc3fb08f273e6"),
        &hex!("0336763e966d92595a567cc9ce537f5e"),
    )?;
    check_block(
        &zero,
        &hex!("9798c4640bad75c7c3227db910174e72"),
        &hex!("a9a1631bf4996954ebc093957b234589"),
    )?;

    // KeySbox: chosen key, zero plaintext
    check_block(
        &hex!("10a58869d74be5a374cf867cfb473859"),
        &zero,
        &hex!("6d251e6944b051e04eaa6fb4dbf78465"),
    )?;

    // VarTxt: zero key, single high bit
    check_block(
        &zero,
        &hex!("80000000000000000000000000000000"),
        &hex!("3ad78e726c1ec02b7ebfe92b23d9ec34"),
    )?;
    Ok(())
}

#[test]
fn fips197_appendix_a1_schedule() -> Result<(), Box<dyn Error>> {
    let schedule = KeySchedule::try_from_slice(&hex!("2b7e151628aed2a6abf7158809cf4f3c"))?;
    assert_eq!(schedule.round_key(1), hex!("a0fafe1788542cb123a339392a6c7605"));
    assert_eq!(schedule.round_key(10), hex!("d014f9a8c9ee2589e13f0cc8b6630ca6"));
    Ok(())
}

// F.5.1 uses a full 16 byte initial counter block. Its upper 8 bytes act as the nonce and
// the lower 8 bytes count up big-endian, so the keystream is rebuilt from single blocks.
#[test]
fn sp800_38a_ctr_aes128_keystream() -> Result<(), Box<dyn Error>> {
    let cipher = Cipher::new(&Key::try_from_slice(&hex!("2b7e151628aed2a6abf7158809cf4f3c"))?);
    let nonce = hex!("f0f1f2f3f4f5f6f7");
    let start = u64::from_be_bytes(hex!("f8f9fafbfcfdfeff"));

    let pt = [
        hex!("6bc1bee22e409f96e93d7e117393172a"),
        hex!("ae2d8a571e03ac9c9eb76fac45af8e51"),
        hex!("30c81c46a35ce411e5fbc1191a0a52ef"),
        hex!("f69f2445df4f9b17ad2b417be66c3710"),
    ];
    let ct = [
        hex!("874d6191b620e3261bef6864990db6ce"),
        hex!("9806f66b7970fdff8617187bb9fffdff"),
        hex!("5ae4df3edbd5d35e5b4f09020db03eab"),
        hex!("1e031dda2fbe03d1792170a0f3009cee"),
    ];

    for (i, (p, c)) in pt.iter().zip(&ct).enumerate() {
        let mut block = [0u8; 16];
        block[..8].copy_from_slice(&nonce);
        block[8..].copy_from_slice(&(start + i as u64).to_be_bytes());

        let keystream = cipher.encrypt_block(&block)?;
        let got: Vec<u8> = keystream.iter().zip(p).map(|(k, p)| k ^ p).collect();
        assert_eq!(got, c, "block {i}");
    }
    Ok(())
}
