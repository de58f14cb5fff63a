use std::ops::ControlFlow;

use log::{debug, trace};
use rayon::prelude::*;
use zeroize::Zeroize;

use crate::aesctr::core::{BLOCK_LEN, encrypt_block};
use crate::aesctr::error::*;
use crate::aesctr::modes::util::{PARALLEL_THRESHOLD, ctr_block, xor_chunks};
use crate::aesctr::nonce::Nonce;
use crate::aesctr::schedule::KeySchedule;

/// Number of blocks processed between two progress reports (about 16 KB of data).
pub const PROGRESS_INTERVAL: usize = 1000;

/// Progress report passed to an observer after each batch of [PROGRESS_INTERVAL] blocks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Progress {
    pub blocks_done: usize,
    pub blocks_total: usize,
}

impl Progress {
    /// Completed share of the input, from 0.0 to 1.0.
    pub fn fraction(&self) -> f64 {
        if self.blocks_total == 0 {
            1.0
        } else {
            self.blocks_done as f64 / self.blocks_total as f64
        }
    }
}

/// Core counter encryption and decryption algorithm (CTR is symmetric). Picks the parallel
/// implementation for inputs over [PARALLEL_THRESHOLD] bytes; both produce identical output.
pub(crate) fn ctr_core(
    input: &[u8],
    schedule: &KeySchedule,
    nonce: &Nonce,
    ctr_start: u64,
) -> Result<Vec<u8>> {
    if input.len() > PARALLEL_THRESHOLD {
        debug!("ctr: {} bytes, parallel keystream", input.len());
        ctr_core_parallel(input, schedule, nonce, ctr_start)
    } else {
        debug!("ctr: {} bytes, serial keystream", input.len());
        ctr_core_serial(input, schedule, nonce, ctr_start)
    }
}

pub(crate) fn ctr_core_parallel(
    input: &[u8],
    schedule: &KeySchedule,
    nonce: &Nonce,
    ctr_start: u64,
) -> Result<Vec<u8>> {
    check_counter(block_count(input.len()), ctr_start)?;

    // initialise vector for parallelisation
    let mut output = vec![0u8; input.len()];

    output
        .par_chunks_mut(BLOCK_LEN)
        .zip(input.par_chunks(BLOCK_LEN))
        .enumerate()
        .for_each(|(i, (out_chunk, in_chunk))| {
            // cannot overflow, checked above
            let block = ctr_block(nonce, ctr_start + i as u64);
            let keystream = encrypt_block(&block, schedule);

            for ((o, k), p) in out_chunk.iter_mut().zip(keystream).zip(in_chunk) {
                *o = k ^ p;
            }
        });

    Ok(output)
}

pub(crate) fn ctr_core_serial(
    input: &[u8],
    schedule: &KeySchedule,
    nonce: &Nonce,
    ctr_start: u64,
) -> Result<Vec<u8>> {
    check_counter(block_count(input.len()), ctr_start)?;

    let mut output = Vec::with_capacity(input.len());
    apply_keystream(&mut output, input, schedule, nonce, ctr_start);
    Ok(output)
}

/// Serial CTR that hands a [Progress] to `observer` after every [PROGRESS_INTERVAL] blocks.
///
/// The observer may yield or sleep before returning; returning `ControlFlow::Break(())`
/// stops the run with [Error::Cancelled] and the partial output is wiped. Batching does not
/// affect the counter sequence, so the output equals that of [ctr_core]. Empty input never
/// calls the observer.
pub(crate) fn ctr_core_observed<F>(
    input: &[u8],
    schedule: &KeySchedule,
    nonce: &Nonce,
    ctr_start: u64,
    mut observer: F,
) -> Result<Vec<u8>>
where
    F: FnMut(Progress) -> ControlFlow<()>,
{
    let blocks_total = block_count(input.len());
    check_counter(blocks_total, ctr_start)?;

    let mut output = Vec::with_capacity(input.len());
    let mut blocks_done = 0usize;

    for batch in input.chunks(PROGRESS_INTERVAL * BLOCK_LEN) {
        apply_keystream(&mut output, batch, schedule, nonce, ctr_start + blocks_done as u64);
        blocks_done += block_count(batch.len());

        trace!("ctr: {blocks_done}/{blocks_total} blocks");
        let progress = Progress {
            blocks_done,
            blocks_total,
        };
        if observer(progress).is_break() {
            debug!("ctr: cancelled after {blocks_done}/{blocks_total} blocks");
            output.zeroize();
            return Err(Error::Cancelled);
        }
    }

    Ok(output)
}

// appends input XOR keystream to output; the caller has checked the counter range
fn apply_keystream(
    output: &mut Vec<u8>,
    input: &[u8],
    schedule: &KeySchedule,
    nonce: &Nonce,
    ctr_start: u64,
) {
    // for each chunk of input...
    for (i, chunk) in input.chunks(BLOCK_LEN).enumerate() {
        let block = ctr_block(nonce, ctr_start + i as u64); // form block from nonce + ctr
        // xor each element of input chunk (1-16 bytes) with encrypted ctr block
        let keystream = encrypt_block(&block, schedule);
        let ct = xor_chunks(&keystream, chunk);
        output.extend_from_slice(&ct[..chunk.len()]);
    }
}

fn block_count(len: usize) -> usize {
    len.div_ceil(BLOCK_LEN)
}

// every block index in ctr_start..ctr_start + num_blocks must fit in 64 bits
fn check_counter(num_blocks: usize, ctr_start: u64) -> Result<()> {
    if num_blocks == 0 {
        return Ok(());
    }
    let last = u64::try_from(num_blocks - 1).map_err(|_| Error::CounterOverflow)?;
    ctr_start.checked_add(last).ok_or(Error::CounterOverflow)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    pub fn hex_to_bytes(s: &str) -> Vec<u8> {
        let s = s.trim();
        assert!(s.len() % 2 == 0, "hex string must have even length");
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    // all test vectors from
    // https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf
    pub const PLAINTEXT: [u8; 64] = [
        0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, //
        0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a, //
        0xae, 0x2d, 0x8a, 0x57, 0x1e, 0x03, 0xac, 0x9c, //
        0x9e, 0xb7, 0x6f, 0xac, 0x45, 0xaf, 0x8e, 0x51, //
        0x30, 0xc8, 0x1c, 0x46, 0xa3, 0x5c, 0xe4, 0x11, //
        0xe5, 0xfb, 0xc1, 0x19, 0x1a, 0x0a, 0x52, 0xef, //
        0xf6, 0x9f, 0x24, 0x45, 0xdf, 0x4f, 0x9b, 0x17, //
        0xad, 0x2b, 0x41, 0x7b, 0xe6, 0x6c, 0x37, 0x10, //
    ];

    pub const KEY_128: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, //
        0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c, //
    ];

    pub const KEY_192: [u8; 24] = [
        0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, //
        0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90, 0x79, 0xe5, //
        0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b, //
    ];

    pub const KEY_256: [u8; 32] = [
        0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, //
        0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77, 0x81, //
        0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, //
        0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14, 0xdf, 0xf4, //
    ];

    // initial counter block f0f1...feff split into the 8 byte nonce and the 64 bit counter
    pub const CTR_NONCE: Nonce =
        Nonce::from_bytes([0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7]);
    pub const CTR_START: u64 = 0xf8f9_fafb_fcfd_feff;

    pub const CT_128: &str = "
        874d6191b620e3261bef6864990db6ce\
        9806f66b7970fdff8617187bb9fffdff\
        5ae4df3edbd5d35e5b4f09020db03eab\
        1e031dda2fbe03d1792170a0f3009cee";

    pub const CT_192: &str = "
        1abc932417521ca24f2b0459fe7e6e0b\
        090339ec0aa6faefd5ccc2c6f4ce8e94\
        1e36b26bd1ebc670d1bd1d665620abf7\
        4f78a7f6d29809585a97daec58c6b050";

    pub const CT_256: &str = "
        601ec313775789a5b7a7f504bbf3d228\
        f443e3ca4d62b59aca84e990cacaf5c5\
        2b0930daa23de94ce87017ba2d84988d\
        dfc9c58db67aada613c2dd08457941a6";

    pub fn schedule(key: &[u8]) -> KeySchedule {
        KeySchedule::try_from_slice(key).expect("test key has a valid length")
    }
}

#[cfg(test)]
mod test_ctr_parallel {
    use super::test_util::*;
    use super::*;

    #[test]
    fn aes_ctr_128_encrypt() -> Result<()> {
        let expected = hex_to_bytes(CT_128);
        let encrypted = ctr_core_parallel(&PLAINTEXT, &schedule(&KEY_128), &CTR_NONCE, CTR_START)?;
        assert_eq!(expected, encrypted, "encrypted result does not match expected");
        Ok(())
    }

    #[test]
    fn aes_ctr_128_decrypt() -> Result<()> {
        let ciphertext = hex_to_bytes(CT_128);
        let decrypted = ctr_core_parallel(&ciphertext, &schedule(&KEY_128), &CTR_NONCE, CTR_START)?;
        assert_eq!(PLAINTEXT.to_vec(), decrypted, "decrypted result does not match expected");
        Ok(())
    }

    #[test]
    fn aes_ctr_192_encrypt() -> Result<()> {
        let expected = hex_to_bytes(CT_192);
        let encrypted = ctr_core_parallel(&PLAINTEXT, &schedule(&KEY_192), &CTR_NONCE, CTR_START)?;
        assert_eq!(expected, encrypted, "encrypted result does not match expected");
        Ok(())
    }

    #[test]
    fn aes_ctr_256_encrypt() -> Result<()> {
        let expected = hex_to_bytes(CT_256);
        let encrypted = ctr_core_parallel(&PLAINTEXT, &schedule(&KEY_256), &CTR_NONCE, CTR_START)?;
        assert_eq!(expected, encrypted, "encrypted result does not match expected");
        Ok(())
    }

    #[test]
    fn matches_serial_on_large_uneven_input() -> Result<()> {
        let input: Vec<u8> = (0..PARALLEL_THRESHOLD * 3 + 7).map(|i| (i * 31) as u8).collect();
        let schedule = schedule(&KEY_256);
        let parallel = ctr_core_parallel(&input, &schedule, &CTR_NONCE, 0)?;
        let serial = ctr_core_serial(&input, &schedule, &CTR_NONCE, 0)?;
        assert_eq!(parallel, serial);
        assert_eq!(ctr_core(&input, &schedule, &CTR_NONCE, 0)?, serial);
        Ok(())
    }
}
