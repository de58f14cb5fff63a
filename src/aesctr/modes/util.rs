use crate::aesctr::core::BLOCK_LEN;
use crate::aesctr::nonce::Nonce;

pub const PARALLEL_THRESHOLD: usize = 4 * 1024; // encrypt in parallel if input size gt 4 KiB

/// Counter block for block index `ctr`: `nonce (8 bytes) || ctr as big-endian u64`.
#[inline(always)]
pub(crate) fn ctr_block(nonce: &Nonce, ctr: u64) -> [u8; BLOCK_LEN] {
    let n = nonce.as_bytes();
    let cb = ctr.to_be_bytes();
    [
        n[00], n[01], n[02], n[03], n[04], n[05], n[06], n[07], //
        cb[0], cb[1], cb[2], cb[3], cb[4], cb[5], cb[6], cb[7], //
    ]
}

#[inline(always)]
pub(crate) fn xor_chunks(y: &[u8; BLOCK_LEN], chunk: &[u8]) -> [u8; BLOCK_LEN] {
    let mut out: [u8; BLOCK_LEN] = *y;
    for (o, c) in out.iter_mut().zip(chunk) {
        *o ^= c;
    }
    out
}
