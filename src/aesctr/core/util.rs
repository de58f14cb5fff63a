/// AddRoundKey step. XORs the four words of one round key into the state. Word `c` is
/// column `c`, so its bytes line up with `state[4c..4c + 4]`.
#[inline(always)]
pub(crate) fn add_round_key(state: &mut [u8; 16], round_words: &[[u8; 4]]) {
    for (col, word) in round_words.iter().enumerate() {
        for row in 0..4 {
            state[col * 4 + row] ^= word[row];
        }
    }
}

// multiply by {02} in GF(2^8), reducing by 0x11b
// adapted from https://crypto.stackexchange.com/a/71206
#[inline(always)]
pub(crate) fn dbl(a: u8) -> u8 {
    (a << 1) ^ (0x1B & (0u8).wrapping_sub((a >> 7) & 1))
}
