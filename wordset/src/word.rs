use crate::{BITS_PER_WORD, Word};

/// Sentinel returned by [`min_pos`] and [`max_pos`] for the all-zero word.
///
/// It is one past the highest valid bit index, so it can never be mistaken
/// for a real position.
pub const NONE_POS: u32 = BITS_PER_WORD;

/// Position of the least significant set bit of `word`.
///
/// Returns [`NONE_POS`] if `word == 0`.
#[inline]
pub fn min_pos(word: Word) -> u32 {
    word.trailing_zeros()
}

/// Position of the most significant set bit of `word`.
///
/// Returns [`NONE_POS`] if `word == 0`.
#[inline]
pub fn max_pos(word: Word) -> u32 {
    if word == 0 {
        return NONE_POS;
    }
    BITS_PER_WORD - 1 - word.leading_zeros()
}

/// The number of set bits in `word`.
#[inline]
pub fn count(word: Word) -> u32 {
    word.count_ones()
}

/// Mask with bits `bit..BITS_PER_WORD` set.
#[inline]
pub(crate) fn mask_from(bit: u32) -> Word {
    Word::MAX << bit
}

/// Mask with bits `0..=bit` set.
#[inline]
pub(crate) fn mask_to(bit: u32) -> Word {
    Word::MAX >> (BITS_PER_WORD - 1 - bit)
}

/// Mask with bits `lo..=hi` set. Requires `lo <= hi < BITS_PER_WORD`.
#[inline]
pub(crate) fn mask_between(lo: u32, hi: u32) -> Word {
    debug_assert!(lo <= hi && hi < BITS_PER_WORD);
    mask_from(lo) & mask_to(hi)
}

/// Split an integer into its absolute word index and bit index.
#[inline]
pub(crate) fn index_of(n: usize) -> (usize, u32) {
    (n / BITS_PER_WORD as usize, (n % BITS_PER_WORD as usize) as u32)
}

/// The integer represented by bit `bit` of absolute word `word`.
#[inline]
pub(crate) fn value_of(word: usize, bit: u32) -> usize {
    word * BITS_PER_WORD as usize + bit as usize
}
