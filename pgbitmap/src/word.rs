use crate::{WORD_BITS, Word};

/// Absolute index of the word holding `bit`, counting from bit 0.
#[inline]
pub(crate) fn word_index(bit: u32) -> u32 {
    bit / WORD_BITS
}

/// Position of `bit` inside its word.
#[inline]
pub(crate) fn bit_offset(bit: u32) -> u32 {
    bit % WORD_BITS
}

/// The first bit of the word holding `bit`.
#[inline]
pub(crate) fn word_base(bit: u32) -> u32 {
    bit - bit_offset(bit)
}

/// Single-bit mask selecting `bit` inside its word.
#[inline]
pub(crate) fn bit_mask(bit: u32) -> Word {
    1 << bit_offset(bit)
}

/// Mask of every bit at or above `offset` inside a word.
#[inline]
pub(crate) fn mask_from(offset: u32) -> Word {
    Word::MAX << offset
}

/// Mask of every bit at or below `offset` inside a word.
#[inline]
pub(crate) fn mask_through(offset: u32) -> Word {
    Word::MAX >> (WORD_BITS - 1 - offset)
}

/// Number of words needed to cover `[word_base(min), max]`.
#[inline]
pub(crate) fn words_between(min: u32, max: u32) -> usize {
    (word_index(max) - word_index(min)) as usize + 1
}
