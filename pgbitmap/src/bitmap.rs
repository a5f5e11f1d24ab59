use tracing::trace;

use crate::word::{
    bit_mask, bit_offset, mask_from, mask_through, word_base, word_index, words_between,
};
use crate::{BitmapError, MAX_BIT, Result, WORD_BITS, WORD_BYTES, Word};

/// A set of non-negative integers stored as a run of 64-bit words.
///
/// Bit `o` of `words[i]` represents the integer `min_bit + i * 64 + o`.
/// `min_bit` is always word aligned, so the words of two bitmaps line up
/// without any shifting. Bits outside the stored run are implicitly unset and
/// storage only grows when a bit beyond it is set.
///
/// Two bitmaps compare equal whenever they hold the same integers, no matter
/// how many zero words either of them carries.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub struct Bitmap {
    min_bit: u32,
    words: Vec<Word>,
}

fn check_bit(bit: u32) -> Result<()> {
    if bit > MAX_BIT {
        return Err(BitmapError::out_of_range(bit));
    }
    Ok(())
}

impl Bitmap {
    /// Create a bitmap with no storage, representing the empty set.
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Create an empty bitmap whose storage can hold `bit` without growing.
    pub fn new(bit: u32) -> Result<Self> {
        check_bit(bit)?;
        Ok(Self {
            min_bit: word_base(bit),
            words: vec![0],
        })
    }

    /// Create an empty bitmap whose storage covers every bit in `0..=bit`.
    pub fn with_bound(bit: u32) -> Result<Self> {
        check_bit(bit)?;
        Ok(Self {
            min_bit: 0,
            words: vec![0; words_between(0, bit)],
        })
    }

    /// Create the one-element set `{bit}`.
    pub fn from_bit(bit: u32) -> Result<Self> {
        check_bit(bit)?;
        Ok(Self::single(bit))
    }

    /// Build a bitmap from bits in any order. Duplicates are tolerated.
    pub fn try_from_iter(bits: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut bitmap = Self::new_empty();
        for bit in bits {
            bitmap.set_bit(bit)?;
        }
        Ok(bitmap)
    }

    fn single(bit: u32) -> Self {
        Self {
            min_bit: word_base(bit),
            words: vec![bit_mask(bit)],
        }
    }

    /// Assemble a bitmap from a word-aligned start and its words.
    pub(crate) fn from_parts(min_bit: u32, words: Vec<Word>) -> Self {
        debug_assert_eq!(bit_offset(min_bit), 0, "min_bit {min_bit} is not word aligned");
        if words.is_empty() {
            return Self::new_empty();
        }
        Self { min_bit, words }
    }

    /// The integer represented by bit 0 of the first storage word.
    pub fn min_bit(&self) -> u32 {
        self.min_bit
    }

    /// The number of storage words currently allocated.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The storage words, lowest first.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The number of heap bytes used by the word storage.
    pub fn heap_bytes(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Absolute index (counting from bit 0) of the first storage word.
    pub(crate) fn first_word(&self) -> u32 {
        word_index(self.min_bit)
    }

    /// Absolute index one past the last storage word.
    pub(crate) fn end_word(&self) -> u32 {
        self.first_word() + self.words.len() as u32
    }

    /// The word at an absolute word index, zero outside storage.
    pub(crate) fn word_at(&self, index: u32) -> Word {
        match index.checked_sub(self.first_word()) {
            Some(slot) => self.words.get(slot as usize).copied().unwrap_or(0),
            None => 0,
        }
    }

    /// The storage slot holding `bit`, if it is inside storage.
    fn slot(&self, bit: u32) -> Option<usize> {
        if bit < self.min_bit {
            return None;
        }
        let slot = (word_index(bit) - self.first_word()) as usize;
        (slot < self.words.len()).then_some(slot)
    }

    /// The span of words between the lowest and highest non-zero word, with
    /// the absolute index of its first word. `(0, [])` for the empty set.
    pub(crate) fn trimmed(&self) -> (u32, &[Word]) {
        let Some(first) = self.words.iter().position(|&w| w != 0) else {
            return (0, &[]);
        };
        let last = self.words.iter().rposition(|&w| w != 0).unwrap_or(first);
        (self.first_word() + first as u32, &self.words[first..=last])
    }

    /// Grow storage so that `new_highest_bit` is representable.
    ///
    /// Storage grows downwards when the bit lies below `min_bit`. Added bits
    /// are clear and storage never shrinks here.
    pub fn extend(&mut self, new_highest_bit: u32) -> Result<()> {
        check_bit(new_highest_bit)?;

        if self.words.is_empty() {
            self.min_bit = word_base(new_highest_bit);
            self.words.push(0);
        } else if new_highest_bit < self.min_bit {
            let extra = (self.first_word() - word_index(new_highest_bit)) as usize;
            self.words.splice(0..0, std::iter::repeat_n(0, extra));
            self.min_bit = word_base(new_highest_bit);
        } else if self.slot(new_highest_bit).is_none() {
            let needed = words_between(self.min_bit, new_highest_bit);
            self.words.resize(needed, 0);
        } else {
            return Ok(());
        }

        trace!(
            min_bit = self.min_bit,
            word_count = self.words.len(),
            "extended bitmap storage"
        );
        Ok(())
    }

    /// Shrink storage to the fewest words covering `new_highest_bit`.
    ///
    /// This is lossy: every set bit above `new_highest_bit` is discarded. If
    /// the bound lies below `min_bit` the bitmap becomes empty.
    pub fn reduce(&mut self, new_highest_bit: u32) {
        if self.words.is_empty() {
            return;
        }

        if new_highest_bit < self.min_bit {
            *self = Self::new_empty();
        } else if let Some(slot) = self.slot(new_highest_bit) {
            self.words.truncate(slot + 1);
            self.words[slot] &= mask_through(bit_offset(new_highest_bit));
            self.words.shrink_to_fit();
        } else {
            return;
        }

        trace!(
            min_bit = self.min_bit,
            word_count = self.words.len(),
            "reduced bitmap storage"
        );
    }

    /// Drop all-zero words from both ends of storage.
    pub fn trim(&mut self) {
        let Some(first) = self.words.iter().position(|&w| w != 0) else {
            *self = Self::new_empty();
            return;
        };
        let last = self.words.iter().rposition(|&w| w != 0).unwrap_or(first);

        self.words.truncate(last + 1);
        self.words.drain(..first);
        self.min_bit += first as u32 * WORD_BITS;
    }

    /// Set `bit`, growing storage if needed. Idempotent.
    pub fn set_bit(&mut self, bit: u32) -> Result<()> {
        check_bit(bit)?;
        if self.slot(bit).is_none() {
            self.extend(bit)?;
        }

        let slot = (word_index(bit) - self.first_word()) as usize;
        self.words[slot] |= bit_mask(bit);
        Ok(())
    }

    /// Set every bit in `lo..=hi`.
    pub fn set_range(&mut self, lo: u32, hi: u32) -> Result<()> {
        if lo > hi {
            return Err(BitmapError::InvalidArgument {
                bit: lo.into(),
                reason: "range start is above its end",
            });
        }
        check_bit(hi)?;
        self.extend(lo)?;
        self.extend(hi)?;

        let first = self.first_word();
        let lo_slot = (word_index(lo) - first) as usize;
        let hi_slot = (word_index(hi) - first) as usize;
        let head = mask_from(bit_offset(lo));
        let tail = mask_through(bit_offset(hi));

        if lo_slot == hi_slot {
            self.words[lo_slot] |= head & tail;
        } else {
            self.words[lo_slot] |= head;
            self.words[lo_slot + 1..hi_slot].fill(Word::MAX);
            self.words[hi_slot] |= tail;
        }
        Ok(())
    }

    /// Clear `bit`. Bits outside storage are already clear, so this never
    /// grows storage.
    pub fn clear_bit(&mut self, bit: u32) {
        if let Some(slot) = self.slot(bit) {
            self.words[slot] &= !bit_mask(bit);
        }
    }

    /// Test whether `bit` is set. Bits outside storage read as unset.
    pub fn test_bit(&self, bit: u32) -> bool {
        self.slot(bit)
            .is_some_and(|slot| self.words[slot] & bit_mask(bit) != 0)
    }

    /// Membership test; same as [`test_bit`](Self::test_bit).
    pub fn contains(&self, bit: u32) -> bool {
        self.test_bit(bit)
    }

    /// The smallest set bit strictly greater than `after`.
    ///
    /// Calling this repeatedly with the previous result walks every set bit
    /// in ascending order; start the walk with [`bit_min`](Self::bit_min).
    pub fn next_bit(&self, after: u32) -> Option<u32> {
        self.next_bit_from(after.checked_add(1)?)
    }

    /// The smallest set bit at or above `start`.
    pub(crate) fn next_bit_from(&self, start: u32) -> Option<u32> {
        if self.words.is_empty() || start >= self.end_word().saturating_mul(WORD_BITS) {
            return None;
        }

        let start = start.max(self.min_bit);
        let mut slot = (word_index(start) - self.first_word()) as usize;
        let mut word = self.words[slot] & mask_from(bit_offset(start));

        loop {
            if word != 0 {
                return Some(self.min_bit + slot as u32 * WORD_BITS + word.trailing_zeros());
            }
            slot += 1;
            word = *self.words.get(slot)?;
        }
    }

    /// The smallest set bit.
    pub fn bit_min(&self) -> Result<u32> {
        self.next_bit_from(0).ok_or(BitmapError::EmptySet)
    }

    /// The largest set bit.
    pub fn bit_max(&self) -> Result<u32> {
        let slot = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .ok_or(BitmapError::EmptySet)?;
        let top = WORD_BITS - 1 - self.words[slot].leading_zeros();
        Ok(self.min_bit + slot as u32 * WORD_BITS + top)
    }

    /// Collapse to the one-element set holding the current minimum.
    /// No-op on an empty bitmap.
    pub fn set_min(&mut self) {
        if let Ok(bit) = self.bit_min() {
            *self = Self::single(bit);
        }
    }

    /// Collapse to the one-element set holding the current maximum.
    /// No-op on an empty bitmap.
    pub fn set_max(&mut self) {
        if let Ok(bit) = self.bit_max() {
            *self = Self::single(bit);
        }
    }

    /// Drop every member below `bit` and trim storage.
    pub fn truncate_below(&mut self, bit: u32) {
        if bit > self.min_bit {
            match self.slot(bit) {
                Some(slot) => {
                    self.words[..slot].fill(0);
                    self.words[slot] &= mask_from(bit_offset(bit));
                }
                None => self.words.clear(),
            }
        }
        self.trim();
    }

    /// Drop every member above `bit` and trim storage.
    pub fn truncate_above(&mut self, bit: u32) {
        self.reduce(bit);
        self.trim();
    }

    /// Count the number of set bits (population count).
    pub fn bit_count(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Returns `true` if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterate over set bits in ascending order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            words: &self.words,
            min_bit: self.min_bit,
            slot: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over the set bits of a [`Bitmap`], lowest first.
///
/// Walks storage a word at a time and peels bits off with `trailing_zeros`,
/// so zero words cost one comparison each.
#[derive(Clone, Debug)]
pub struct Bits<'a> {
    words: &'a [Word],
    min_bit: u32,
    slot: usize,
    /// Bits of `words[slot]` not yet yielded.
    current: Word,
}

impl Iterator for Bits<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros();
                self.current &= self.current - 1; // clear lowest set bit
                return Some(self.min_bit + self.slot as u32 * WORD_BITS + bit);
            }
            if self.slot + 1 >= self.words.len() {
                return None;
            }
            self.slot += 1;
            self.current = self.words[self.slot];
        }
    }
}

impl std::iter::FusedIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a Bitmap {
    type Item = u32;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}
