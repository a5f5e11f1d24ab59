use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use crate::{Bitmap, WORD_BITS};

// The three set operations walk absolute word indices, reading a missing
// word from either operand as zero:
//
//   Operation  | Result range          | Word op
//   -----------+-----------------------+---------
//   union      | hull of both ranges   | a | b
//   intersect  | overlap, then trimmed | a & b
//   minus      | a's range             | a & !b

impl Bitmap {
    /// The set of bits present in either bitmap.
    ///
    /// The result spans from the lower storage start to the higher storage
    /// end of the two operands.
    pub fn union(&self, other: &Bitmap) -> Bitmap {
        if self.word_count() == 0 {
            return other.clone();
        }
        if other.word_count() == 0 {
            return self.clone();
        }

        let first = self.first_word().min(other.first_word());
        let end = self.end_word().max(other.end_word());
        let words = (first..end)
            .map(|index| self.word_at(index) | other.word_at(index))
            .collect();

        Bitmap::from_parts(first * WORD_BITS, words)
    }

    /// The set of bits present in both bitmaps, trimmed to its minimal
    /// covering storage.
    pub fn intersection(&self, other: &Bitmap) -> Bitmap {
        let first = self.first_word().max(other.first_word());
        let end = self.end_word().min(other.end_word());
        if first >= end {
            return Bitmap::new_empty();
        }

        let words = (first..end)
            .map(|index| self.word_at(index) & other.word_at(index))
            .collect();

        let mut result = Bitmap::from_parts(first * WORD_BITS, words);
        result.trim();
        result
    }

    /// The bits of `self` that are not in `other`, over `self`'s storage.
    pub fn minus(&self, other: &Bitmap) -> Bitmap {
        let mut result = self.clone();
        let first = result.first_word();

        for (slot, word) in result.words_mut().iter_mut().enumerate() {
            *word &= !other.word_at(first + slot as u32);
        }

        result
    }
}

impl BitOr for &Bitmap {
    type Output = Bitmap;

    fn bitor(self, rhs: Self) -> Bitmap {
        self.union(rhs)
    }
}

impl BitAnd for &Bitmap {
    type Output = Bitmap;

    fn bitand(self, rhs: Self) -> Bitmap {
        self.intersection(rhs)
    }
}

impl Sub for &Bitmap {
    type Output = Bitmap;

    fn sub(self, rhs: Self) -> Bitmap {
        self.minus(rhs)
    }
}

impl BitOrAssign<&Bitmap> for Bitmap {
    fn bitor_assign(&mut self, rhs: &Bitmap) {
        *self = &*self | rhs;
    }
}

impl BitAndAssign<&Bitmap> for Bitmap {
    fn bitand_assign(&mut self, rhs: &Bitmap) {
        *self = &*self & rhs;
    }
}

impl SubAssign<&Bitmap> for Bitmap {
    fn sub_assign(&mut self, rhs: &Bitmap) {
        *self = &*self - rhs;
    }
}
