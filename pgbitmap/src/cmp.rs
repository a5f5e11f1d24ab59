use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::{Bitmap, WORD_BITS};

/// Logical set equality: zero words at either end never matter.
impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for Bitmap {}

impl Hash for Bitmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

/// Lexicographic order over the ascending member sequences.
///
/// The empty set sorts first, a proper prefix sorts before its extensions
/// (`{1,2} < {1,2,3}`), and otherwise the set holding the smaller element at
/// the first difference sorts first (`{1,2,9} < {1,3}`).
impl Ord for Bitmap {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_first, a_words) = self.trimmed();
        let (b_first, b_words) = other.trimmed();

        if a_words.is_empty() || b_words.is_empty() {
            return (!a_words.is_empty()).cmp(&!b_words.is_empty());
        }

        let first = a_first.min(b_first);
        let end = (a_first + a_words.len() as u32).max(b_first + b_words.len() as u32);

        for index in first..end {
            let a = self.word_at(index);
            let b = other.word_at(index);
            let diff = a ^ b;
            if diff == 0 {
                continue;
            }

            // Both sequences agree below `bit`; exactly one of them holds it.
            // The holder is the smaller sequence unless the other one ends
            // here, in which case the other is a proper prefix.
            let offset = diff.trailing_zeros();
            let bit = index * WORD_BITS + offset;
            return if a & (1 << offset) != 0 {
                match other.next_bit(bit) {
                    Some(_) => Ordering::Less,
                    None => Ordering::Greater,
                }
            } else {
                match self.next_bit(bit) {
                    Some(_) => Ordering::Greater,
                    None => Ordering::Less,
                }
            };
        }

        Ordering::Equal
    }
}

impl PartialOrd for Bitmap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
