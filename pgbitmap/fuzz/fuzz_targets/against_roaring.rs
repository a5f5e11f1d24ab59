#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use pgbitmap::{Bitmap, MAX_BIT};
use roaring::RoaringBitmap;
use std::mem;

/// Width of the bit window a single input works in.
const WINDOW: u32 = 1 << 16;

// Window starts: word aligned, unaligned, far from zero, and flush against MAX_BIT.
const BASES: [u32; 5] = [0, 64, 1_000, 100_000_000, MAX_BIT - WINDOW + 1];

#[derive(Debug, Copy, Clone)]
struct Num(u32);

impl<'a> Arbitrary<'a> for Num {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(u.arbitrary()?))
    }
}

#[derive(Arbitrary, Debug)]
enum Operation {
    SetBit(Num),
    ClearBit(Num),
    TestBit(Num),
    NextBit(Num),
    Extend(Num),
    Reduce(Num),
    Trim,
    TruncateBelow(Num),
    TruncateAbove(Num),
    SetMin,
    SetMax,
    CheckMinMax,
    CheckIter,
    And,
    Or,
    Sub,
    Compare,
    SwapSides,
    StreamRoundtrip,
    Base64Roundtrip,
    TextRoundtrip,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    base_idx: u8,
    initial_lhs: Vec<Num>,
    initial_rhs: Vec<Num>,
    ops: Vec<Operation>,
}

/// Assert that a Bitmap and a RoaringBitmap contain the same elements.
fn check_equal(b: &Bitmap, r: &RoaringBitmap) {
    assert_eq!(b.bit_count(), r.len(), "len mismatch");
    assert_eq!(b.bit_min().ok(), r.min(), "min mismatch");
    assert_eq!(b.bit_max().ok(), r.max(), "max mismatch");
    assert_eq!(b.is_empty(), r.is_empty(), "is_empty mismatch");

    let b_vals: Vec<u32> = b.iter().collect();
    let r_vals: Vec<u32> = r.iter().collect();
    assert_eq!(b_vals, r_vals, "iter mismatch");
}

fn make_pair(vals: &[u32]) -> (Bitmap, RoaringBitmap) {
    let b = Bitmap::try_from_iter(vals.iter().copied()).unwrap();
    let r: RoaringBitmap = vals.iter().copied().collect();
    (b, r)
}

fuzz_target!(|input: FuzzInput| {
    let base = BASES[input.base_idx as usize % BASES.len()];
    let bit = |n: Num| base + n.0 % WINDOW;

    let lhs_vals: Vec<u32> = input.initial_lhs.iter().map(|&n| bit(n)).collect();
    let (mut lhs_b, mut lhs_r) = make_pair(&lhs_vals);

    let rhs_vals: Vec<u32> = input.initial_rhs.iter().map(|&n| bit(n)).collect();
    let (mut rhs_b, mut rhs_r) = make_pair(&rhs_vals);

    check_equal(&lhs_b, &lhs_r);
    check_equal(&rhs_b, &rhs_r);

    for op in &input.ops {
        match *op {
            Operation::SetBit(n) => {
                let v = bit(n);
                lhs_b.set_bit(v).unwrap();
                lhs_r.insert(v);
            }
            Operation::ClearBit(n) => {
                let v = bit(n);
                let words = lhs_b.word_count();
                lhs_b.clear_bit(v);
                lhs_r.remove(v);
                assert_eq!(lhs_b.word_count(), words, "clear_bit grew storage");
            }
            Operation::TestBit(n) => {
                let v = bit(n);
                assert_eq!(lhs_b.test_bit(v), lhs_r.contains(v), "test_bit({}) mismatch", v);
            }
            Operation::NextBit(n) => {
                let v = bit(n);
                let expected = lhs_r.iter().find(|&x| x > v);
                assert_eq!(lhs_b.next_bit(v), expected, "next_bit({}) mismatch", v);
            }
            Operation::Extend(n) => {
                lhs_b.extend(bit(n)).unwrap();
            }
            Operation::Reduce(n) => {
                let v = bit(n);
                lhs_b.reduce(v);
                lhs_r.remove_range(v.saturating_add(1)..);
            }
            Operation::Trim => {
                lhs_b.trim();
            }
            Operation::TruncateBelow(n) => {
                let v = bit(n);
                lhs_b.truncate_below(v);
                lhs_r.remove_range(..v);
            }
            Operation::TruncateAbove(n) => {
                let v = bit(n);
                lhs_b.truncate_above(v);
                lhs_r.remove_range(v.saturating_add(1)..);
            }
            Operation::SetMin => {
                lhs_b.set_min();
                if let Some(min) = lhs_r.min() {
                    lhs_r = RoaringBitmap::from_iter([min]);
                }
            }
            Operation::SetMax => {
                lhs_b.set_max();
                if let Some(max) = lhs_r.max() {
                    lhs_r = RoaringBitmap::from_iter([max]);
                }
            }
            Operation::CheckMinMax => {
                assert_eq!(lhs_b.bit_min().ok(), lhs_r.min(), "min mismatch");
                assert_eq!(lhs_b.bit_max().ok(), lhs_r.max(), "max mismatch");
            }
            Operation::CheckIter => {
                check_equal(&lhs_b, &lhs_r);
            }
            Operation::And => {
                lhs_b &= &rhs_b;
                lhs_r &= &rhs_r;
            }
            Operation::Or => {
                lhs_b |= &rhs_b;
                lhs_r |= &rhs_r;
            }
            Operation::Sub => {
                lhs_b -= &rhs_b;
                lhs_r -= &rhs_r;
            }
            Operation::Compare => {
                let l: Vec<u32> = lhs_r.iter().collect();
                let r: Vec<u32> = rhs_r.iter().collect();
                assert_eq!(lhs_b.cmp(&rhs_b), l.cmp(&r), "ordering mismatch");
                assert_eq!(lhs_b == rhs_b, lhs_r == rhs_r, "equality mismatch");
            }
            Operation::SwapSides => {
                mem::swap(&mut lhs_b, &mut rhs_b);
                mem::swap(&mut lhs_r, &mut rhs_r);
            }
            Operation::StreamRoundtrip => {
                let bytes = pgbitmap::serialise_stream(&lhs_b);
                let restored = pgbitmap::deserialise_stream(&bytes).unwrap();
                assert_eq!(restored, lhs_b, "stream roundtrip mismatch");
                assert_eq!(pgbitmap::serialise_stream(&restored), bytes, "stream not canonical");
            }
            Operation::Base64Roundtrip => {
                let text = pgbitmap::serialise_bitmap(&lhs_b);
                let restored = pgbitmap::deserialise_bitmap(&text).unwrap();
                assert_eq!(restored, lhs_b, "base64 roundtrip mismatch");
            }
            Operation::TextRoundtrip => {
                let restored: Bitmap = pgbitmap::bitmap_out(&lhs_b).parse().unwrap();
                assert_eq!(restored, lhs_b, "text roundtrip mismatch");
            }
        }
    }

    check_equal(&lhs_b, &lhs_r);
    check_equal(&rhs_b, &rhs_r);
    assert_eq!(
        Bitmap::from_roaring(&lhs_r).unwrap(),
        lhs_b,
        "from_roaring mismatch for final LHS"
    );
});
