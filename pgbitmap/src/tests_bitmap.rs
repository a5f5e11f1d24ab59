use crate::*;

fn make_bitmap(bits: &[u32]) -> Bitmap {
    Bitmap::try_from_iter(bits.iter().copied()).unwrap()
}

fn members(bitmap: &Bitmap) -> Vec<u32> {
    bitmap.iter().collect()
}

// ===== Construction =====

#[test]
fn test_new_empty() {
    let bm = Bitmap::new_empty();
    assert_eq!(bm.word_count(), 0);
    assert_eq!(bm.min_bit(), 0);
    assert!(bm.is_empty());
    assert_eq!(bm.bit_count(), 0);
    assert_eq!(bm, Bitmap::default());
}

#[test]
fn test_new_sizes_for_bit() {
    let bm = Bitmap::new(130).unwrap();
    assert_eq!(bm.word_count(), 1);
    assert_eq!(bm.min_bit(), 128);
    assert!(bm.is_empty());
    assert!(!bm.test_bit(130));
}

#[test]
fn test_with_bound_covers_zero_to_bit() {
    let bm = Bitmap::with_bound(64).unwrap();
    assert_eq!(bm.min_bit(), 0);
    assert_eq!(bm.word_count(), 2);
    assert!(bm.is_empty());

    let bm = Bitmap::with_bound(63).unwrap();
    assert_eq!(bm.word_count(), 1);
}

#[test]
fn test_from_bit() {
    let bm = Bitmap::from_bit(1000).unwrap();
    assert_eq!(members(&bm), vec![1000]);
    assert_eq!(bm.word_count(), 1);
    assert_eq!(bm.min_bit(), 960);
}

#[test]
fn test_constructors_reject_bits_above_max() {
    for result in [
        Bitmap::new(MAX_BIT + 1),
        Bitmap::with_bound(MAX_BIT + 1),
        Bitmap::from_bit(u32::MAX),
        Bitmap::try_from_iter([1, MAX_BIT + 1]),
    ] {
        assert!(matches!(
            result,
            Err(BitmapError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_max_bit_is_storable() {
    let bm = Bitmap::from_bit(MAX_BIT).unwrap();
    assert!(bm.test_bit(MAX_BIT));
    assert_eq!(bm.bit_max().unwrap(), MAX_BIT);
    assert_eq!(bm.next_bit(MAX_BIT), None);
}

// ===== Single-bit operations =====

#[test]
fn test_scenario_3_10_257() {
    let mut bm = Bitmap::new_empty();
    for bit in [3, 10, 257] {
        bm.set_bit(bit).unwrap();
    }

    assert_eq!(bm.bit_count(), 3);
    assert_eq!(bm.bit_min().unwrap(), 3);
    assert_eq!(bm.bit_max().unwrap(), 257);
    assert!(!bm.test_bit(100));
    assert_eq!(deserialise_stream(&serialise_stream(&bm)).unwrap(), bm);
}

#[test]
fn test_set_bit_grows_upwards_and_downwards() {
    let mut bm = Bitmap::from_bit(500).unwrap();
    assert_eq!(bm.word_count(), 1);

    bm.set_bit(700).unwrap();
    assert_eq!(bm.min_bit(), 448);
    assert_eq!(bm.word_count(), 4);

    bm.set_bit(5).unwrap();
    assert_eq!(bm.min_bit(), 0);
    assert_eq!(bm.word_count(), 11);
    assert_eq!(members(&bm), vec![5, 500, 700]);
}

#[test]
fn test_set_bit_idempotent() {
    let mut once = make_bitmap(&[1, 2]);
    once.set_bit(77).unwrap();
    let mut twice = once.clone();
    twice.set_bit(77).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.words(), twice.words());
}

#[test]
fn test_clear_bit_out_of_range_does_not_grow() {
    let mut bm = make_bitmap(&[64, 65]);
    let before = bm.word_count();

    bm.clear_bit(5);
    bm.clear_bit(10_000);
    assert_eq!(bm.word_count(), before);
    assert_eq!(members(&bm), vec![64, 65]);

    bm.clear_bit(64);
    bm.clear_bit(64);
    assert_eq!(members(&bm), vec![65]);
}

#[test]
fn test_clear_to_empty_equals_new_empty() {
    let mut bm = make_bitmap(&[9]);
    bm.clear_bit(9);
    assert!(bm.is_empty());
    assert_eq!(bm.word_count(), 1);
    assert_eq!(bm, Bitmap::new_empty());
}

#[test]
fn test_test_bit_out_of_range() {
    let bm = make_bitmap(&[200]);
    assert!(!bm.test_bit(0));
    assert!(!bm.test_bit(199));
    assert!(bm.test_bit(200));
    assert!(!bm.test_bit(u32::MAX));
    assert_eq!(bm.word_count(), 1);
    assert!(bm.contains(200));
}

#[test]
fn test_set_range() {
    let mut bm = Bitmap::new_empty();
    bm.set_range(60, 200).unwrap();
    assert_eq!(bm.bit_count(), 141);
    assert_eq!(bm.bit_min().unwrap(), 60);
    assert_eq!(bm.bit_max().unwrap(), 200);

    bm.set_range(3, 3).unwrap();
    assert_eq!(bm.bit_min().unwrap(), 3);

    assert!(matches!(
        bm.set_range(5, 4),
        Err(BitmapError::InvalidArgument { .. })
    ));
}

// ===== Storage =====

#[test]
fn test_extend_keeps_bits() {
    let mut bm = make_bitmap(&[100]);
    bm.extend(1000).unwrap();
    assert_eq!(bm.min_bit(), 64);
    assert_eq!(bm.word_count(), 15);
    assert_eq!(members(&bm), vec![100]);

    bm.extend(0).unwrap();
    assert_eq!(bm.min_bit(), 0);
    assert_eq!(bm.word_count(), 16);
    assert_eq!(members(&bm), vec![100]);

    // Already representable: no change.
    bm.extend(500).unwrap();
    assert_eq!(bm.word_count(), 16);

    assert!(matches!(
        bm.extend(MAX_BIT + 1),
        Err(BitmapError::InvalidArgument { .. })
    ));
}

#[test]
fn test_extend_empty() {
    let mut bm = Bitmap::new_empty();
    bm.extend(300).unwrap();
    assert_eq!(bm.min_bit(), 256);
    assert_eq!(bm.word_count(), 1);
    assert!(bm.is_empty());
}

#[test]
fn test_reduce_truncates() {
    let mut bm = make_bitmap(&[1, 70, 130, 400]);
    bm.reduce(130);
    assert_eq!(members(&bm), vec![1, 70, 130]);
    assert_eq!(bm.word_count(), 3);

    bm.reduce(129);
    assert_eq!(members(&bm), vec![1, 70]);
    assert_eq!(bm.word_count(), 3);

    // A bound beyond storage changes nothing.
    bm.reduce(10_000);
    assert_eq!(members(&bm), vec![1, 70]);
}

#[test]
fn test_reduce_below_storage_empties() {
    let mut bm = make_bitmap(&[1000, 1001]);
    bm.reduce(10);
    assert!(bm.is_empty());
    assert_eq!(bm.word_count(), 0);
}

#[test]
fn test_trim() {
    let mut bm = Bitmap::with_bound(1000).unwrap();
    bm.set_bit(300).unwrap();
    bm.set_bit(400).unwrap();
    let before = bm.clone();

    bm.trim();
    assert_eq!(bm.min_bit(), 256);
    assert_eq!(bm.word_count(), 3);
    assert_eq!(bm, before);

    let mut empty = Bitmap::with_bound(500).unwrap();
    empty.trim();
    assert_eq!(empty.word_count(), 0);
    assert_eq!(empty.min_bit(), 0);
}

// ===== Queries =====

#[test]
fn test_bit_min_max_empty() {
    assert_eq!(Bitmap::new_empty().bit_min(), Err(BitmapError::EmptySet));
    assert_eq!(Bitmap::new_empty().bit_max(), Err(BitmapError::EmptySet));

    let padded = Bitmap::with_bound(300).unwrap();
    assert_eq!(padded.bit_min(), Err(BitmapError::EmptySet));
    assert_eq!(padded.bit_max(), Err(BitmapError::EmptySet));
}

#[test]
fn test_bit_min_max_with_zero_words() {
    let mut bm = Bitmap::with_bound(1000).unwrap();
    bm.set_bit(129).unwrap();
    bm.set_bit(640).unwrap();
    assert_eq!(bm.bit_min().unwrap(), 129);
    assert_eq!(bm.bit_max().unwrap(), 640);
}

#[test]
fn test_next_bit_walk() {
    let bm = make_bitmap(&[0, 63, 64, 1000]);
    let mut walked = Vec::new();
    let mut cursor = bm.bit_min().ok();
    while let Some(bit) = cursor {
        walked.push(bit);
        cursor = bm.next_bit(bit);
    }
    assert_eq!(walked, vec![0, 63, 64, 1000]);

    assert_eq!(bm.next_bit(1), Some(63));
    assert_eq!(bm.next_bit(65), Some(1000));
    assert_eq!(bm.next_bit(1000), None);
    assert_eq!(bm.next_bit(u32::MAX), None);
}

#[test]
fn test_next_bit_before_storage() {
    let bm = make_bitmap(&[5000]);
    assert_eq!(bm.next_bit(0), Some(5000));
    assert_eq!(Bitmap::new_empty().next_bit(0), None);
}

#[test]
fn test_iter_restartable() {
    let bm = make_bitmap(&[900, 2, 64, 65]);
    assert_eq!(members(&bm), vec![2, 64, 65, 900]);
    assert_eq!(members(&bm), vec![2, 64, 65, 900]);

    let collected: Vec<u32> = (&bm).into_iter().collect();
    assert_eq!(collected, vec![2, 64, 65, 900]);

    assert_eq!(Bitmap::new_empty().iter().next(), None);
}

#[test]
fn test_iter_is_fused() {
    let bm = make_bitmap(&[1]);
    let mut iter = bm.iter();
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_set_min_set_max() {
    let mut bm = make_bitmap(&[7, 100, 300]);
    bm.set_min();
    assert_eq!(members(&bm), vec![7]);

    let mut bm = make_bitmap(&[7, 100, 300]);
    bm.set_max();
    assert_eq!(members(&bm), vec![300]);

    let mut empty = Bitmap::new_empty();
    empty.set_min();
    empty.set_max();
    assert!(empty.is_empty());
}

#[test]
fn test_truncate_below() {
    let mut bm = make_bitmap(&[1, 70, 130, 400]);
    bm.truncate_below(70);
    assert_eq!(members(&bm), vec![70, 130, 400]);
    assert_eq!(bm.min_bit(), 64);

    bm.truncate_below(131);
    assert_eq!(members(&bm), vec![400]);
    assert_eq!(bm.word_count(), 1);

    bm.truncate_below(401);
    assert!(bm.is_empty());
    assert_eq!(bm.word_count(), 0);
}

#[test]
fn test_truncate_above() {
    let mut bm = make_bitmap(&[1, 70, 130, 400]);
    bm.truncate_above(130);
    assert_eq!(members(&bm), vec![1, 70, 130]);

    bm.truncate_above(69);
    assert_eq!(members(&bm), vec![1]);
    assert_eq!(bm.word_count(), 1);

    bm.truncate_above(0);
    assert!(bm.is_empty());
}

#[test]
fn test_bit_count_and_heap_bytes() {
    let mut bm = Bitmap::new_empty();
    bm.set_range(0, 127).unwrap();
    assert_eq!(bm.bit_count(), 128);
    assert_eq!(bm.heap_bytes(), 16);
}
