//! Entry points for a database host.
//!
//! Each function maps one SQL-callable `bitmap_*` routine onto the engine.
//! Bits arrive as `int4` (`i32`); nullable arguments are `Option`, and a
//! `None` result stands for SQL NULL. Inputs are never modified: every
//! function that yields a bitmap returns a new one.
//!
//! `bitmap_setbit`, `bitmap_union` and `bitmap_intersection` double as
//! aggregate transition functions, so their first argument (the running
//! state) may be NULL on the first row.

use std::cmp::Ordering;

use crate::{Bitmap, BitmapError, Result, codec};

fn host_bit(bit: i32) -> Result<u32> {
    u32::try_from(bit).map_err(|_| BitmapError::negative(bit))
}

/// Engine bits never exceed `i32::MAX`, so this is lossless.
fn to_host(bit: u32) -> i32 {
    bit as i32
}

/// Parse the canonical text form.
pub fn bitmap_in(text: &str) -> Result<Bitmap> {
    text.parse()
}

/// Render the canonical text form.
pub fn bitmap_out(bitmap: &Bitmap) -> String {
    crate::bitmap_out(bitmap)
}

/// Binary output (the raw stream).
pub fn bitmap_send(bitmap: &Bitmap) -> Vec<u8> {
    codec::serialise_stream(bitmap)
}

/// Binary input (the raw stream).
pub fn bitmap_recv(bytes: &[u8]) -> Result<Bitmap> {
    codec::deserialise_stream(bytes)
}

/// Base64 form, for persisting a bitmap in a text column.
pub fn bitmap_serialise(bitmap: &Bitmap) -> String {
    codec::serialise_bitmap(bitmap)
}

pub fn bitmap_deserialise(text: &str) -> Result<Bitmap> {
    codec::deserialise_bitmap(text)
}

pub fn bitmap_new_empty() -> Bitmap {
    Bitmap::new_empty()
}

/// A bitmap holding just `bit`.
pub fn bitmap_new(bit: i32) -> Result<Bitmap> {
    Bitmap::from_bit(host_bit(bit)?)
}

pub fn bitmap_is_empty(bitmap: &Bitmap) -> bool {
    bitmap.is_empty()
}

/// Set-returning: every member, ascending.
pub fn bitmap_bits(bitmap: &Bitmap) -> impl Iterator<Item = i32> + '_ {
    bitmap.iter().map(to_host)
}

/// Lowest member, NULL when empty.
pub fn bitmap_bitmin(bitmap: &Bitmap) -> Option<i32> {
    bitmap.bit_min().ok().map(to_host)
}

/// Highest member, NULL when empty.
pub fn bitmap_bitmax(bitmap: &Bitmap) -> Option<i32> {
    bitmap.bit_max().ok().map(to_host)
}

/// Copy of `bitmap` with `bit` set. A NULL state starts a new bitmap.
pub fn bitmap_setbit(bitmap: Option<&Bitmap>, bit: i32) -> Result<Bitmap> {
    let bit = host_bit(bit)?;
    let mut result = bitmap.cloned().unwrap_or_default();
    result.set_bit(bit)?;
    Ok(result)
}

/// Copy of `bitmap` with `bit` cleared. Negative bits are never members.
pub fn bitmap_clearbit(bitmap: &Bitmap, bit: i32) -> Bitmap {
    let mut result = bitmap.clone();
    if let Ok(bit) = u32::try_from(bit) {
        result.clear_bit(bit);
    }
    result.trim();
    result
}

pub fn bitmap_testbit(bitmap: &Bitmap, bit: i32) -> bool {
    u32::try_from(bit).is_ok_and(|bit| bitmap.test_bit(bit))
}

/// `bit IN bitmap`.
pub fn bitmap_in_set(bit: i32, bitmap: &Bitmap) -> bool {
    bitmap_testbit(bitmap, bit)
}

/// Copy of `bitmap` without any member below `bitmin`.
pub fn bitmap_setmin(bitmap: &Bitmap, bitmin: i32) -> Bitmap {
    let mut result = bitmap.clone();
    result.truncate_below(bitmin.max(0) as u32);
    result
}

/// Copy of `bitmap` without any member above `bitmax`.
pub fn bitmap_setmax(bitmap: &Bitmap, bitmax: i32) -> Bitmap {
    match u32::try_from(bitmax) {
        Ok(bitmax) => {
            let mut result = bitmap.clone();
            result.truncate_above(bitmax);
            result
        }
        Err(_) => Bitmap::new_empty(),
    }
}

/// Union. A NULL state yields a copy of `bitmap2`.
pub fn bitmap_union(bitmap1: Option<&Bitmap>, bitmap2: &Bitmap) -> Bitmap {
    match bitmap1 {
        Some(bitmap1) => bitmap1.union(bitmap2),
        None => bitmap2.clone(),
    }
}

/// Intersection. A NULL state yields a copy of `bitmap2`.
pub fn bitmap_intersection(bitmap1: Option<&Bitmap>, bitmap2: &Bitmap) -> Bitmap {
    match bitmap1 {
        Some(bitmap1) => bitmap1.intersection(bitmap2),
        None => bitmap2.clone(),
    }
}

pub fn bitmap_minus(bitmap1: &Bitmap, bitmap2: &Bitmap) -> Bitmap {
    bitmap1.minus(bitmap2)
}

pub fn bitmap_equal(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 == bitmap2
}

pub fn bitmap_nequal(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 != bitmap2
}

pub fn bitmap_lt(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 < bitmap2
}

pub fn bitmap_le(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 <= bitmap2
}

pub fn bitmap_gt(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 > bitmap2
}

pub fn bitmap_ge(bitmap1: &Bitmap, bitmap2: &Bitmap) -> bool {
    bitmap1 >= bitmap2
}

/// B-tree support function: `-1`, `0` or `1`.
pub fn bitmap_cmp(bitmap1: &Bitmap, bitmap2: &Bitmap) -> i32 {
    match bitmap1.cmp(bitmap2) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
