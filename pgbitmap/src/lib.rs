//! A sparse set of non-negative integers stored as a word-aligned bit vector.
//!
//! A [`Bitmap`] keeps a contiguous run of `u64` words together with the bit
//! index that word 0 starts at. Bits outside that run are implicitly unset, so
//! a set like `{1_000_000, 1_000_003}` only costs a single word of storage.
//!
//! The crate provides:
//!
//! - single-bit mutation and queries ([`Bitmap::set_bit`], [`Bitmap::test_bit`], ...)
//! - set algebra ([`Bitmap::union`], [`Bitmap::intersection`], [`Bitmap::minus`])
//! - logical equality and a canonical total order (`Eq`, `Ord`)
//! - a byte-stable binary stream and a base64 form ([`codec`])
//! - a canonical `{1,3-5}` text form ([`text`])
//! - `bitmap_*` entry points for a database host ([`host`])

mod bitmap;
mod cmp;
pub mod codec;
pub mod config;
mod error;
pub mod host;
mod ops;
#[cfg(feature = "roaring")]
mod roaring;
pub mod text;
mod word;

#[cfg(test)]
mod tests_bitmap;

pub use bitmap::{Bitmap, Bits};
pub use codec::{
    Codec, b64_decode, b64_encode, deserialise_bitmap, deserialise_int32, deserialise_stream,
    serialise_bitmap, serialise_int32, serialise_stream, streamlen,
};
pub use config::{CodecConfig, Config, TextConfig};
pub use error::{BitmapError, ConfigError, Result};
pub use text::{TextFormat, bitmap_out};

/// Storage word.
pub type Word = u64;

/// Number of bits in a storage [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Number of bytes a [`Word`] occupies in the binary stream.
pub const WORD_BYTES: usize = std::mem::size_of::<Word>();

/// The largest bit a bitmap can hold.
///
/// Bit indices are carried as signed 32-bit integers in the stream header and
/// at the host boundary, which caps them at `i32::MAX`.
pub const MAX_BIT: u32 = i32::MAX as u32;

/// Size of the `[min_bit][word_count]` prefix of the binary stream.
pub const HEADER_LEN: usize = 8;
