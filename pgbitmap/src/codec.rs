//! Binary stream and base64 forms of a [`Bitmap`].
//!
//! Stream layout, every integer big-endian:
//!
//! ```text
//! [min_bit: i32][word_count: i32][word_count x u64]
//! ```
//!
//! `min_bit` is a multiple of 64. The encoder always writes the trimmed
//! representation, so equal bitmaps produce identical bytes. The empty set is
//! eight zero bytes. The base64 form is the standard alphabet with `=`
//! padding over those bytes.

use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::{Buf, BufMut};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::{
    Bitmap, BitmapError, CodecConfig, HEADER_LEN, MAX_BIT, Result, WORD_BITS, WORD_BYTES,
};

/// Encode an int32 in network byte order.
pub fn serialise_int32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode a network-order int32 from the first four bytes.
pub fn deserialise_int32(bytes: &[u8]) -> Result<i32> {
    let mut buf = bytes;
    if buf.remaining() < 4 {
        return Err(BitmapError::MalformedStream(format!(
            "int32 needs 4 bytes, found {}",
            bytes.len()
        )));
    }
    Ok(buf.get_i32())
}

/// Exact stream length for a bitmap of `word_count` words.
pub fn streamlen(word_count: usize) -> usize {
    word_count
        .saturating_mul(WORD_BYTES)
        .saturating_add(HEADER_LEN)
}

/// Encode a bitmap as a binary stream.
pub fn serialise_stream(bitmap: &Bitmap) -> Vec<u8> {
    let (first, words) = bitmap.trimmed();
    let mut out = Vec::with_capacity(streamlen(words.len()));

    out.put_i32((first * WORD_BITS) as i32);
    out.put_i32(words.len() as i32);
    for &word in words {
        out.put_u64(word);
    }
    out
}

/// Decode a binary stream produced by [`serialise_stream`].
pub fn deserialise_stream(bytes: &[u8]) -> Result<Bitmap> {
    Codec::default().decode_stream(bytes)
}

/// Standard base64 with padding.
pub fn b64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

fn is_b64_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Decode standard base64, skipping embedded whitespace.
pub fn b64_decode(text: &str) -> Result<Vec<u8>> {
    let compact: Cow<'_, [u8]> = if text.bytes().any(is_b64_space) {
        Cow::Owned(text.bytes().filter(|&b| !is_b64_space(b)).collect())
    } else {
        Cow::Borrowed(text.as_bytes())
    };

    STANDARD.decode(compact).map_err(|e| {
        warn!(error = %e, "rejecting base64 bitmap payload");
        BitmapError::MalformedEncoding(e.to_string())
    })
}

/// Encode a bitmap as single-line base64 text.
pub fn serialise_bitmap(bitmap: &Bitmap) -> String {
    Codec::default().encode(bitmap)
}

/// Decode base64 text produced by [`serialise_bitmap`].
pub fn deserialise_bitmap(text: &str) -> Result<Bitmap> {
    Codec::default().decode(text)
}

fn corrupt(reason: String) -> BitmapError {
    warn!(%reason, "rejecting bitmap stream");
    BitmapError::MalformedStream(reason)
}

/// Configurable encoder/decoder for both serialized forms.
///
/// The free functions in this module use `Codec::default()`.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode to base64, wrapped according to `line_width`.
    pub fn encode(&self, bitmap: &Bitmap) -> String {
        let text = b64_encode(&serialise_stream(bitmap));
        match self.config.line_width {
            Some(width) if width > 0 && text.len() > width => wrap(&text, width),
            _ => text,
        }
    }

    /// Decode base64 text into a bitmap.
    pub fn decode(&self, text: &str) -> Result<Bitmap> {
        if self.config.accept_legacy_empty && text.trim() == "[]" {
            return Ok(Bitmap::new_empty());
        }

        let bytes = b64_decode(text)?;
        self.decode_stream(&bytes)
    }

    /// Decode a binary stream, validating the header before allocating.
    pub fn decode_stream(&self, bytes: &[u8]) -> Result<Bitmap> {
        let mut buf = bytes;
        if buf.remaining() < HEADER_LEN {
            return Err(corrupt(format!(
                "stream is {} bytes, header needs {HEADER_LEN}",
                bytes.len()
            )));
        }

        let min_bit = buf.get_i32();
        let word_count = buf.get_i32();

        if min_bit < 0 {
            return Err(corrupt(format!("negative min_bit {min_bit}")));
        }
        if min_bit as u32 % WORD_BITS != 0 {
            return Err(corrupt(format!("min_bit {min_bit} is not word aligned")));
        }
        if word_count < 0 {
            return Err(corrupt(format!("negative word count {word_count}")));
        }

        let word_count = word_count as usize;
        if word_count > self.config.max_words {
            warn!(
                word_count,
                limit = self.config.max_words,
                "rejecting oversized bitmap stream"
            );
            return Err(BitmapError::TooLarge {
                words: word_count,
                limit: self.config.max_words,
            });
        }

        let expected = streamlen(word_count);
        if bytes.len() != expected {
            return Err(corrupt(format!(
                "header declares {word_count} words ({expected} bytes), stream is {} bytes",
                bytes.len()
            )));
        }

        let end = min_bit as u64 + word_count as u64 * WORD_BITS as u64;
        if end > MAX_BIT as u64 + 1 {
            return Err(corrupt(format!(
                "words cover bits up to {}, largest storable bit is {MAX_BIT}",
                end - 1
            )));
        }

        let words = (0..word_count).map(|_| buf.get_u64()).collect();
        Ok(Bitmap::from_parts(min_bit as u32, words))
    }
}

fn wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % width == 0 {
            out.push('\n');
        }
        out.push(c);
    }
    out
}

impl Bitmap {
    /// The number of bytes [`serialise_stream`] produces for this bitmap.
    pub fn serialized_size(&self) -> usize {
        streamlen(self.trimmed().1.len())
    }
}

/// Serializes as the base64 form.
impl Serialize for Bitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&serialise_bitmap(self))
    }
}

impl<'de> Deserialize<'de> for Bitmap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        deserialise_bitmap(&text).map_err(serde::de::Error::custom)
    }
}
