//! Canonical human-readable form: `{}`, `{7}`, `{1,3-5,257}`.
//!
//! Rendering lists members in ascending order and folds runs of two or more
//! consecutive members into `lo-hi`. Parsing accepts any order, duplicates,
//! overlapping ranges and whitespace around tokens.

use std::fmt;
use std::str::FromStr;

use crate::{Bitmap, BitmapError, MAX_BIT, Result, TextConfig};

/// Renders and parses the text form according to a [`TextConfig`].
#[derive(Debug, Clone, Default)]
pub struct TextFormat {
    config: TextConfig,
}

impl TextFormat {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, bitmap: &Bitmap) -> String {
        Members {
            bitmap,
            ranges: self.config.ranges,
        }
        .to_string()
    }

    pub fn parse(&self, text: &str) -> Result<Bitmap> {
        let body = text
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| malformed(format!("expected `{{...}}`, found {text:?}")))?;

        let mut bitmap = Bitmap::new_empty();
        if body.trim().is_empty() {
            return Ok(bitmap);
        }

        for item in body.split(',') {
            let item = item.trim();
            let (lo, hi) = match item.split_once('-') {
                Some((lo, hi)) => (parse_bit(lo)?, parse_bit(hi)?),
                None => {
                    let bit = parse_bit(item)?;
                    (bit, bit)
                }
            };
            if lo > hi {
                return Err(malformed(format!("range {lo}-{hi} is inverted")));
            }
            bitmap.set_range(lo, hi)?;
        }

        Ok(bitmap)
    }
}

/// Render a bitmap in the canonical text form.
pub fn bitmap_out(bitmap: &Bitmap) -> String {
    TextFormat::default().render(bitmap)
}

fn malformed(reason: String) -> BitmapError {
    BitmapError::MalformedText(reason)
}

fn parse_bit(token: &str) -> Result<u32> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(format!("{token:?} is not a bit number")));
    }

    match token.parse::<u32>() {
        Ok(bit) if bit <= MAX_BIT => Ok(bit),
        _ => Err(malformed(format!(
            "bit {token} exceeds the largest storable bit {MAX_BIT}"
        ))),
    }
}

struct Members<'a> {
    bitmap: &'a Bitmap,
    ranges: bool,
}

impl fmt::Display for Members<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        let mut bits = self.bitmap.iter().peekable();
        let mut first = true;
        while let Some(lo) = bits.next() {
            let mut hi = lo;
            if self.ranges {
                while let Some(next) = bits.next_if_eq(&(hi + 1)) {
                    hi = next;
                }
            }

            if !first {
                f.write_str(",")?;
            }
            first = false;

            if hi > lo {
                write!(f, "{lo}-{hi}")?;
            } else {
                write!(f, "{lo}")?;
            }
        }

        f.write_str("}")
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Members {
            bitmap: self,
            ranges: true,
        }
        .fmt(f)
    }
}

impl FromStr for Bitmap {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self> {
        TextFormat::default().parse(s)
    }
}
