use thiserror::Error;

/// Errors raised by bitmap operations and the codecs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// A bit index outside `0..=MAX_BIT`, or an inverted range.
    #[error("invalid bit {bit}: {reason}")]
    InvalidArgument { bit: i64, reason: &'static str },

    /// `bit_min`/`bit_max` asked of a bitmap with no members.
    #[error("bitmap has no set bits")]
    EmptySet,

    #[error("malformed bitmap stream: {0}")]
    MalformedStream(String),

    #[error("malformed base64 encoding: {0}")]
    MalformedEncoding(String),

    #[error("malformed bitmap text: {0}")]
    MalformedText(String),

    /// A stream declared more words than the codec is allowed to allocate.
    #[error("bitmap stream declares {words} words, limit is {limit}")]
    TooLarge { words: usize, limit: usize },
}

impl BitmapError {
    pub(crate) fn out_of_range(bit: impl Into<i64>) -> Self {
        BitmapError::InvalidArgument {
            bit: bit.into(),
            reason: "bit index exceeds the largest storable bit",
        }
    }

    pub(crate) fn negative(bit: i32) -> Self {
        BitmapError::InvalidArgument {
            bit: bit.into(),
            reason: "bit index must not be negative",
        }
    }
}

/// Errors raised while loading a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BitmapError>;
