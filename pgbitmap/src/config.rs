//! Tunables for the codec and the text form.
//!
//! ```yaml
//! codec:
//!   line_width: 76
//!   max_words: 1048576
//!   accept_legacy_empty: true
//! text:
//!   ranges: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, MAX_BIT, WORD_BITS};

/// Enough words to cover every bit in `0..=MAX_BIT`.
pub const DEFAULT_MAX_WORDS: usize = (MAX_BIT as usize + 1) / WORD_BITS as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Wrap base64 output with a newline every `line_width` characters.
    /// `None` (or 0) keeps the output on one line.
    pub line_width: Option<usize>,

    /// Refuse streams that declare more words than this.
    pub max_words: usize,

    /// Accept the literal `[]` as the empty bitmap when decoding base64.
    pub accept_legacy_empty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            line_width: None,
            max_words: DEFAULT_MAX_WORDS,
            accept_legacy_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Render runs of consecutive members as `lo-hi`.
    pub ranges: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { ranges: true }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "codec")]
    pub codec: CodecConfig,

    #[serde(rename = "text")]
    pub text: TextConfig,
}

impl Config {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;

        debug!(path = %path.display(), ?config, "loaded bitmap configuration");
        Ok(config)
    }
}
