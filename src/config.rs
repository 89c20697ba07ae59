use std::path::Path;

use serde::Deserialize;

use crate::{
  cipher::{BlockWidths, Counter, OverflowPolicy},
  Error, Result,
};

/// Settings for key generation and the cipher pipeline.
///
/// Every field has a default, so a config file only needs to list what it
/// changes:
///
/// ```toml
/// bits = 64
/// plaintext_width = 4
/// strict_widths = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Modulus size in bits. The ciphertext width is `bits / 8`.
  pub bits: u32,
  /// Bytes of image data per cipher block.
  pub plaintext_width: usize,
  /// Counter mode nonce, added to the block counter.
  pub nonce: u64,
  /// Fail on decrypted blocks wider than the plaintext width instead of
  /// dropping their high bytes.
  pub strict_widths: bool,
  /// Fail on input chunks with a wrong CRC instead of logging a warning.
  pub strict_crc: bool,
  /// zlib level used when re-deflating, 0 to 10.
  pub compression_level: u8,
  /// Upper bound on inflated image data, in bytes.
  pub max_inflated_len: usize,
}
impl Default for Config {
  #[inline]
  fn default() -> Self {
    Self {
      bits: 32,
      plaintext_width: 2,
      nonce: 123_456,
      strict_widths: false,
      strict_crc: false,
      compression_level: crate::compress::DEFAULT_LEVEL,
      max_inflated_len: 256 * 1024 * 1024,
    }
  }
}
impl Config {
  /// Parses a TOML config and validates it.
  pub fn from_toml_str(text: &str) -> Result<Self> {
    let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  /// Reads and parses a TOML config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Self::from_toml_str(&text)
  }

  /// Checks the fields make sense together.
  pub fn validate(&self) -> Result<()> {
    if self.bits < 16 || self.bits % 8 != 0 {
      return Err(Error::Config(format!(
        "bits must be a multiple of 8 and at least 16, got {}",
        self.bits
      )));
    }
    if self.compression_level > 10 {
      return Err(Error::Config(format!(
        "compression level must be 0 to 10, got {}",
        self.compression_level
      )));
    }
    self.block_widths().map(|_| ())
  }

  /// The widths to use with a `bits` sized modulus.
  pub fn block_widths(&self) -> Result<BlockWidths> {
    BlockWidths::new(self.plaintext_width, (self.bits / 8) as usize)
  }

  /// A fresh counter for one counter mode run.
  #[inline]
  #[must_use]
  pub const fn counter(&self) -> Counter {
    Counter::new(self.nonce)
  }

  #[inline]
  #[must_use]
  pub const fn overflow_policy(&self) -> OverflowPolicy {
    if self.strict_widths {
      OverflowPolicy::Reject
    } else {
      OverflowPolicy::Truncate
    }
  }
}

#[test]
fn test_config_from_toml() {
  let config = Config::from_toml_str("bits = 64\nplaintext_width = 4\n").unwrap();
  assert_eq!(config.bits, 64);
  assert_eq!(config.nonce, 123_456);
  assert_eq!(config.block_widths().unwrap().ciphertext(), 8);
  assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
  for bad in ["bits = 12", "bits = 36", "plaintext_width = 4", "compression_level = 11", "colour = 3"] {
    assert!(matches!(Config::from_toml_str(bad), Err(Error::Config(_))), "{bad}");
  }
}
