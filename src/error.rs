use thiserror::Error;

use crate::png::PngChunkType;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The bytes given aren't a PNG we can frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
  /// The first 8 bytes aren't the PNG signature.
  #[error("not a PNG file: bad signature")]
  BadSignature,

  /// A chunk field ran past the end of the input.
  #[error("truncated chunk at byte {offset}: needed {needed} more bytes")]
  Truncated { offset: usize, needed: usize },

  /// A critical chunk needed to rebuild the image isn't present.
  #[error("missing {0:?} chunk")]
  MissingChunk(PngChunkType),

  /// Chunk data over the PNG limit of `2^31 - 1` bytes.
  #[error("chunk data of {0} bytes exceeds the PNG chunk limit")]
  ChunkTooLarge(usize),

  /// The `IHDR` data isn't a valid image header.
  #[error("malformed IHDR chunk")]
  BadHeader,
}

/// An error from the `pngrsa` crate.
#[derive(Debug, Error)]
pub enum Error {
  #[error("format error: {0}")]
  Format(#[from] FormatError),

  /// Raised by the modular inverse when `gcd(a, m) != 1`.
  #[error("value is not invertible modulo m")]
  NotInvertible,

  /// The key's modulus doesn't fit the configured block widths.
  #[error("invalid key: {0}")]
  InvalidKey(String),

  #[error("compression error: {0}")]
  Compression(String),

  #[error("CRC mismatch in {chunk:?} chunk: declared {declared:#010x}, actual {actual:#010x}")]
  CrcMismatch { chunk: PngChunkType, declared: u32, actual: u32 },

  /// A decrypted block needed more than `width` bytes (strict widths only).
  #[error("block {block} does not fit in {width} bytes")]
  WidthOverflow { block: usize, width: usize },

  #[error("malformed key text: {0}")]
  KeyText(String),

  #[error("config error: {0}")]
  Config(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
