//! The zlib round trip around the cipher.
//!
//! PNG image data is a zlib stream. Encrypting the *compressed* bytes is
//! fine, but then the cipher only ever sees noise. The "inflated" pipeline
//! variants instead inflate first, run the cipher over the filtered scanline
//! bytes, and deflate the result so the file is still a zlib stream.
//!
//! Deflating isn't canonical, so `deflate(inflate(x))` can differ from `x`.
//! Only `inflate(deflate(x)) == x` holds.

use crate::{Error, Result};

/// The compression level zlib itself defaults to.
pub const DEFAULT_LEVEL: u8 = 6;

/// Decodes a zlib stream, refusing to produce more than `limit` bytes.
///
/// ## Failure
/// * The stream is malformed, truncated, or has a bad Adler-32.
/// * The output would be larger than `limit`.
pub fn inflate(zlib_data: &[u8], limit: usize) -> Result<Vec<u8>> {
  if zlib_data.is_empty() {
    return Err(Error::Compression("empty zlib stream".into()));
  }
  miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(zlib_data, limit)
    .map_err(|e| Error::Compression(format!("{:?}", e.status)))
}

/// Encodes bytes as a zlib stream at the given level (0 to 10).
#[must_use]
pub fn deflate(data: &[u8], level: u8) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(data, level)
}

#[test]
fn test_inflate_rejects_junk() {
  assert!(matches!(inflate(b"definitely not zlib", 1024), Err(Error::Compression(_))));
  assert!(matches!(inflate(&[], 1024), Err(Error::Compression(_))));
  // a good stream cut short is also an error
  let good = deflate(&[7; 300], DEFAULT_LEVEL);
  assert!(matches!(inflate(&good[..good.len() - 5], 1024), Err(Error::Compression(_))));
}

#[test]
fn test_inflate_limit() {
  let good = deflate(&[7; 300], DEFAULT_LEVEL);
  assert_eq!(inflate(&good, 1024).unwrap(), [7; 300]);
  assert!(matches!(inflate(&good, 299), Err(Error::Compression(_))));
}
