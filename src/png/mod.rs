//! Reading and writing the chunks of a PNG.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! A PNG is an 8 byte signature followed by a series of "chunks". Each chunk
//! is:
//! * A big-endian `u32` length.
//! * A 4 byte type tag, such as `IHDR`.
//! * `length` bytes of data.
//! * A big-endian `u32` CRC of the type tag and data.
//!
//! There's four "critical" chunk types:
//! * **Header** (`IHDR`) - dimensions and pixel format.
//! * **Palette** (`PLTE`) - only for indexed color images.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream.
//! * **End** (`IEND`) - The last chunk.
//!
//! Everything else is "ancillary". This module can classify ancillary chunks
//! by name, but never looks inside of them.
//!
//! ## Parsing Errors
//!
//! This module is strict about the framing: a bad signature or a chunk that
//! runs off the end of the input is a [`FormatError`]. It is *not* strict
//! about the CRC values. Parsed chunks keep the CRC the file declared, and
//! you can call [`PngChunk::check_crc`] if you care.

use core::fmt::{Debug, Write};

use crate::FormatError;

mod crc32;
pub use crc32::*;

mod chunk_type;
pub use chunk_type::*;

mod raw_chunk;
pub use raw_chunk::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Parses all the chunks of a PNG into owned chunks.
///
/// ## Failure
/// * The first 8 bytes aren't the PNG signature.
/// * Any chunk field runs past the end of the input.
pub fn parse_chunks(bytes: &[u8]) -> Result<Vec<PngChunk>, FormatError> {
  let mut out = Vec::new();
  for raw_chunk in RawChunkIter::new(bytes)? {
    let raw_chunk = raw_chunk?;
    tracing::trace!("{:?}", raw_chunk);
    out.push(raw_chunk.to_owned_chunk());
  }
  Ok(out)
}

/// Writes the signature followed by every chunk.
pub fn write_png(chunks: &[PngChunk]) -> std::io::Result<Vec<u8>> {
  let total: usize = chunks.iter().map(|c| 12 + c.data().len()).sum();
  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + total);
  out.extend_from_slice(&PNG_SIGNATURE);
  for chunk in chunks {
    chunk.write_to(&mut out)?;
  }
  Ok(out)
}
