//! Running a cipher over a whole PNG.
//!
//! The steps are always the same:
//!
//! 1) [`split`] the chunks into header, palette, joined image data, and end.
//! 2) Optionally inflate the image data.
//! 3) Run the cipher mode in the chosen direction.
//! 4) Optionally deflate the result.
//! 5) Put the new image data in a fresh `IDAT` and reassemble the chunks.
//!
//! Ancillary chunks don't survive this. Only `IHDR`, `PLTE`, `IDAT`, and
//! `IEND` are written out.

use std::{
  borrow::Cow,
  io::Write,
  path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
  cipher::{ctr_apply, ecb_decrypt, ecb_encrypt, BlockWidths, CipherMode, Direction},
  compress,
  png::{parse_chunks, write_png, ImageHeader, PngChunk, PngChunkType},
  rsa::KeyPair,
  Config, Error, FormatError, Result,
};

mod parts;
pub use parts::*;

mod variant;
pub use variant::*;

/// Runs one variant over parsed chunks, producing the output chunks.
///
/// The key and block widths are checked before any cipher work. Every
/// output chunk has a correct length and CRC.
///
/// ## Failure
/// * [`Error::InvalidKey`] if the modulus doesn't fit the configured widths.
/// * [`Error::Format`] if the chunks can't be split into an image.
/// * [`Error::CrcMismatch`] on a bad input CRC, only with `strict_crc`.
/// * [`Error::Compression`] from the inflated variants.
/// * [`Error::WidthOverflow`] when decrypting with `strict_widths`.
pub fn run(
  variant: Variant, keys: &KeyPair, config: &Config, chunks: &[PngChunk],
) -> Result<Vec<PngChunk>> {
  let widths = config.block_widths()?;
  widths.check_modulus(keys.modulus())?;
  check_input_crcs(chunks, config.strict_crc)?;
  let parts = split(chunks)?;
  debug!(?variant, image_data = parts.image_data.data().len(), palette = parts.palette.is_some(), "split");
  let payload = transform_payload(variant, keys, config, widths, &parts)?;
  let image_data = PngChunk::new(PngChunkType::IDAT, payload)?;
  debug!(?variant, image_data = image_data.data().len(), "rebuilt image data");
  Ok(parts.with_image_data(image_data).into_chunks())
}

fn transform_payload(
  variant: Variant, keys: &KeyPair, config: &Config, widths: BlockWidths, parts: &PngParts,
) -> Result<Vec<u8>> {
  let header = parts.image_header().ok();
  let input: Cow<'_, [u8]> = if variant.inflate {
    let inflated = compress::inflate(parts.image_data.data(), config.max_inflated_len)?;
    debug!(inflated = inflated.len(), "inflated image data");
    if variant.direction == Direction::Encrypt {
      check_scanline_len(header, inflated.len());
    }
    Cow::Owned(inflated)
  } else {
    Cow::Borrowed(parts.image_data.data())
  };
  let policy = config.overflow_policy();
  let output = match (variant.mode, variant.direction) {
    (CipherMode::Ecb, Direction::Encrypt) => ecb_encrypt(&input, &keys.public, widths)?,
    (CipherMode::Ecb, Direction::Decrypt) => ecb_decrypt(&input, &keys.private, widths, policy)?,
    (CipherMode::Ctr, direction) => {
      let (bytes, counter) =
        ctr_apply(&input, &keys.public, config.counter(), direction, widths, policy)?;
      debug!(blocks = counter.counter, "counter mode done");
      bytes
    }
  };
  if variant.inflate {
    if variant.direction == Direction::Decrypt {
      check_scanline_len(header, output.len());
    }
    Ok(compress::deflate(&output, config.compression_level))
  } else {
    Ok(output)
  }
}

/// Warns when inflated plaintext doesn't match what the header predicts.
///
/// Decrypting can leave a few zero bytes of padding on the end, so only a
/// *short* length is suspicious in that case. It's never an error: the cipher
/// doesn't care what the bytes mean.
fn check_scanline_len(header: Option<ImageHeader>, actual: usize) {
  if let Some(expected) = header.and_then(|h| h.expected_inflated_len()) {
    if actual < expected {
      warn!(expected, actual, "inflated image data is shorter than the header implies");
    } else if actual > expected {
      debug!(expected, actual, "inflated image data is longer than the header implies");
    }
  }
}

fn check_input_crcs(chunks: &[PngChunk], strict: bool) -> Result<()> {
  for chunk in chunks {
    if let Err(e) = chunk.check_crc() {
      if strict {
        return Err(e);
      }
      warn!("{e}");
    }
  }
  Ok(())
}

/// Reads a PNG file, runs a variant on it, and writes the result.
///
/// The output is written to a temporary file next to `output` and renamed
/// into place only once everything worked, so a failure never leaves a
/// partial file behind.
pub fn process_file(
  input: impl AsRef<Path>, output: impl AsRef<Path>, variant: Variant, keys: &KeyPair,
  config: &Config,
) -> Result<()> {
  let bytes = std::fs::read(input.as_ref())?;
  let chunks = parse_chunks(&bytes)?;
  let out_chunks = run(variant, keys, config, &chunks)?;
  write_png_file(output, &out_chunks)
}

/// Writes chunks as a PNG file, atomically.
pub fn write_png_file(path: impl AsRef<Path>, chunks: &[PngChunk]) -> Result<()> {
  let path = path.as_ref();
  let bytes = write_png(chunks)?;
  let dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
    _ => PathBuf::from("."),
  };
  let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
  temp.write_all(&bytes)?;
  temp.as_file().sync_all()?;
  temp.persist(path).map_err(|e| Error::Io(e.error))?;
  debug!(path = %path.display(), bytes = bytes.len(), "wrote png");
  Ok(())
}
