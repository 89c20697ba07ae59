use super::*;

/// The critical chunks of a PNG, with all image data joined into one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngParts {
  pub header: PngChunk,
  pub palette: Option<PngChunk>,
  pub image_data: PngChunk,
  pub end: PngChunk,
}
impl PngParts {
  /// Parses the header chunk's data.
  #[inline]
  pub fn image_header(&self) -> Result<ImageHeader, FormatError> {
    ImageHeader::try_from(&self.header)
  }

  /// Swaps in new image data, keeping everything else.
  #[inline]
  #[must_use]
  pub fn with_image_data(self, image_data: PngChunk) -> Self {
    Self { image_data, ..self }
  }

  /// The chunks in file order: header, palette (if any), image data, end.
  ///
  /// Every CRC is recomputed on the way out, so a stale CRC read from the
  /// input never reaches the output.
  #[must_use]
  pub fn into_chunks(self) -> Vec<PngChunk> {
    let mut out = Vec::with_capacity(4);
    out.push(self.header);
    out.extend(self.palette);
    out.push(self.image_data);
    out.push(self.end);
    out.into_iter().map(PngChunk::with_fresh_crc).collect()
  }
}

/// Pulls the critical chunks out of a chunk list.
///
/// * The first `IHDR`, `PLTE`, and `IEND` are used, later copies are ignored.
/// * Every `IDAT` is joined, in order, into one `IDAT` chunk with a fresh
///   CRC. With no `IDAT` at all the joined chunk is just empty.
/// * Ancillary chunks are skipped.
///
/// ## Failure
/// * There's no `IHDR` or no `IEND`.
/// * The joined image data is too big for one chunk.
pub fn split(chunks: &[PngChunk]) -> Result<PngParts, FormatError> {
  let mut header = None;
  let mut palette = None;
  let mut end = None;
  let mut image_data: Vec<u8> = Vec::new();
  for chunk in chunks.iter().filter(|c| c.type_().is_critical()) {
    match chunk.type_() {
      PngChunkType::IHDR if header.is_none() => header = Some(chunk.clone()),
      PngChunkType::PLTE if palette.is_none() => palette = Some(chunk.clone()),
      PngChunkType::IEND if end.is_none() => end = Some(chunk.clone()),
      PngChunkType::IDAT => image_data.extend_from_slice(chunk.data()),
      _ => (),
    }
  }
  let header = header.ok_or(FormatError::MissingChunk(PngChunkType::IHDR))?;
  let end = end.ok_or(FormatError::MissingChunk(PngChunkType::IEND))?;
  let image_data = PngChunk::new(PngChunkType::IDAT, image_data)?;
  Ok(PngParts { header, palette, image_data, end })
}

/// Drops every ancillary chunk.
///
/// With `join` the result is also reshaped like [`split`] does: one header,
/// palette, one joined image data chunk, and end. Without it, the critical
/// chunks are kept as they were, in their original order.
pub fn anonymize(chunks: &[PngChunk], join: bool) -> Result<Vec<PngChunk>, FormatError> {
  if join {
    Ok(split(chunks)?.into_chunks())
  } else {
    Ok(chunks.iter().filter(|c| c.type_().is_critical()).cloned().collect())
  }
}
