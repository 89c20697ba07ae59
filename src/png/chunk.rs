use super::*;

/// The largest chunk data length PNG allows, `2^31 - 1`.
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// An owned PNG chunk.
///
/// The length field isn't stored, it's always `data.len()`. The CRC *is*
/// stored, because a chunk read from a file keeps whatever CRC the file
/// declared, even a wrong one. Chunks made with [`PngChunk::new`] always get
/// a correct CRC.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PngChunk {
  pub(crate) type_: PngChunkType,
  pub(crate) data: Vec<u8>,
  pub(crate) crc: u32,
}
impl Debug for PngChunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("crc", &self.crc)
      .finish()
  }
}
impl PngChunk {
  /// Makes a new chunk, computing the CRC.
  pub fn new(type_: PngChunkType, data: Vec<u8>) -> Result<Self, FormatError> {
    if data.len() > MAX_CHUNK_LEN {
      return Err(FormatError::ChunkTooLarge(data.len()));
    }
    let crc = png_crc(type_.0, &data);
    Ok(Self { type_, data, crc })
  }

  #[inline]
  #[must_use]
  pub const fn type_(&self) -> PngChunkType {
    self.type_
  }

  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// Takes the data out of the chunk.
  #[inline]
  #[must_use]
  pub fn into_data(self) -> Vec<u8> {
    self.data
  }

  /// The value of the length field, as written to a file.
  #[inline]
  #[must_use]
  pub fn length(&self) -> u32 {
    // `new` and the parser both keep data within u32 range
    self.data.len() as u32
  }

  /// The CRC this chunk carries.
  #[inline]
  #[must_use]
  pub const fn crc(&self) -> u32 {
    self.crc
  }

  /// The CRC this chunk *should* carry.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.type_.0, &self.data)
  }

  /// The same chunk, carrying the CRC its data should have.
  #[inline]
  #[must_use]
  pub fn with_fresh_crc(self) -> Self {
    let crc = self.compute_actual_crc();
    Self { crc, ..self }
  }

  /// Checks the carried CRC against the data.
  pub fn check_crc(&self) -> crate::Result<()> {
    let actual = self.compute_actual_crc();
    if actual == self.crc {
      Ok(())
    } else {
      Err(crate::Error::CrcMismatch { chunk: self.type_, declared: self.crc, actual })
    }
  }

  /// Gets the data as palette entries, if this is a well formed `PLTE`.
  #[inline]
  #[must_use]
  pub fn palette_entries(&self) -> Option<&[[u8; 3]]> {
    if self.type_ != PngChunkType::PLTE {
      return None;
    }
    bytemuck::try_cast_slice::<u8, [u8; 3]>(&self.data).ok()
  }

  /// Writes the length, type, data, and CRC, all big-endian.
  pub fn write_to<W: std::io::Write>(&self, mut w: W) -> std::io::Result<()> {
    w.write_all(&self.length().to_be_bytes())?;
    w.write_all(&self.type_.0)?;
    w.write_all(&self.data)?;
    w.write_all(&self.crc.to_be_bytes())?;
    Ok(())
  }

  /// The chunk's full on-disk bytes.
  #[must_use]
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + self.data.len());
    out.extend_from_slice(&self.length().to_be_bytes());
    out.extend_from_slice(&self.type_.0);
    out.extend_from_slice(&self.data);
    out.extend_from_slice(&self.crc.to_be_bytes());
    out
  }
}
impl<'b> From<PngRawChunk<'b>> for PngChunk {
  #[inline]
  #[must_use]
  fn from(raw: PngRawChunk<'b>) -> Self {
    raw.to_owned_chunk()
  }
}

#[test]
fn test_to_bytes_layout() {
  let iend = PngChunk::new(PngChunkType::IEND, Vec::new()).unwrap();
  assert_eq!(iend.to_bytes(), [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
  let stale = PngChunk { crc: 0, ..iend.clone() };
  assert!(stale.check_crc().is_err());
  assert_eq!(stale.with_fresh_crc(), iend);
  let mut written = Vec::new();
  iend.write_to(&mut written).unwrap();
  assert_eq!(written, iend.to_bytes());
}
