use super::*;

/// An unparsed chunk borrowed from PNG bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) type_: PngChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn type_(&self) -> PngChunkType {
    self.type_
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Copies the data out into an owned chunk, keeping the declared CRC.
  #[inline]
  #[must_use]
  pub fn to_owned_chunk(&self) -> PngChunk {
    PngChunk { type_: self.type_, data: self.data.to_vec(), crc: self.declared_crc }
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Unlike a lenient decoder this reports running out of bytes part way
/// through a chunk as an error. After the first error the iterator is done.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawChunkIter<'b> {
  spare: &'b [u8],
  offset: usize,
}
impl<'b> RawChunkIter<'b> {
  /// Pass the full PNG bytes.
  ///
  /// The signature is checked here, so the iterator only ever sees bytes that
  /// at least *claim* to be PNG data.
  #[inline]
  pub fn new(bytes: &'b [u8]) -> Result<Self, FormatError> {
    if !is_png_signature_correct(bytes) {
      return Err(FormatError::BadSignature);
    }
    Ok(Self { spare: &bytes[PNG_SIGNATURE.len()..], offset: PNG_SIGNATURE.len() })
  }

  /// Takes the next `n` bytes, or fails without consuming anything.
  fn take(&mut self, n: usize) -> Result<&'b [u8], FormatError> {
    if self.spare.len() >= n {
      let (head, rest) = self.spare.split_at(n);
      self.spare = rest;
      self.offset += n;
      Ok(head)
    } else {
      Err(FormatError::Truncated { offset: self.offset, needed: n - self.spare.len() })
    }
  }

  /// Takes the next `N` bytes as an array.
  fn take_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
    let offset = self.offset;
    self.take(N)?.try_into().map_err(|_| FormatError::Truncated { offset, needed: N })
  }

  fn take_u32(&mut self) -> Result<u32, FormatError> {
    self.take_array().map(u32::from_be_bytes)
  }

  fn next_chunk(&mut self) -> Result<PngRawChunk<'b>, FormatError> {
    let chunk_len = self.take_u32()? as usize;
    let tag = self.take_array::<4>()?;
    let data = self.take(chunk_len)?;
    let declared_crc = self.take_u32()?;
    Ok(PngRawChunk { type_: PngChunkType(tag), data, declared_crc })
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = Result<PngRawChunk<'b>, FormatError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    let out = self.next_chunk();
    if out.is_err() {
      self.spare = &[];
    }
    Some(out)
  }
}

#[test]
fn test_truncated_fields_report_offset() {
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend_from_slice(&[0, 0]);
  let mut iter = RawChunkIter::new(&bytes).unwrap();
  assert_eq!(iter.next(), Some(Err(FormatError::Truncated { offset: 8, needed: 2 })));
  assert_eq!(iter.next(), None);

  bytes.extend_from_slice(&[0, 0, b'I', b'E']);
  let mut iter = RawChunkIter::new(&bytes).unwrap();
  assert_eq!(iter.next(), Some(Err(FormatError::Truncated { offset: 12, needed: 2 })));

  bytes.extend_from_slice(b"ND");
  bytes.extend_from_slice(&png_crc(*b"IEND", &[]).to_be_bytes()[..3]);
  let mut iter = RawChunkIter::new(&bytes).unwrap();
  assert_eq!(iter.next(), Some(Err(FormatError::Truncated { offset: 16, needed: 1 })));
}
