use super::*;

/// The 4 byte tag that names a chunk.
///
/// Tags are *intended* to be ascii letters, but any bytes are accepted when
/// parsing. The `Debug` impl just `as` casts each byte to a `char`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  /// Looks up the tag in the table of chunk types we know about.
  ///
  /// Unknown tags are reported as an ancillary chunk named `"unknown"`.
  #[must_use]
  pub fn classify(self) -> ChunkClass {
    let (name, critical) = match &self.0 {
      b"IHDR" => ("IHDR", true),
      b"PLTE" => ("PLTE", true),
      b"IDAT" => ("IDAT", true),
      b"IEND" => ("IEND", true),
      b"sRGB" => ("sRGB", false),
      b"gAMA" => ("gAMA", false),
      b"pHYs" => ("pHYs", false),
      b"sBIT" => ("sBIT", false),
      b"sPLT" => ("sPLT", false),
      b"tIME" => ("tIME", false),
      b"cHRM" => ("cHRM", false),
      b"tEXt" => ("tEXt", false),
      b"iTXt" => ("iTXt", false),
      b"zTXt" => ("zTXt", false),
      b"tRNS" => ("tRNS", false),
      b"bKGD" => ("bKGD", false),
      b"hIST" => ("hIST", false),
      b"iCCP" => ("iCCP", false),
      b"eXIf" => ("eXIf", false),
      _ => ("unknown", false),
    };
    ChunkClass { name, critical }
  }

  /// If this is one of the four chunk types needed to rebuild an image.
  #[inline]
  #[must_use]
  pub fn is_critical(self) -> bool {
    self.classify().critical
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  #[must_use]
  fn from(tag: [u8; 4]) -> Self {
    Self(tag)
  }
}

/// What the chunk type table says about a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkClass {
  /// Display name, or `"unknown"`.
  pub name: &'static str,
  /// Critical chunks are the ones the cipher pipeline keeps.
  pub critical: bool,
}

#[test]
fn test_classify() {
  assert_eq!(PngChunkType::IDAT.classify(), ChunkClass { name: "IDAT", critical: true });
  assert_eq!(PngChunkType(*b"tIME").classify(), ChunkClass { name: "tIME", critical: false });
  // the case of every letter matters
  assert_eq!(PngChunkType(*b"idat").classify(), ChunkClass { name: "unknown", critical: false });
  assert!(!PngChunkType(*b"abcd").is_critical());
}
