use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = FormatError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(FormatError::BadHeader),
    })
  }
}

/// The image header, parsed out of an `IHDR` chunk's data.
///
/// The cipher pipeline never needs this to do its job. It's used to sanity
/// check the size of inflated image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageHeader {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored interlaced.
  pub is_interlaced: bool,
}
impl ImageHeader {
  /// Bits used by each pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// The length of the inflated (but still filtered) image data.
  ///
  /// Each scanline is one filter byte plus the pixel bytes, with partial
  /// bytes rounded up. Interlaced images are stored as seven reduced images,
  /// which this doesn't account for, so they give `None`.
  #[must_use]
  pub fn expected_inflated_len(&self) -> Option<usize> {
    if self.is_interlaced {
      return None;
    }
    if self.width == 0 {
      return Some(0);
    }
    let bits_per_line = self.bits_per_pixel().checked_mul(self.width as usize)?;
    let bytes_per_scanline = (bits_per_line / 8) + (bits_per_line % 8 != 0) as usize;
    bytes_per_scanline.checked_add(1)?.checked_mul(self.height as usize)
  }
}
impl TryFrom<&[u8]> for ImageHeader {
  type Error = FormatError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, _compression_method, _filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: match *color_type {
            0 if [1, 2, 4, 8, 16].contains(bit_depth) => *bit_depth,
            2 if [8, 16].contains(bit_depth) => *bit_depth,
            3 if [1, 2, 4, 8].contains(bit_depth) => *bit_depth,
            4 if [8, 16].contains(bit_depth) => *bit_depth,
            6 if [8, 16].contains(bit_depth) => *bit_depth,
            _ => return Err(FormatError::BadHeader),
          },
          color_type: PngColorType::try_from(*color_type)?,
          is_interlaced: match interlace_method {
            0 => false,
            1 => true,
            _ => return Err(FormatError::BadHeader),
          },
        })
      }
      _ => Err(FormatError::BadHeader),
    }
  }
}
impl TryFrom<&PngChunk> for ImageHeader {
  type Error = FormatError;
  #[inline]
  fn try_from(chunk: &PngChunk) -> Result<Self, Self::Error> {
    if chunk.type_() != PngChunkType::IHDR {
      return Err(FormatError::BadHeader);
    }
    Self::try_from(chunk.data())
  }
}

#[test]
fn test_expected_inflated_len() {
  let rgb = ImageHeader {
    width: 4,
    height: 2,
    bit_depth: 8,
    color_type: PngColorType::RGB,
    is_interlaced: false,
  };
  assert_eq!(rgb.expected_inflated_len(), Some(2 * (1 + 12)));
  // 3 pixels at 1 bit each still take a whole byte per line
  let y1 = ImageHeader { width: 3, height: 5, bit_depth: 1, color_type: PngColorType::Y, ..rgb };
  assert_eq!(y1.expected_inflated_len(), Some(5 * 2));
  let laced = ImageHeader { is_interlaced: true, ..rgb };
  assert_eq!(laced.expected_inflated_len(), None);
}
