//! The CRC-32 used by PNG chunks (ISO 3309, reflected `0xEDB88320`).

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// One table entry: the byte run through eight shift-and-XOR steps.
const fn table_entry(byte: u8) -> u32 {
  let mut c = byte as u32;
  let mut bit = 0;
  while bit < 8 {
    c = if c & 1 != 0 { POLYNOMIAL ^ (c >> 1) } else { c >> 1 };
    bit += 1;
  }
  c
}

const CRC_TABLE: [u32; 256] = {
  let mut table = [0; 256];
  let mut i = 0;
  while i < 256 {
    table[i] = table_entry(i as u8);
    i += 1;
  }
  table
};

/// Feeds more bytes into a running (non-inverted) CRC register.
#[inline]
fn crc_step(register: u32, bytes: &[u8]) -> u32 {
  bytes.iter().fold(register, |r, &b| CRC_TABLE[usize::from(r as u8 ^ b)] ^ (r >> 8))
}

/// Computes the CRC of a chunk: the type tag followed by the data.
///
/// The length field is *not* covered by the CRC.
#[inline]
#[must_use]
pub fn png_crc(chunk_ty: [u8; 4], data: &[u8]) -> u32 {
  !crc_step(crc_step(u32::MAX, &chunk_ty), data)
}

#[test]
fn test_png_crc_known_values() {
  // An empty IEND chunk always ends in these 4 bytes.
  assert_eq!(png_crc(*b"IEND", &[]), 0xAE42_6082);
  // the check value of CRC-32 is defined over "123456789"
  assert_eq!(png_crc(*b"1234", b"56789"), 0xCBF4_3926);
  assert_eq!(CRC_TABLE[1], 0x7707_3096);
  assert_eq!(CRC_TABLE[255], 0x2D02_EF8D);
}

#[test]
fn test_png_crc_splits_anywhere() {
  // the tag is just the first 4 bytes of one continuous stream
  let stream = b"IDATsome image bytes";
  let whole = !crc_step(u32::MAX, stream);
  assert_eq!(png_crc(*b"IDAT", &stream[4..]), whole);
  let (a, b) = stream.split_at(11);
  assert_eq!(!crc_step(crc_step(u32::MAX, a), b), whole);
}
