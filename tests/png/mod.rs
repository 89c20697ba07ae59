use pngrsa::{
  png::{parse_chunks, write_png, PngChunk, PngChunkType, RawChunkIter, PNG_SIGNATURE},
  Error, FormatError,
};
use walkdir::WalkDir;

#[test]
fn test_parse_chunks_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = parse_chunks(&v);
  }
  // even totally random data should never panic the parser!
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(1024));
    let _ = parse_chunks(&v);
    let _ = parse_chunks(&super::rand_bytes(1024));
  }
}

#[test]
fn test_bad_signature() {
  let png = write_png(&super::tiny_png(3, 2, false).chunks).unwrap();
  let mut bad = png.clone();
  bad[1] = b'p';
  assert_eq!(parse_chunks(&bad), Err(FormatError::BadSignature));
  assert_eq!(parse_chunks(&png[..7]), Err(FormatError::BadSignature));
  assert_eq!(parse_chunks(&[]), Err(FormatError::BadSignature));
}

#[test]
fn test_truncated_chunk() {
  let png = write_png(&super::tiny_png(3, 2, false).chunks).unwrap();
  // cutting anywhere past the signature but before the end leaves a partial chunk
  for cut in [9, 12, 15, 20, png.len() - 1] {
    assert!(
      matches!(parse_chunks(&png[..cut]), Err(FormatError::Truncated { .. })),
      "cut: {cut}"
    );
  }
  // a declared length past the end of the input
  let mut v = PNG_SIGNATURE.to_vec();
  v.extend_from_slice(&100_u32.to_be_bytes());
  v.extend_from_slice(b"IDAT");
  v.extend_from_slice(&[1, 2, 3]);
  assert_eq!(parse_chunks(&v), Err(FormatError::Truncated { offset: 16, needed: 97 }));
  // just the signature is an empty PNG, not an error
  assert_eq!(parse_chunks(&PNG_SIGNATURE), Ok(Vec::new()));
}

#[test]
fn test_parse_write_is_byte_exact() {
  let tiny = super::tiny_png(5, 4, true);
  let png = write_png(&tiny.chunks).unwrap();
  let parsed = parse_chunks(&png).unwrap();
  assert_eq!(parsed, tiny.chunks);
  assert_eq!(write_png(&parsed).unwrap(), png);
  let types: Vec<PngChunkType> = parsed.iter().map(|c| c.type_()).collect();
  assert_eq!(
    types,
    [
      PngChunkType::IHDR,
      PngChunkType(*b"tEXt"),
      PngChunkType::PLTE,
      PngChunkType::IDAT,
      PngChunkType::IDAT,
      PngChunkType::IEND
    ]
  );
  assert_eq!(parsed[2].palette_entries().unwrap().len(), 4);
  // the raw iterator sees the same chunks without copying
  let raw: Vec<_> = RawChunkIter::new(&png).unwrap().collect::<Result<_, _>>().unwrap();
  assert_eq!(raw.len(), parsed.len());
  assert_eq!(raw[0].data(), parsed[0].data());
  assert_eq!(raw[0].declared_crc(), parsed[0].crc());
}

#[test]
fn test_crc_mismatch_is_kept_and_reported() {
  let mut png = write_png(&super::tiny_png(3, 2, false).chunks).unwrap();
  // last byte of the IHDR crc: 8 signature + 4 length + 4 type + 13 data + 4 crc
  png[32] ^= 0xFF;
  let chunks = parse_chunks(&png).unwrap();
  assert!(matches!(
    chunks[0].check_crc(),
    Err(Error::CrcMismatch { chunk: PngChunkType::IHDR, .. })
  ));
  assert_ne!(chunks[0].crc(), chunks[0].compute_actual_crc());
  assert!(chunks[1..].iter().all(|c| c.check_crc().is_ok()));
  // passthrough keeps the wrong crc as-is
  assert_eq!(write_png(&chunks).unwrap(), png);
}

#[test]
fn test_new_chunk_invariants() {
  let chunk = PngChunk::new(PngChunkType::IDAT, super::rand_bytes(77)).unwrap();
  assert_eq!(chunk.length(), 77);
  assert!(chunk.check_crc().is_ok());
  let bytes = chunk.to_bytes();
  assert_eq!(bytes.len(), 12 + 77);
  assert_eq!(&bytes[..4], &77_u32.to_be_bytes());
  assert_eq!(&bytes[4..8], b"IDAT");
  assert_eq!(&bytes[8..85], chunk.data());
  assert_eq!(&bytes[85..], &chunk.compute_actual_crc().to_be_bytes());
}
