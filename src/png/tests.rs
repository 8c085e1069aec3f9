use super::*;
use crate::{DecodeError, EncodeError, PngError};
use alloc::{format, vec, vec::Vec};

fn chunk_bytes(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(ty);
  v.extend_from_slice(data);
  let mut crc = Crc32::new();
  crc.update(ty);
  crc.update(data);
  v.extend_from_slice(&crc.finish().to_be_bytes());
  v
}

fn png_bytes(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  for (ty, data) in chunks {
    v.extend_from_slice(&chunk_bytes(ty, data));
  }
  v
}

/// 2x2 truecolor, both rows unfiltered: red, green / blue, white.
fn rgb_2x2() -> (Vec<u8>, Vec<u8>) {
  let ihdr = vec![0, 0, 0, 2, 0, 0, 0, 2, 8, 2, 0, 0, 0];
  #[rustfmt::skip]
  let filtered = [
    0, 255, 0, 0, 0, 255, 0,
    0, 0, 0, 255, 255, 255, 255,
  ];
  let idat = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  (png_bytes(&[(b"IHDR", &ihdr[..]), (b"IDAT", &idat[..]), (b"IEND", &[][..])]), ihdr)
}

#[test]
fn test_decode_2x2_end_to_end() {
  let (bytes, _) = rgb_2x2();
  let file = PngFile::decode(&bytes).unwrap();
  assert_eq!(file.chunks().count(), 3);
  let scanlines = file.scanlines().unwrap();
  assert_eq!(scanlines.len(), 2);
  let pixels: Vec<[u8; 4]> = file.pixels().map(<[u8; 4]>::from).collect();
  assert_eq!(pixels, [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [255, 255, 255, 255]]);
  assert_eq!(format!("{}", file.filter_histogram()), "None: 2");
  assert_eq!(file.filter_histogram().count(FilterType::None), 2);
}

#[test]
fn test_decode_then_encode_keeps_pixels() {
  let (bytes, _) = rgb_2x2();
  let file = PngFile::decode(&bytes).unwrap();
  for level in [
    CompressionLevel::Optimal,
    CompressionLevel::Fastest,
    CompressionLevel::NoCompression,
    CompressionLevel::SmallestSize,
  ] {
    let encoded = file.encode(level).unwrap();
    let again = PngFile::decode(&encoded).unwrap();
    assert_eq!(again.header(), file.header());
    assert!(again.pixels().eq(file.pixels()));
    assert_eq!(again.scanlines(), file.scanlines());
  }
}

#[test]
fn test_header_must_come_first_and_once() {
  let (_, ihdr) = rgb_2x2();
  let text = png_bytes(&[(b"tEXt", &b"a\0b"[..]), (b"IHDR", &ihdr[..])]);
  assert_eq!(PngFile::decode(&text), Err(PngError::Decode(DecodeError::HeaderNotFirst)));
  let twice = png_bytes(&[(b"IHDR", &ihdr[..]), (b"IHDR", &ihdr[..])]);
  assert_eq!(PngFile::decode(&twice), Err(PngError::Decode(DecodeError::DuplicateHeader)));
}

#[test]
fn test_multiple_idat_is_unsupported() {
  let (_, ihdr) = rgb_2x2();
  let filtered = [0_u8; 14];
  let idat = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);
  let (first, second) = idat.split_at(idat.len() / 2);
  let bytes = png_bytes(&[(b"IHDR", &ihdr[..]), (b"IDAT", first), (b"IDAT", second), (b"IEND", &[][..])]);
  let err = PngFile::decode(&bytes).unwrap_err();
  assert_eq!(err, PngError::Decode(DecodeError::MultipleIdat));
  assert!(err.is_unsupported());
}

#[test]
fn test_image_data_is_capped_by_header() {
  let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0];
  // 1x1 truecolor needs 4 bytes, this inflates to 4 MiB
  let idat = miniz_oxide::deflate::compress_to_vec_zlib(&vec![0_u8; 4 << 20], 6);
  let bytes = png_bytes(&[(b"IHDR", &ihdr[..]), (b"IDAT", &idat[..]), (b"IEND", &[][..])]);
  assert_eq!(PngFile::decode(&bytes), Err(PngError::Decode(DecodeError::ImageDataTooLarge { limit: 4 })));
  // exactly the right amount is fine
  let idat = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 1, 2, 3], 6);
  let bytes = png_bytes(&[(b"IHDR", &ihdr[..]), (b"IDAT", &idat[..]), (b"IEND", &[][..])]);
  let file = PngFile::decode(&bytes).unwrap();
  assert_eq!(file.pixels().collect::<Vec<_>>(), [Pixel { r: 1, g: 2, b: 3, a: 255 }]);
}

#[test]
fn test_sbit_uses_header_from_file() {
  let (_, ihdr) = rgb_2x2();
  let bytes = png_bytes(&[(b"IHDR", &ihdr[..]), (b"sBIT", &[5, 6, 5][..]), (b"IEND", &[][..])]);
  let file = PngFile::decode(&bytes).unwrap();
  assert_eq!(file.find_chunk_of_kind(ChunkKind::sBIT), Some(&PngChunk::sBIT(sBIT::RGB { r: 5, g: 6, b: 5 })));
  assert!(file.scanlines().is_none());
  let bad = png_bytes(&[(b"IHDR", &ihdr[..]), (b"sBIT", &[5, 6][..]), (b"IEND", &[][..])]);
  assert_eq!(
    PngFile::decode(&bad),
    Err(PngError::Decode(DecodeError::WrongChunkLength { tag: ChunkTy::sBIT, expected: 3, actual: 2 }))
  );
}

#[test]
fn test_chunk_offsets_are_recorded() {
  let (bytes, _) = rgb_2x2();
  let file = PngFile::decode(&bytes).unwrap();
  let idats: Vec<_> = file.chunks_of_kind_with_offset(ChunkKind::IDAT).collect();
  assert_eq!(idats.len(), 1);
  // signature, then IHDR (8 + 13 + 4), then the IDAT length and type
  assert_eq!(idats[0].1, 8 + 25 + 8);
}

#[test]
fn test_encode_needs_chunks_and_header() {
  let empty = PngFile::default();
  assert_eq!(empty.encode(CompressionLevel::Optimal), Err(PngError::Encode(EncodeError::NoChunks)));
  // a signature with nothing after it decodes to an empty file
  let file = PngFile::decode(&PNG_SIGNATURE).unwrap();
  assert_eq!(file.chunks().count(), 0);
  assert_eq!(file.encode(CompressionLevel::Optimal), Err(PngError::Encode(EncodeError::NoChunks)));
}

#[test]
fn test_bad_signature() {
  let (mut bytes, _) = rgb_2x2();
  bytes[1] = b'p';
  assert_eq!(PngFile::decode(&bytes), Err(PngError::BadSignature));
  assert_eq!(PngFile::decode(&[]), Err(PngError::BadSignature));
}
