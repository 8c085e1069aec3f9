use super::*;
use crate::{try_pull_u32_be, DecodeError, EncodeError};
use alloc::vec::Vec;

/// A framed chunk from a PNG, before its data is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPngChunk<'b> {
  /// The chunk type.
  pub ty: ChunkTy,
  /// The chunk data.
  pub data: &'b [u8],
  /// The CRC stored after the data.
  pub declared_crc: u32,
}
impl core::fmt::Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl RawPngChunk<'_> {
  /// The CRC of the chunk type and data.
  #[inline]
  #[must_use]
  pub fn compute_crc(&self) -> u32 {
    let mut crc = Crc32::new();
    crc.update(&self.ty.to_bytes());
    crc.update(self.data);
    crc.finish()
  }
}

/// Reads successive chunks out of PNG bytes.
///
/// Each chunk is `length (u32 BE), type, data, CRC (u32 BE)`, and the CRC is
/// over the type and the data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkReader<'b> {
  bytes: &'b [u8],
  pos: usize,
}
impl<'b> ChunkReader<'b> {
  /// Reads the chunks of a full PNG datastream, starting after the signature.
  ///
  /// The signature itself isn't checked here.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, pos: PNG_SIGNATURE.len() }
  }

  /// Position of the next chunk, as an offset into the full bytes.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }

  /// If there's no more bytes to read.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.pos >= self.bytes.len()
  }

  /// Frames the next chunk and checks its CRC.
  ///
  /// The output is the raw chunk along with the offset of its data within the
  /// full bytes. On error the reader doesn't move.
  ///
  /// ## Failure
  /// * Fewer than 8 bytes left for the length and type.
  /// * The type isn't four ascii letters.
  /// * The type is critical but not a kind this crate knows.
  /// * The data and CRC run past the end of the bytes.
  /// * The CRC doesn't match.
  pub fn next_raw_chunk(&mut self) -> Result<(RawPngChunk<'b>, usize), DecodeError> {
    let rest = self.bytes.get(self.pos..).unwrap_or_default();
    let (declared, rest) = try_pull_u32_be(rest)?;
    let (ty, rest) = crate::try_pull_byte_array::<4>(rest)?;
    let ty = ChunkTy::from(ty);
    let (is_valid, kind) = classify(ty);
    if !is_valid {
      return Err(DecodeError::InvalidChunkTag(ty));
    }
    if kind == ChunkKind::Unknown && ty.is_critical() {
      return Err(DecodeError::UnknownCriticalChunk(ty));
    }
    let data_len = declared as usize;
    if rest.len() < 4 || data_len > rest.len() - 4 {
      return Err(DecodeError::LengthOverrun { declared, remaining: rest.len() });
    }
    let (data, rest) = rest.split_at(data_len);
    let (declared_crc, _) = try_pull_u32_be(rest)?;
    let raw = RawPngChunk { ty, data, declared_crc };
    let actual = raw.compute_crc();
    if actual != declared_crc {
      return Err(DecodeError::CrcMismatch { tag: ty, declared: declared_crc, actual });
    }
    let data_offset = self.pos + 8;
    self.pos = data_offset + data_len + 4;
    Ok((raw, data_offset))
  }

  /// Frames the next chunk and interprets its data.
  ///
  /// Sibling chunks (like the header) are looked up through `file`. The output
  /// is the chunk along with the offset of its data within the full bytes.
  pub fn read_chunk(&mut self, file: &PngFile) -> Result<(PngChunk, usize), DecodeError> {
    let (raw, data_offset) = self.next_raw_chunk()?;
    let (_, kind) = classify(raw.ty);
    let chunk = PngChunk::decode(raw.ty, kind, raw.data, file)?;
    Ok((chunk, data_offset))
  }
}

/// Appends a whole chunk: length, type, data, and CRC.
///
/// The CRC is always computed fresh over the type and the encoded data.
pub fn write_chunk(
  out: &mut Vec<u8>, chunk: &PngChunk, file: &PngFile, level: CompressionLevel,
) -> Result<(), EncodeError> {
  let mut data = Vec::new();
  chunk.encode_payload(file, level, &mut data)?;
  let ty = chunk.ty().to_bytes();
  let mut crc = Crc32::new();
  crc.update(&ty);
  crc.update(&data);
  crate::push_u32_be(out, data.len() as u32);
  out.extend_from_slice(&ty);
  out.extend_from_slice(&data);
  crate::push_u32_be(out, crc.finish());
  Ok(())
}

#[cfg(test)]
fn framed(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(ty);
  v.extend_from_slice(data);
  let crc = crc32(&[&ty[..], data].concat());
  v.extend_from_slice(&crc.to_be_bytes());
  v
}

#[test]
fn test_next_raw_chunk() {
  let bytes = framed(b"tEXt", b"abc");
  let mut reader = ChunkReader::new(&bytes);
  let (raw, offset) = reader.next_raw_chunk().unwrap();
  assert_eq!(raw.ty, ChunkTy::from(*b"tEXt"));
  assert_eq!(raw.data, b"abc");
  assert_eq!(offset, 16);
  assert!(reader.is_empty());
  assert_eq!(reader.position(), bytes.len());
  assert_eq!(reader.next_raw_chunk().unwrap_err(), DecodeError::UnexpectedEndOfInput);
}

#[test]
fn test_next_raw_chunk_failures() {
  let check = |bytes: &[u8], expected: DecodeError| {
    let mut reader = ChunkReader::new(bytes);
    assert_eq!(reader.next_raw_chunk().unwrap_err(), expected);
    assert_eq!(reader.position(), 8);
  };
  let bytes = framed(b"tEXt", b"abc");
  check(&bytes[..14], DecodeError::UnexpectedEndOfInput);
  check(&framed(b"tE1t", b""), DecodeError::InvalidChunkTag(ChunkTy::from(*b"tE1t")));
  check(&framed(b"ABCD", b""), DecodeError::UnknownCriticalChunk(ChunkTy::from(*b"ABCD")));
  check(&bytes[..bytes.len() - 1], DecodeError::LengthOverrun { declared: 3, remaining: 6 });
  let mut flipped = bytes.clone();
  flipped[17] ^= 1;
  let actual = crc32(b"tEXtacc");
  let declared = crc32(b"tEXtabc");
  check(&flipped, DecodeError::CrcMismatch { tag: ChunkTy::from(*b"tEXt"), declared, actual });
}

#[test]
fn test_write_chunk() {
  let chunk = PngChunk::Unknown { ty: ChunkTy::from(*b"tEXt"), data: b"abc".to_vec() };
  let mut out = PNG_SIGNATURE.to_vec();
  write_chunk(&mut out, &chunk, &PngFile::default(), CompressionLevel::Optimal).unwrap();
  assert_eq!(out, framed(b"tEXt", b"abc"));
  let mut out = Vec::new();
  write_chunk(&mut out, &PngChunk::IEND(IEND), &PngFile::default(), CompressionLevel::Optimal)
    .unwrap();
  assert_eq!(out, [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
}
