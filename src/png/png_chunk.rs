use super::*;
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

/// A decoded PNG chunk.
///
/// Chunks that this crate doesn't interpret are `Unknown` and keep their data
/// as raw bytes, so they can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum PngChunk {
  Unknown { ty: ChunkTy, data: Vec<u8> },
  IHDR(IHDR),
  sBIT(sBIT),
  IDAT(IDAT),
  IEND(IEND),
}
impl PngChunk {
  /// Interprets the data of a chunk that passed framing and CRC checks.
  ///
  /// `IDAT` data is not inflated here, only its length is kept. Use
  /// [`IDAT::decode`] for that.
  pub fn decode(ty: ChunkTy, kind: ChunkKind, data: &[u8], file: &PngFile) -> Result<Self, DecodeError> {
    Ok(match kind {
      ChunkKind::IHDR => Self::IHDR(IHDR::decode(data)?),
      ChunkKind::sBIT => Self::sBIT(sBIT::decode(data, file)?),
      // the chunk reader already checked that the length fits in a u32
      ChunkKind::IDAT => Self::IDAT(IDAT::deferred(data.len() as u32)),
      ChunkKind::IEND => Self::IEND(IEND::decode(data)?),
      ChunkKind::Unknown => Self::Unknown { ty, data: data.to_vec() },
    })
  }

  /// The kind of chunk.
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> ChunkKind {
    match self {
      Self::Unknown { .. } => ChunkKind::Unknown,
      Self::IHDR(_) => ChunkKind::IHDR,
      Self::sBIT(_) => ChunkKind::sBIT,
      Self::IDAT(_) => ChunkKind::IDAT,
      Self::IEND(_) => ChunkKind::IEND,
    }
  }

  /// The chunk type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    match self {
      Self::Unknown { ty, .. } => *ty,
      Self::IHDR(_) => ChunkTy::IHDR,
      Self::sBIT(_) => ChunkTy::sBIT,
      Self::IDAT(_) => ChunkTy::IDAT,
      Self::IEND(_) => ChunkTy::IEND,
    }
  }

  /// The property bits of the chunk type.
  #[inline]
  #[must_use]
  pub fn attributes(&self) -> ChunkAttributes {
    self.ty().attributes()
  }

  /// Appends the chunk's data, not including the length, type, or CRC.
  ///
  /// `sBIT` takes its shape from the file's header, and `IDAT` is compressed
  /// again at `level`.
  pub fn encode_payload(
    &self, file: &PngFile, level: CompressionLevel, out: &mut Vec<u8>,
  ) -> Result<(), EncodeError> {
    match self {
      Self::Unknown { data, .. } => out.extend_from_slice(data),
      Self::IHDR(ihdr) => ihdr.encode_into(out),
      Self::sBIT(sbit) => sbit.encode_into(file, out)?,
      Self::IDAT(idat) => idat.encode_into(level, out)?,
      Self::IEND(_) => (),
    }
    Ok(())
  }
}
impl core::fmt::Display for PngChunk {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Unknown { ty, data } => {
        let ChunkAttributes { is_critical, is_public, is_safe_to_copy } = ty.attributes();
        write!(
          f,
          "{ty} chunk ({} bytes) [critical: {is_critical}, public: {is_public}, safe to copy: {is_safe_to_copy}]",
          data.len()
        )
      }
      Self::IHDR(ihdr) => core::fmt::Display::fmt(ihdr, f),
      Self::sBIT(sbit) => core::fmt::Display::fmt(sbit, f),
      Self::IDAT(idat) => core::fmt::Display::fmt(idat, f),
      Self::IEND(iend) => core::fmt::Display::fmt(iend, f),
    }
  }
}

#[test]
fn test_unknown_chunk_summary() {
  let chunk = PngChunk::decode(
    ChunkTy::from(*b"tEXt"),
    ChunkKind::Unknown,
    b"Title\0Sample",
    &PngFile::default(),
  )
  .unwrap();
  assert_eq!(chunk.kind(), ChunkKind::Unknown);
  assert_eq!(
    alloc::format!("{chunk}"),
    "tEXt chunk (12 bytes) [critical: false, public: true, safe to copy: true]"
  );
  let mut out = Vec::new();
  chunk.encode_payload(&PngFile::default(), CompressionLevel::Optimal, &mut out).unwrap();
  assert_eq!(out, b"Title\0Sample");
}
