use super::*;
use crate::DecodeError;

/// Image trailer
///
/// Spec: [IEND](https://www.w3.org/TR/png-3/#11IEND)
///
/// Marks the end of the datastream. It has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IEND;
impl IEND {
  /// Checks that the chunk data is empty.
  #[inline]
  pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
    if data.is_empty() {
      Ok(Self)
    } else {
      Err(DecodeError::WrongChunkLength { tag: ChunkTy::IEND, expected: 0, actual: data.len() })
    }
  }
}
impl core::fmt::Display for IEND {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str("IEND chunk")
  }
}
