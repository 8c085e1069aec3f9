use bitfrob::u8_get_bit;

use crate::AsciiArray;

/// The four byte type of a PNG chunk.
///
/// Chunk types are always four ascii letters. The case of each letter is a
/// property bit (bit 5, `0x20`, is set for lowercase):
/// * First letter: uppercase means *critical*, lowercase means *ancillary*.
/// * Second letter: uppercase means *public*, lowercase means *private*.
/// * Third letter: reserved, should always be uppercase.
/// * Fourth letter: lowercase means *safe to copy* when an editor changes the
///   critical chunks without understanding this chunk.
///
/// The properties are just bits in the type bytes, so they work the same for
/// chunk types this crate knows and for chunk types it doesn't.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub AsciiArray<4>);
#[allow(nonstandard_style)]
impl ChunkTy {
  /// Image header
  pub const IHDR: Self = Self(AsciiArray(*b"IHDR"));
  /// Significant bits
  pub const sBIT: Self = Self(AsciiArray(*b"sBIT"));
  /// Image data
  pub const IDAT: Self = Self(AsciiArray(*b"IDAT"));
  /// Image trailer
  pub const IEND: Self = Self(AsciiArray(*b"IEND"));

  /// The raw type bytes.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0 .0
  }

  /// If all four bytes are ascii letters.
  #[inline]
  #[must_use]
  pub fn is_valid(self) -> bool {
    self.0.is_ascii_letters()
  }

  /// Critical chunks must be understood for the image to be processed safely.
  #[inline]
  #[must_use]
  pub fn is_critical(self) -> bool {
    !u8_get_bit(5, self.0 .0[0])
  }

  /// Public chunks are defined by the PNG spec or registered with it.
  #[inline]
  #[must_use]
  pub fn is_public(self) -> bool {
    !u8_get_bit(5, self.0 .0[1])
  }

  /// If the chunk can be copied into a modified file without being understood.
  #[inline]
  #[must_use]
  pub fn is_safe_to_copy(self) -> bool {
    u8_get_bit(5, self.0 .0[3])
  }

  /// All the property bits at once.
  #[inline]
  #[must_use]
  pub fn attributes(self) -> ChunkAttributes {
    ChunkAttributes {
      is_critical: self.is_critical(),
      is_public: self.is_public(),
      is_safe_to_copy: self.is_safe_to_copy(),
    }
  }
}
impl core::fmt::Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.0, f)
  }
}
impl core::fmt::Display for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.0, f)
  }
}
impl From<[u8; 4]> for ChunkTy {
  #[inline]
  fn from(bytes: [u8; 4]) -> Self {
    Self(AsciiArray(bytes))
  }
}

/// The property bits of a chunk type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct ChunkAttributes {
  pub is_critical: bool,
  pub is_public: bool,
  pub is_safe_to_copy: bool,
}

/// The kinds of chunk this crate knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub enum ChunkKind {
  /// Any chunk type that isn't one of the others.
  Unknown,
  /// Image header
  IHDR,
  /// Significant bits
  sBIT,
  /// Image data
  IDAT,
  /// Image trailer
  IEND,
}
impl ChunkKind {
  /// The chunk type for this kind, `None` for [`ChunkKind::Unknown`].
  #[inline]
  #[must_use]
  pub fn ty(self) -> Option<ChunkTy> {
    KNOWN_CHUNK_KINDS.iter().find(|(kind, _)| *kind == self).map(|(_, ty)| *ty)
  }
}

/// Every known chunk kind along with its chunk type.
pub const KNOWN_CHUNK_KINDS: &[(ChunkKind, ChunkTy)] = &[
  (ChunkKind::IHDR, ChunkTy::IHDR),
  (ChunkKind::sBIT, ChunkTy::sBIT),
  (ChunkKind::IDAT, ChunkTy::IDAT),
  (ChunkKind::IEND, ChunkTy::IEND),
];

/// Sorts a chunk type into a [`ChunkKind`].
///
/// The output is `(is_valid, kind)`:
/// * `is_valid` is false when any byte isn't an ascii letter. The kind is
///   always `Unknown` in that case.
/// * Otherwise the kind is looked up, giving `Unknown` for chunk types that this
///   crate doesn't interpret.
#[inline]
#[must_use]
pub fn classify(ty: ChunkTy) -> (bool, ChunkKind) {
  if let Some((kind, _)) = KNOWN_CHUNK_KINDS.iter().find(|(_, known)| *known == ty) {
    return (true, *kind);
  }
  (ty.is_valid(), ChunkKind::Unknown)
}

#[test]
fn test_classify() {
  assert_eq!(classify(ChunkTy::IHDR), (true, ChunkKind::IHDR));
  assert_eq!(classify(ChunkTy::sBIT), (true, ChunkKind::sBIT));
  assert_eq!(classify(ChunkTy::from(*b"tEXt")), (true, ChunkKind::Unknown));
  assert_eq!(classify(ChunkTy::from(*b"IH R")), (false, ChunkKind::Unknown));
  assert_eq!(classify(ChunkTy::from([0x49, 0x48, 0x44, 0xFF])), (false, ChunkKind::Unknown));
  for (kind, ty) in KNOWN_CHUNK_KINDS {
    assert_eq!(kind.ty(), Some(*ty));
  }
  assert_eq!(ChunkKind::Unknown.ty(), None);
}

#[test]
fn test_chunk_attributes() {
  let ihdr = ChunkTy::IHDR.attributes();
  assert!(ihdr.is_critical && ihdr.is_public && !ihdr.is_safe_to_copy);
  let sbit = ChunkTy::sBIT.attributes();
  assert!(!sbit.is_critical && sbit.is_public && !sbit.is_safe_to_copy);
  let text = ChunkTy::from(*b"tEXt").attributes();
  assert!(!text.is_critical && text.is_public && text.is_safe_to_copy);
  let private = ChunkTy::from(*b"prVt").attributes();
  assert!(!private.is_critical && !private.is_public && private.is_safe_to_copy);
}
