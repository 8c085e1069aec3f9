//! The [`AsciiArray`] newtype.

use core::fmt::Write;

/// An array of bytes expected to contain ascii data.
///
/// There's no enforced encoding. The `Debug` and `Display` impls just `as`
/// cast each byte into a character, which is exactly right for ascii data and
/// still safe (if unhelpful) for anything else.
///
/// PNG chunk types are four ascii letters, so this is mostly used to give chunk
/// types and errors that mention them a readable `Debug` output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct AsciiArray<const N: usize>(pub [u8; N]);

impl<const N: usize> AsciiArray<N> {
  /// The bytes of the array.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; N] {
    &self.0
  }

  /// If every byte is an ascii letter (`A-Z` or `a-z`).
  #[inline]
  #[must_use]
  pub fn is_ascii_letters(&self) -> bool {
    self.0.iter().all(u8::is_ascii_alphabetic)
  }
}

impl<const N: usize> Default for AsciiArray<N> {
  #[inline]
  fn default() -> Self {
    Self([0; N])
  }
}

impl<const N: usize> core::fmt::Debug for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    f.write_char('\"')?;
    Ok(())
  }
}
impl<const N: usize> core::fmt::Display for AsciiArray<N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

impl<const N: usize> From<[u8; N]> for AsciiArray<N> {
  #[inline]
  fn from(array: [u8; N]) -> Self {
    Self(array)
  }
}

#[test]
fn test_ascii_array_formatting() {
  use alloc::format;
  let a = AsciiArray(*b"sBIT");
  assert_eq!(format!("{a}"), "sBIT");
  assert_eq!(format!("{a:?}"), "\"sBIT\"");
  assert!(a.is_ascii_letters());
  assert!(!AsciiArray(*b"IH1R").is_ascii_letters());
}
