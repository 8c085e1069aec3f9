//! The zlib envelope around the DEFLATE stream of an `IDAT`.
//!
//! * [RFC 1950](https://www.rfc-editor.org/rfc/rfc1950)
//!
//! The DEFLATE data itself is handled by `miniz_oxide`. This module only deals
//! with the two byte header in front of it (and the Adler-32 trailer, which is
//! written when encoding but not checked when decoding).

use crate::ZlibHeaderError;

/// Bytes of zlib header in front of the DEFLATE data.
pub const ZLIB_HEADER_LEN: usize = 2;

/// Compression method 8 (DEFLATE) with a 32K window (CINFO 7).
const ZLIB_CMF: u8 = 0x78;

/// How hard the encoder tries to shrink the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionLevel {
  /// A balance of speed and size.
  #[default]
  Optimal,
  /// Compress quickly.
  Fastest,
  /// Store the data without compressing it.
  NoCompression,
  /// Compress as much as possible.
  SmallestSize,
}
impl CompressionLevel {
  /// The FLG byte of the zlib header for this level.
  #[inline]
  #[must_use]
  pub const fn zlib_flags(self) -> u8 {
    match self {
      Self::Optimal => 0x9C,
      Self::Fastest => 0x5E,
      Self::NoCompression => 0x01,
      Self::SmallestSize => 0xDA,
    }
  }

  /// The level given to `miniz_oxide` for this level.
  #[inline]
  #[must_use]
  pub const fn miniz_level(self) -> u8 {
    match self {
      Self::Optimal => 6,
      Self::Fastest => 1,
      Self::NoCompression => 0,
      Self::SmallestSize => 10,
    }
  }
}
impl core::str::FromStr for CompressionLevel {
  type Err = ();
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s {
      "optimal" => Self::Optimal,
      "fastest" => Self::Fastest,
      "none" => Self::NoCompression,
      "smallest" => Self::SmallestSize,
      _ => return Err(()),
    })
  }
}

/// The two header bytes (CMF, FLG) for a compression level.
#[inline]
#[must_use]
pub const fn zlib_header(level: CompressionLevel) -> [u8; ZLIB_HEADER_LEN] {
  [ZLIB_CMF, level.zlib_flags()]
}

/// Checks the zlib header at the start of `bytes`.
///
/// ## Failure
/// * Fewer than two bytes.
/// * The compression method isn't 8.
/// * The window size info is above 7.
/// * `CMF * 256 + FLG` isn't a multiple of 31.
/// * The preset dictionary flag is set.
pub fn validate_zlib_header(bytes: &[u8]) -> Result<(), ZlibHeaderError> {
  let &[cmf, flg, ..] = bytes else {
    return Err(ZlibHeaderError::TooShort);
  };
  let method = cmf & 0x0F;
  if method != 8 {
    return Err(ZlibHeaderError::CompressionMethod(method));
  }
  let cinfo = cmf >> 4;
  if cinfo > 7 {
    return Err(ZlibHeaderError::WindowTooLarge(cinfo));
  }
  let check = u16::from_be_bytes([cmf, flg]);
  if check % 31 != 0 {
    return Err(ZlibHeaderError::CheckBits(check));
  }
  if bitfrob::u8_get_bit(5, flg) {
    return Err(ZlibHeaderError::PresetDictionary);
  }
  Ok(())
}

#[test]
fn test_zlib_headers_are_valid() {
  for level in [
    CompressionLevel::Optimal,
    CompressionLevel::Fastest,
    CompressionLevel::NoCompression,
    CompressionLevel::SmallestSize,
  ] {
    assert_eq!(validate_zlib_header(&zlib_header(level)), Ok(()), "{level:?}");
  }
}

#[test]
fn test_validate_zlib_header_failures() {
  assert_eq!(validate_zlib_header(&[0x78]), Err(ZlibHeaderError::TooShort));
  assert_eq!(validate_zlib_header(&[0x77, 0x9C]), Err(ZlibHeaderError::CompressionMethod(7)));
  assert_eq!(validate_zlib_header(&[0x88, 0x9C]), Err(ZlibHeaderError::WindowTooLarge(8)));
  assert_eq!(validate_zlib_header(&[0x78, 0x9D]), Err(ZlibHeaderError::CheckBits(0x789D)));
  // 0x78BB is 31 * 997 with FDICT set
  assert_eq!(validate_zlib_header(&[0x78, 0xBB]), Err(ZlibHeaderError::PresetDictionary));
}
