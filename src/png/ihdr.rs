use super::*;
use crate::{try_pull_byte_array, try_pull_u32_be, DecodeError};
use alloc::vec::Vec;

/// The color model of the image.
///
/// The value of each variant is the byte used for it in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale
  Greyscale = 0,
  /// Red, Green, Blue
  Truecolor = 2,
  /// Index into a palette.
  IndexedColor = 3,
  /// Greyscale + Alpha
  GreyscaleWithAlpha = 4,
  /// Red, Green, Blue, Alpha
  TruecolorWithAlpha = 6,
}
impl ColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Greyscale => 1,
      Self::Truecolor => 3,
      Self::IndexedColor => 1,
      Self::GreyscaleWithAlpha => 2,
      Self::TruecolorWithAlpha => 4,
    }
  }

  /// The bit depths that the format allows with this color type.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Greyscale => &[1, 2, 4, 8, 16],
      Self::Truecolor => &[8, 16],
      Self::IndexedColor => &[1, 2, 4, 8],
      Self::GreyscaleWithAlpha => &[8, 16],
      Self::TruecolorWithAlpha => &[8, 16],
    }
  }

  /// If the bit depth is allowed with this color type.
  #[inline]
  #[must_use]
  pub fn is_bit_depth_valid(self, bit_depth: u8) -> bool {
    self.allowed_bit_depths().contains(&bit_depth)
  }
}
impl TryFrom<u8> for ColorType {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::Greyscale,
      2 => Self::Truecolor,
      3 => Self::IndexedColor,
      4 => Self::GreyscaleWithAlpha,
      6 => Self::TruecolorWithAlpha,
      _ => return Err(DecodeError::UnexpectedValue { field: "color type", value }),
    })
  }
}

/// How the image data is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CompressionMethod {
  /// zlib wrapped DEFLATE, the only method PNG defines.
  #[default]
  Deflate = 0,
}
impl TryFrom<u8> for CompressionMethod {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Deflate),
      _ => Err(DecodeError::UnexpectedValue { field: "compression method", value }),
    }
  }
}

/// How the scanlines are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FilterMethod {
  /// Each scanline picks one of the five filter types.
  #[default]
  AdaptiveFiltering = 0,
}
impl TryFrom<u8> for FilterMethod {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::AdaptiveFiltering),
      _ => Err(DecodeError::UnexpectedValue { field: "filter method", value }),
    }
  }
}

/// How the image data is interlaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum InterlaceMethod {
  /// Scanlines are stored top to bottom.
  #[default]
  NoInterlace = 0,
  /// Seven reduced images, see [Adam7](https://www.w3.org/TR/png-3/#8Interlace).
  Adam7 = 1,
}
impl TryFrom<u8> for InterlaceMethod {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::NoInterlace),
      1 => Ok(Self::Adam7),
      _ => Err(DecodeError::UnexpectedValue { field: "interlace method", value }),
    }
  }
}

/// Image header
///
/// Spec: [IHDR](https://www.w3.org/TR/png-3/#11IHDR)
///
/// Values of this type are always validated: the dimensions are non-zero and
/// the bit depth is legal for the color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct IHDR {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: ColorType,
  pub compression: CompressionMethod,
  pub filter: FilterMethod,
  pub interlace: InterlaceMethod,
}
impl IHDR {
  /// Bytes of chunk data in an `IHDR`.
  pub const LENGTH: usize = 13;

  /// Parses the chunk data of an `IHDR`.
  ///
  /// ## Failure
  /// * The data must be exactly 13 bytes.
  /// * The color type, compression, filter, and interlace bytes must each be
  ///   one of their defined values (checked in that order).
  /// * Width and height must be non-zero.
  /// * The bit depth must be allowed for the color type.
  pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
    if data.len() != Self::LENGTH {
      return Err(DecodeError::WrongChunkLength {
        tag: ChunkTy::IHDR,
        expected: Self::LENGTH,
        actual: data.len(),
      });
    }
    let (width, rest) = try_pull_u32_be(data)?;
    let (height, rest) = try_pull_u32_be(rest)?;
    let ([bit_depth, color_type, compression, filter, interlace], _) =
      try_pull_byte_array::<5>(rest)?;
    let color_type = ColorType::try_from(color_type)?;
    let compression = CompressionMethod::try_from(compression)?;
    let filter = FilterMethod::try_from(filter)?;
    let interlace = InterlaceMethod::try_from(interlace)?;
    if width == 0 || height == 0 {
      return Err(DecodeError::ZeroDimension);
    }
    if !color_type.is_bit_depth_valid(bit_depth) {
      return Err(DecodeError::InvalidBitDepth { bit_depth, color_type });
    }
    Ok(Self { width, height, bit_depth, color_type, compression, filter, interlace })
  }

  /// Appends the 13 bytes of chunk data.
  pub fn encode_into(&self, out: &mut Vec<u8>) {
    crate::push_u32_be(out, self.width);
    crate::push_u32_be(out, self.height);
    out.extend_from_slice(&[
      self.bit_depth,
      self.color_type as u8,
      self.compression as u8,
      self.filter as u8,
      self.interlace as u8,
    ]);
  }

  /// Bits used by a single pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes per filtered scanline of the full image, including the filter byte.
  ///
  /// This is `ceil((8 + bits_per_pixel * width) / 8)`. The output is `None` if
  /// the value doesn't fit in `usize`.
  #[inline]
  #[must_use]
  pub fn bytes_per_filtered_line(&self) -> Option<usize> {
    let bits = (self.width as usize).checked_mul(self.bits_per_pixel())?.checked_add(8 + 7)?;
    Some(bits / 8)
  }

  /// Bytes of filtered scanline data the whole (non-interlaced) image takes.
  ///
  /// This is how big the inflated `IDAT` data should be. The output is `None`
  /// if the value doesn't fit in `usize`.
  #[inline]
  #[must_use]
  pub fn filtered_image_len(&self) -> Option<usize> {
    self.bytes_per_filtered_line()?.checked_mul(self.height as usize)
  }
}
impl core::fmt::Display for IHDR {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "IHDR chunk ({} x {}, {} bps, {:?}, {:?}, {:?}, {:?})",
      self.width,
      self.height,
      self.bit_depth,
      self.color_type,
      self.compression,
      self.filter,
      self.interlace
    )
  }
}

#[cfg(test)]
const IHDR_2X2_RGB8: [u8; 13] = [0, 0, 0, 2, 0, 0, 0, 2, 8, 2, 0, 0, 0];

#[test]
fn test_ihdr_decode() {
  let ihdr = IHDR::decode(&IHDR_2X2_RGB8).unwrap();
  assert_eq!(
    ihdr,
    IHDR {
      width: 2,
      height: 2,
      bit_depth: 8,
      color_type: ColorType::Truecolor,
      compression: CompressionMethod::Deflate,
      filter: FilterMethod::AdaptiveFiltering,
      interlace: InterlaceMethod::NoInterlace,
    }
  );
  assert_eq!(ihdr.bytes_per_filtered_line(), Some(7));
  assert_eq!(ihdr.filtered_image_len(), Some(14));
  assert_eq!(
    alloc::format!("{ihdr}"),
    "IHDR chunk (2 x 2, 8 bps, Truecolor, Deflate, AdaptiveFiltering, NoInterlace)"
  );
  let mut out = Vec::new();
  ihdr.encode_into(&mut out);
  assert_eq!(out, IHDR_2X2_RGB8);
}

#[test]
fn test_ihdr_bit_depth_legality() {
  let with = |color: u8, depth: u8| {
    let mut data = IHDR_2X2_RGB8;
    data[8] = depth;
    data[9] = color;
    IHDR::decode(&data)
  };
  assert_eq!(
    with(2, 4),
    Err(DecodeError::InvalidBitDepth { bit_depth: 4, color_type: ColorType::Truecolor })
  );
  assert!(with(2, 8).is_ok());
  assert!(with(2, 16).is_ok());
  for depth in [1, 2, 4, 8, 16] {
    assert!(with(0, depth).is_ok());
  }
  assert!(with(3, 16).is_err());
  assert!(with(4, 4).is_err());
  assert!(with(6, 8).is_ok());
}

#[test]
fn test_ihdr_validation_order() {
  assert_eq!(
    IHDR::decode(&IHDR_2X2_RGB8[..12]),
    Err(DecodeError::WrongChunkLength { tag: ChunkTy::IHDR, expected: 13, actual: 12 })
  );
  // zero width and a bad bit depth still report the enum field first
  let mut data = [0, 0, 0, 0, 0, 0, 0, 2, 3, 5, 0, 0, 0];
  assert_eq!(
    IHDR::decode(&data),
    Err(DecodeError::UnexpectedValue { field: "color type", value: 5 })
  );
  data[9] = 2;
  data[12] = 2;
  assert_eq!(
    IHDR::decode(&data),
    Err(DecodeError::UnexpectedValue { field: "interlace method", value: 2 })
  );
  data[12] = 1;
  assert_eq!(IHDR::decode(&data), Err(DecodeError::ZeroDimension));
  data[3] = 1;
  assert_eq!(
    IHDR::decode(&data),
    Err(DecodeError::InvalidBitDepth { bit_depth: 3, color_type: ColorType::Truecolor })
  );
}
