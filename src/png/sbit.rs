use super::*;
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

/// Significant bits
///
/// Spec: [sBIT](https://www.w3.org/TR/png-3/#11sBIT)
///
/// There's one byte per channel, giving the number of bits of that channel
/// that were significant in the original image. The channels come from the
/// header's color type, so decoding and encoding both need the `IHDR`. Indexed
/// color images give the significant bits of the palette's RGB entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum sBIT {
  Y { y: u8 },
  RGB { r: u8, g: u8, b: u8 },
  YA { y: u8, a: u8 },
  RGBA { r: u8, g: u8, b: u8, a: u8 },
}
impl sBIT {
  /// The number of data bytes an `sBIT` has for a given color type.
  #[inline]
  #[must_use]
  pub const fn expected_len(color_type: ColorType) -> usize {
    match color_type {
      ColorType::Greyscale => 1,
      ColorType::Truecolor | ColorType::IndexedColor => 3,
      ColorType::GreyscaleWithAlpha => 2,
      ColorType::TruecolorWithAlpha => 4,
    }
  }

  /// Parses the chunk data, using the header already decoded into `file`.
  ///
  /// ## Failure
  /// * `MissingHeader` if the file has no `IHDR` yet.
  /// * `WrongChunkLength` if the data doesn't have one byte per channel.
  pub fn decode(data: &[u8], file: &PngFile) -> Result<Self, DecodeError> {
    let color_type = file.header().ok_or(DecodeError::MissingHeader)?.color_type;
    Ok(match (color_type, data) {
      (ColorType::Greyscale, &[y]) => Self::Y { y },
      (ColorType::Truecolor | ColorType::IndexedColor, &[r, g, b]) => Self::RGB { r, g, b },
      (ColorType::GreyscaleWithAlpha, &[y, a]) => Self::YA { y, a },
      (ColorType::TruecolorWithAlpha, &[r, g, b, a]) => Self::RGBA { r, g, b, a },
      _ => {
        return Err(DecodeError::WrongChunkLength {
          tag: ChunkTy::sBIT,
          expected: Self::expected_len(color_type),
          actual: data.len(),
        })
      }
    })
  }

  /// Appends the chunk data, in the shape the file's header needs.
  ///
  /// ## Failure
  /// * `NoHeader` if the file has no `IHDR`.
  /// * `SignificantBitsShape` if this value has the wrong channels for the
  ///   header's color type.
  pub fn encode_into(&self, file: &PngFile, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let color_type = file.header().ok_or(EncodeError::NoHeader)?.color_type;
    match (color_type, *self) {
      (ColorType::Greyscale, Self::Y { y }) => out.push(y),
      (ColorType::Truecolor | ColorType::IndexedColor, Self::RGB { r, g, b }) => {
        out.extend_from_slice(&[r, g, b])
      }
      (ColorType::GreyscaleWithAlpha, Self::YA { y, a }) => out.extend_from_slice(&[y, a]),
      (ColorType::TruecolorWithAlpha, Self::RGBA { r, g, b, a }) => {
        out.extend_from_slice(&[r, g, b, a])
      }
      _ => return Err(EncodeError::SignificantBitsShape),
    }
    Ok(())
  }

  /// The number of channels this value holds.
  #[inline]
  #[must_use]
  pub const fn channel_count(&self) -> usize {
    match self {
      Self::Y { .. } => 1,
      Self::RGB { .. } => 3,
      Self::YA { .. } => 2,
      Self::RGBA { .. } => 4,
    }
  }
}
impl core::fmt::Display for sBIT {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Y { y } => write!(f, "sBIT chunk (grey: {y})"),
      Self::RGB { r, g, b } => write!(f, "sBIT chunk (red: {r}, green: {g}, blue: {b})"),
      Self::YA { y, a } => write!(f, "sBIT chunk (grey: {y}, alpha: {a})"),
      Self::RGBA { r, g, b, a } => {
        write!(f, "sBIT chunk (red: {r}, green: {g}, blue: {b}, alpha: {a})")
      }
    }
  }
}

#[cfg(test)]
fn file_with_color_type(color_type: ColorType) -> PngFile {
  let mut file = PngFile::default();
  let header = IHDR {
    width: 1,
    height: 1,
    bit_depth: 8,
    color_type,
    compression: CompressionMethod::Deflate,
    filter: FilterMethod::AdaptiveFiltering,
    interlace: InterlaceMethod::NoInterlace,
  };
  file.add_chunk(PngChunk::IHDR(header), 8).unwrap();
  file
}

#[test]
fn test_sbit_arity() {
  let cases = [
    (ColorType::Greyscale, 1),
    (ColorType::Truecolor, 3),
    (ColorType::IndexedColor, 3),
    (ColorType::GreyscaleWithAlpha, 2),
    (ColorType::TruecolorWithAlpha, 4),
  ];
  let data = [5_u8, 6, 5, 8, 1];
  for (color_type, arity) in cases {
    let file = file_with_color_type(color_type);
    for len in 0..=data.len() {
      let result = sBIT::decode(&data[..len], &file);
      if len == arity {
        let sbit = result.unwrap();
        assert_eq!(sbit.channel_count(), arity);
        let mut out = Vec::new();
        sbit.encode_into(&file, &mut out).unwrap();
        assert_eq!(out, &data[..len]);
      } else {
        assert_eq!(
          result,
          Err(DecodeError::WrongChunkLength { tag: ChunkTy::sBIT, expected: arity, actual: len })
        );
      }
    }
  }
}

#[test]
fn test_sbit_needs_header() {
  let file = PngFile::default();
  assert_eq!(sBIT::decode(&[8, 8, 8], &file), Err(DecodeError::MissingHeader));
  let mut out = Vec::new();
  assert_eq!(sBIT::Y { y: 3 }.encode_into(&file, &mut out), Err(EncodeError::NoHeader));
}

#[test]
fn test_sbit_greyscale_encodes_grey_value() {
  let file = file_with_color_type(ColorType::Greyscale);
  let mut out = Vec::new();
  sBIT::Y { y: 3 }.encode_into(&file, &mut out).unwrap();
  assert_eq!(out, [3]);
  let file = file_with_color_type(ColorType::Truecolor);
  assert_eq!(sBIT::Y { y: 3 }.encode_into(&file, &mut out), Err(EncodeError::SignificantBitsShape));
}
