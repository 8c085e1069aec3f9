use super::*;
use crate::{DecodeError, PngError, Unsupported};
use alloc::vec::Vec;

/// The filter applied to a scanline.
///
/// Spec: [Filter types](https://www.w3.org/TR/png-3/#9Filter-types)
///
/// For each byte, `a` is the same byte of the pixel to the left, `b` is the
/// same byte of the pixel above, and `c` is the same byte of the pixel above
/// and to the left. Any of these that fall outside the image count as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// The byte is stored as is.
  None = 0,
  /// The byte is stored as a difference from `a`.
  Sub = 1,
  /// The byte is stored as a difference from `b`.
  Up = 2,
  /// The byte is stored as a difference from the average of `a` and `b`.
  Average = 3,
  /// The byte is stored as a difference from the Paeth predictor of `a`, `b`,
  /// and `c`.
  Paeth = 4,
}
impl FilterType {
  /// All filter types, in order of their byte value.
  pub const ALL: [Self; 5] = [Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth];

  /// Undoes this filter on one byte.
  #[inline]
  #[must_use]
  pub const fn unfilter(self, raw: u8, a: u8, b: u8, c: u8) -> u8 {
    let predictor = match self {
      Self::None => 0,
      Self::Sub => a,
      Self::Up => b,
      Self::Average => ((a as u16 + b as u16) / 2) as u8,
      Self::Paeth => paeth_predict(a, b, c),
    };
    raw.wrapping_add(predictor)
  }
}
impl TryFrom<u8> for FilterType {
  type Error = DecodeError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      _ => return Err(DecodeError::UnknownFilterType(value)),
    })
  }
}

const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests is fixed by the format, ties go to a, then b.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// One reconstructed row of the image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scanline {
  filter: FilterType,
  pixels: Vec<Pixel>,
}
impl Scanline {
  /// The filter this row was stored with.
  #[inline]
  #[must_use]
  pub const fn filter(&self) -> FilterType {
    self.filter
  }
  /// The pixels of the row, left to right.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[Pixel] {
    &self.pixels
  }
}

/// Unfilters the inflated `IDAT` data into rows of pixels.
///
/// Rows are reconstructed top to bottom, each one reading the finished pixels
/// of the row above it.
///
/// ## Failure
/// * `Unsupported` unless the image is 8-bit truecolor (with or without alpha)
///   and not interlaced.
/// * `NotEnoughImageData` if `data` is shorter than `height` scanlines. Extra
///   bytes after the last scanline are ignored.
/// * `UnknownFilterType` if a row's filter byte is above 4.
pub fn reconstruct_scanlines(header: &IHDR, data: &[u8]) -> Result<Vec<Scanline>, PngError> {
  match header.color_type {
    ColorType::Truecolor | ColorType::TruecolorWithAlpha => (),
    other => return Err(Unsupported::ColorType(other).into()),
  }
  if header.bit_depth != 8 {
    return Err(Unsupported::BitDepth(header.bit_depth).into());
  }
  if header.interlace != InterlaceMethod::NoInterlace {
    return Err(Unsupported::Interlaced.into());
  }

  let channels = header.color_type.channel_count();
  let width = header.width as usize;
  let height = header.height as usize;
  let needed = header
    .bytes_per_filtered_line()
    .and_then(|line| line.checked_mul(height).map(|total| (line, total)));
  let line = match needed {
    Some((line, total)) if total <= data.len() => line,
    Some((_, total)) => {
      return Err(DecodeError::NotEnoughImageData { needed: total, available: data.len() }.into())
    }
    None => {
      return Err(DecodeError::NotEnoughImageData { needed: usize::MAX, available: data.len() }.into())
    }
  };

  let mut out: Vec<Scanline> = Vec::with_capacity(height);
  for row in data.chunks_exact(line).take(height) {
    let (&filter_byte, raw) = match row.split_first() {
      Some(split) => split,
      None => break,
    };
    let filter = FilterType::try_from(filter_byte)?;
    let above: &[Pixel] = out.last().map(Scanline::pixels).unwrap_or_default();
    let mut pixels: Vec<Pixel> = Vec::with_capacity(width);
    for (x, raw_pixel) in raw.chunks_exact(channels).enumerate() {
      let mut pixel = Pixel { a: u8::MAX, ..Pixel::default() };
      for (i, &raw_byte) in raw_pixel.iter().enumerate() {
        let a = if x > 0 { pixels[x - 1][i] } else { 0 };
        let b = above.get(x).map_or(0, |p| p[i]);
        let c = if x > 0 { above.get(x - 1).map_or(0, |p| p[i]) } else { 0 };
        pixel[i] = filter.unfilter(raw_byte, a, b, c);
      }
      pixels.push(pixel);
    }
    log::trace!("scanline {}: {filter:?}", out.len());
    out.push(Scanline { filter, pixels });
  }
  Ok(out)
}

/// How many scanlines used each filter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterHistogram([usize; 5]);
impl FilterHistogram {
  /// Counts the filters of some scanlines.
  #[must_use]
  pub fn from_scanlines(scanlines: &[Scanline]) -> Self {
    let mut counts = [0; 5];
    for scanline in scanlines {
      counts[scanline.filter as usize] += 1;
    }
    Self(counts)
  }
  /// The number of scanlines with the filter type.
  #[inline]
  #[must_use]
  pub const fn count(&self, filter: FilterType) -> usize {
    self.0[filter as usize]
  }
}
impl core::fmt::Display for FilterHistogram {
  /// Shows `Filter: count` for each filter that was used at least once.
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let mut first = true;
    for filter in FilterType::ALL {
      let count = self.count(filter);
      if count == 0 {
        continue;
      }
      if !first {
        f.write_str(", ")?;
      }
      write!(f, "{filter:?}: {count}")?;
      first = false;
    }
    Ok(())
  }
}

#[cfg(test)]
fn rgb8_header(width: u32, height: u32) -> IHDR {
  IHDR {
    width,
    height,
    bit_depth: 8,
    color_type: ColorType::Truecolor,
    compression: CompressionMethod::Deflate,
    filter: FilterMethod::AdaptiveFiltering,
    interlace: InterlaceMethod::NoInterlace,
  }
}

#[test]
fn test_unfilter_byte() {
  let (a, b, c, raw) = (10, 20, 5, 200);
  assert_eq!(FilterType::None.unfilter(raw, a, b, c), 200);
  assert_eq!(FilterType::Sub.unfilter(raw, a, b, c), 210);
  assert_eq!(FilterType::Up.unfilter(raw, a, b, c), 220);
  assert_eq!(FilterType::Average.unfilter(raw, a, b, c), 215);
  // p = 25, pa = 15, pb = 5, pc = 20, so b wins
  assert_eq!(FilterType::Paeth.unfilter(raw, a, b, c), 220);
  // wraps mod 256
  assert_eq!(FilterType::Sub.unfilter(250, 10, 0, 0), 4);
  assert_eq!(FilterType::Average.unfilter(0, 255, 255, 0), 255);
}

#[test]
fn test_paeth_ties() {
  // all distances equal, a wins
  assert_eq!(paeth_predict(7, 7, 7), 7);
  // pa == pb, a wins
  assert_eq!(paeth_predict(5, 5, 0), 5);
  assert_eq!(paeth_predict(3, 9, 3), 9);
  assert_eq!(paeth_predict(1, 2, 3), 1);
  // pc is 0, c wins
  assert_eq!(paeth_predict(10, 20, 15), 15);
}

#[test]
fn test_reconstruct_sub_and_up() {
  let header = rgb8_header(2, 2);
  #[rustfmt::skip]
  let data = [
    1, 10, 20, 30, 1, 1, 1,
    2, 5, 5, 5, 0, 0, 0,
  ];
  let lines = reconstruct_scanlines(&header, &data).unwrap();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0].filter(), FilterType::Sub);
  assert_eq!(lines[0].pixels(), &[Pixel::from_components(&[10, 20, 30]), Pixel::from_components(&[11, 21, 31])]);
  assert_eq!(lines[1].filter(), FilterType::Up);
  assert_eq!(lines[1].pixels(), &[Pixel::from_components(&[15, 25, 35]), Pixel::from_components(&[11, 21, 31])]);
  let histogram = FilterHistogram::from_scanlines(&lines);
  assert_eq!(alloc::format!("{histogram}"), "Sub: 1, Up: 1");
}

#[test]
fn test_reconstruct_rgba_keeps_alpha() {
  let mut header = rgb8_header(1, 1);
  header.color_type = ColorType::TruecolorWithAlpha;
  let lines = reconstruct_scanlines(&header, &[0, 1, 2, 3, 4]).unwrap();
  assert_eq!(lines[0].pixels(), &[Pixel { r: 1, g: 2, b: 3, a: 4 }]);
}

#[test]
fn test_reconstruct_failures() {
  let header = rgb8_header(2, 2);
  assert_eq!(
    reconstruct_scanlines(&header, &[0; 13]),
    Err(PngError::Decode(DecodeError::NotEnoughImageData { needed: 14, available: 13 }))
  );
  assert_eq!(
    reconstruct_scanlines(&header, &[0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0]),
    Err(PngError::Decode(DecodeError::UnknownFilterType(5)))
  );
  let mut grey = header;
  grey.color_type = ColorType::Greyscale;
  assert!(reconstruct_scanlines(&grey, &[0; 64]).unwrap_err().is_unsupported());
  let mut deep = header;
  deep.bit_depth = 16;
  assert_eq!(reconstruct_scanlines(&deep, &[0; 64]), Err(PngError::Unsupported(Unsupported::BitDepth(16))));
  let mut laced = header;
  laced.interlace = InterlaceMethod::Adam7;
  assert_eq!(reconstruct_scanlines(&laced, &[0; 64]), Err(PngError::Unsupported(Unsupported::Interlaced)));
}
