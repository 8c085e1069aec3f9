//! Module for writing Windows Bitmap files.
//!
//! Only one flavor of bitmap is written: 24 bits per pixel, uncompressed
//! (`BI_RGB`), with a `BITMAPINFOHEADER`. Alpha is dropped.
//!
//! * [BITMAPINFOHEADER](https://learn.microsoft.com/en-us/windows/win32/api/wingdi/ns-wingdi-bitmapinfoheader)
//!
//! Each row is stored as blue, green, red bytes per pixel, then padded with
//! zeroes to a multiple of 4 bytes. A positive height means the rows are in
//! bottom-up order, a negative height means top-down. The writer emits rows in
//! the order it's given them, so picking the sign is up to the caller.

use crate::Pixel;
use alloc::vec::Vec;
use bytemuck::{Pod, Zeroable};
use pack1::*;

const BI_RGB: u32 = 0;

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct BitmapFileHeader {
  ty: [u8; 2],
  file_size: U32LE,
  reserved1: U16LE,
  reserved2: U16LE,
  bitmap_offset: U32LE,
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct BitmapInfoHeader {
  size: U32LE,
  width: I32LE,
  height: I32LE,
  planes: U16LE,
  bits_per_pixel: U16LE,
  compression: U32LE,
  image_size: U32LE,
  pixels_per_meter_x: I32LE,
  pixels_per_meter_y: I32LE,
  colors_used: U32LE,
  important_colors: U32LE,
}

const FILE_HEADER_SIZE: usize = core::mem::size_of::<BitmapFileHeader>();
const INFO_HEADER_SIZE: usize = core::mem::size_of::<BitmapInfoHeader>();

/// An error from the bitmap writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmpError {
  /// The pixel slice isn't `width * |height|` pixels long.
  PixelCountMismatch {
    /// Pixels the dimensions call for.
    expected: usize,
    /// Pixels that were given.
    actual: usize,
  },
  /// The file would be more than 4GB.
  TooLarge,
}
impl core::fmt::Display for BmpError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::PixelCountMismatch { expected, actual } => {
        write!(f, "expected {expected} pixels for the bitmap, got {actual}")
      }
      Self::TooLarge => f.write_str("bitmap is too large"),
    }
  }
}

/// Bytes per stored row of a 24-bit bitmap, including padding.
#[inline]
#[must_use]
pub const fn bmp_row_stride(width: u32) -> usize {
  ((width as usize * 3) + 3) & !3
}

/// Writes pixels as a 24-bit bitmap.
///
/// The pixels are `width` per row, in the order they're stored in the file. A
/// negative `height` marks the rows as top-down.
///
/// ## Failure
/// * The number of pixels must be `width * |height|`.
/// * The total file size must fit in a `u32`.
pub fn bmp_write(width: u32, height: i32, pixels: &[Pixel]) -> Result<Vec<u8>, BmpError> {
  let rows = height.unsigned_abs() as usize;
  let expected = (width as usize).checked_mul(rows).ok_or(BmpError::TooLarge)?;
  if pixels.len() != expected {
    return Err(BmpError::PixelCountMismatch { expected, actual: pixels.len() });
  }
  let stride = bmp_row_stride(width);
  let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
  let total = stride.checked_mul(rows).and_then(|data| data.checked_add(data_offset)).ok_or(BmpError::TooLarge)?;
  let file_size = u32::try_from(total).map_err(|_| BmpError::TooLarge)?;
  let width_i32 = i32::try_from(width).map_err(|_| BmpError::TooLarge)?;

  let file_header = BitmapFileHeader {
    ty: *b"BM",
    file_size: U32LE::new(file_size),
    reserved1: U16LE::new(0),
    reserved2: U16LE::new(0),
    bitmap_offset: U32LE::new(data_offset as u32),
  };
  let info_header = BitmapInfoHeader {
    size: U32LE::new(INFO_HEADER_SIZE as u32),
    width: I32LE::new(width_i32),
    height: I32LE::new(height),
    planes: U16LE::new(1),
    bits_per_pixel: U16LE::new(24),
    compression: U32LE::new(BI_RGB),
    ..Zeroable::zeroed()
  };
  log::debug!("writing {width}x{height} bitmap, {file_size} bytes");

  let mut out = Vec::with_capacity(total);
  out.extend_from_slice(bytemuck::bytes_of(&file_header));
  out.extend_from_slice(bytemuck::bytes_of(&info_header));
  if width > 0 {
    for row in pixels.chunks_exact(width as usize) {
      let start = out.len();
      for p in row {
        out.extend_from_slice(&[p.b, p.g, p.r]);
      }
      out.resize(start + stride, 0);
    }
  }
  Ok(out)
}

#[test]
fn test_bmp_header_sizes() {
  assert_eq!(FILE_HEADER_SIZE, 14);
  assert_eq!(INFO_HEADER_SIZE, 40);
  assert_eq!(bmp_row_stride(1), 4);
  assert_eq!(bmp_row_stride(2), 8);
  assert_eq!(bmp_row_stride(4), 12);
  assert_eq!(bmp_row_stride(5), 16);
}
