//! Module for the reconstructed pixel type.

use bytemuck::{Pod, Zeroable};
use core::ops::{Index, IndexMut};
use pixel_formats::r8g8b8a8_Srgb;

/// Red/Green/Blue/Alpha, u8 per channel.
///
/// A pixel can also be indexed by component number, `0` through `3` being red,
/// green, blue, and alpha. Scanline filtering works on "the same component of
/// a neighboring pixel", so this is how the unfilter code reads its neighbors.
///
/// Pixels from images without an alpha channel have an alpha of 255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
#[allow(missing_docs)]
pub struct Pixel {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl Pixel {
  /// Builds a pixel from 3 (RGB) or 4 (RGBA) component bytes.
  ///
  /// ## Panics
  /// * If `components` isn't 3 or 4 bytes long.
  #[inline]
  #[must_use]
  #[track_caller]
  pub fn from_components(components: &[u8]) -> Self {
    match *components {
      [r, g, b] => Self { r, g, b, a: u8::MAX },
      [r, g, b, a] => Self { r, g, b, a },
      _ => panic!("a pixel has 3 or 4 components, got {}", components.len()),
    }
  }

  /// Gets a component by number, or `None` past the alpha channel.
  #[inline]
  #[must_use]
  pub const fn get(&self, component: usize) -> Option<u8> {
    match component {
      0 => Some(self.r),
      1 => Some(self.g),
      2 => Some(self.b),
      3 => Some(self.a),
      _ => None,
    }
  }
}
impl Index<usize> for Pixel {
  type Output = u8;
  #[inline]
  #[track_caller]
  fn index(&self, component: usize) -> &u8 {
    match component {
      0 => &self.r,
      1 => &self.g,
      2 => &self.b,
      3 => &self.a,
      _ => panic!("a pixel cannot have more than four components"),
    }
  }
}
impl IndexMut<usize> for Pixel {
  #[inline]
  #[track_caller]
  fn index_mut(&mut self, component: usize) -> &mut u8 {
    match component {
      0 => &mut self.r,
      1 => &mut self.g,
      2 => &mut self.b,
      3 => &mut self.a,
      _ => panic!("a pixel cannot have more than four components"),
    }
  }
}
impl From<Pixel> for r8g8b8a8_Srgb {
  #[inline]
  fn from(Pixel { r, g, b, a }: Pixel) -> Self {
    r8g8b8a8_Srgb { r, g, b, a }
  }
}
impl From<Pixel> for [u8; 4] {
  #[inline]
  fn from(p: Pixel) -> Self {
    bytemuck::cast(p)
  }
}

#[test]
fn test_pixel_components() {
  let p = Pixel::from_components(&[1, 2, 3]);
  assert_eq!(p, Pixel { r: 1, g: 2, b: 3, a: 255 });
  assert_eq!((p[0], p[1], p[2], p[3]), (1, 2, 3, 255));
  assert_eq!(p.get(4), None);
  let q = Pixel::from_components(&[9, 8, 7, 6]);
  assert_eq!(<[u8; 4]>::from(q), [9, 8, 7, 6]);
  let srgb: r8g8b8a8_Srgb = q.into();
  assert_eq!((srgb.r, srgb.g, srgb.b, srgb.a), (9, 8, 7, 6));
}
