//! The CRC-32 used by PNG (ISO 3309 / ITU-T V.42).
//!
//! Every chunk ends with a CRC computed over the chunk type and the chunk data
//! (never the length). See [the PNG spec appendix][crc] for the reference code.
//!
//! [crc]: https://www.w3.org/TR/png-3/#D-CRCAppendix

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

#[inline]
fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// A running CRC-32.
///
/// Feed it bytes in as many pieces as you like, then call
/// [`finish`](Self::finish). The result is the same as calling [`crc32`] on
/// all of the bytes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32(u32);
impl Crc32 {
  /// A new CRC, with no bytes processed.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }
  /// Processes more bytes.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    self.0 = update_crc(self.0, bytes.iter().copied());
  }
  /// The CRC of all bytes processed so far.
  #[inline]
  #[must_use]
  pub const fn finish(self) -> u32 {
    self.0 ^ u32::MAX
  }
}
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

/// Computes the CRC of the bytes.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  png_crc(bytes.iter().copied())
}

/// Checks the bytes against an expected CRC.
#[inline]
#[must_use]
pub fn crc32_verify(bytes: &[u8], expected: u32) -> bool {
  crc32(bytes) == expected
}

#[inline]
pub(crate) fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}

#[test]
fn test_crc32_known_values() {
  assert_eq!(crc32(b""), 0);
  assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
  // every PNG ends with these bytes.
  assert_eq!(crc32(b"IEND"), 0xAE42_6082);
  assert!(crc32_verify(b"IEND", 0xAE42_6082));
  assert!(!crc32_verify(b"IENd", 0xAE42_6082));
}

#[test]
fn test_crc32_streaming_matches_one_shot() {
  let data: alloc::vec::Vec<u8> = (0..=255_u8).cycle().take(1000).collect();
  for split in [0, 1, 4, 500, 999, 1000] {
    let (a, b) = data.split_at(split);
    let mut c = Crc32::new();
    c.update(a);
    c.update(b);
    assert_eq!(c.finish(), crc32(&data), "split at {split}");
  }
}
