use super::*;
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

/// Image Data.
///
/// Spec: [IDAT](https://www.w3.org/TR/png-3/#11IDAT)
///
/// * Image data is stored with Zlib compression applied.
/// * During the structural pass only the chunk's length is kept. The data is
///   inflated later, once the whole file has been framed and checked, and then
///   it's the filtered scanlines of the image.
/// * Images are allowed to split their data across more than one `IDAT`, but
///   that isn't supported here.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct IDAT {
  length: u32,
  decompressed: Option<Vec<u8>>,
}
impl core::fmt::Debug for IDAT {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("IDAT")
      .field("length", &self.length)
      .field("decompressed", &self.decompressed.as_ref().map(Vec::len))
      .finish()
  }
}
impl IDAT {
  /// An `IDAT` from the structural pass, before its data is inflated.
  #[inline]
  #[must_use]
  pub const fn deferred(length: u32) -> Self {
    Self { length, decompressed: None }
  }

  /// An `IDAT` holding already filtered scanline data.
  #[inline]
  #[must_use]
  pub fn from_filtered_data(filtered: Vec<u8>) -> Self {
    Self { length: 0, decompressed: Some(filtered) }
  }

  /// The chunk length this `IDAT` had in the file (0 if it wasn't read from a
  /// file).
  #[inline]
  #[must_use]
  pub const fn length(&self) -> u32 {
    self.length
  }

  /// The inflated data (the filtered scanlines), if it's been decoded.
  #[inline]
  #[must_use]
  pub fn data(&self) -> Option<&[u8]> {
    self.decompressed.as_deref()
  }

  /// Checks the zlib header of the chunk data and inflates the rest.
  ///
  /// At most `limit` bytes are inflated, which should be the
  /// [`filtered_image_len`](IHDR::filtered_image_len) of the header. The
  /// Adler-32 trailer isn't checked.
  ///
  /// ## Failure
  /// * `ImageDataTooLarge` if the stream inflates to more than `limit` bytes.
  pub fn decode(&mut self, payload: &[u8], limit: usize) -> Result<(), DecodeError> {
    use miniz_oxide::inflate::{decompress_to_vec_with_limit, TINFLStatus};
    validate_zlib_header(payload).map_err(DecodeError::ZlibHeader)?;
    let deflated = &payload[ZLIB_HEADER_LEN..];
    let inflated = decompress_to_vec_with_limit(deflated, limit).map_err(|e| match e.status {
      TINFLStatus::HasMoreOutput => DecodeError::ImageDataTooLarge { limit },
      status => {
        log::debug!("inflate failed: {status:?}");
        DecodeError::Inflate
      }
    })?;
    log::trace!("IDAT inflated {} bytes to {}", deflated.len(), inflated.len());
    self.decompressed = Some(inflated);
    Ok(())
  }

  /// Appends the chunk data: zlib header, DEFLATE data, then the Adler-32 of
  /// the uncompressed bytes.
  pub fn encode_into(&self, level: CompressionLevel, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let data = self.data().ok_or(EncodeError::MissingImageData)?;
    out.extend_from_slice(&zlib_header(level));
    out.extend_from_slice(&miniz_oxide::deflate::compress_to_vec(data, level.miniz_level()));
    crate::push_u32_be(out, adler::adler32_slice(data));
    Ok(())
  }
}
impl core::fmt::Display for IDAT {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "IDAT chunk ({} bytes)", self.length)
  }
}

#[test]
fn test_idat_encode_then_decode() {
  let filtered: Vec<u8> = (0..200_u32).map(|i| (i * 7 % 251) as u8).collect();
  let idat = IDAT::from_filtered_data(filtered.clone());
  for level in [CompressionLevel::Optimal, CompressionLevel::NoCompression] {
    let mut payload = Vec::new();
    idat.encode_into(level, &mut payload).unwrap();
    assert_eq!(payload[..2], zlib_header(level));
    let trailer = &payload[payload.len() - 4..];
    assert_eq!(trailer, adler::adler32_slice(&filtered).to_be_bytes());
    let mut back = IDAT::deferred(payload.len() as u32);
    back.decode(&payload, filtered.len()).unwrap();
    assert_eq!(back.data(), Some(filtered.as_slice()));
  }
}

#[test]
fn test_idat_decode_failures() {
  let mut idat = IDAT::deferred(3);
  assert_eq!(idat.decode(&[0x78], 16), Err(DecodeError::ZlibHeader(crate::ZlibHeaderError::TooShort)));
  // a valid header, then a reserved DEFLATE block type
  assert_eq!(idat.decode(&[0x78, 0x9C, 0xFF, 0xFF], 16), Err(DecodeError::Inflate));
  assert_eq!(idat.data(), None);
  let mut out = Vec::new();
  assert_eq!(idat.encode_into(CompressionLevel::Optimal, &mut out), Err(EncodeError::MissingImageData));
}

#[test]
fn test_idat_decode_stops_at_limit() {
  let zeros = alloc::vec![0_u8; 1 << 20];
  let payload = miniz_oxide::deflate::compress_to_vec_zlib(&zeros, 6);
  let mut idat = IDAT::deferred(payload.len() as u32);
  assert_eq!(idat.decode(&payload, 4), Err(DecodeError::ImageDataTooLarge { limit: 4 }));
  assert_eq!(idat.data(), None);
  idat.decode(&payload, zeros.len()).unwrap();
  assert_eq!(idat.data().map(<[u8]>::len), Some(zeros.len()));
}
