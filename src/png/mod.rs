//! Holds all the tools for decoding and encoding PNG data.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png-3/
//!
//! ## Decoding
//!
//! Most of the time you just want [`PngFile::decode`]. It runs in two passes:
//!
//! 1) The **structural pass** reads every chunk in file order. Each chunk has
//!    its type checked, its length checked against the bytes that are left,
//!    and its CRC checked, and then the chunk data is handed to the decoder for
//!    that kind of chunk. The `IHDR` must be the first chunk, and there must be
//!    only one of them. Chunks that depend on the header (such as `sBIT`) look
//!    it up through the file rather than holding on to it.
//! 2) The **data pass** finds the one `IDAT` chunk, checks its zlib header,
//!    inflates the data, and unfilters the scanlines into [`Pixel`] rows.
//!
//! Any error at any point ends the decode. There's no partial result.
//!
//! ```no_run
//! use pngkit::png::*;
//! # fn f(bytes: &[u8]) -> Result<(), pngkit::PngError> {
//! let file = PngFile::decode(bytes)?;
//! if let Some(scanlines) = file.scanlines() {
//!   for scanline in scanlines {
//!     println!("{:?}: {:?}", scanline.filter(), scanline.pixels());
//!   }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Chunks
//!
//! There's many kinds of chunk in the PNG format, but only a few are needed to
//! read back a basic truecolor image:
//! * **Header** - Dimensions, pixel format, and if the image is interlaced.
//! * **Significant bits** - How many bits of each channel were significant in
//!   the original image data.
//! * **Image Data** - The compressed, filtered scanlines.
//! * **End** - The last chunk.
//!
//! Any other chunk is kept as raw bytes when it's *ancillary*, and rejected
//! when it's *critical*, since a critical chunk means the image can't be
//! understood correctly without it.
//!
//! ## Encoding
//!
//! [`PngFile::encode`] writes the signature, then the header, then all other
//! chunks in their original order. The image data is compressed again at the
//! [`CompressionLevel`] you pick, so the output isn't necessarily the same
//! bytes as the input, but it does decode back to the same pixels.

use crate::Pixel;

mod crc32;
pub use crc32::*;

mod chunk_ty;
pub use chunk_ty::*;

mod raw_chunk;
pub use raw_chunk::*;

mod png_chunk;
pub use png_chunk::*;

mod ihdr;
pub use ihdr::*;

mod sbit;
pub use sbit::*;

mod zlib;
pub use zlib::*;

mod idat;
pub use idat::*;

mod iend;
pub use iend::*;

mod unfilter;
pub use unfilter::*;

mod file;
pub use file::*;

#[cfg(test)]
mod tests;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, ..])
}
