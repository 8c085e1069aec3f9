#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for decoding and re-encoding PNG data.
//!
//! The PNG support is organized around [`png::PngFile`], which reads every
//! chunk of a PNG datastream, checks each chunk's CRC, interprets the header,
//! significant bits, and image data chunks, and then reconstructs the pixels
//! of the image from the filtered scanlines.
//!
//! Only 8-bit truecolor images (with or without alpha) are reconstructed into
//! pixels. Other pixel formats still have their chunks parsed, but the pixel
//! reconstruction reports an [`Unsupported`] error.
//!
//! With the `bmp` feature the reconstructed pixels can also be written out as a
//! 24-bit Windows Bitmap.

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod ascii_array;
pub use ascii_array::*;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod pixel;
pub use pixel::*;

pub mod png;

#[cfg(feature = "bmp")]
#[cfg_attr(docs_rs, doc(cfg(feature = "bmp")))]
pub mod bmp;
