use core::fmt;

use crate::png::{ChunkTy, ColorType};

/// An error from the `pngkit` crate.
///
/// Every failure aborts the whole decode or encode. The variant tells you which
/// kind of problem it was:
/// * [`BadSignature`](PngError::BadSignature): the bytes aren't PNG at all.
/// * [`Decode`](PngError::Decode): the PNG data is malformed or corrupt.
/// * [`Encode`](PngError::Encode): the in-memory file can't be written out.
/// * [`Unsupported`](PngError::Unsupported): the PNG might be perfectly valid,
///   but this crate doesn't reconstruct that kind of image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The first 8 bytes are not the PNG signature.
  BadSignature,
  /// The data could not be decoded.
  Decode(DecodeError),
  /// The file could not be encoded.
  Encode(EncodeError),
  /// The data uses a feature that isn't implemented.
  Unsupported(Unsupported),
}
impl PngError {
  /// If this error is about a missing feature rather than corrupt data.
  #[inline]
  #[must_use]
  pub const fn is_unsupported(&self) -> bool {
    matches!(self, Self::Unsupported(_) | Self::Decode(DecodeError::MultipleIdat))
  }
}
impl From<DecodeError> for PngError {
  #[inline]
  fn from(e: DecodeError) -> Self {
    Self::Decode(e)
  }
}
impl From<EncodeError> for PngError {
  #[inline]
  fn from(e: EncodeError) -> Self {
    Self::Encode(e)
  }
}
impl From<Unsupported> for PngError {
  #[inline]
  fn from(e: Unsupported) -> Self {
    Self::Unsupported(e)
  }
}
impl From<ZlibHeaderError> for PngError {
  #[inline]
  fn from(e: ZlibHeaderError) -> Self {
    Self::Decode(DecodeError::ZlibHeader(e))
  }
}
impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadSignature => f.write_str("PNG signature invalid"),
      Self::Decode(e) => write!(f, "decoding failed: {e}"),
      Self::Encode(e) => write!(f, "encoding failed: {e}"),
      Self::Unsupported(e) => write!(f, "not implemented: {e}"),
    }
  }
}

/// Problems found while reading PNG data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
  /// A chunk type isn't made of four ASCII letters.
  InvalidChunkTag(ChunkTy),
  /// The data ended partway through a chunk's length or type.
  UnexpectedEndOfInput,
  /// A chunk declared more bytes than the data has left.
  LengthOverrun {
    /// Declared payload length.
    declared: u32,
    /// Bytes left after the chunk type (payload and CRC).
    remaining: usize,
  },
  /// The chunk's CRC didn't match its type and data.
  CrcMismatch {
    /// The chunk's type.
    tag: ChunkTy,
    /// CRC stored in the file.
    declared: u32,
    /// CRC computed from the bytes.
    actual: u32,
  },
  /// A critical chunk that this crate doesn't know.
  UnknownCriticalChunk(ChunkTy),
  /// A second `IHDR` was found.
  DuplicateHeader,
  /// The first chunk wasn't `IHDR`.
  HeaderNotFirst,
  /// A chunk needed the `IHDR` but none has been decoded.
  MissingHeader,
  /// More than one `IDAT` chunk. Split image data isn't supported.
  MultipleIdat,
  /// The zlib header at the start of the `IDAT` data is bad.
  ZlibHeader(ZlibHeaderError),
  /// The DEFLATE stream couldn't be inflated.
  Inflate,
  /// The image data inflates to more bytes than the header calls for.
  ImageDataTooLarge {
    /// Bytes the header calls for.
    limit: usize,
  },
  /// An enumerated header field held a value with no meaning.
  UnexpectedValue {
    /// Which field.
    field: &'static str,
    /// The value found.
    value: u8,
  },
  /// A chunk's data had the wrong length.
  WrongChunkLength {
    /// The chunk's type.
    tag: ChunkTy,
    /// The length this chunk must have.
    expected: usize,
    /// The length it had.
    actual: usize,
  },
  /// The header gave a width or height of 0.
  ZeroDimension,
  /// The bit depth isn't allowed with the color type.
  InvalidBitDepth {
    /// Bit depth from the header.
    bit_depth: u8,
    /// Color type from the header.
    color_type: ColorType,
  },
  /// A scanline's filter byte isn't one of the five filter types.
  UnknownFilterType(u8),
  /// The inflated data is shorter than the header says the image needs.
  NotEnoughImageData {
    /// Bytes the image needs.
    needed: usize,
    /// Bytes that were inflated.
    available: usize,
  },
}
impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidChunkTag(tag) => write!(f, "encountered invalid chunk type name {tag:?}"),
      Self::UnexpectedEndOfInput => f.write_str("unexpected end of input"),
      Self::LengthOverrun { declared, remaining } => {
        write!(f, "file is too short - expected to read {declared} bytes, only {remaining} bytes left")
      }
      Self::CrcMismatch { tag, declared, actual } => {
        write!(f, "CRC check failed for {tag} - declared {declared:#010X}, actual {actual:#010X}")
      }
      Self::UnknownCriticalChunk(tag) => write!(f, "encountered unknown critical chunk {tag:?}"),
      Self::DuplicateHeader => f.write_str("got IHDR chunk again - is file corrupt?"),
      Self::HeaderNotFirst => f.write_str("the first chunk must be IHDR"),
      Self::MissingHeader => f.write_str("no IHDR chunk decoded yet"),
      Self::MultipleIdat => f.write_str("multiple IDAT segments not supported"),
      Self::ZlibHeader(e) => write!(f, "bad zlib header: {e}"),
      Self::Inflate => f.write_str("the image data could not be inflated"),
      Self::ImageDataTooLarge { limit } => {
        write!(f, "image data inflates to more than the {limit} bytes the header calls for")
      }
      Self::UnexpectedValue { field, value } => write!(f, "unexpected {field} value '{value}'"),
      Self::WrongChunkLength { tag, expected, actual } => {
        write!(f, "unexpected data length in {tag} chunk - expected {expected}, got {actual}")
      }
      Self::ZeroDimension => f.write_str("image width and height must be non-zero"),
      Self::InvalidBitDepth { bit_depth, color_type } => {
        write!(f, "invalid bit depth ({bit_depth}) specified for color type {color_type:?}")
      }
      Self::UnknownFilterType(x) => write!(f, "scanline filter type {x} is not known"),
      Self::NotEnoughImageData { needed, available } => {
        write!(f, "image needs {needed} bytes of scanline data, only {available} available")
      }
    }
  }
}

/// The ways the two byte zlib header can be wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZlibHeaderError {
  /// Less than two bytes of data.
  TooShort,
  /// The compression method isn't 8 (DEFLATE).
  CompressionMethod(u8),
  /// The LZ77 window is bigger than 32K.
  WindowTooLarge(u8),
  /// The header isn't a multiple of 31.
  CheckBits(u16),
  /// A preset dictionary is requested.
  PresetDictionary,
}
impl fmt::Display for ZlibHeaderError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TooShort => f.write_str("expected 2 bytes for zlib header"),
      Self::CompressionMethod(m) => write!(f, "compression method '{m}' not supported"),
      Self::WindowTooLarge(cinfo) => write!(f, "window size info {cinfo} is larger than 32K"),
      Self::CheckBits(v) => write!(f, "check bits {v:#06X} are not a multiple of 31"),
      Self::PresetDictionary => f.write_str("decompressing with a dictionary is not supported"),
    }
  }
}

/// Problems found while writing PNG data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
  /// The file has no chunks at all.
  NoChunks,
  /// The file has no `IHDR`.
  NoHeader,
  /// The `sBIT` values don't have the shape the header's color type needs.
  SignificantBitsShape,
  /// An `IDAT` was never decoded, so there's no data to compress.
  MissingImageData,
}
impl fmt::Display for EncodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::NoChunks => "cannot encode PNG file - no chunks",
      Self::NoHeader => "cannot encode PNG file - no header",
      Self::SignificantBitsShape => "sBIT channels don't match the header's color type",
      Self::MissingImageData => "IDAT chunk has no decoded data",
    })
  }
}

/// Valid PNG features that the pixel reconstruction doesn't handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
  /// Only truecolor and truecolor with alpha are reconstructed.
  ColorType(ColorType),
  /// Only 8 bits per channel are reconstructed.
  BitDepth(u8),
  /// Adam7 interlaced images.
  Interlaced,
}
impl fmt::Display for Unsupported {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ColorType(c) => {
        write!(f, "color type {c:?}, only Truecolor and TruecolorWithAlpha are supported")
      }
      Self::BitDepth(d) => write!(f, "bit depth {d}, only 8 bits per channel are supported"),
      Self::Interlaced => f.write_str("Adam7 interlacing"),
    }
  }
}
