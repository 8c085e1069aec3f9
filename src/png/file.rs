use super::*;
use crate::{DecodeError, EncodeError, PngError};
use alloc::vec::Vec;

/// A decoded PNG file.
///
/// Holds every chunk in file order, each with the offset of its data in the
/// source bytes, and (once the data pass has run) the reconstructed image.
///
/// Chunks never hold references to each other. A chunk that needs a sibling,
/// such as `sBIT` needing the header, looks it up through the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngFile {
  chunks: Vec<(PngChunk, usize)>,
  has_header: bool,
  scanlines: Option<Vec<Scanline>>,
}
impl PngFile {
  /// Decodes a full PNG datastream.
  ///
  /// This runs the structural pass (every chunk framed, CRC checked, and
  /// interpreted) and then the data pass (the `IDAT` inflated and unfiltered).
  /// A file without an `IDAT` decodes fine, it just has no image.
  pub fn decode(bytes: &[u8]) -> Result<Self, PngError> {
    if !is_png_signature_correct(bytes) {
      return Err(PngError::BadSignature);
    }
    let mut file = Self::default();
    let mut reader = ChunkReader::new(bytes);
    let mut i = 0_usize;
    while !reader.is_empty() {
      let (chunk, data_offset) = reader.read_chunk(&file)?;
      log::debug!("Chunk {i}: {chunk}");
      if let PngChunk::Unknown { ty, .. } = &chunk {
        log::warn!("Unknown ancillary chunk {ty} kept as raw bytes");
      }
      file.add_chunk(chunk, data_offset)?;
      i += 1;
    }
    file.decode_data(bytes)?;
    Ok(file)
  }

  /// Adds a chunk to the end of the file.
  ///
  /// `data_offset` is where the chunk's data is within the source bytes.
  ///
  /// ## Failure
  /// * `HeaderNotFirst` if the file is empty and this isn't an `IHDR`.
  /// * `DuplicateHeader` if this is an `IHDR` and the file already has one.
  pub fn add_chunk(&mut self, chunk: PngChunk, data_offset: usize) -> Result<(), DecodeError> {
    let is_header = chunk.kind() == ChunkKind::IHDR;
    if is_header && self.has_header {
      return Err(DecodeError::DuplicateHeader);
    }
    if !is_header && self.chunks.is_empty() {
      return Err(DecodeError::HeaderNotFirst);
    }
    self.has_header |= is_header;
    self.chunks.push((chunk, data_offset));
    Ok(())
  }

  /// The image header, if there is one.
  #[inline]
  #[must_use]
  pub fn header(&self) -> Option<&IHDR> {
    match self.find_chunk_of_kind(ChunkKind::IHDR) {
      Some(PngChunk::IHDR(ihdr)) => Some(ihdr),
      _ => None,
    }
  }

  /// The first chunk of the given kind.
  #[inline]
  #[must_use]
  pub fn find_chunk_of_kind(&self, kind: ChunkKind) -> Option<&PngChunk> {
    self.chunks.iter().map(|(chunk, _)| chunk).find(|chunk| chunk.kind() == kind)
  }

  /// All chunks of the given kind, each with its data offset.
  #[inline]
  pub fn chunks_of_kind_with_offset(
    &self, kind: ChunkKind,
  ) -> impl Iterator<Item = (&PngChunk, usize)> + '_ {
    self.chunks.iter().filter(move |(chunk, _)| chunk.kind() == kind).map(|(chunk, offset)| (chunk, *offset))
  }

  /// All chunks in file order.
  #[inline]
  pub fn chunks(&self) -> impl Iterator<Item = &PngChunk> + '_ {
    self.chunks.iter().map(|(chunk, _)| chunk)
  }

  /// The data pass: inflates the `IDAT` and reconstructs the scanlines.
  ///
  /// `bytes` must be the same bytes the chunks were read from, since the
  /// `IDAT` data is found again by its recorded offset.
  ///
  /// ## Failure
  /// * `MultipleIdat` if there's more than one `IDAT`.
  /// * Any error from inflating the data or unfiltering it.
  pub fn decode_data(&mut self, bytes: &[u8]) -> Result<(), PngError> {
    let header = self.header().copied();
    let mut idats = self.chunks.iter_mut().filter(|(chunk, _)| chunk.kind() == ChunkKind::IDAT);
    let (idat, data_offset) = match (idats.next(), idats.next()) {
      (None, _) => return Ok(()),
      (Some(_), Some(_)) => return Err(DecodeError::MultipleIdat.into()),
      (Some((PngChunk::IDAT(idat), data_offset)), None) => (idat, *data_offset),
      (Some(_), None) => return Ok(()),
    };
    let payload = data_offset
      .checked_add(idat.length() as usize)
      .and_then(|end| bytes.get(data_offset..end))
      .ok_or(DecodeError::UnexpectedEndOfInput)?;
    let header = header.ok_or(DecodeError::MissingHeader)?;
    idat.decode(payload, header.filtered_image_len().unwrap_or(usize::MAX))?;
    let scanlines = reconstruct_scanlines(&header, idat.data().unwrap_or_default())?;
    self.scanlines = Some(scanlines);
    Ok(())
  }

  /// Encodes the file as PNG bytes.
  ///
  /// The output is the signature, the `IHDR`, then every other chunk in its
  /// original order. The image data is compressed again at `level`.
  ///
  /// ## Failure
  /// * `NoChunks` or `NoHeader` if there's nothing to write.
  /// * Any chunk that can't be encoded.
  pub fn encode(&self, level: CompressionLevel) -> Result<Vec<u8>, PngError> {
    if self.chunks.is_empty() {
      return Err(EncodeError::NoChunks.into());
    }
    let header = match self.find_chunk_of_kind(ChunkKind::IHDR) {
      Some(header) if self.has_header => header,
      _ => return Err(EncodeError::NoHeader.into()),
    };
    let mut out = PNG_SIGNATURE.to_vec();
    write_chunk(&mut out, header, self, level)?;
    for chunk in self.chunks().filter(|chunk| chunk.kind() != ChunkKind::IHDR) {
      write_chunk(&mut out, chunk, self, level)?;
    }
    Ok(out)
  }

  /// The reconstructed rows of the image, once the data pass has run.
  #[inline]
  #[must_use]
  pub fn scanlines(&self) -> Option<&[Scanline]> {
    self.scanlines.as_deref()
  }

  /// All pixels of the image, row by row from the top.
  ///
  /// Empty if there's no image.
  #[inline]
  pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
    self.scanlines().unwrap_or_default().iter().flat_map(|scanline| scanline.pixels().iter().copied())
  }

  /// Counts which filter each scanline used.
  #[inline]
  #[must_use]
  pub fn filter_histogram(&self) -> FilterHistogram {
    FilterHistogram::from_scanlines(self.scanlines().unwrap_or_default())
  }
}
