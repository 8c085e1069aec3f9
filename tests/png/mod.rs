use pngkit::{png::*, DecodeError, Pixel, PngError, ZlibHeaderError};
use walkdir::WalkDir;

fn chunk_bytes(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(ty);
  v.extend_from_slice(data);
  let mut crc = Crc32::new();
  crc.update(ty);
  crc.update(data);
  v.extend_from_slice(&crc.finish().to_be_bytes());
  v
}

fn png_bytes(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  for (ty, data) in chunks {
    v.extend_from_slice(&chunk_bytes(ty, data));
  }
  v
}

fn ihdr_data(width: u32, height: u32, color_type: u8) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&width.to_be_bytes());
  v.extend_from_slice(&height.to_be_bytes());
  v.extend_from_slice(&[8, color_type, 0, 0, 0]);
  v
}

fn zlib(filtered: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(filtered, 6)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
  let p = i16::from(a) + i16::from(b) - i16::from(c);
  let (pa, pb, pc) = ((p - i16::from(a)).abs(), (p - i16::from(b)).abs(), (p - i16::from(c)).abs());
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Applies the filters the way an encoder would, from the original bytes.
fn filter_rows(rows: &[Vec<u8>], channels: usize, filters: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  for (y, row) in rows.iter().enumerate() {
    let filter = filters[y];
    out.push(filter);
    for (i, &x) in row.iter().enumerate() {
      let a = if i >= channels { row[i - channels] } else { 0 };
      let b = if y > 0 { rows[y - 1][i] } else { 0 };
      let c = if y > 0 && i >= channels { rows[y - 1][i - channels] } else { 0 };
      let predictor = match filter {
        0 => 0,
        1 => a,
        2 => b,
        3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
        4 => paeth(a, b, c),
        _ => unreachable!(),
      };
      out.push(x.wrapping_sub(predictor));
    }
  }
  out
}

#[test]
fn test_PngFile_decode_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if entry.file_type().is_dir() {
      continue;
    }
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = PngFile::decode(&v);
  }
  // even totally random data should never panic the decoder!
  for _ in 0..10 {
    let mut v = super::rand_bytes(1024);
    let _ = PngFile::decode(&v);
    v[..8].copy_from_slice(&PNG_SIGNATURE);
    let _ = PngFile::decode(&v);
  }
}

#[test]
fn test_2x2_truecolor_end_to_end() {
  let bytes = png_bytes(&[
    (b"IHDR", ihdr_data(2, 2, 2)),
    (b"IDAT", zlib(&[0, 255, 0, 0, 0, 255, 0, 0, 0, 0, 255, 255, 255, 255])),
    (b"IEND", vec![]),
  ]);
  let file = PngFile::decode(&bytes).unwrap();
  let header = file.header().unwrap();
  assert_eq!((header.width, header.height), (2, 2));
  let rows: Vec<Vec<Pixel>> =
    file.scanlines().unwrap().iter().map(|s| s.pixels().to_vec()).collect();
  assert_eq!(
    rows,
    vec![
      vec![Pixel { r: 255, g: 0, b: 0, a: 255 }, Pixel { r: 0, g: 255, b: 0, a: 255 }],
      vec![Pixel { r: 0, g: 0, b: 255, a: 255 }, Pixel { r: 255, g: 255, b: 255, a: 255 }],
    ]
  );
  assert_eq!(file.filter_histogram().to_string(), "None: 2");
}

#[test]
fn test_every_filter_type_reconstructs() {
  let (width, height, channels) = (7_usize, 10_usize, 4_usize);
  let noise = super::rand_bytes(width * height * channels);
  let rows: Vec<Vec<u8>> = noise.chunks(width * channels).map(<[u8]>::to_vec).collect();
  let filters = [0, 1, 2, 3, 4, 4, 3, 2, 1, 0];
  let bytes = png_bytes(&[
    (b"IHDR", ihdr_data(width as u32, height as u32, 6)),
    (b"IDAT", zlib(&filter_rows(&rows, channels, &filters))),
    (b"IEND", vec![]),
  ]);
  let file = PngFile::decode(&bytes).unwrap();
  let decoded: Vec<u8> = file.pixels().flat_map(<[u8; 4]>::from).collect();
  assert_eq!(decoded, noise);
  let histogram = file.filter_histogram();
  assert_eq!(histogram.to_string(), "None: 2, Sub: 2, Up: 2, Average: 2, Paeth: 2");
  for filter in FilterType::ALL {
    assert_eq!(histogram.count(filter), 2);
  }
}

#[test]
fn test_decode_encode_decode() {
  let rows: Vec<Vec<u8>> = super::rand_bytes(5 * 4 * 3).chunks(5 * 3).map(<[u8]>::to_vec).collect();
  let bytes = png_bytes(&[
    (b"IHDR", ihdr_data(5, 4, 2)),
    (b"sBIT", vec![8, 8, 8]),
    (b"IDAT", zlib(&filter_rows(&rows, 3, &[4, 1, 2, 3]))),
    (b"IEND", vec![]),
  ]);
  let first = PngFile::decode(&bytes).unwrap();
  let encoded = first.encode(CompressionLevel::SmallestSize).unwrap();
  assert!(is_png_signature_correct(&encoded));
  let second = PngFile::decode(&encoded).unwrap();
  assert_eq!(first.header(), second.header());
  assert_eq!(first.scanlines(), second.scanlines());
  assert_eq!(
    second.chunks().map(PngChunk::kind).collect::<Vec<_>>(),
    [ChunkKind::IHDR, ChunkKind::sBIT, ChunkKind::IDAT, ChunkKind::IEND]
  );
}

#[test]
fn test_crc_catches_every_bit_flip() {
  let chunks = [
    (b"IHDR", ihdr_data(1, 1, 2)),
    (b"sBIT", vec![8, 8, 8]),
    (b"IDAT", zlib(&[0, 10, 20, 30])),
    (b"IEND", vec![]),
  ];
  let bytes = png_bytes(&chunks);
  assert!(PngFile::decode(&bytes).is_ok());
  let mut start = PNG_SIGNATURE.len();
  for (ty, data) in &chunks {
    // skip the length, then the type, data, and CRC
    let ty_start = start + 4;
    let data_start = ty_start + 4;
    let end = data_start + data.len() + 4;
    for byte in ty_start..end {
      for bit in 0..8 {
        let mut flipped = bytes.clone();
        flipped[byte] ^= 1 << bit;
        let err = PngFile::decode(&flipped).unwrap_err();
        let what = String::from_utf8_lossy(&ty[..]);
        if byte >= data_start {
          assert!(
            matches!(err, PngError::Decode(DecodeError::CrcMismatch { .. })),
            "{what} byte {byte} bit {bit}: {err:?}"
          );
        } else {
          assert!(matches!(err, PngError::Decode(_)), "{what} byte {byte} bit {bit}: {err:?}");
        }
      }
    }
    start = end;
  }
  assert_eq!(start, bytes.len());
}

#[test]
fn test_unknown_ancillary_chunks_pass_through() {
  let text = b"Comment\0made by hand".to_vec();
  let private = vec![1, 2, 3, 4, 5];
  let bytes = png_bytes(&[
    (b"IHDR", ihdr_data(1, 1, 2)),
    (b"tEXt", text.clone()),
    (b"prIv", private.clone()),
    (b"IDAT", zlib(&[0, 10, 20, 30])),
    (b"IEND", vec![]),
  ]);
  let file = PngFile::decode(&bytes).unwrap();
  let encoded = file.encode(CompressionLevel::Optimal).unwrap();
  for (ty, data) in [(b"tEXt", &text), (b"prIv", &private)] {
    let framed = chunk_bytes(ty, data);
    assert!(encoded.windows(framed.len()).any(|w| w == framed.as_slice()));
  }
  let again = PngFile::decode(&encoded).unwrap();
  let unknown: Vec<_> = again
    .chunks()
    .filter_map(|chunk| match chunk {
      PngChunk::Unknown { ty, data } => Some((ty.to_bytes(), data.clone())),
      _ => None,
    })
    .collect();
  assert_eq!(unknown, vec![(*b"tEXt", text), (*b"prIv", private)]);
}

#[test]
fn test_unknown_critical_chunk_fails() {
  let bytes = png_bytes(&[(b"IHDR", ihdr_data(1, 1, 2)), (b"PLTE", vec![0, 0, 0]), (b"IEND", vec![])]);
  assert_eq!(
    PngFile::decode(&bytes),
    Err(PngError::Decode(DecodeError::UnknownCriticalChunk(ChunkTy::from(*b"PLTE"))))
  );
}

#[test]
fn test_image_data_failures() {
  let mut idat = zlib(&[0, 10, 20, 30]);
  idat[0] = 0x79;
  let bytes = png_bytes(&[(b"IHDR", ihdr_data(1, 1, 2)), (b"IDAT", idat), (b"IEND", vec![])]);
  assert_eq!(
    PngFile::decode(&bytes),
    Err(PngError::Decode(DecodeError::ZlibHeader(ZlibHeaderError::CompressionMethod(9))))
  );

  let short = png_bytes(&[(b"IHDR", ihdr_data(2, 1, 2)), (b"IDAT", zlib(&[0, 1, 2, 3])), (b"IEND", vec![])]);
  assert_eq!(
    PngFile::decode(&short),
    Err(PngError::Decode(DecodeError::NotEnoughImageData { needed: 7, available: 4 }))
  );

  let grey = png_bytes(&[(b"IHDR", ihdr_data(1, 1, 0)), (b"IDAT", zlib(&[0, 1])), (b"IEND", vec![])]);
  assert!(PngFile::decode(&grey).unwrap_err().is_unsupported());
}
