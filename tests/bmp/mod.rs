use pngkit::{
  bmp::{bmp_row_stride, bmp_write, BmpError},
  Pixel,
};

fn u16_at(bytes: &[u8], i: usize) -> u16 {
  u16::from_le_bytes(bytes[i..i + 2].try_into().unwrap())
}
fn u32_at(bytes: &[u8], i: usize) -> u32 {
  u32::from_le_bytes(bytes[i..i + 4].try_into().unwrap())
}
fn i32_at(bytes: &[u8], i: usize) -> i32 {
  i32::from_le_bytes(bytes[i..i + 4].try_into().unwrap())
}

#[test]
fn test_bmp_headers() {
  let pixels = [Pixel { r: 1, g: 2, b: 3, a: 255 }; 6];
  let bmp = bmp_write(3, -2, &pixels).unwrap();
  // rows of 9 bytes pad to 12
  assert_eq!(bmp.len(), 54 + 2 * 12);
  assert_eq!(&bmp[0..2], b"BM");
  assert_eq!(u32_at(&bmp, 2), bmp.len() as u32);
  assert_eq!(u32_at(&bmp, 6), 0);
  assert_eq!(u32_at(&bmp, 10), 54);
  assert_eq!(u32_at(&bmp, 14), 40);
  assert_eq!(i32_at(&bmp, 18), 3);
  assert_eq!(i32_at(&bmp, 22), -2);
  assert_eq!(u16_at(&bmp, 26), 1);
  assert_eq!(u16_at(&bmp, 28), 24);
  assert!(bmp[30..54].iter().all(|&b| b == 0));
}

#[test]
fn test_bmp_rows_are_bgr_and_padded() {
  let pixels = [
    Pixel { r: 10, g: 20, b: 30, a: 0 },
    Pixel { r: 40, g: 50, b: 60, a: 255 },
  ];
  let bmp = bmp_write(1, 2, &pixels).unwrap();
  assert_eq!(bmp_row_stride(1), 4);
  assert_eq!(&bmp[54..], &[30, 20, 10, 0, 60, 50, 40, 0]);
}

#[test]
fn test_bmp_pixel_count_must_match() {
  let pixels = [Pixel::default(); 5];
  assert_eq!(bmp_write(2, 3, &pixels), Err(BmpError::PixelCountMismatch { expected: 6, actual: 5 }));
  assert_eq!(bmp_write(2, -3, &pixels), Err(BmpError::PixelCountMismatch { expected: 6, actual: 5 }));
  assert_eq!(bmp_write(0, 0, &[]).map(|bmp| bmp.len()), Ok(54));
}
