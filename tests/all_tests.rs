#![allow(bad_style)]

mod png;

#[cfg(feature = "bmp")]
mod bmp;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}
