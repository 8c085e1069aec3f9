#![forbid(unsafe_code)]

//! Just has shorthands for the byte pulling that the chunk parsers do.

use crate::DecodeError;

#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(
  bytes: &[u8],
) -> Result<([u8; N], &[u8]), DecodeError> {
  match bytes.split_first_chunk::<N>() {
    Some((head, tail)) => Ok((*head, tail)),
    None => Err(DecodeError::UnexpectedEndOfInput),
  }
}

#[inline]
pub(crate) fn try_pull_u32_be(bytes: &[u8]) -> Result<(u32, &[u8]), DecodeError> {
  let (a, rest) = try_pull_byte_array::<4>(bytes)?;
  Ok((u32::from_be_bytes(a), rest))
}

#[inline]
pub(crate) fn push_u32_be(out: &mut alloc::vec::Vec<u8>, u: u32) {
  out.extend_from_slice(&u.to_be_bytes());
}

#[test]
fn test_try_pull_u32_be() {
  let (u, rest) = try_pull_u32_be(&[0, 0, 1, 2, 9]).unwrap();
  assert_eq!(u, 258);
  assert_eq!(rest, &[9]);
  assert_eq!(try_pull_u32_be(&[1, 2, 3]), Err(DecodeError::UnexpectedEndOfInput));
}
