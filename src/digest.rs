//! One-shot CRC-32 over a byte slice.
//!
//! The seed is the digest of everything before `bytes` (0 for a fresh
//! start). It's complemented on the way in and the result is complemented on
//! the way out, so a previous call's result can be passed straight back in:
//!
//! ```
//! use crc32_table::digest_of;
//!
//! let head = digest_of(b"12345", 0);
//! assert_eq!(digest_of(b"6789", head), digest_of(b"123456789", 0));
//! ```

use crate::error::{Error, Result};
use crate::table::LookupTable;

#[inline(always)]
fn step(table: &[u32; 256], state: u32, byte: u8) -> u32 {
  (state >> 8) ^ table[((byte as u32 ^ state) & 0xff) as usize]
}

fn digest_raw(table: &[u32; 256], mut bytes: &[u8], seed: u32) -> u32 {
  if bytes.is_empty() {
    return seed;
  }

  let mut state = !seed;

  let mut blocks = bytes.chunks_exact(8);
  for block in &mut blocks {
    state = step(table, state, block[0]);
    state = step(table, state, block[1]);
    state = step(table, state, block[2]);
    state = step(table, state, block[3]);
    state = step(table, state, block[4]);
    state = step(table, state, block[5]);
    state = step(table, state, block[6]);
    state = step(table, state, block[7]);
  }
  bytes = blocks.remainder();

  if bytes.len() >= 4 {
    state = step(table, state, bytes[0]);
    state = step(table, state, bytes[1]);
    state = step(table, state, bytes[2]);
    state = step(table, state, bytes[3]);
    bytes = &bytes[4..];
  }
  if bytes.len() >= 2 {
    state = step(table, state, bytes[0]);
    state = step(table, state, bytes[1]);
    bytes = &bytes[2..];
  }
  if let Some(&byte) = bytes.first() {
    state = step(table, state, byte);
  }

  !state
}

/// Digest `bytes` with the standard table, continuing from `seed`.
pub fn digest_of(bytes: &[u8], seed: u32) -> u32 {
  digest_raw(LookupTable::standard().entries(), bytes, seed)
}

pub fn digest_of_with(table: &LookupTable, bytes: &[u8], seed: u32) -> u32 {
  digest_raw(table.entries(), bytes, seed)
}

/// Digest `length` bytes of `bytes` starting at `offset`.
pub fn digest_of_range(bytes: &[u8], offset: usize, length: usize, seed: u32) -> Result<u32> {
  digest_of_range_with(LookupTable::standard(), bytes, offset, length, seed)
}

pub fn digest_of_range_with(
  table: &LookupTable,
  bytes: &[u8],
  offset: usize,
  length: usize,
  seed: u32,
) -> Result<u32> {
  let range = checked_range(bytes, offset, length)?;
  Ok(digest_raw(table.entries(), range, seed))
}

pub(crate) fn checked_range(bytes: &[u8], offset: usize, length: usize) -> Result<&[u8]> {
  offset
    .checked_add(length)
    .and_then(|end| bytes.get(offset..end))
    .ok_or(Error::InvalidRange { offset, length, len: bytes.len() })
}
