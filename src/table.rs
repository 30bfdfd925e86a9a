use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::ops::Index;

/// Reflected CRC-32 polynomial used by zlib, gzip, PNG and ethernet.
pub const POLYNOMIAL: u32 = 0xedb88320;

static DEFAULT: Lazy<LookupTable> = Lazy::new(|| LookupTable::from_polynomial(POLYNOMIAL));

/// Precompute the CRC contribution of every possible byte for a reflected
/// (right-shifting) polynomial.
pub const fn build(polynomial: u32) -> [u32; 256] {
  let mut data = [0u32; 256];
  let mut i = 0;
  while i < 256 {
    let mut remainder = i as u32;
    let mut j = 0;
    while j < 8 {
      remainder = if remainder & 1 != 0 { (remainder >> 1) ^ polynomial } else { remainder >> 1 };
      j += 1;
    }
    data[i] = remainder;
    i += 1;
  }
  data
}

/// 256 precomputed partial remainders, indexed by byte. Never mutated once
/// built, so a single table can back any number of digests on any number of
/// threads.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTable {
  data: [u32; 256],
  polynomial: Option<u32>,
}

impl LookupTable {
  pub fn new(polynomial: u32) -> LookupTable {
    if polynomial == POLYNOMIAL {
      return DEFAULT.clone();
    }
    tracing::debug!(polynomial, "building crc32 lookup table");
    LookupTable::from_polynomial(polynomial)
  }

  /// The shared table for the standard polynomial, built on first use.
  pub fn standard() -> &'static LookupTable {
    &DEFAULT
  }

  fn from_polynomial(polynomial: u32) -> LookupTable {
    LookupTable { data: build(polynomial), polynomial: Some(polynomial) }
  }

  /// `None` when the table was imported from raw entries.
  pub fn polynomial(&self) -> Option<u32> {
    self.polynomial
  }

  pub fn entries(&self) -> &[u32; 256] {
    &self.data
  }
}

impl Default for LookupTable {
  fn default() -> LookupTable {
    DEFAULT.clone()
  }
}

impl Index<u8> for LookupTable {
  type Output = u32;

  fn index(&self, byte: u8) -> &u32 {
    &self.data[byte as usize]
  }
}

impl TryFrom<&[u32]> for LookupTable {
  type Error = Error;

  fn try_from(entries: &[u32]) -> Result<LookupTable> {
    let data = <[u32; 256]>::try_from(entries).map_err(|_| {
      tracing::debug!(len = entries.len(), "rejected custom lookup table");
      Error::InvalidTable { len: entries.len() }
    })?;
    Ok(LookupTable { data, polynomial: None })
  }
}

impl TryFrom<Vec<u32>> for LookupTable {
  type Error = Error;

  fn try_from(entries: Vec<u32>) -> Result<LookupTable> {
    LookupTable::try_from(entries.as_slice())
  }
}

// 256 hex words is noise in a debug dump.
impl fmt::Debug for LookupTable {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.polynomial {
      Some(polynomial) => write!(f, "LookupTable({:#010x})", polynomial),
      None => write!(f, "LookupTable(custom)"),
    }
  }
}
