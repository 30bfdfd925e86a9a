use crate::algorithm::{Checksum, HashAlgorithm};
use crate::digest::{checked_range, digest_of_with};
use crate::error::Result;
use crate::table::LookupTable;
use std::hash::Hasher;

/// Running CRC-32. The digest after any sequence of `update` calls equals
/// the one-shot digest of all those bytes concatenated.
///
/// `update` needs `&mut self`: to share one accumulator between threads,
/// put it behind a `Mutex`. The table itself can be shared freely.
#[derive(Clone, Debug)]
pub struct Crc32<'t> {
  table: &'t LookupTable,
  seed: u32,
}

impl Crc32<'static> {
  pub fn new() -> Crc32<'static> {
    Crc32::with_table(LookupTable::standard())
  }
}

impl<'t> Crc32<'t> {
  pub fn with_table(table: &'t LookupTable) -> Crc32<'t> {
    Crc32::resume(table, 0)
  }

  /// Pick up where an earlier digest left off.
  pub fn resume(table: &'t LookupTable, seed: u32) -> Crc32<'t> {
    Crc32 { table, seed }
  }

  pub fn table(&self) -> &'t LookupTable {
    self.table
  }

  pub fn reset(&mut self) {
    self.seed = 0;
  }

  pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
    tracing::trace!(len = bytes.len(), seed = self.seed, "crc32 update");
    self.seed = digest_of_with(self.table, bytes, self.seed);
    self
  }

  /// Feed `length` bytes of `bytes` starting at `offset`. On a bad range the
  /// digest is left untouched.
  pub fn update_range(&mut self, bytes: &[u8], offset: usize, length: usize) -> Result<&mut Self> {
    let range = checked_range(bytes, offset, length)?;
    Ok(self.update(range))
  }

  pub fn digest(&self) -> u32 {
    self.seed
  }

  /// Digest in little-endian byte order.
  pub fn digest_bytes(&self) -> [u8; 4] {
    self.seed.to_le_bytes()
  }

  pub fn as_hash_algorithm(self) -> HashAlgorithm<Crc32<'t>> {
    HashAlgorithm::new(self)
  }
}

impl Default for Crc32<'static> {
  fn default() -> Crc32<'static> {
    Crc32::new()
  }
}

impl<'t> Checksum for Crc32<'t> {
  const BITS: usize = 32;

  fn reset(&mut self) {
    Crc32::reset(self)
  }

  fn update(&mut self, bytes: &[u8]) {
    Crc32::update(self, bytes);
  }

  fn digest_bytes(&self) -> Vec<u8> {
    Crc32::digest_bytes(self).to_vec()
  }
}

impl<'t> Hasher for Crc32<'t> {
  fn write(&mut self, bytes: &[u8]) {
    self.update(bytes);
  }

  fn finish(&self) -> u64 {
    self.digest() as u64
  }
}
