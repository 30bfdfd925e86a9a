//! Generic incremental-hash front end.
//!
//! [`HashAlgorithm`] knows nothing about CRCs: it drives any [`Checksum`]
//! through the usual initialize / transform-block / transform-final-block
//! cycle, one byte in and one byte out per block.

use std::hash::Hasher;

/// What an incremental checksum has to provide to sit behind
/// [`HashAlgorithm`].
pub trait Checksum {
  /// Width of the digest in bits.
  const BITS: usize;

  fn reset(&mut self);

  fn update(&mut self, bytes: &[u8]);

  fn digest_bytes(&self) -> Vec<u8>;
}

#[derive(Clone, Debug)]
pub struct HashAlgorithm<C> {
  inner: C,
  hash: Option<Vec<u8>>,
}

impl<C: Checksum> HashAlgorithm<C> {
  pub fn new(inner: C) -> HashAlgorithm<C> {
    HashAlgorithm { inner, hash: None }
  }

  /// Digest size in bits.
  pub fn hash_size(&self) -> usize {
    C::BITS
  }

  pub fn input_block_size(&self) -> usize {
    1
  }

  pub fn output_block_size(&self) -> usize {
    1
  }

  pub fn can_reuse_transform(&self) -> bool {
    true
  }

  pub fn can_transform_multiple_blocks(&self) -> bool {
    true
  }

  pub fn initialize(&mut self) {
    self.inner.reset();
  }

  pub fn transform_block(&mut self, bytes: &[u8]) {
    self.inner.update(bytes);
  }

  /// Feed the last block and return the digest. The checksum is reset
  /// afterwards so the adapter can be reused for a new message.
  pub fn transform_final_block(&mut self, bytes: &[u8]) -> Vec<u8> {
    self.inner.update(bytes);
    let hash = self.inner.digest_bytes();
    self.hash = Some(hash.clone());
    self.inner.reset();
    hash
  }

  pub fn compute_hash(&mut self, bytes: &[u8]) -> Vec<u8> {
    self.initialize();
    self.transform_final_block(bytes)
  }

  /// Result of the last finished message, if any.
  pub fn hash(&self) -> Option<&[u8]> {
    self.hash.as_deref()
  }

  pub fn into_inner(self) -> C {
    self.inner
  }
}

impl<C: Checksum> Hasher for HashAlgorithm<C> {
  fn write(&mut self, bytes: &[u8]) {
    self.transform_block(bytes);
  }

  // widens the first 8 digest bytes, little-endian.
  fn finish(&self) -> u64 {
    let mut buffer = [0u8; 8];
    let digest = self.inner.digest_bytes();
    let n = digest.len().min(8);
    buffer[..n].copy_from_slice(&digest[..n]);
    u64::from_le_bytes(buffer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crc32::Crc32;
  use crate::digest::digest_of;

  #[test]
  fn exposes_metadata() {
    let crc = Crc32::new().as_hash_algorithm();
    assert!(crc.can_reuse_transform());
    assert!(crc.can_transform_multiple_blocks());
    assert_eq!(crc.input_block_size(), 1);
    assert_eq!(crc.output_block_size(), 1);
    assert_eq!(crc.hash_size(), 32);
  }

  #[test]
  fn same_result_as_raw_digest() {
    let mut crc = Crc32::new().as_hash_algorithm();
    for text in &["123456789", "Quick brown fox jumped over the lazy dog"] {
      let expected = digest_of(text.as_bytes(), 0);
      assert_eq!(crc.compute_hash(text.as_bytes()), expected.to_le_bytes().to_vec());
      assert_eq!(crc.hash(), Some(&expected.to_le_bytes()[..]));
    }
  }

  #[test]
  fn multiple_blocks_then_reuse() {
    let mut crc = Crc32::new().as_hash_algorithm();
    crc.transform_block(b"1234");
    crc.transform_block(b"567");
    assert_eq!(crc.transform_final_block(b"89"), 0xcbf43926u32.to_le_bytes().to_vec());
    assert_eq!(crc.transform_final_block(b"a"), 0xe8b7be43u32.to_le_bytes().to_vec());
  }

  #[test]
  fn into_inner_keeps_running_state() {
    let mut crc = Crc32::new().as_hash_algorithm();
    crc.transform_block(b"12345");
    let mut inner = crc.into_inner();
    inner.update(b"6789");
    assert_eq!(inner.digest(), 0xcbf43926);
  }

  #[test]
  fn hasher_widens_digest() {
    let mut crc = Crc32::new().as_hash_algorithm();
    crc.write(b"123456789");
    assert_eq!(crc.finish(), 0xcbf43926);
  }
}
