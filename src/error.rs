/// Caller contract violations. Nothing here is transient: the same call
/// fails the same way every time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// A custom lookup table didn't have exactly 256 entries.
  #[error("Invalid lookup table: expected 256 entries, got {len}")]
  InvalidTable { len: usize },

  /// `offset + length` runs past the end of the source buffer.
  #[error("Invalid buffer boundaries: offset {offset} + length {length} exceeds {len} bytes")]
  InvalidRange { offset: usize, length: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_range_errors() {
    let error = Error::InvalidRange { offset: 4, length: 10, len: 8 };
    assert_eq!(error.to_string(), "Invalid buffer boundaries: offset 4 + length 10 exceeds 8 bytes");
  }

  #[test]
  fn formats_table_errors() {
    let error = Error::InvalidTable { len: 255 };
    assert_eq!(error.to_string(), "Invalid lookup table: expected 256 entries, got 255");
  }
}
