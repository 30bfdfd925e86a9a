//! Table-driven reflected CRC-32 (polynomial `0xEDB88320`), the variant used
//! by zlib, gzip and PNG.
//!
//! ```
//! use crc32_table::Crc32;
//!
//! let mut crc = Crc32::new();
//! crc.update(b"1234").update(b"56789");
//! assert_eq!(crc.digest(), 0xcbf43926);
//! ```

pub mod algorithm;
pub mod crc32;
pub mod digest;
pub mod error;
pub mod table;

pub use crate::algorithm::{Checksum, HashAlgorithm};
pub use crate::crc32::Crc32;
pub use crate::digest::{digest_of, digest_of_range, digest_of_range_with, digest_of_with};
pub use crate::error::{Error, Result};
pub use crate::table::{build, LookupTable, POLYNOMIAL};
