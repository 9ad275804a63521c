//! Layout constants for the `.huff` artifact

use crate::utils::limits::ALPHABET_SIZE;

/// Width of the original-length field (LP64 `long`, little-endian)
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Width of each frequency count (u32, little-endian)
pub const COUNT_FIELD_SIZE: usize = 4;

/// Full header: original length followed by one count per byte value
pub const HEADER_SIZE: usize = LENGTH_FIELD_SIZE + ALPHABET_SIZE * COUNT_FIELD_SIZE;

/// Conventional suffixes appended to the source name by the calling layer
pub const COMPRESSED_SUFFIX: &str = ".huff";
pub const DECOMPRESSED_SUFFIX: &str = ".unhuff";
