use crc32fast::Hasher;
use serde::Serialize;

/// Compute CRC32 checksum for a byte slice
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Checksums of an input and of the bytes recovered from its artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecksumPair {
    pub original: u32,
    pub restored: u32,
}

impl ChecksumPair {
    pub fn compute(original: &[u8], restored: &[u8]) -> Self {
        Self {
            original: crc32(original),
            restored: crc32(restored),
        }
    }

    pub fn matches(&self) -> bool {
        self.original == self.restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn pair_detects_difference() {
        assert!(ChecksumPair::compute(b"abc", b"abc").matches());
        assert!(!ChecksumPair::compute(b"abc", b"abd").matches());
    }
}
