use tracing::error;

use crate::engine::frequency::FrequencyTable;
use crate::protocol::constants::{COUNT_FIELD_SIZE, HEADER_SIZE, LENGTH_FIELD_SIZE};
use crate::protocol::error::MalformedKind;
use crate::utils::limits::ALPHABET_SIZE;

/// Fixed-size artifact header (1032 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub original_len: u64,
    pub frequencies: FrequencyTable,
}

impl ArtifactHeader {
    pub const SIZE: usize = HEADER_SIZE;

    pub fn new(frequencies: FrequencyTable) -> Self {
        Self {
            original_len: frequencies.total(),
            frequencies,
        }
    }

    /// Parse and validate the header at the start of `buf`
    pub fn decode(buf: &[u8]) -> Result<Self, MalformedKind> {
        if buf.len() < Self::SIZE {
            error!("Artifact header too short: {} bytes", buf.len());
            return Err(MalformedKind::TruncatedHeader(buf.len()));
        }

        let mut len_bytes = [0u8; LENGTH_FIELD_SIZE];
        len_bytes.copy_from_slice(&buf[..LENGTH_FIELD_SIZE]);
        let declared = i64::from_le_bytes(len_bytes);
        if declared < 0 {
            return Err(MalformedKind::NegativeLength(declared));
        }

        let mut counts = [0u32; ALPHABET_SIZE];
        for (i, chunk) in buf[LENGTH_FIELD_SIZE..Self::SIZE]
            .chunks_exact(COUNT_FIELD_SIZE)
            .enumerate()
        {
            counts[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let frequencies = FrequencyTable::from_counts(counts);

        let counted = frequencies.total();
        if counted != declared as u64 {
            error!("Header declares {} bytes, counts sum to {}", declared, counted);
            return Err(MalformedKind::CountMismatch {
                declared: declared as u64,
                counted,
            });
        }

        Ok(Self {
            original_len: declared as u64,
            frequencies,
        })
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.original_len as i64).to_le_bytes());
        for &count in self.frequencies.counts() {
            out.extend_from_slice(&count.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(len: i64, counts: &[(u8, u32)]) -> Vec<u8> {
        let mut buf = len.to_le_bytes().to_vec();
        let mut table = [0u32; ALPHABET_SIZE];
        for &(b, c) in counts {
            table[b as usize] = c;
        }
        for c in table {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        buf
    }

    #[test]
    fn layout_is_length_then_counts() {
        let freq = FrequencyTable::from_bytes(b"aab").unwrap();
        let mut out = Vec::new();
        ArtifactHeader::new(freq).encode(&mut out);
        assert_eq!(out.len(), HEADER_SIZE);
        assert_eq!(&out[..8], &3i64.to_le_bytes());
        let a = LENGTH_FIELD_SIZE + b'a' as usize * COUNT_FIELD_SIZE;
        assert_eq!(&out[a..a + 4], &2u32.to_le_bytes());
        let b = LENGTH_FIELD_SIZE + b'b' as usize * COUNT_FIELD_SIZE;
        assert_eq!(&out[b..b + 4], &1u32.to_le_bytes());
        assert_eq!(out, header_bytes(3, &[(b'a', 2), (b'b', 1)]));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let freq = FrequencyTable::from_bytes(b"header accounting").unwrap();
        let header = ArtifactHeader::new(freq);
        let mut out = Vec::new();
        header.encode(&mut out);
        out.extend_from_slice(&[0xAB, 0xCD]);
        assert_eq!(ArtifactHeader::decode(&out).unwrap(), header);
    }

    #[test]
    fn rejects_short_buffer() {
        let buf = header_bytes(0, &[]);
        assert_eq!(
            ArtifactHeader::decode(&buf[..HEADER_SIZE - 1]),
            Err(MalformedKind::TruncatedHeader(HEADER_SIZE - 1))
        );
    }

    #[test]
    fn rejects_negative_length() {
        let buf = header_bytes(-5, &[]);
        assert_eq!(ArtifactHeader::decode(&buf), Err(MalformedKind::NegativeLength(-5)));
    }

    #[test]
    fn rejects_zero_counts_with_nonzero_length() {
        let buf = header_bytes(10, &[]);
        assert_eq!(
            ArtifactHeader::decode(&buf),
            Err(MalformedKind::CountMismatch { declared: 10, counted: 0 })
        );
    }

    #[test]
    fn rejects_counts_that_disagree_with_length() {
        let buf = header_bytes(4, &[(b'x', 2), (b'y', 1)]);
        assert!(matches!(
            ArtifactHeader::decode(&buf),
            Err(MalformedKind::CountMismatch { declared: 4, counted: 3 })
        ));
    }
}
