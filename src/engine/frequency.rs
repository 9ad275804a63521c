use crate::protocol::CodecError;
use crate::utils::limits::{ALPHABET_SIZE, MAX_INPUT_SIZE};

/// Occurrence count of every byte value, indexed by the byte itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    pub fn from_bytes(input: &[u8]) -> Result<Self, CodecError> {
        if input.len() > MAX_INPUT_SIZE {
            return Err(CodecError::InputTooLarge(input.len()));
        }

        let mut counts = [0u32; ALPHABET_SIZE];
        for &byte in input {
            counts[byte as usize] += 1;
        }

        Ok(Self { counts })
    }

    /// Wrap counts read back from an artifact header
    pub fn from_counts(counts: [u32; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }

    pub fn count(&self, byte: u8) -> u32 {
        self.counts[byte as usize]
    }

    pub fn counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }

    /// Sum of all counts, i.e. the length of the analyzed input
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of byte values that occur at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    /// Present byte values with their counts, in ascending byte order
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}
