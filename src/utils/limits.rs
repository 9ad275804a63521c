/// Number of distinct byte values
pub const ALPHABET_SIZE: usize = 256;

/// Largest input whose byte counts all fit the 4-byte header fields
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize;

/// Upper bound on concurrently processed files
pub const MAX_PARALLEL_JOBS: usize = 64;
