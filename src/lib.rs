//! # huffpack
//!
//! Whole-file static Huffman compression.
//!
//! ```
//! let artifact = huffpack::compress(b"abracadabra")?;
//! assert_eq!(huffpack::decompress(&artifact)?, b"abracadabra");
//! # Ok::<(), huffpack::CodecError>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod protocol;
pub mod report;
pub mod utils;

pub use engine::{compress, compress_with_stats, decompress, CompressionStats};
pub use protocol::{CodecError, MalformedKind};
