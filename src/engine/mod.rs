pub mod codes;
pub mod compressor;
pub mod decompressor;
pub mod frequency;
pub mod huffman;
pub(crate) mod ordered;

pub use compressor::*;
pub use decompressor::*;
