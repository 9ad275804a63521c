use serde::Serialize;
use tracing::{debug, info};

use crate::engine::{
    codes::CodeTable,
    frequency::FrequencyTable,
    huffman::HuffmanTree,
};
use crate::protocol::{ArtifactHeader, CodecError};
use crate::utils::bits::{packed_len, MsbWriter};

#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    pub original_len: u64,
    pub artifact_len: u64,
    pub distinct_symbols: usize,
    pub encoded_bits: u64,
}

impl CompressionStats {
    /// Artifact size relative to the input (header included)
    pub fn ratio(&self) -> f64 {
        if self.original_len > 0 {
            self.artifact_len as f64 / self.original_len as f64
        } else {
            0.0
        }
    }
}

pub fn compress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    compress_with_stats(input).map(|(output, _)| output)
}

pub fn compress_with_stats(input: &[u8]) -> Result<(Vec<u8>, CompressionStats), CodecError> {
    let freq = FrequencyTable::from_bytes(input)?;
    let distinct_symbols = freq.distinct();

    let tree = HuffmanTree::build(&freq)?;
    let codes = tree.as_ref().map(CodeTable::from_tree);
    let encoded_bits = codes.as_ref().map_or(0, |c| c.encoded_bits(&freq));

    let artifact_len = ArtifactHeader::SIZE as u64 + packed_len(encoded_bits);
    let mut output = Vec::new();
    output
        .try_reserve_exact(artifact_len as usize)
        .map_err(|_| CodecError::ResourceExhausted("allocating the artifact buffer"))?;

    ArtifactHeader::new(freq).encode(&mut output);

    if let Some(codes) = &codes {
        let written = pack_bitstream(input, codes, &mut output)?;
        debug!("Packed {} bits for {} input bytes", written, input.len());
    }

    let stats = CompressionStats {
        original_len: input.len() as u64,
        artifact_len: output.len() as u64,
        distinct_symbols,
        encoded_bits,
    };

    info!(
        "Compressed {} bytes into {} ({} symbols)",
        stats.original_len, stats.artifact_len, stats.distinct_symbols
    );

    Ok((output, stats))
}

/// Append the codes of `input` to `output`, MSB-first and zero-padded.
/// Returns the number of code bits written.
pub fn pack_bitstream(input: &[u8], codes: &CodeTable, output: &mut Vec<u8>) -> Result<u64, CodecError> {
    let mut writer = MsbWriter::new(output);
    for &byte in input {
        let code = codes.get(byte).ok_or(CodecError::MissingCode(byte))?;
        writer
            .write_bits(code.bits())
            .map_err(|_| CodecError::ResourceExhausted("packing the bitstream"))?;
    }
    writer
        .finish()
        .map_err(|_| CodecError::ResourceExhausted("packing the bitstream"))
}
