use tracing::{debug, error, info};

use crate::engine::huffman::{HuffmanNode, HuffmanTree};
use crate::protocol::{ArtifactHeader, CodecError, MalformedKind};
use crate::utils::bits::MsbReader;

pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let header = ArtifactHeader::decode(data)?;
    let expected = header.original_len;

    // Every symbol costs at least one bit
    let available_bits = 8 * (data.len() - ArtifactHeader::SIZE) as u64;
    if expected > available_bits {
        error!("Header declares {} bytes but only {} bits follow", expected, available_bits);
        return Err(MalformedKind::TruncatedBitstream { emitted: 0, expected }.into());
    }

    // Header validation guarantees an empty table only comes with length 0
    let Some(tree) = HuffmanTree::build(&header.frequencies)? else {
        debug!("Artifact holds no symbols");
        return Ok(Vec::new());
    };

    let capacity = usize::try_from(expected)
        .map_err(|_| CodecError::ResourceExhausted("allocating the output buffer"))?;
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| CodecError::ResourceExhausted("allocating the output buffer"))?;

    let mut reader = MsbReader::new(&data[ArtifactHeader::SIZE..]);
    let root = tree.root();
    let mut current = root;
    let mut emitted = 0u64;

    while emitted < expected {
        let Some(bit) = reader.next_bit() else {
            error!("Bitstream exhausted after {} of {} bytes", emitted, expected);
            return Err(MalformedKind::TruncatedBitstream { emitted, expected }.into());
        };

        if tree.is_single_leaf() {
            // Each symbol is the single code `0`
            if bit {
                return Err(MalformedKind::InvalidCode.into());
            }
        } else {
            current = tree.child(current, bit).ok_or(MalformedKind::InvalidCode)?;
        }

        if let HuffmanNode::Leaf { byte, .. } = tree.node(current) {
            out.push(*byte);
            emitted += 1;
            current = root;
        }
    }

    info!("Decompressed {} bytes from {}", out.len(), data.len());
    Ok(out)
}
