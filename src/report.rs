use serde::Serialize;
use std::fmt;

use crate::engine::{codes::CodeTable, frequency::FrequencyTable, huffman::HuffmanTree};
use crate::protocol::{CodecError, HEADER_SIZE};
use crate::utils::bits::packed_len;

#[derive(Debug, Clone, Serialize)]
pub struct SymbolCount {
    pub byte: u8,
    pub symbol: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeafDepth {
    pub byte: u8,
    pub symbol: String,
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeEntry {
    pub byte: u8,
    pub symbol: String,
    pub code: String,
}

/// Everything the codec derives from one input, for display
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub original_len: u64,
    pub distinct_symbols: usize,
    pub frequencies: Vec<SymbolCount>,
    pub initial_order: Vec<SymbolCount>,
    pub leaves: Vec<LeafDepth>,
    pub dictionary: Vec<CodeEntry>,
    pub encoded_bits: u64,
    pub artifact_len: u64,
}

/// Printable form of a byte: the character itself, or a `\xNN` escape
pub fn symbol_label(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        (byte as char).to_string()
    } else {
        format!("\\x{:02x}", byte)
    }
}

impl InspectReport {
    pub fn analyze(input: &[u8]) -> Result<Self, CodecError> {
        let freq = FrequencyTable::from_bytes(input)?;
        let tree = HuffmanTree::build(&freq)?;

        let frequencies = freq
            .iter_present()
            .map(|(byte, count)| SymbolCount { byte, symbol: symbol_label(byte), count: count as u64 })
            .collect();

        let initial_order = HuffmanTree::initial_order(&freq)
            .into_iter()
            .map(|(byte, count)| SymbolCount { byte, symbol: symbol_label(byte), count })
            .collect();

        let (leaves, dictionary, encoded_bits) = match &tree {
            Some(tree) => {
                let codes = CodeTable::from_tree(tree);
                let leaves = tree
                    .leaf_depths()
                    .into_iter()
                    .map(|(byte, depth)| LeafDepth { byte, symbol: symbol_label(byte), depth })
                    .collect();
                let dictionary = codes
                    .iter()
                    .map(|(byte, code)| CodeEntry { byte, symbol: symbol_label(byte), code: code.to_string() })
                    .collect();
                (leaves, dictionary, codes.encoded_bits(&freq))
            }
            None => (Vec::new(), Vec::new(), 0),
        };

        Ok(Self {
            original_len: freq.total(),
            distinct_symbols: freq.distinct(),
            frequencies,
            initial_order,
            leaves,
            dictionary,
            encoded_bits,
            artifact_len: HEADER_SIZE as u64 + packed_len(encoded_bits),
        })
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Frequency Table")?;
        writeln!(f, "==================")?;
        for entry in &self.frequencies {
            writeln!(f, "   {:>3} = {:>8} = '{}'", entry.byte, entry.count, entry.symbol)?;
        }

        writeln!(f)?;
        writeln!(f, "📋 Ordered List (size {})", self.initial_order.len())?;
        writeln!(f, "=========================")?;
        for entry in &self.initial_order {
            writeln!(f, "   '{}' weight {}", entry.symbol, entry.count)?;
        }

        writeln!(f)?;
        writeln!(f, "🌳 Huffman Tree Leaves")?;
        writeln!(f, "======================")?;
        for leaf in &self.leaves {
            writeln!(f, "   Leaf '{}' depth {}", leaf.symbol, leaf.depth)?;
        }

        writeln!(f)?;
        writeln!(f, "📖 Code Dictionary")?;
        writeln!(f, "==================")?;
        for entry in &self.dictionary {
            writeln!(f, "   '{}' -> {}", entry.symbol, entry.code)?;
        }

        writeln!(f)?;
        writeln!(f, "Original size: {} bytes", self.original_len)?;
        writeln!(f, "Encoded size: {} bits", self.encoded_bits)?;
        writeln!(f, "Artifact size: {} bytes", self.artifact_len)
    }
}
