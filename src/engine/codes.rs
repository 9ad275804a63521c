use std::fmt;

use crate::engine::frequency::FrequencyTable;
use crate::engine::huffman::{HuffmanNode, HuffmanTree, NodeId};
use crate::utils::limits::ALPHABET_SIZE;

/// Root-to-leaf path: `false` is a left edge, `true` a right edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code for every byte value that appears in the tree
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Code>; ALPHABET_SIZE] = std::array::from_fn(|_| None);

        fn build_codes(
            tree: &HuffmanTree,
            id: NodeId,
            path: &mut Vec<bool>,
            codes: &mut [Option<Code>; ALPHABET_SIZE],
        ) {
            match tree.node(id) {
                HuffmanNode::Leaf { byte, .. } => {
                    codes[*byte as usize] = Some(Code(path.clone()));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    path.push(false);
                    build_codes(tree, *left, path, codes);
                    path.pop();

                    path.push(true);
                    build_codes(tree, *right, path, codes);
                    path.pop();
                }
            }
        }

        if let HuffmanNode::Leaf { byte, .. } = tree.node(tree.root()) {
            // A lone leaf has no edges; give it one bit so every symbol
            // still consumes input when decoding.
            codes[*byte as usize] = Some(Code(vec![false]));
        } else {
            let mut path = Vec::new();
            build_codes(tree, tree.root(), &mut path, &mut codes);
        }

        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Assigned codes in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(b, c)| c.as_ref().map(|c| (b as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact number of bits the encoder will emit for this distribution
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        freq.iter_present()
            .map(|(byte, count)| {
                let len = self.get(byte).map_or(0, Code::len) as u64;
                len * count as u64
            })
            .sum()
    }
}
