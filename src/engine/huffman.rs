use tracing::debug;

use crate::engine::frequency::FrequencyTable;
use crate::engine::ordered::{OrderedNodes, WeightedNode};
use crate::protocol::CodecError;

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf { byte: u8, weight: u64 },
    Internal { weight: u64, left: NodeId, right: NodeId },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Huffman tree stored as an arena. Every internal node owns exactly two
/// children and each child index appears under one parent only.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table. Returns `None` when no byte
    /// value occurs, since there is nothing to encode.
    pub fn build(freq: &FrequencyTable) -> Result<Option<Self>, CodecError> {
        let distinct = freq.distinct();
        if distinct == 0 {
            return Ok(None);
        }

        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(2 * distinct - 1)
            .map_err(|_| CodecError::ResourceExhausted("building the huffman tree"))?;

        let mut ordered = OrderedNodes::with_capacity(distinct);
        for (byte, count) in freq.iter_present() {
            let id = NodeId(nodes.len());
            let weight = count as u64;
            nodes.push(HuffmanNode::Leaf { byte, weight });
            ordered.insert(WeightedNode { weight, id });
        }

        // Merge the two lightest until a single root is left
        while ordered.len() > 1 {
            let (Some(left), Some(right)) = (ordered.remove_min(), ordered.remove_min()) else {
                break;
            };
            let id = NodeId(nodes.len());
            let weight = left.weight + right.weight;
            nodes.push(HuffmanNode::Internal {
                weight,
                left: left.id,
                right: right.id,
            });
            ordered.insert(WeightedNode { weight, id });
        }

        let Some(root) = ordered.remove_min() else {
            return Ok(None);
        };

        debug!(
            "Built huffman tree: {} leaves, {} nodes, weight {}",
            distinct,
            nodes.len(),
            root.weight
        );

        Ok(Some(Self { nodes, root: root.id }))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id.0]
    }

    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// True when the input had a single distinct byte value
    pub fn is_single_leaf(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    /// Leaves have no edges.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
        }
    }

    /// Leaves in the order the builder starts merging them
    pub fn initial_order(freq: &FrequencyTable) -> Vec<(u8, u64)> {
        let mut ordered = OrderedNodes::with_capacity(freq.distinct());
        for (byte, count) in freq.iter_present() {
            ordered.insert(WeightedNode {
                weight: count as u64,
                id: NodeId(byte as usize),
            });
        }
        ordered.iter().map(|n| (n.id.0 as u8, n.weight)).collect()
    }

    /// Every leaf with its depth, left subtree first
    pub fn leaf_depths(&self) -> Vec<(u8, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                HuffmanNode::Leaf { byte, .. } => out.push((*byte, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(input: &[u8]) -> HuffmanTree {
        let freq = FrequencyTable::from_bytes(input).unwrap();
        HuffmanTree::build(&freq).unwrap().unwrap()
    }

    #[test]
    fn empty_table_has_no_tree() {
        let freq = FrequencyTable::default();
        assert!(HuffmanTree::build(&freq).unwrap().is_none());
    }

    #[test]
    fn single_symbol_is_leaf_root() {
        let tree = tree_for(&[b'a'; 1000]);
        assert!(tree.is_single_leaf());
        assert_eq!(tree.weight(), 1000);
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(tree.child(tree.root(), false), None);
    }

    #[test]
    fn abracadabra_shape() {
        let tree = tree_for(b"abracadabra");
        assert_eq!(tree.weight(), 11);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.internal_count(), 4);
        assert_eq!(
            tree.leaf_depths(),
            vec![(b'a', 1), (b'b', 2), (b'd', 4), (b'c', 4), (b'r', 3)]
        );
    }

    #[test]
    fn initial_order_follows_tie_break() {
        let freq = FrequencyTable::from_bytes(b"abracadabra").unwrap();
        assert_eq!(
            HuffmanTree::initial_order(&freq),
            vec![(b'd', 1), (b'c', 1), (b'r', 2), (b'b', 2), (b'a', 5)]
        );
    }

    #[test]
    fn internal_weight_is_sum_of_children() {
        let tree = tree_for(b"the quick brown fox jumps over the lazy dog");
        for node in &tree.nodes {
            if let HuffmanNode::Internal { weight, left, right } = node {
                assert_eq!(*weight, tree.node(*left).weight() + tree.node(*right).weight());
            }
        }
    }

    #[test]
    fn children_have_a_single_parent() {
        let tree = tree_for(b"mississippi river banks");
        let mut seen = vec![0usize; tree.nodes.len()];
        for node in &tree.nodes {
            if let HuffmanNode::Internal { left, right, .. } = node {
                seen[left.0] += 1;
                seen[right.0] += 1;
            }
        }
        assert_eq!(seen[tree.root().0], 0);
        for (i, count) in seen.iter().enumerate() {
            if i != tree.root().0 {
                assert_eq!(*count, 1);
            }
        }
    }

    #[test]
    fn full_alphabet_counts() {
        let input: Vec<u8> = (0..=255u8).collect();
        let tree = tree_for(&input);
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.internal_count(), 255);
        // equal weights over a power of two give a perfectly balanced tree
        assert!(tree.leaf_depths().iter().all(|&(_, d)| d == 8));
    }

    #[test]
    fn rebuild_is_deterministic() {
        let a = tree_for(b"deterministic trees please");
        let b = tree_for(b"deterministic trees please");
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.root(), b.root());
    }
}
