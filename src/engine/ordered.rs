use std::collections::VecDeque;

use crate::engine::huffman::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedNode {
    pub weight: u64,
    pub id: NodeId,
}

/// Nodes kept ascending by weight, standing in for a priority queue.
///
/// A new node goes in front of every node whose weight is not strictly less
/// than its own, so it lands ahead of equal-weight nodes inserted earlier.
/// Encoder and decoder both rely on this exact order to grow the same tree.
#[derive(Debug, Default)]
pub struct OrderedNodes {
    entries: VecDeque<WeightedNode>,
}

impl OrderedNodes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, node: WeightedNode) {
        let at = self.entries.partition_point(|e| e.weight < node.weight);
        self.entries.insert(at, node);
    }

    pub fn remove_min(&mut self) -> Option<WeightedNode> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedNode> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(weight: u64, id: usize) -> WeightedNode {
        WeightedNode { weight, id: NodeId(id) }
    }

    fn ids(nodes: &OrderedNodes) -> Vec<usize> {
        nodes.iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn keeps_ascending_weight() {
        let mut nodes = OrderedNodes::default();
        for (i, w) in [5u64, 1, 4, 2, 3].into_iter().enumerate() {
            nodes.insert(node(w, i));
        }
        let weights: Vec<u64> = nodes.iter().map(|n| n.weight).collect();
        assert_eq!(weights, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn equal_weight_goes_before_earlier_inserts() {
        let mut nodes = OrderedNodes::default();
        nodes.insert(node(1, 0));
        nodes.insert(node(3, 1));
        nodes.insert(node(3, 2));
        // lands after the strictly smaller node, ahead of both 3s
        nodes.insert(node(3, 3));
        assert_eq!(ids(&nodes), vec![0, 3, 2, 1]);
    }

    #[test]
    fn new_minimum_goes_first() {
        let mut nodes = OrderedNodes::default();
        nodes.insert(node(2, 0));
        nodes.insert(node(2, 1));
        assert_eq!(ids(&nodes), vec![1, 0]);
    }

    #[test]
    fn heavier_node_goes_last() {
        let mut nodes = OrderedNodes::default();
        nodes.insert(node(1, 0));
        nodes.insert(node(2, 1));
        nodes.insert(node(9, 2));
        assert_eq!(ids(&nodes), vec![0, 1, 2]);
    }

    #[test]
    fn remove_min_drains_in_order() {
        let mut nodes = OrderedNodes::with_capacity(3);
        nodes.insert(node(7, 0));
        nodes.insert(node(1, 1));
        nodes.insert(node(4, 2));
        assert_eq!(nodes.remove_min().map(|n| n.id.0), Some(1));
        assert_eq!(nodes.remove_min().map(|n| n.id.0), Some(2));
        assert_eq!(nodes.remove_min().map(|n| n.id.0), Some(0));
        assert_eq!(nodes.remove_min(), None);
        assert!(nodes.is_empty());
    }
}
