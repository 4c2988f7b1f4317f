//! Fixed-depth incremental Merkle tree with Poseidon2 nodes.
//!
//! Mirrors the on-chain incremental tree the mixer contract keeps: empty
//! subtrees hash to precomputed zero values, so only the filled part of each
//! level is stored.

use alloy::primitives::B256;

use crate::crypto::poseidon::{hash2, HashError};
use crate::domain::merkle::{index_bits, MerkleProof, MAX_TREE_DEPTH};

#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    #[error("tree depth {0} is outside 1..={max}", max = MAX_TREE_DEPTH)]
    InvalidDepth(usize),

    #[error("merkle tree is full (max {0} leaves)")]
    TreeFull(usize),

    #[error("leaf index {index} out of range (tree has {len} leaves)")]
    LeafOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Hash(#[from] HashError),
}

pub struct IncrementalMerkleTree {
    depth: usize,
    /// zeros[i] is the root of an empty subtree of height i.
    zeros: Vec<B256>,
    /// layers[0] holds the leaves; layers[depth] holds the root once non-empty.
    layers: Vec<Vec<B256>>,
}

impl IncrementalMerkleTree {
    /// Create an empty tree whose empty leaves hold `zero_value`.
    pub fn new(depth: usize, zero_value: B256) -> Result<Self, MerkleError> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(MerkleError::InvalidDepth(depth));
        }

        let mut zeros = Vec::with_capacity(depth + 1);
        zeros.push(zero_value);
        for level in 0..depth {
            let below = zeros[level];
            zeros.push(hash2(below, below)?);
        }

        Ok(Self {
            depth,
            zeros,
            layers: vec![Vec::new(); depth + 1],
        })
    }

    /// Build a tree from leaves, inserted in order.
    pub fn from_leaves(
        depth: usize,
        zero_value: B256,
        leaves: &[B256],
    ) -> Result<Self, MerkleError> {
        let mut tree = Self::new(depth, zero_value)?;
        for leaf in leaves {
            tree.insert(*leaf)?;
        }
        Ok(tree)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> usize {
        1usize << self.depth
    }

    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current root (the empty-tree root when no leaves are present).
    pub fn root(&self) -> B256 {
        self.layers[self.depth]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth])
    }

    /// Insert a leaf and return its index.
    pub fn insert(&mut self, leaf: B256) -> Result<usize, MerkleError> {
        let index = self.len();
        if index >= self.capacity() {
            return Err(MerkleError::TreeFull(self.capacity()));
        }
        self.layers[0].push(leaf);

        // Update path from leaf to root
        let mut current = index;
        for level in 0..self.depth {
            let left_idx = current & !1;
            let left = self.node(level, left_idx);
            let right = self.node(level, left_idx + 1);
            let parent = hash2(left, right)?;

            let parent_idx = current >> 1;
            let parents = &mut self.layers[level + 1];
            if parent_idx < parents.len() {
                parents[parent_idx] = parent;
            } else {
                parents.push(parent);
            }
            current = parent_idx;
        }

        Ok(index)
    }

    /// Index of the first leaf equal to `leaf`.
    pub fn index_of(&self, leaf: &B256) -> Option<usize> {
        self.layers[0].iter().position(|l| l == leaf)
    }

    /// Generate a merkle proof for the leaf at the given index.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::LeafOutOfRange {
                index,
                len: self.len(),
            });
        }

        let path_elements = (0..self.depth)
            .map(|level| self.node(level, (index >> level) ^ 1))
            .collect();

        Ok(MerkleProof {
            root: self.root(),
            path_elements,
            path_indices: index_bits(index, self.depth),
            leaf_index: index,
        })
    }

    fn node(&self, level: usize, index: usize) -> B256 {
        self.layers[level]
            .get(index)
            .copied()
            .unwrap_or(self.zeros[level])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(byte: u8) -> B256 {
        B256::left_padding_from(&[byte])
    }

    #[test]
    fn test_empty_tree_root_is_zero_subtree() {
        let tree = IncrementalMerkleTree::new(3, B256::ZERO).unwrap();
        let z1 = hash2(B256::ZERO, B256::ZERO).unwrap();
        let z2 = hash2(z1, z1).unwrap();
        let z3 = hash2(z2, z2).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.root(), z3);
    }

    #[test]
    fn test_single_leaf_root() {
        let tree = IncrementalMerkleTree::from_leaves(2, B256::ZERO, &[leaf(1)]).unwrap();
        let z1 = hash2(B256::ZERO, B256::ZERO).unwrap();
        let expected = hash2(hash2(leaf(1), B256::ZERO).unwrap(), z1).unwrap();
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn test_root_changes_on_insert() {
        let mut tree = IncrementalMerkleTree::new(4, B256::ZERO).unwrap();
        tree.insert(leaf(1)).unwrap();
        let root1 = tree.root();
        tree.insert(leaf(2)).unwrap();
        let root2 = tree.root();

        assert_ne!(root1, root2);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_every_proof_recomputes_root() {
        let leaves: Vec<B256> = (1..=5).map(leaf).collect();
        let tree = IncrementalMerkleTree::from_leaves(3, B256::ZERO, &leaves).unwrap();

        for (index, value) in leaves.iter().enumerate() {
            let proof = tree.proof(index).unwrap();
            assert_eq!(proof.leaf_index, index);
            assert_eq!(proof.depth(), 3);
            assert_eq!(proof.root, tree.root());
            assert_eq!(proof.compute_root(*value).unwrap(), tree.root());
        }
    }

    #[test]
    fn test_proof_does_not_verify_other_leaf() {
        let tree =
            IncrementalMerkleTree::from_leaves(3, B256::ZERO, &[leaf(1), leaf(2)]).unwrap();
        let proof = tree.proof(0).unwrap();
        assert_ne!(proof.compute_root(leaf(2)).unwrap(), tree.root());
    }

    #[test]
    fn test_custom_zero_value_changes_root() {
        let a = IncrementalMerkleTree::new(2, B256::ZERO).unwrap();
        let b = IncrementalMerkleTree::new(2, leaf(9)).unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_index_of_returns_first_match() {
        let tree = IncrementalMerkleTree::from_leaves(
            3,
            B256::ZERO,
            &[leaf(4), leaf(5), leaf(4)],
        )
        .unwrap();
        assert_eq!(tree.index_of(&leaf(4)), Some(0));
        assert_eq!(tree.index_of(&leaf(5)), Some(1));
        assert_eq!(tree.index_of(&leaf(6)), None);
    }

    #[test]
    fn test_tree_full() {
        let mut tree = IncrementalMerkleTree::new(1, B256::ZERO).unwrap();
        tree.insert(leaf(1)).unwrap();
        tree.insert(leaf(2)).unwrap();
        assert!(matches!(tree.insert(leaf(3)), Err(MerkleError::TreeFull(2))));
    }

    #[test]
    fn test_proof_out_of_range() {
        let tree = IncrementalMerkleTree::from_leaves(2, B256::ZERO, &[leaf(1)]).unwrap();
        assert!(matches!(
            tree.proof(1),
            Err(MerkleError::LeafOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_invalid_depth() {
        assert!(matches!(
            IncrementalMerkleTree::new(0, B256::ZERO),
            Err(MerkleError::InvalidDepth(0))
        ));
        assert!(matches!(
            IncrementalMerkleTree::new(MAX_TREE_DEPTH + 1, B256::ZERO),
            Err(MerkleError::InvalidDepth(_))
        ));
    }
}
