use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::crypto::poseidon::{hash2, HashError};

/// Default depth of the deposit tree (supports up to 2^20 leaves).
/// Must match the circuit's merkle proof array length.
pub const DEFAULT_TREE_DEPTH: usize = 20;

/// Largest depth the tree adapter accepts.
pub const MAX_TREE_DEPTH: usize = 32;

/// Merkle inclusion proof for one leaf of a fixed-depth tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Root the proof was generated against.
    pub root: B256,
    /// Sibling hashes along the path from leaf to root.
    pub path_elements: Vec<B256>,
    /// Index bits indicating left (0) or right (1) at each level, LSB first.
    pub path_indices: Vec<u8>,
    /// The leaf index in the tree.
    pub leaf_index: usize,
}

impl MerkleProof {
    /// Tree depth covered by this proof.
    pub fn depth(&self) -> usize {
        self.path_elements.len()
    }

    /// `true` at each level where the path node is the left child.
    pub fn is_even(&self) -> Vec<bool> {
        self.path_indices.iter().map(|bit| bit & 1 == 0).collect()
    }

    /// Recompute the root by hashing `leaf` up the path.
    pub fn compute_root(&self, leaf: B256) -> Result<B256, HashError> {
        let mut node = leaf;
        for (sibling, bit) in self.path_elements.iter().zip(&self.path_indices) {
            node = if bit & 1 == 0 {
                hash2(node, *sibling)?
            } else {
                hash2(*sibling, node)?
            };
        }
        Ok(node)
    }
}

/// Decode a leaf index into its path bits (LSB to MSB).
pub fn index_bits(index: usize, depth: usize) -> Vec<u8> {
    (0..depth).map(|level| ((index >> level) & 1) as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bits_lsb_first() {
        assert_eq!(index_bits(2, 3), vec![0, 1, 0]);
        assert_eq!(index_bits(5, 4), vec![1, 0, 1, 0]);
        assert_eq!(index_bits(0, 2), vec![0, 0]);
    }

    #[test]
    fn test_is_even_inverts_bits() {
        let proof = MerkleProof {
            root: B256::ZERO,
            path_elements: vec![B256::ZERO; 3],
            path_indices: vec![1, 0, 1],
            leaf_index: 5,
        };
        assert_eq!(proof.is_even(), vec![false, true, false]);
        assert_eq!(proof.depth(), 3);
    }

    #[test]
    fn test_compute_root_single_level() {
        let leaf = B256::left_padding_from(&[1]);
        let sibling = B256::left_padding_from(&[2]);

        let left = MerkleProof {
            root: B256::ZERO,
            path_elements: vec![sibling],
            path_indices: vec![0],
            leaf_index: 0,
        };
        assert_eq!(left.compute_root(leaf).unwrap(), hash2(leaf, sibling).unwrap());

        let right = MerkleProof {
            path_indices: vec![1],
            leaf_index: 1,
            ..left
        };
        assert_eq!(right.compute_root(leaf).unwrap(), hash2(sibling, leaf).unwrap());
    }
}
