use acir::{AcirField, FieldElement};
use alloy::primitives::B256;

/// Error raised by the Poseidon2 black-box solver.
#[derive(Debug, thiserror::Error)]
#[error("poseidon2 hash failed: {0}")]
pub struct HashError(String);

fn b256_to_field(value: &B256) -> FieldElement {
    FieldElement::from_be_bytes_reduce(value.as_slice())
}

fn field_to_b256(value: FieldElement) -> B256 {
    B256::left_padding_from(&value.to_be_bytes())
}

/// Poseidon2 sponge hash over BN254, matching Barretenberg's `poseidon2Hash`
/// and Noir's `Poseidon2::hash(inputs, inputs.len())`.
pub fn poseidon2_hash(inputs: &[B256]) -> Result<B256, HashError> {
    let elements: Vec<FieldElement> = inputs.iter().map(b256_to_field).collect();
    let hash = bn254_blackbox_solver::poseidon_hash(&elements, false)
        .map_err(|e| HashError(e.to_string()))?;
    Ok(field_to_b256(hash))
}

/// Poseidon2 hash with 1 input.
/// Used for: nullifier_hash = H(nullifier)
pub fn hash1(a: B256) -> Result<B256, HashError> {
    poseidon2_hash(&[a])
}

/// Poseidon2 hash with 2 inputs.
/// Used for:
/// - commitment = H(nullifier, secret)
/// - merkle_node = H(left, right)
pub fn hash2(a: B256, b: B256) -> Result<B256, HashError> {
    poseidon2_hash(&[a, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash1_deterministic() {
        let input = B256::repeat_byte(0x01);
        assert_eq!(hash1(input).unwrap(), hash1(input).unwrap());
    }

    #[test]
    fn test_hash2_order_matters() {
        let a = B256::left_padding_from(&[1]);
        let b = B256::left_padding_from(&[2]);
        assert_ne!(hash2(a, b).unwrap(), hash2(b, a).unwrap());
    }

    #[test]
    fn test_arity_is_domain_separated() {
        let a = B256::left_padding_from(&[7]);
        assert_ne!(hash1(a).unwrap(), hash2(a, B256::ZERO).unwrap());
    }

    #[test]
    fn test_output_is_canonical_field() {
        use crate::crypto::field::{b256_to_fr, fr_to_b256};

        let out = hash2(B256::left_padding_from(&[3]), B256::left_padding_from(&[4])).unwrap();
        assert_eq!(fr_to_b256(b256_to_fr(out)), out);
    }
}
