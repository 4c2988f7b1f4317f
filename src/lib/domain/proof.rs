use alloy::primitives::{B256, Bytes};
use alloy::sol_types::SolValue;
use serde::Serialize;

/// Named circuit inputs, serialized as the prover TOML file nargo reads.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord(toml::Table);

impl InputRecord {
    /// Build a record from a struct whose field names match the circuit parameters.
    pub fn from_inputs<T: Serialize>(inputs: &T) -> Result<Self, toml::ser::Error> {
        toml::Table::try_from(inputs).map(Self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&self.0)
    }
}

/// A proof produced by the backend, with its public inputs split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProof {
    /// Serialized proof in Barretenberg format
    pub proof: Bytes,
    pub public_inputs: Vec<B256>,
}

/// ABI-encode `(bytes proof, bytes32[] publicInputs)` as function parameters.
pub fn encode_proof_with_inputs(generated: &GeneratedProof) -> Bytes {
    (generated.proof.clone(), generated.public_inputs.clone())
        .abi_encode_params()
        .into()
}

/// ABI-encode `(bytes proof)` as a single function parameter.
pub fn encode_proof(proof: &Bytes) -> Bytes {
    (proof.clone(),).abi_encode_params().into()
}
