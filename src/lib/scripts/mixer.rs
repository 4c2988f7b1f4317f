//! Withdrawal proof for the mixer contract tests.
//!
//! Arguments: `<nullifier> <secret> <recipient> <leaf>...`. The deposit
//! commitment `H(nullifier, secret)` must be one of the leaves; the proof
//! shows membership of that commitment in the tree built from all leaves.

use alloy::primitives::{B256, Bytes};
use serde::Serialize;
use tracing::{debug, info};

use crate::adapters::merkle_tree::IncrementalMerkleTree;
use crate::config::MerkleConfig;
use crate::crypto::field::format_field;
use crate::crypto::poseidon::{hash1, hash2};
use crate::domain::merkle::MerkleProof;
use crate::domain::proof::{encode_proof_with_inputs, InputRecord};
use crate::logging::LogControl;
use crate::pipeline;
use crate::ports::prover::{ProofBackend, WitnessEngine};
use crate::ScriptError;

/// Nargo package of the mixer circuit.
pub const DEFAULT_PACKAGE: &str = "circuits";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerArgs {
    pub nullifier: B256,
    pub secret: B256,
    /// Left-padded address.
    pub recipient: B256,
    /// Deposit commitments in insertion order.
    pub leaves: Vec<B256>,
}

/// TOML-serializable input for the mixer circuit.
///
/// Field names **must** match the Noir circuit parameter names exactly.
#[derive(Debug, Serialize)]
pub struct MixerCircuitInput {
    // -- Public inputs --
    pub root: String,
    pub nullifier_hash: String,
    pub recipient: String,
    // -- Private inputs --
    pub nullifier: String,
    pub secret: String,
    pub merkle_proof: Vec<String>,
    pub is_even: Vec<bool>,
}

impl MixerCircuitInput {
    fn new(args: &MixerArgs, nullifier_hash: B256, proof: &MerkleProof) -> Self {
        Self {
            root: format_field(&proof.root),
            nullifier_hash: format_field(&nullifier_hash),
            recipient: format_field(&args.recipient),
            nullifier: format_field(&args.nullifier),
            secret: format_field(&args.secret),
            merkle_proof: proof.path_elements.iter().map(format_field).collect(),
            is_even: proof.is_even(),
        }
    }
}

/// Derive the commitment and Merkle proof, and assemble the circuit input.
pub fn build_input(
    args: &MixerArgs,
    merkle: &MerkleConfig,
) -> Result<MixerCircuitInput, ScriptError> {
    let nullifier_hash = hash1(args.nullifier)?;
    let commitment = hash2(args.nullifier, args.secret)?;
    debug!(%commitment, %nullifier_hash, "derived deposit values");

    let tree = IncrementalMerkleTree::from_leaves(merkle.depth, merkle.zero_value, &args.leaves)?;
    let index = tree
        .index_of(&commitment)
        .ok_or(ScriptError::CommitmentNotFound(commitment))?;
    let proof = tree.proof(index)?;

    if proof.compute_root(commitment)? != proof.root {
        return Err(ScriptError::InconsistentProof(index));
    }
    info!(leaf_index = index, leaves = tree.len(), root = %proof.root, "merkle proof built");

    Ok(MixerCircuitInput::new(args, nullifier_hash, &proof))
}

/// Run the full mixer flow and return the ABI-encoded `(bytes, bytes32[])`.
pub async fn generate_proof<E, B>(
    args: &MixerArgs,
    merkle: &MerkleConfig,
    engine: &E,
    backend: &B,
    quiet: Option<&LogControl>,
) -> Result<Bytes, ScriptError>
where
    E: WitnessEngine,
    B: ProofBackend,
{
    let input = build_input(args, merkle)?;
    let record = InputRecord::from_inputs(&input)?;
    let generated = pipeline::prove(engine, backend, &record, quiet).await?;
    Ok(encode_proof_with_inputs(&generated))
}
