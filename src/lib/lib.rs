//! Proof generation for Foundry `ffi` tests.
//!
//! Each binary parses positional arguments, assembles a Noir circuit input,
//! solves the witness with `nargo`, proves with `bb`, and prints the
//! ABI-encoded result as hex on stdout.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod scripts;

use alloy::primitives::B256;

/// Any failure of a proof script. All variants exit the binary with status 1.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Hash(#[from] crypto::poseidon::HashError),

    #[error("merkle error: {0}")]
    Merkle(#[from] adapters::merkle_tree::MerkleError),

    #[error("commitment {0} is not among the leaves")]
    CommitmentNotFound(B256),

    #[error("merkle proof for leaf {0} does not recompute the root")]
    InconsistentProof(usize),

    #[error("cannot serialize circuit inputs: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error(transparent)]
    Prover(#[from] ports::prover::ProverError),
}
