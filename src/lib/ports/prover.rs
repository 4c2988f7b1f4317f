use std::future::Future;
use std::path::PathBuf;

use crate::domain::proof::{GeneratedProof, InputRecord};

/// A solved witness written to disk by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessFile {
    pub path: PathBuf,
}

/// Port for the circuit execution engine.
///
/// Implementations:
/// - `NargoExecutor` (shells out to `nargo execute`)
/// - Mock engines in tests
pub trait WitnessEngine: Send + Sync {
    /// Solve the circuit for `inputs` and return the resulting witness.
    fn execute(
        &self,
        inputs: &InputRecord,
    ) -> impl Future<Output = Result<WitnessFile, ProverError>> + Send;
}

/// Port for the proof backend.
///
/// Implementations:
/// - `BbBackend` (shells out to `bb prove`)
/// - Mock backends in tests
pub trait ProofBackend: Send + Sync {
    /// Turn a witness into a proof plus its public inputs.
    fn generate_proof(
        &self,
        witness: &WitnessFile,
    ) -> impl Future<Output = Result<GeneratedProof, ProverError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    #[error("circuit artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("malformed circuit artifact: {0}")]
    MalformedArtifact(String),

    #[error("circuit inputs do not match the circuit ABI (missing: [{missing}], unknown: [{unknown}])")]
    InputMismatch { missing: String, unknown: String },

    #[error("witness generation failed: {0}")]
    WitnessError(String),

    #[error("proof generation failed: {0}")]
    ProofFailed(String),

    #[error("prover binary not found: {0}")]
    BinaryNotFound(String),

    #[error("malformed backend output: {0}")]
    MalformedOutput(String),

    #[error("witness serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
