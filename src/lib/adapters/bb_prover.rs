use std::path::PathBuf;

use alloy::primitives::{B256, Bytes};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::ProverConfig;
use crate::domain::proof::GeneratedProof;
use crate::ports::prover::{ProofBackend, ProverError, WitnessFile};

use super::run_tool;

/// BbBackend generates UltraHonk proofs by shelling out to bb (Barretenberg CLI).
///
/// This backend:
/// 1. Runs `bb prove` against the compiled circuit and a solved witness
/// 2. Reads `proof` and `public_inputs` from the output directory
pub struct BbBackend {
    bb: PathBuf,
    /// Compiled circuit (`target/<package>.json`)
    bytecode_path: PathBuf,
    out_dir: PathBuf,
    /// Transcript hash; `keccak` for proofs checked by the Solidity verifier
    oracle_hash: String,
    threads: Option<usize>,
}

impl BbBackend {
    pub fn new(bb: PathBuf, bytecode_path: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            bb,
            bytecode_path,
            out_dir,
            oracle_hash: "keccak".to_string(),
            threads: None,
        }
    }

    pub fn from_config(config: &ProverConfig) -> Self {
        Self::new(
            config.tools.bb.clone(),
            config.artifact_path(),
            config.circuit.dir.join("target"),
        )
        .with_oracle_hash(config.tools.oracle_hash.clone())
        .with_threads(config.tools.threads)
    }

    pub fn with_oracle_hash(mut self, oracle_hash: String) -> Self {
        self.oracle_hash = oracle_hash;
        self
    }

    /// Limit bb's worker threads (`HARDWARE_CONCURRENCY`).
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    fn command(&self, witness: &WitnessFile) -> Command {
        let mut command = Command::new(&self.bb);
        command
            .arg("prove")
            .arg("-b")
            .arg(&self.bytecode_path)
            .arg("-w")
            .arg(&witness.path)
            .arg("-o")
            .arg(&self.out_dir)
            .args(["--oracle_hash", self.oracle_hash.as_str(), "--write_vk"]);
        if let Some(threads) = self.threads {
            command.env("HARDWARE_CONCURRENCY", threads.to_string());
        }
        command
    }

    async fn read_outputs(&self) -> Result<GeneratedProof, ProverError> {
        let proof = tokio::fs::read(self.out_dir.join("proof")).await?;
        if proof.is_empty() {
            return Err(ProverError::MalformedOutput("empty proof file".into()));
        }

        let public_inputs = match tokio::fs::read(self.out_dir.join("public_inputs")).await {
            Ok(bytes) => split_public_inputs(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("bb wrote no public_inputs file, assuming none");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(GeneratedProof {
            proof: Bytes::from(proof),
            public_inputs,
        })
    }
}

/// Split bb's concatenated public inputs into 32-byte words.
fn split_public_inputs(bytes: &[u8]) -> Result<Vec<B256>, ProverError> {
    if bytes.len() % 32 != 0 {
        return Err(ProverError::MalformedOutput(format!(
            "public_inputs length {} is not a multiple of 32",
            bytes.len()
        )));
    }
    Ok(bytes.chunks_exact(32).map(B256::from_slice).collect())
}

impl ProofBackend for BbBackend {
    async fn generate_proof(&self, witness: &WitnessFile) -> Result<GeneratedProof, ProverError> {
        tokio::fs::create_dir_all(&self.out_dir).await?;

        info!(oracle_hash = %self.oracle_hash, "generating proof");
        let output = run_tool(self.command(witness), &self.bb).await?;
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "bb", "{line}");
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProverError::ProofFailed(format!(
                "bb prove failed: {}",
                stderr.trim()
            )));
        }

        let generated = self.read_outputs().await?;
        info!(
            proof_len = generated.proof.len(),
            public_inputs = generated.public_inputs.len(),
            "proof generated"
        );
        Ok(generated)
    }
}
