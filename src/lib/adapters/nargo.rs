use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ProverConfig;
use crate::domain::circuit::CircuitArtifact;
use crate::domain::proof::InputRecord;
use crate::ports::prover::{ProverError, WitnessEngine, WitnessFile};

use super::run_tool;

/// NargoExecutor solves the circuit witness by shelling out to `nargo`.
///
/// This engine:
/// 1. Checks the input record against the compiled circuit ABI
/// 2. Writes the record to `<prover_name>.toml` in the circuit directory
/// 3. Runs `nargo execute <witness_name> --prover-name <prover_name>`
/// 4. Returns the path of `target/<witness_name>.gz`
pub struct NargoExecutor {
    nargo: PathBuf,
    /// Nargo project directory (containing Nargo.toml)
    circuit_dir: PathBuf,
    prover_name: String,
    witness_name: String,
    artifact: CircuitArtifact,
}

impl NargoExecutor {
    pub fn new(
        nargo: PathBuf,
        circuit_dir: PathBuf,
        prover_name: String,
        witness_name: String,
        artifact: CircuitArtifact,
    ) -> Self {
        Self {
            nargo,
            circuit_dir,
            prover_name,
            witness_name,
            artifact,
        }
    }

    /// Build an executor from config, loading the compiled circuit.
    pub fn from_config(config: &ProverConfig) -> Result<Self, ProverError> {
        let artifact = CircuitArtifact::load(&config.artifact_path())?;
        debug!(
            artifact = %artifact.path().display(),
            noir_version = artifact.noir_version.as_deref().unwrap_or("unknown"),
            "loaded circuit artifact"
        );
        Ok(Self::new(
            config.tools.nargo.clone(),
            config.circuit.dir.clone(),
            config.circuit.prover_name.clone(),
            config.circuit.witness_name.clone(),
            artifact,
        ))
    }

    pub fn artifact(&self) -> &CircuitArtifact {
        &self.artifact
    }

    fn prover_toml_path(&self) -> PathBuf {
        self.circuit_dir.join(format!("{}.toml", self.prover_name))
    }

    fn witness_path(&self) -> PathBuf {
        self.circuit_dir
            .join("target")
            .join(format!("{}.gz", self.witness_name))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.nargo);
        command
            .args([
                "execute",
                self.witness_name.as_str(),
                "--prover-name",
                self.prover_name.as_str(),
            ])
            .current_dir(&self.circuit_dir);
        command
    }
}

impl WitnessEngine for NargoExecutor {
    async fn execute(&self, inputs: &InputRecord) -> Result<WitnessFile, ProverError> {
        if !self.circuit_dir.is_dir() {
            return Err(ProverError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Circuit directory not found: {}", self.circuit_dir.display()),
            )));
        }
        self.artifact.check_inputs(inputs)?;

        // 1. Write prover inputs
        let prover_toml = inputs.to_toml()?;
        tokio::fs::write(self.prover_toml_path(), prover_toml).await?;

        // 2. Run nargo execute to generate witness
        info!(circuit = %self.circuit_dir.display(), "executing circuit");
        let output = run_tool(self.command(), &self.nargo).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProverError::WitnessError(format!(
                "nargo execute failed: {}",
                stderr.trim()
            )));
        }
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "nargo", "{line}");
        }

        let path = self.witness_path();
        if !path.is_file() {
            return Err(ProverError::WitnessError(format!(
                "nargo did not write {}",
                path.display()
            )));
        }
        Ok(WitnessFile { path })
    }
}
