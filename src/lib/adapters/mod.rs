pub mod bb_prover;
pub mod merkle_tree;
pub mod nargo;

use std::path::Path;
use std::process::Output;

use tokio::process::Command;

use crate::ports::prover::ProverError;

/// Spawn `command` and wait for it, mapping a missing executable to
/// `ProverError::BinaryNotFound`.
async fn run_tool(mut command: Command, program: &Path) -> Result<Output, ProverError> {
    match command.kill_on_drop(true).output().await {
        Ok(output) => Ok(output),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ProverError::BinaryNotFound(program.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
