use tracing::warn;

use crate::domain::proof::{GeneratedProof, InputRecord};
use crate::logging::LogControl;
use crate::ports::prover::{ProofBackend, ProverError, WitnessEngine};

/// Filter applied while the backend runs in quiet mode.
const QUIET_FILTER: &str = "warn";

/// Execute the circuit, then prove the resulting witness.
///
/// With `quiet` set, backend chatter is filtered out for the duration of
/// proof generation and the previous filter is restored afterwards.
pub async fn prove<E, B>(
    engine: &E,
    backend: &B,
    inputs: &InputRecord,
    quiet: Option<&LogControl>,
) -> Result<GeneratedProof, ProverError>
where
    E: WitnessEngine,
    B: ProofBackend,
{
    let witness = engine.execute(inputs).await?;

    let _quiet = match quiet.map(|logs| logs.override_filter(QUIET_FILTER)) {
        Some(Ok(guard)) => Some(guard),
        Some(Err(e)) => {
            warn!("cannot quiet backend logs: {e}");
            None
        }
        None => None,
    };
    backend.generate_proof(&witness).await
}
