//! Guess proof for the panagram contract tests.
//!
//! Arguments: `<guess_hash> <answer_double_hash> <address>`. Only the proof is
//! returned; the contract rebuilds the public inputs itself.

use alloy::primitives::{B256, Bytes};
use serde::Serialize;

use crate::crypto::field::format_field;
use crate::domain::proof::{encode_proof, InputRecord};
use crate::logging::LogControl;
use crate::pipeline;
use crate::ports::prover::{ProofBackend, WitnessEngine};
use crate::ScriptError;

/// Nargo package of the panagram circuit.
pub const DEFAULT_PACKAGE: &str = "zk_panagram";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanagramArgs {
    pub guess_hash: B256,
    pub answer_double_hash: B256,
    /// Left-padded address.
    pub address: B256,
}

/// TOML-serializable input for the panagram circuit.
#[derive(Debug, Serialize)]
pub struct PanagramCircuitInput {
    // -- Private inputs --
    pub guess_hash: String,
    // -- Public inputs --
    pub answer_double_hash: String,
    pub address: String,
}

impl From<&PanagramArgs> for PanagramCircuitInput {
    fn from(args: &PanagramArgs) -> Self {
        Self {
            guess_hash: format_field(&args.guess_hash),
            answer_double_hash: format_field(&args.answer_double_hash),
            address: format_field(&args.address),
        }
    }
}

/// Run the panagram flow and return the ABI-encoded `(bytes)`.
pub async fn generate_proof<E, B>(
    args: &PanagramArgs,
    engine: &E,
    backend: &B,
    quiet: Option<&LogControl>,
) -> Result<Bytes, ScriptError>
where
    E: WitnessEngine,
    B: ProofBackend,
{
    let record = InputRecord::from_inputs(&PanagramCircuitInput::from(args))?;
    let generated = pipeline::prove(engine, backend, &record, quiet).await?;
    Ok(encode_proof(&generated.proof))
}

#[cfg(test)]
mod tests {
    use alloy::sol_types::SolValue;

    use super::*;
    use crate::pipeline::mocks::{FixedBackend, RecordingEngine};

    fn args() -> PanagramArgs {
        PanagramArgs {
            guess_hash: B256::left_padding_from(&[0x01, 0x02]),
            answer_double_hash: B256::left_padding_from(&[0x03, 0x04]),
            address: B256::left_padding_from(&[0xab; 20]),
        }
    }

    #[test]
    fn test_circuit_input_formatting() {
        let input = PanagramCircuitInput::from(&args());
        assert_eq!(
            input.guess_hash,
            "0x0000000000000000000000000000000000000000000000000000000000000102"
        );
        assert_eq!(
            input.address,
            "0x000000000000000000000000abababababababababababababababababababab"
        );
    }

    #[tokio::test]
    async fn test_generate_proof_discards_public_inputs() {
        let engine = RecordingEngine::default();
        let backend = FixedBackend::new(vec![B256::repeat_byte(0x01)]);

        let encoded = generate_proof(&args(), &engine, &backend, None).await.unwrap();
        let (proof,) = <(Bytes,)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(proof, backend.proof.proof);
        // offset + length + two words of proof data
        assert_eq!(encoded.len(), 32 + 32 + 64);

        let seen = engine.seen.lock().unwrap();
        let toml = seen[0].to_toml().unwrap();
        assert!(toml.contains("guess_hash = "));
        assert!(toml.contains("answer_double_hash = "));
        assert!(toml.contains("address = "));
    }
}
