use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::proof::InputRecord;
use crate::ports::prover::ProverError;

/// Parameter visibility as recorded in the compiled circuit ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    #[serde(rename = "databus")]
    DataBus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiParameter {
    pub name: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitAbi {
    pub parameters: Vec<AbiParameter>,
}

/// Compiled circuit descriptor written by `nargo compile` to `target/<package>.json`.
///
/// Only the fields the scripts inspect are deserialized; the bytecode is kept
/// as an opaque string for the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitArtifact {
    /// Compiler version; absent in artifacts from very old nargo releases.
    #[serde(default)]
    pub noir_version: Option<String>,
    pub abi: CircuitAbi,
    pub bytecode: String,
    #[serde(skip)]
    path: PathBuf,
}

impl CircuitArtifact {
    /// Load and parse a circuit artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ProverError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProverError::ArtifactNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut artifact: Self = serde_json::from_str(&content).map_err(|e| {
            ProverError::MalformedArtifact(format!("{}: {e}", path.display()))
        })?;
        if artifact.bytecode.is_empty() {
            return Err(ProverError::MalformedArtifact(format!(
                "{}: empty bytecode",
                path.display()
            )));
        }
        artifact.path = path.to_path_buf();
        Ok(artifact)
    }

    /// Where the artifact was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of public parameters, in ABI order.
    pub fn public_parameters(&self) -> Vec<&str> {
        self.abi
            .parameters
            .iter()
            .filter(|p| p.visibility == Visibility::Public)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Check that `record` supplies exactly the parameters the circuit declares.
    pub fn check_inputs(&self, record: &InputRecord) -> Result<(), ProverError> {
        let missing: Vec<&str> = self
            .abi
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| record.get(name).is_none())
            .collect();
        let unknown: Vec<&str> = record
            .keys()
            .filter(|key| !self.abi.parameters.iter().any(|p| p.name == *key))
            .collect();

        if missing.is_empty() && unknown.is_empty() {
            return Ok(());
        }
        Err(ProverError::InputMismatch {
            missing: missing.join(", "),
            unknown: unknown.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    const ARTIFACT: &str = r#"{
        "noir_version": "1.0.0-beta.3+0",
        "hash": 1234,
        "abi": {
            "parameters": [
                { "name": "guess_hash", "type": { "kind": "field" }, "visibility": "private" },
                { "name": "answer_double_hash", "type": { "kind": "field" }, "visibility": "public" },
                { "name": "address", "type": { "kind": "field" }, "visibility": "public" }
            ],
            "return_type": null,
            "error_types": {}
        },
        "bytecode": "H4sIAAAAAAAA/wEAAP//AAAAAAAAAAA=",
        "debug_symbols": "",
        "file_map": {}
    }"#;

    #[derive(Serialize)]
    struct Inputs<'a> {
        guess_hash: &'a str,
        answer_double_hash: &'a str,
        address: &'a str,
    }

    fn write_artifact(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("zk_panagram.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), ARTIFACT);

        let artifact = CircuitArtifact::load(&path).unwrap();
        assert_eq!(artifact.abi.parameters.len(), 3);
        assert_eq!(artifact.noir_version.as_deref(), Some("1.0.0-beta.3+0"));
        assert_eq!(artifact.path(), path.as_path());
        assert_eq!(artifact.public_parameters(), vec!["answer_double_hash", "address"]);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = CircuitArtifact::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProverError::ArtifactNotFound(_)));
    }

    #[test]
    fn test_malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "{ not json");
        assert!(matches!(
            CircuitArtifact::load(&path),
            Err(ProverError::MalformedArtifact(_))
        ));

        let path = write_artifact(dir.path(), r#"{ "abi": { "parameters": [] }, "bytecode": "" }"#);
        assert!(matches!(
            CircuitArtifact::load(&path),
            Err(ProverError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_check_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = CircuitArtifact::load(&write_artifact(dir.path(), ARTIFACT)).unwrap();

        let record = InputRecord::from_inputs(&Inputs {
            guess_hash: "0x01",
            answer_double_hash: "0x02",
            address: "0x03",
        })
        .unwrap();
        artifact.check_inputs(&record).unwrap();
    }

    #[test]
    fn test_check_inputs_reports_mismatch() {
        #[derive(Serialize)]
        struct Wrong {
            guess_hash: String,
            recipient: String,
        }

        let dir = tempfile::tempdir().unwrap();
        let artifact = CircuitArtifact::load(&write_artifact(dir.path(), ARTIFACT)).unwrap();
        let record = InputRecord::from_inputs(&Wrong {
            guess_hash: "0x01".into(),
            recipient: "0x02".into(),
        })
        .unwrap();

        match artifact.check_inputs(&record) {
            Err(ProverError::InputMismatch { missing, unknown }) => {
                assert_eq!(missing, "answer_double_hash, address");
                assert_eq!(unknown, "recipient");
            }
            other => panic!("expected input mismatch, got {other:?}"),
        }
    }
}
