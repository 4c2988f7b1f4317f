use std::path::{Path, PathBuf};

use alloy::primitives::B256;
use serde::Deserialize;

use crate::domain::merkle::{DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH};

/// Prover configuration, optionally loaded from TOML.
///
/// Every field has a default so the binaries run without a config file when
/// invoked from the contracts directory (circuits live in `../circuits`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    pub circuit: CircuitConfig,
    pub tools: ToolsConfig,
    pub merkle: MerkleConfig,
    /// Raise the log filter to `warn` while the backend is proving.
    pub quiet_backend: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Nargo project directory.
    pub dir: PathBuf,
    /// Nargo package name; the artifact is `target/<package>.json`.
    /// When absent, each binary supplies its own.
    pub package: Option<String>,
    pub prover_name: String,
    pub witness_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub nargo: PathBuf,
    pub bb: PathBuf,
    pub threads: Option<usize>,
    pub oracle_hash: String,
}

/// Shape of the deposit tree; must match the contract's tree.
///
/// Contracts usually hard-code a non-zero empty leaf, such as Tornado's
/// `keccak256("tornado") % p`. Set `zero_value` to the contract's `zeros(0)`,
/// or the computed root will differ from the on-chain one:
///
/// ```toml
/// [merkle]
/// depth = 20
/// zero_value = "0x2fe54c60d3acabf3343a35b6eba15db4821b340f76e741e2249685ed4899af6c"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MerkleConfig {
    pub depth: usize,
    /// Value of an empty leaf (default `0`).
    pub zero_value: B256,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            circuit: CircuitConfig::default(),
            tools: ToolsConfig::default(),
            merkle: MerkleConfig::default(),
            quiet_backend: true,
        }
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("../circuits"),
            package: None,
            prover_name: "Prover".to_string(),
            witness_name: "witness".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            nargo: PathBuf::from("nargo"),
            bb: PathBuf::from("bb"),
            threads: None,
            oracle_hash: "keccak".to_string(),
        }
    }
}

impl Default for MerkleConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_TREE_DEPTH,
            zero_value: B256::ZERO,
        }
    }
}

/// Errors from config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl ProverConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults; fill in `default_package`
    /// when the file does not name one.
    pub fn resolve(path: Option<&Path>, default_package: &str) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if config.circuit.package.is_none() {
            config.circuit.package = Some(default_package.to_string());
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merkle.depth == 0 || self.merkle.depth > MAX_TREE_DEPTH {
            return Err(ConfigError::Validation(format!(
                "merkle.depth must be in 1..={MAX_TREE_DEPTH}, got {}",
                self.merkle.depth
            )));
        }
        if self.circuit.package.as_deref() == Some("") {
            return Err(ConfigError::Validation("circuit.package must not be empty".into()));
        }
        if self.circuit.prover_name.is_empty() || self.circuit.witness_name.is_empty() {
            return Err(ConfigError::Validation(
                "circuit.prover_name and circuit.witness_name must not be empty".into(),
            ));
        }
        if self.tools.threads == Some(0) {
            return Err(ConfigError::Validation("tools.threads must be at least 1".into()));
        }
        Ok(())
    }

    pub fn package(&self) -> &str {
        self.circuit.package.as_deref().unwrap_or_default()
    }

    /// Compiled circuit path: `<dir>/target/<package>.json`.
    pub fn artifact_path(&self) -> PathBuf {
        self.circuit
            .dir
            .join("target")
            .join(format!("{}.json", self.package()))
    }
}
