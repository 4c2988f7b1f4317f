//! Mixer withdrawal proof for Foundry `vm.ffi`.
//!
//! Prints `abi.encode(bytes proof, bytes32[] publicInputs)` as hex on stdout.
//!
//! Run with:
//!   mixer_proof <nullifier> <secret> <recipient> <leaf>...

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::{B256, Bytes};

use noir_ffi_prover::adapters::bb_prover::BbBackend;
use noir_ffi_prover::adapters::nargo::NargoExecutor;
use noir_ffi_prover::cli::{self, field_arg};
use noir_ffi_prover::config::ProverConfig;
use noir_ffi_prover::logging::{self, LogControl};
use noir_ffi_prover::scripts::mixer::{self, MixerArgs, DEFAULT_PACKAGE};
use noir_ffi_prover::ScriptError;

#[derive(clap::Parser)]
#[command(name = "mixer_proof", about = "Generate a mixer withdrawal proof")]
struct Args {
    /// Path to an optional TOML configuration file.
    #[arg(long, env = "FFI_PROVER_CONFIG")]
    config: Option<PathBuf>,

    #[arg(value_parser = field_arg)]
    nullifier: B256,

    #[arg(value_parser = field_arg)]
    secret: B256,

    /// Recipient address, as 20 bytes or left-padded to 32.
    #[arg(value_parser = field_arg)]
    recipient: B256,

    /// Deposit commitments, in insertion order.
    #[arg(value_parser = field_arg, required = true)]
    leaves: Vec<B256>,
}

async fn run(args: Args, logs: &LogControl) -> Result<Bytes, ScriptError> {
    let config = ProverConfig::resolve(args.config.as_deref(), DEFAULT_PACKAGE)?;
    let engine = NargoExecutor::from_config(&config)?;
    let backend = BbBackend::from_config(&config);

    let mixer_args = MixerArgs {
        nullifier: args.nullifier,
        secret: args.secret,
        recipient: args.recipient,
        leaves: args.leaves,
    };
    let quiet = config.quiet_backend.then_some(logs);
    mixer::generate_proof(&mixer_args, &config.merkle, &engine, &backend, quiet).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Args = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    let logs = logging::init();

    let encoded = match run(args, &logs).await {
        Ok(encoded) => encoded,
        Err(e) => {
            cli::report_error(&format!("proof generation failed: {e}"));
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = cli::write_output(std::io::stdout().lock(), &encoded) {
        cli::report_error(&format!("cannot write proof to stdout: {e}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
