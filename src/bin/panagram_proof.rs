//! Panagram guess proof for Foundry `vm.ffi`.
//!
//! Prints `abi.encode(bytes proof)` as hex on stdout.
//!
//! Run with:
//!   panagram_proof <guess_hash> <answer_double_hash> <address>
//!
//! Values are read as Noir reads them: hex with `0x`, decimal without.

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::{B256, Bytes};

use noir_ffi_prover::adapters::bb_prover::BbBackend;
use noir_ffi_prover::adapters::nargo::NargoExecutor;
use noir_ffi_prover::cli::{self, noir_field_arg};
use noir_ffi_prover::config::ProverConfig;
use noir_ffi_prover::logging::{self, LogControl};
use noir_ffi_prover::scripts::panagram::{self, PanagramArgs, DEFAULT_PACKAGE};
use noir_ffi_prover::ScriptError;

#[derive(clap::Parser)]
#[command(name = "panagram_proof", about = "Generate a panagram guess proof")]
struct Args {
    /// Path to an optional TOML configuration file.
    #[arg(long, env = "FFI_PROVER_CONFIG")]
    config: Option<PathBuf>,

    #[arg(value_parser = noir_field_arg)]
    guess_hash: B256,

    #[arg(value_parser = noir_field_arg)]
    answer_double_hash: B256,

    #[arg(value_parser = noir_field_arg)]
    address: B256,
}

async fn run(args: Args, logs: &LogControl) -> Result<Bytes, ScriptError> {
    let config = ProverConfig::resolve(args.config.as_deref(), DEFAULT_PACKAGE)?;
    let engine = NargoExecutor::from_config(&config)?;
    let backend = BbBackend::from_config(&config);

    let panagram_args = PanagramArgs {
        guess_hash: args.guess_hash,
        answer_double_hash: args.answer_double_hash,
        address: args.address,
    };
    let quiet = config.quiet_backend.then_some(logs);
    panagram::generate_proof(&panagram_args, &engine, &backend, quiet).await
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
