//! Shared glue for the proof binaries.

use std::io::Write;
use std::process::ExitCode;

use alloy::primitives::{hex, B256};
use tracing::{error, Level};

use crate::crypto::field::{parse_field, parse_noir_field};

/// clap value parser for hex field-element arguments.
///
/// Addresses go through here too: 20-byte and left-padded 32-byte forms
/// yield the same value.
pub fn field_arg(text: &str) -> Result<B256, String> {
    parse_field(text).map_err(|e| e.to_string())
}

/// clap value parser for arguments handed to Noir as written (decimal unless `0x`).
pub fn noir_field_arg(text: &str) -> Result<B256, String> {
    parse_noir_field(text).map_err(|e| e.to_string())
}

/// Report a fatal error through the log, or straight to stderr when the
/// filter drops `error` events.
pub fn report_error(message: &str) {
    if tracing::enabled!(Level::ERROR) {
        error!("{message}");
    } else {
        eprintln!("{message}");
    }
}

/// Parse arguments, mapping every usage error to exit status 1.
///
/// `--help` and `--version` still print to stdout and exit 0.
pub fn parse_args<P: clap::Parser>() -> Result<P, ExitCode> {
    P::try_parse().map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Write `0x`-prefixed hex of `encoded`, without a trailing newline.
pub fn write_output<W: Write>(mut out: W, encoded: &[u8]) -> std::io::Result<()> {
    out.write_all(hex::encode_prefixed(encoded).as_bytes())?;
    out.flush()
}
