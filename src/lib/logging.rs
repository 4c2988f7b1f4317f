//! Logging setup for the proof binaries.
//!
//! All log output goes to stderr: stdout carries the ABI-encoded proof that
//! the calling test harness decodes. The filter is installed behind a reload
//! layer so a noisy stage can be silenced for a scope and restored afterwards.

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info";

/// Handle to the process-wide log filter.
#[derive(Clone)]
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogControl {
    pub fn new(handle: reload::Handle<EnvFilter, Registry>) -> Self {
        Self { handle }
    }

    /// Replace the active filter with `directives` until the returned guard drops.
    pub fn override_filter(&self, directives: &str) -> Result<LogOverride, reload::Error> {
        let previous = self.handle.with_current(|filter| filter.to_string())?;
        self.handle.reload(EnvFilter::new(directives))?;
        Ok(LogOverride {
            handle: self.handle.clone(),
            previous,
        })
    }

    /// Current filter directives, rendered as a string.
    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}

/// Restores the filter that was active before `LogControl::override_filter`.
#[must_use = "the previous filter is restored when this guard is dropped"]
pub struct LogOverride {
    handle: reload::Handle<EnvFilter, Registry>,
    previous: String,
}

impl Drop for LogOverride {
    fn drop(&mut self) {
        // Subscriber may already be gone at shutdown.
        let _ = self.handle.reload(EnvFilter::new(&self.previous));
    }
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`), stderr writer.
pub fn init() -> LogControl {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init();

    LogControl::new(handle)
}
