use std::io::IsTerminal;

use rsinit_base::{err, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

// Logs go to stderr so `status` and `plan` output on stdout stays clean.
// RUST_LOG overrides the default filter; NO_COLOR or a non-terminal stderr
// turns off ANSI.
pub fn init_logging() -> Result<()> {
    let ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| err(format!("installing log subscriber: {}", e)))
}
