//! Tracing subscriber setup

use crate::error::{Error, Result};
use crate::types::LogLevel;

/// Install a global fmt subscriber
///
/// `RUST_LOG` directives are honoured, `level` is added on top of them.
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: LogLevel) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::from(level).into()),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logging: {e}")))
}
