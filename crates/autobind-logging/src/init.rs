//! Global subscriber installation

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::LogLevel;

static INSTALLED: OnceCell<LogLevel> = OnceCell::new();

/// Install a stderr subscriber filtered at `level`
///
/// `RUST_LOG`, when set and valid, takes precedence over `level`. Only the first
/// call installs anything; later calls return the level already in effect.
pub fn init_logging(level: LogLevel) -> LogLevel {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(level.to_filter().into()));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        // Another subscriber may already be global (tests, embedding apps).
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();

        level
    })
}

/// Level passed to the first [`init_logging`] call, if any
pub fn installed_level() -> Option<LogLevel> {
    INSTALLED.get().copied()
}
