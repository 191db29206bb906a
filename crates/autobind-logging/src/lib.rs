//! autobind-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`LogLevel`] for the `--log-level` setting
//! - [`init_logging`] installing a stderr `fmt` subscriber, overridable via `RUST_LOG`

mod init;
mod level;

pub use init::{init_logging, installed_level};
pub use level::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging};
}
