//! Logging utilities.
//!
//! Every tinta crate logs through the `log` facade; binaries call
//! [`init_logging`] once at startup to install the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
