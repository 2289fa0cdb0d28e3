//! # Plug Telemetry
//!
//! Logging setup shared by the Plug-RPC binaries.
//!
//! Logs always go to **stderr**: stdout carries the response body in
//! one-shot (CGI) mode.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plug_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PLUG_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PLUG_JSON_LOGS` | `false` | JSON formatted logs |
//! | `PLUG_SERVICE_NAME` | `plug-rpc` | Service name field |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}
