//! Ports layer - API the transports drive.

pub mod inbound;

pub use inbound::{PlugApi, Reply};
