//! Plug-RPC - signed query-string RPC dispatcher.
//!
//! A caller sends a method name, a set of parameters and a signature over
//! those parameters. The service verifies the signature against a shared
//! secret, dispatches to a registered method and answers with a uniform
//! JSON envelope (optionally JSONP-wrapped).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          PLUG SERVICE                                 │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │   RawQuery (literal string | structured map)                          │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   codec::query      ── best-effort JSON upgrade of every value        │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   domain::namespace ── keep `buttplug_*`, strip the prefix            │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   domain::request   ── method / signature / callback + data           │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   dispatcher        ── signature check, reserved methods, registry    │
//! │        │                                                              │
//! │        ▼                                                              │
//! │   domain::envelope  ── {method, success, response | error}           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any stage can fail with a [`PlugError`]; the service maps it into the
//! failure envelope. Nothing escapes to the transport.
//!
//! # Usage
//!
//! ```ignore
//! use plug_rpc::{HandlerBinding, HandlerError, PlugConfig, PlugService, RawQuery};
//! use serde_json::json;
//!
//! let binding = HandlerBinding::builder()
//!     .secret("s3cr3t")
//!     .method("echo", |data| Ok(json!(data)))
//!     .build()?;
//!
//! let service = PlugService::new(PlugConfig::default(), binding)?;
//! let response = service.handle(&RawQuery::from("?buttplug_method=_version&buttplug_signature=..."));
//! println!("{}", response.body);
//! ```
//!
//! # Security
//!
//! - Signatures are compared in constant time
//! - Verification is only skipped when the binding opts into `debug`
//! - Runtime faults are masked as `Server error` outside debug mode

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod client;
pub mod codec;
pub mod dispatcher;
pub mod domain;
pub mod handler;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use client::SignedQuery;
pub use dispatcher::Dispatcher;
pub use domain::config::{BindingConfig, ConfigError, PlugConfig};
pub use domain::correlation::RequestId;
pub use domain::envelope::{ErrorBody, PlugResponse, ResponseEnvelope, CONTENT_TYPE};
pub use domain::error::{
    codes, BindingError, FaultExposure, HandlerError, PlugError, RegistryError, RuntimeFault,
};
pub use domain::methods::{ReservedMethod, PROTOCOL_VERSION};
pub use domain::namespace::Namespace;
pub use domain::params::{ParamValue, ParameterSet, Payload, RawQuery};
pub use domain::request::Request;
pub use domain::signature::{sign, verify};
pub use handler::{HandlerBinding, HandlerBindingBuilder, MethodHandler, MethodRegistry};
pub use ports::inbound::{PlugApi, Reply};
pub use service::PlugService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server identification string
pub fn server_version() -> String {
    format!("PlugRpc/v{}/rust", VERSION)
}
