//! Domain types for the dispatcher.
//!
//! Pure data and rules: parameters, requests, envelopes, errors and the
//! signature scheme. Nothing here performs I/O.

pub mod config;
pub mod correlation;
pub mod envelope;
pub mod error;
pub mod methods;
pub mod namespace;
pub mod params;
pub mod request;
pub mod signature;

// Re-exports for convenience
pub use config::{BindingConfig, ConfigError, PlugConfig};
pub use correlation::RequestId;
pub use envelope::{ErrorBody, Outcome, PlugResponse, ResponseEnvelope, CONTENT_TYPE};
pub use error::{PlugError, PlugResult};
pub use methods::ReservedMethod;
pub use namespace::Namespace;
pub use params::{ParamValue, ParameterSet, Payload, RawQuery};
pub use request::Request;
