//! # Inbound Ports (Driving Ports / API)
//!
//! What transports call. Implementations must be thread-safe
//! (`Send + Sync`) so one instance can serve concurrent requests.

use crate::domain::envelope::{PlugResponse, ResponseEnvelope};
use crate::domain::params::RawQuery;

/// Envelope plus the callback it should be wrapped in
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub envelope: ResponseEnvelope,
    pub callback: Option<String>,
}

impl Reply {
    /// Encode for the transport
    pub fn render(&self) -> PlugResponse {
        self.envelope.render(self.callback.as_deref())
    }
}

/// Primary dispatcher API.
pub trait PlugApi: Send + Sync {
    /// Run the pipeline without encoding the result.
    ///
    /// Never fails: every error is already mapped into the envelope.
    fn process(&self, query: &RawQuery) -> Reply;

    /// Run the pipeline and encode the body.
    fn handle(&self, query: &RawQuery) -> PlugResponse {
        self.process(query).render()
    }
}
