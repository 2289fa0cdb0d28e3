//! Plug service - pipeline entry point.
//!
//! Decode → namespace filter → request extraction → dispatch → envelope.
//! Every failure on the way is mapped into the failure envelope here; the
//! transport only ever sees a [`PlugResponse`].

use std::sync::Arc;

use tracing::{debug, info_span, warn};

use crate::codec::QueryCodec;
use crate::dispatcher::Dispatcher;
use crate::domain::config::{ConfigError, PlugConfig};
use crate::domain::correlation::RequestId;
use crate::domain::envelope::{PlugResponse, ResponseEnvelope};
use crate::domain::error::{BindingError, FaultExposure, PlugError, RuntimeFault};
use crate::domain::namespace::Namespace;
use crate::domain::params::RawQuery;
use crate::domain::request::Request;
use crate::handler::HandlerBinding;
use crate::ports::inbound::{PlugApi, Reply};

/// Dispatcher bound to one handler binding
#[derive(Debug, Clone)]
pub struct PlugService {
    config: PlugConfig,
    namespace: Namespace,
    binding: Arc<HandlerBinding>,
}

impl PlugService {
    /// Create a new service
    pub fn new(config: PlugConfig, binding: HandlerBinding) -> Result<Self, ConfigError> {
        Self::with_shared(config, Arc::new(binding))
    }

    /// Create a service over a binding shared with other services
    pub fn with_shared(
        config: PlugConfig,
        binding: Arc<HandlerBinding>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            namespace: Namespace::from_config(&config),
            config,
            binding,
        })
    }

    /// Bind, handle and encode in one call.
    ///
    /// Binding and configuration errors are reported in the envelope like
    /// any other failure, so this always yields exactly one response.
    pub fn respond_once(
        binding: Result<HandlerBinding, BindingError>,
        query: &RawQuery,
        config: PlugConfig,
    ) -> PlugResponse {
        let binding = match binding {
            Ok(binding) => binding,
            Err(e) => {
                warn!(error = %e, "Handler binding rejected");
                // No binding yet, so details are not masked
                let exposure = FaultExposure::from_debug_flag(None);
                return ResponseEnvelope::from_error(None, &PlugError::from(e), exposure)
                    .render(None);
            }
        };

        let exposure = binding.fault_exposure();
        match Self::new(config, binding) {
            Ok(service) => service.handle(query),
            Err(e) => Self::config_failure(&e, exposure),
        }
    }

    /// Failure response for a configuration that was rejected before any
    /// service could be built. Reported as a runtime fault (500).
    pub fn config_failure(err: &ConfigError, exposure: FaultExposure) -> PlugResponse {
        warn!(error = %err, "Invalid configuration");
        let fault = PlugError::from(RuntimeFault::new(err.to_string()));
        ResponseEnvelope::from_error(None, &fault, exposure).render(None)
    }

    pub fn config(&self) -> &PlugConfig {
        &self.config
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn binding(&self) -> &Arc<HandlerBinding> {
        &self.binding
    }

    /// Run the pipeline, returning the envelope and its callback
    pub fn process(&self, query: &RawQuery) -> Reply {
        let request_id = RequestId::new();
        let span = info_span!("plug_request", %request_id);
        let _enter = span.enter();

        let request = match QueryCodec::decode(query) {
            Ok(params) => Request::from_params(self.namespace.filter(params)),
            Err(e) => return self.failure(None, None, e),
        };

        debug!(
            method = ?request.method,
            params = request.data.len(),
            jsonp = request.callback.is_some(),
            "Request decoded"
        );

        match Dispatcher::new(&self.binding).dispatch(&request) {
            Ok(response) => {
                let method = request.method.unwrap_or_default();
                debug!(%method, "Request succeeded");
                Reply {
                    envelope: ResponseEnvelope::success(method, response),
                    callback: request.callback,
                }
            }
            Err(e) => self.failure(request.method, request.callback, e),
        }
    }

    /// Run the pipeline and encode the body
    pub fn handle(&self, query: &RawQuery) -> PlugResponse {
        self.process(query).render()
    }

    fn failure(&self, method: Option<String>, callback: Option<String>, err: PlugError) -> Reply {
        if err.is_fault() {
            tracing::error!(error = ?err, "Request failed with runtime fault");
        } else {
            warn!(code = err.code(), error = %err, "Request rejected");
        }

        Reply {
            envelope: ResponseEnvelope::from_error(method, &err, self.binding.fault_exposure()),
            callback,
        }
    }
}

impl PlugApi for PlugService {
    fn process(&self, query: &RawQuery) -> Reply {
        PlugService::process(self, query)
    }

    fn handle(&self, query: &RawQuery) -> PlugResponse {
        PlugService::handle(self, query)
    }
}
