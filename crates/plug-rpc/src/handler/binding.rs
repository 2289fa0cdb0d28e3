//! Handler binding: secret, flags and registered methods.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::registry::{MethodHandler, MethodRegistry};
use crate::domain::config::BindingConfig;
use crate::domain::error::{BindingError, FaultExposure, HandlerError, RegistryError};
use crate::domain::params::Payload;

/// The API surface bound to a service.
///
/// Built once and read-only afterwards; share it behind `Arc` when serving
/// concurrent requests.
pub struct HandlerBinding {
    secret: String,
    debug: bool,
    list_methods: bool,
    registry: MethodRegistry,
}

impl HandlerBinding {
    pub fn builder() -> HandlerBindingBuilder {
        HandlerBindingBuilder::default()
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Signature verification skipped, fault details exposed
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// `_listMethods` allowed
    pub fn list_methods(&self) -> bool {
        self.list_methods
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn fault_exposure(&self) -> FaultExposure {
        FaultExposure::from_debug_flag(Some(self.debug))
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("secret", &"<redacted>")
            .field("debug", &self.debug)
            .field("list_methods", &self.list_methods)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Builder for [`HandlerBinding`].
///
/// Registration errors are held until [`build`](Self::build) so calls can
/// be chained.
pub struct HandlerBindingBuilder {
    secret: Option<String>,
    debug: bool,
    list_methods: bool,
    registry: MethodRegistry,
    error: Option<RegistryError>,
}

impl Default for HandlerBindingBuilder {
    fn default() -> Self {
        Self {
            secret: None,
            debug: false,
            list_methods: true,
            registry: MethodRegistry::new(),
            error: None,
        }
    }
}

impl HandlerBindingBuilder {
    /// Start from the `[binding]` config section
    pub fn from_config(config: &BindingConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            debug: config.debug,
            list_methods: config.list_methods,
            ..Self::default()
        }
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn list_methods(mut self, list_methods: bool) -> Self {
        self.list_methods = list_methods;
        self
    }

    /// Register a closure over the raw payload
    pub fn method<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Payload) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        let result = self.registry.register(name, handler);
        self.record(result)
    }

    /// Register a closure over a deserialized argument type
    pub fn typed_method<F, T, R>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
        R: Serialize + 'static,
    {
        let result = self.registry.register_typed(name, handler);
        self.record(result)
    }

    /// Register a handler implementation
    pub fn handler(mut self, name: &str, handler: impl MethodHandler) -> Self {
        let result = self.registry.register_handler(name, handler);
        self.record(result)
    }

    /// Replace the registry wholesale
    pub fn registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn record(mut self, result: Result<(), RegistryError>) -> Self {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Fails without a non-empty secret or on the first bad registration
    pub fn build(self) -> Result<HandlerBinding, BindingError> {
        let secret = self
            .secret
            .filter(|s| !s.is_empty())
            .ok_or(BindingError::MissingSecret)?;

        if let Some(e) = self.error {
            return Err(e.into());
        }

        Ok(HandlerBinding {
            secret,
            debug: self.debug,
            list_methods: self.list_methods,
            registry: self.registry,
        })
    }
}
