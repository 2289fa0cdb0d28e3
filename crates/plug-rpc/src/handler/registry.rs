//! Method registry.
//!
//! Maps method names to handlers. Reserved introspection names are refused
//! at registration time so a request can never reach a handler through
//! them.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = MethodRegistry::new();
//!
//! registry.register("echo", |data| Ok(Value::Object(data)))?;
//! registry.register_typed("sum", |args: SumArgs| Ok(args.a + args.b))?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::error::{HandlerError, PlugError, RegistryError, RuntimeFault};
use crate::domain::methods::ReservedMethod;
use crate::domain::params::Payload;

/// Trait for method implementations.
pub trait MethodHandler: Send + Sync + 'static {
    /// Handle a call with the request's data payload.
    fn call(&self, data: Payload) -> Result<Value, PlugError>;
}

/// Handler taking the raw payload.
pub struct RawHandler<F>
where
    F: Fn(Payload) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    handler: F,
}

impl<F> RawHandler<F>
where
    F: Fn(Payload) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> MethodHandler for RawHandler<F>
where
    F: Fn(Payload) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    fn call(&self, data: Payload) -> Result<Value, PlugError> {
        (self.handler)(data).map_err(PlugError::from)
    }
}

/// Wrapper that deserializes the payload before calling the handler.
pub struct TypedHandler<F, T, R>
where
    F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(T) -> R>,
}

impl<F, T, R> TypedHandler<F, T, R>
where
    F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T, R> MethodHandler for TypedHandler<F, T, R>
where
    F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    fn call(&self, data: Payload) -> Result<Value, PlugError> {
        let args: T =
            serde_json::from_value(Value::Object(data)).map_err(HandlerError::invalid_params)?;

        let result = (self.handler)(args)?;

        serde_json::to_value(result)
            .map_err(|e| RuntimeFault::new(format!("failed to encode method result: {}", e)).into())
    }
}

/// Registry mapping method names to handlers.
#[derive(Default)]
pub struct MethodRegistry {
    /// Methods by name, sorted for listing
    methods: BTreeMap<String, Box<dyn MethodHandler>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler implementation.
    pub fn register_handler(
        &mut self,
        name: &str,
        handler: impl MethodHandler,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if ReservedMethod::is_reserved(name) {
            return Err(RegistryError::Reserved(name.to_string()));
        }
        if self.methods.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }

        self.methods.insert(name.to_string(), Box::new(handler));
        Ok(())
    }

    /// Register a closure over the raw payload.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(Payload) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register_handler(name, RawHandler::new(handler))
    }

    /// Register a closure over a deserialized argument type.
    ///
    /// A payload that does not fit `T` fails the call with code 400.
    pub fn register_typed<F, T, R>(&mut self, name: &str, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
        R: Serialize + 'static,
    {
        self.register_handler(name, TypedHandler::new(handler))
    }

    /// Get a handler by method name.
    pub fn get(&self, name: &str) -> Option<&dyn MethodHandler> {
        self.methods.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
