//! Method dispatch.
//!
//! Resolution order for one request:
//!
//! 1. `method` must be present (`NoMethod`)
//! 2. `_listMethods` on a binding with listing disabled fails right away
//!    (`ListingDisabled`), whatever the signature
//! 3. unless the binding runs in debug mode, `signature` must be present
//!    (`NoSignature`) and match (`InvalidSignature`)
//! 4. reserved methods are answered here
//! 5. anything else must be registered (`UnknownMethod`) and is invoked
//!    with the data payload; a panic inside it becomes a runtime fault

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::domain::error::{PlugError, PlugResult, RuntimeFault};
use crate::domain::methods::{ReservedMethod, PROTOCOL_VERSION};
use crate::domain::request::Request;
use crate::domain::signature;
use crate::handler::HandlerBinding;

/// Resolves and invokes methods against one binding
pub struct Dispatcher<'a> {
    binding: &'a HandlerBinding,
}

impl<'a> Dispatcher<'a> {
    pub fn new(binding: &'a HandlerBinding) -> Self {
        Self { binding }
    }

    /// Run the request; the value becomes the envelope's `response`
    pub fn dispatch(&self, request: &Request) -> PlugResult<Value> {
        let method = request.method.as_deref().ok_or(PlugError::NoMethod)?;
        let reserved = ReservedMethod::resolve(method);

        if reserved == Some(ReservedMethod::ListMethods) && !self.binding.list_methods() {
            warn!(method, "Method listing requested but disabled");
            return Err(PlugError::ListingDisabled);
        }

        self.authenticate(request)?;

        if let Some(reserved) = reserved {
            debug!(method, resolved = reserved.name(), "Answering reserved method");
        }

        match reserved {
            Some(ReservedMethod::Version) => Ok(json!(PROTOCOL_VERSION)),
            Some(ReservedMethod::ListMethods) => {
                Ok(json!(self.binding.registry().method_names()))
            }
            None => self.invoke(method, request),
        }
    }

    fn authenticate(&self, request: &Request) -> PlugResult<()> {
        if self.binding.debug() {
            debug!("Debug binding, signature verification skipped");
            return Ok(());
        }

        let supplied = request.signature.as_deref().ok_or(PlugError::NoSignature)?;
        if !signature::verify(supplied, &request.data, self.binding.secret()) {
            warn!(method = ?request.method, "Signature mismatch");
            return Err(PlugError::InvalidSignature);
        }

        debug!("Signature verified");
        Ok(())
    }

    fn invoke(&self, method: &str, request: &Request) -> PlugResult<Value> {
        let handler = self
            .binding
            .registry()
            .get(method)
            .ok_or_else(|| PlugError::UnknownMethod(method.to_string()))?;

        debug!(method, params = request.data.len(), "Invoking method");
        let payload = request.payload();

        match catch_unwind(AssertUnwindSafe(|| handler.call(payload))) {
            Ok(result) => result,
            Err(panic) => {
                let fault = RuntimeFault::from_panic(panic);
                error!(method, fault = %fault, "Method panicked");
                Err(fault.into())
            }
        }
    }
}
