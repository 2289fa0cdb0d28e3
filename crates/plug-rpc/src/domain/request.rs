//! Request extraction from a filtered parameter set.

use crate::domain::params::{ParamValue, ParameterSet, Payload};
use serde_json::Value;
use tracing::warn;

/// Reserved key naming the method
pub const METHOD_KEY: &str = "method";
/// Reserved key carrying the signature
pub const SIGNATURE_KEY: &str = "signature";
/// Reserved key naming the JSONP callback
pub const CALLBACK_KEY: &str = "callback";

/// One decoded call.
///
/// Reserved keys are always removed from `data`, whether or not their
/// values were usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// Requested method, `None` when missing or blank
    pub method: Option<String>,
    /// Caller-supplied signature, `None` when missing or blank
    pub signature: Option<String>,
    /// JSONP callback, `None` when missing, blank or not an identifier
    pub callback: Option<String>,
    /// Remaining parameters in request order
    pub data: ParameterSet,
}

impl Request {
    /// Split reserved keys off a namespace-filtered parameter set
    pub fn from_params(mut params: ParameterSet) -> Self {
        let method = take_reserved(&mut params, METHOD_KEY);
        let signature = take_reserved(&mut params, SIGNATURE_KEY);
        let callback = take_reserved(&mut params, CALLBACK_KEY).and_then(|name| {
            if is_valid_callback(&name) {
                Some(name)
            } else {
                warn!(callback = %name, "Ignoring callback that is not a JavaScript identifier");
                None
            }
        });

        Self {
            method,
            signature,
            callback,
            data: params,
        }
    }

    /// Data payload as handed to methods
    pub fn payload(&self) -> Payload {
        self.data.to_payload()
    }
}

/// Remove a reserved key unless blank.
///
/// JSON strings yield their decoded text; other values keep their raw text.
fn take_reserved(params: &mut ParameterSet, key: &str) -> Option<String> {
    match params.remove(key).filter(|value| !value.is_blank())? {
        ParamValue::Json {
            value: Value::String(text),
            ..
        } => Some(text),
        value => value.raw().map(str::to_string),
    }
}

/// JavaScript identifier path: `[A-Za-z_$][A-Za-z0-9_$.]*`
pub fn is_valid_callback(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
}

impl From<ParameterSet> for Request {
    fn from(params: ParameterSet) -> Self {
        Self::from_params(params)
    }
}
