//! Response envelope.
//!
//! Every request yields exactly one envelope:
//!
//! ```json
//! {"method":"echo","success":true,"response":{...}}
//! {"method":null,"success":false,"error":{"message":"No method","code":400}}
//! ```

use crate::domain::error::{FaultExposure, PlugError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Content type of every response body
pub const CONTENT_TYPE: &str = "text/plain; charset=\"utf-8\"";

/// Body used if the envelope itself cannot be encoded
const FALLBACK_BODY: &str =
    r#"{"method":null,"success":false,"error":{"message":"Server error","code":500}}"#;

/// Failure details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: i64,
}

/// Call result
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(ErrorBody),
}

/// `{method, success, response | error}`
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Method name when known
    pub method: Option<String>,
    pub outcome: Outcome,
}

impl ResponseEnvelope {
    pub fn success(method: impl Into<String>, response: Value) -> Self {
        Self {
            method: Some(method.into()),
            outcome: Outcome::Success(response),
        }
    }

    pub fn failure(method: Option<String>, message: impl Into<String>, code: i64) -> Self {
        Self {
            method,
            outcome: Outcome::Failure(ErrorBody {
                message: message.into(),
                code,
            }),
        }
    }

    /// Map a pipeline error into the failure shape
    pub fn from_error(method: Option<String>, err: &PlugError, exposure: FaultExposure) -> Self {
        Self::failure(method, err.public_message(exposure), err.code())
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    /// Error details, if this is a failure
    pub fn error(&self) -> Option<&ErrorBody> {
        match &self.outcome {
            Outcome::Failure(body) => Some(body),
            Outcome::Success(_) => None,
        }
    }

    /// Response value, if this is a success
    pub fn response(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Encode as JSON, wrapped as `callback(<json>);` when a callback is given
    pub fn render(&self, callback: Option<&str>) -> PlugResponse {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to encode response envelope");
                FALLBACK_BODY.to_string()
            }
        };

        let body = match callback {
            Some(name) => format!("{}({});", name, json),
            None => json,
        };

        PlugResponse {
            content_type: CONTENT_TYPE,
            body,
        }
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("method", &self.method)?;
        match &self.outcome {
            Outcome::Success(response) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("response", response)?;
            }
            Outcome::Failure(error) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}

/// Transport-ready response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlugResponse {
    pub content_type: &'static str,
    pub body: String,
}
