//! Error taxonomy for the request pipeline.
//!
//! Every failure is surfaced in the failure envelope as a `{message, code}`
//! pair. Codes follow HTTP status semantics; `NoRequest` carries `0` because
//! it is raised before any request exists.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::Location;

/// Envelope error codes
pub mod codes {
    /// No discoverable query content
    pub const NO_REQUEST: i64 = 0;
    /// Missing method
    pub const BAD_REQUEST: i64 = 400;
    /// Missing signature, listing disabled
    pub const UNAUTHORIZED: i64 = 401;
    /// Signature mismatch
    pub const FORBIDDEN: i64 = 403;
    /// Unknown method
    pub const METHOD_NOT_ALLOWED: i64 = 405;
    /// Runtime faults, binding errors, default handler failures
    pub const SERVER_ERROR: i64 = 500;
}

/// Failure raised by a registered method.
///
/// Carries its own message and code into the envelope unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerError {
    /// Envelope code
    pub code: i64,
    /// Envelope message
    pub message: String,
}

impl HandlerError {
    /// Default message when a handler fails without saying why
    pub const DEFAULT_MESSAGE: &'static str = "Method call failed";

    /// Handler failure with the default code (500)
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_code(codes::SERVER_ERROR, message)
    }

    /// Handler failure with an explicit code
    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code,
            message: if message.is_empty() {
                Self::DEFAULT_MESSAGE.to_string()
            } else {
                message
            },
        }
    }

    /// Payload could not be converted into the handler's argument type
    pub fn invalid_params(details: impl fmt::Display) -> Self {
        Self::with_code(codes::BAD_REQUEST, format!("Invalid params: {}", details))
    }
}

impl Default for HandlerError {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for HandlerError {}

/// Source location of a runtime fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultLocation {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for FaultLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Failure of the runtime itself, as opposed to a business failure.
///
/// Details are only shown to callers when the binding runs in debug mode
/// (see [`FaultExposure`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFault {
    message: String,
    location: Option<FaultLocation>,
}

impl RuntimeFault {
    /// Record a fault at the caller's location
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = Location::caller();
        Self {
            message: message.into(),
            location: Some(FaultLocation {
                file: caller.file().to_string(),
                line: caller.line(),
            }),
        }
    }

    /// Convert a caught panic payload into a fault.
    ///
    /// Panic payloads carry no location, so none is recorded.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };

        Self {
            message,
            location: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&FaultLocation> {
        self.location.as_ref()
    }

    /// Message shown when details are exposed
    pub fn detailed_message(&self) -> String {
        match &self.location {
            Some(location) => format!("Server error: {} ({})", self.message, location),
            None => format!("Server error: {}", self.message),
        }
    }
}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detailed_message())
    }
}

/// How much of a runtime fault reaches the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultExposure {
    /// Generic `Server error`
    Masked,
    /// Message and location included
    Detailed,
}

impl FaultExposure {
    /// Exposure for a binding's debug flag; `None` means no binding yet.
    pub fn from_debug_flag(debug: Option<bool>) -> Self {
        match debug {
            Some(false) => FaultExposure::Masked,
            Some(true) | None => FaultExposure::Detailed,
        }
    }
}

/// Method registration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Method name is empty
    #[error("method name cannot be empty")]
    EmptyName,

    /// Name collides with a reserved introspection method
    #[error("method name is reserved: {0}")]
    Reserved(String),

    /// Name registered twice
    #[error("method already registered: {0}")]
    Duplicate(String),
}

/// Handler binding construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// No secret, or an empty one
    #[error("Handler binding must contain a secret key")]
    MissingSecret,

    /// Invalid method registration
    #[error("Invalid handler binding: {0}")]
    Registry(#[from] RegistryError),
}

/// Pipeline errors, one per row of the error table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlugError {
    /// Literal query has no `?` or `&`
    #[error("No request")]
    NoRequest,

    /// `method` missing or empty
    #[error("No method")]
    NoMethod,

    /// `signature` missing or empty while verification is active
    #[error("No signature")]
    NoSignature,

    /// Signature mismatch
    #[error("Invalid signature")]
    InvalidSignature,

    /// `_listMethods` requested on a binding that disables it
    #[error("Method listing has been disabled")]
    ListingDisabled,

    /// Requested name is not registered
    #[error("Unknown method")]
    UnknownMethod(String),

    /// Registered method failed
    #[error("{}", .0.message)]
    Handler(HandlerError),

    /// Runtime fault (message masked outside debug mode)
    #[error("Server error")]
    Runtime(RuntimeFault),

    /// Binding could not be constructed
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl PlugError {
    /// Envelope code
    pub fn code(&self) -> i64 {
        match self {
            PlugError::NoRequest => codes::NO_REQUEST,
            PlugError::NoMethod => codes::BAD_REQUEST,
            PlugError::NoSignature | PlugError::ListingDisabled => codes::UNAUTHORIZED,
            PlugError::InvalidSignature => codes::FORBIDDEN,
            PlugError::UnknownMethod(_) => codes::METHOD_NOT_ALLOWED,
            PlugError::Handler(e) => e.code,
            PlugError::Runtime(_) | PlugError::Binding(_) => codes::SERVER_ERROR,
        }
    }

    /// Message as shown to the caller
    pub fn public_message(&self, exposure: FaultExposure) -> String {
        match (self, exposure) {
            (PlugError::Runtime(fault), FaultExposure::Detailed) => fault.detailed_message(),
            _ => self.to_string(),
        }
    }

    /// True for failures of the runtime rather than of the request
    pub fn is_fault(&self) -> bool {
        matches!(self, PlugError::Runtime(_))
    }
}

impl From<HandlerError> for PlugError {
    fn from(e: HandlerError) -> Self {
        PlugError::Handler(e)
    }
}

impl From<RuntimeFault> for PlugError {
    fn from(fault: RuntimeFault) -> Self {
        PlugError::Runtime(fault)
    }
}

/// Result type for pipeline operations
pub type PlugResult<T> = Result<T, PlugError>;
