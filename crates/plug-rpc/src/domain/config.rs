//! Dispatcher configuration with validation.
//!
//! The pipeline itself only reads the namespace settings. The `binding`
//! section is consumed by the shipped tools to build a
//! [`HandlerBinding`](crate::HandlerBinding) without code.
//!
//! ```toml
//! input_namespace = "buttplug"
//! namespace_separator = "_"
//!
//! [binding]
//! secret = "s3cr3t"
//! debug = false
//! list_methods = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default key prefix
pub const DEFAULT_NAMESPACE: &str = "buttplug";

/// Default prefix separator
pub const DEFAULT_SEPARATOR: &str = "_";

/// Characters that would make a prefix unreachable in query text
const QUERY_DELIMITERS: [char; 3] = ['&', '=', '?'];

/// Main dispatcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlugConfig {
    /// Key prefix selecting this service's parameters (empty disables filtering)
    pub input_namespace: String,
    /// Separator between namespace and key
    pub namespace_separator: String,
    /// Handler binding settings used by the tools
    pub binding: BindingConfig,
}

impl Default for PlugConfig {
    fn default() -> Self {
        Self {
            input_namespace: DEFAULT_NAMESPACE.to_string(),
            namespace_separator: DEFAULT_SEPARATOR.to_string(),
            binding: BindingConfig::default(),
        }
    }
}

/// Handler binding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Shared signing secret
    pub secret: Option<String>,
    /// Skip signature verification and expose fault details
    pub debug: bool,
    /// Allow `_listMethods`
    pub list_methods: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            secret: None,
            debug: false,
            list_methods: true,
        }
    }
}

impl PlugConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_namespace.is_empty() && self.namespace_separator.is_empty() {
            return Err(ConfigError::InvalidNamespace(
                "namespace_separator cannot be empty when input_namespace is set".into(),
            ));
        }

        for (field, value) in [
            ("input_namespace", &self.input_namespace),
            ("namespace_separator", &self.namespace_separator),
        ] {
            if value.contains(QUERY_DELIMITERS) {
                return Err(ConfigError::InvalidNamespace(format!(
                    "{} cannot contain '&', '=' or '?': {:?}",
                    field, value
                )));
            }
        }

        Ok(())
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `PLUG_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Recognised: `PLUG_INPUT_NAMESPACE`, `PLUG_NAMESPACE_SEPARATOR`,
    /// `PLUG_SECRET`, `PLUG_DEBUG`, `PLUG_LIST_METHODS`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ns) = lookup("PLUG_INPUT_NAMESPACE") {
            self.input_namespace = ns;
        }
        if let Some(sep) = lookup("PLUG_NAMESPACE_SEPARATOR") {
            self.namespace_separator = sep;
        }
        if let Some(secret) = lookup("PLUG_SECRET") {
            self.binding.secret = Some(secret);
        }
        if let Some(debug) = lookup("PLUG_DEBUG") {
            self.binding.debug = parse_flag("PLUG_DEBUG", &debug)?;
        }
        if let Some(list) = lookup("PLUG_LIST_METHODS") {
            self.binding.list_methods = parse_flag("PLUG_LIST_METHODS", &list)?;
        }
        Ok(())
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Namespace or separator unusable
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),
    /// Boolean environment override that is not a boolean
    #[error("invalid value for {var}: {value:?}")]
    InvalidFlag { var: &'static str, value: String },
    /// Malformed TOML
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config file unreadable
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
