//! Namespace filter.
//!
//! A page may carry query parameters meant for other components; only keys
//! under `namespace + separator` belong to the dispatcher.

use crate::domain::config::PlugConfig;
use crate::domain::params::ParameterSet;
use tracing::trace;

/// Key prefix selecting this service's parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// Namespace `ns` joined to keys with `separator`.
    ///
    /// An empty `ns` disables filtering regardless of the separator.
    pub fn new(ns: &str, separator: &str) -> Self {
        let prefix = if ns.is_empty() {
            String::new()
        } else {
            format!("{}{}", ns, separator)
        };
        Self { prefix }
    }

    /// Pass-through namespace
    pub fn none() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    pub fn from_config(config: &PlugConfig) -> Self {
        Self::new(&config.input_namespace, &config.namespace_separator)
    }

    /// Full prefix, e.g. `buttplug_`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_enabled(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Keep prefixed keys with the prefix stripped, in their original order.
    pub fn filter(&self, params: ParameterSet) -> ParameterSet {
        if !self.is_enabled() {
            return params;
        }

        let before = params.len();
        let filtered: ParameterSet = params
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(self.prefix.as_str())
                    .map(|stripped| (stripped.to_string(), value))
            })
            .collect();

        trace!(
            prefix = %self.prefix,
            kept = filtered.len(),
            dropped = before - filtered.len(),
            "Applied namespace filter"
        );
        filtered
    }

    /// Key as it must appear on the wire
    pub fn qualify(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::from_config(&PlugConfig::default())
    }
}
