//! Client side of the signature scheme.
//!
//! Builds namespaced, signed queries that a [`PlugService`](crate::PlugService)
//! accepts. Values are signed in their decoded form, exactly as the service
//! will see them after form decoding.

use url::form_urlencoded;

use crate::domain::namespace::Namespace;
use crate::domain::params::{ParamValue, ParameterSet, RawQuery};
use crate::domain::request::{CALLBACK_KEY, METHOD_KEY, SIGNATURE_KEY};
use crate::domain::signature;

/// Signed call under construction
#[derive(Debug, Clone)]
pub struct SignedQuery {
    method: String,
    secret: String,
    namespace: Namespace,
    params: Vec<(String, String)>,
    callback: Option<String>,
}

impl SignedQuery {
    /// Call `method` signed with `secret`, under the default namespace
    pub fn new(method: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            secret: secret.into(),
            namespace: Namespace::default(),
            params: Vec::new(),
            callback: None,
        }
    }

    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Add a data parameter (raw text, JSON allowed)
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Request JSONP wrapping
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Data payload as the service will decode it
    pub fn data(&self) -> ParameterSet {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::from(v.as_str())))
            .collect()
    }

    pub fn signature(&self) -> String {
        signature::sign(&self.data(), &self.secret)
    }

    /// Namespaced key/value pairs, signature included
    pub fn pairs(&self) -> Vec<(String, String)> {
        let ns = &self.namespace;
        let mut pairs = Vec::with_capacity(self.params.len() + 3);
        pairs.push((ns.qualify(METHOD_KEY), self.method.clone()));
        for (key, value) in &self.params {
            pairs.push((ns.qualify(key), value.clone()));
        }
        if let Some(callback) = &self.callback {
            pairs.push((ns.qualify(CALLBACK_KEY), callback.clone()));
        }
        pairs.push((ns.qualify(SIGNATURE_KEY), self.signature()));
        pairs
    }

    /// Form-encoded query string (without leading `?`)
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// Structured query for in-process dispatch
    pub fn to_raw_query(&self) -> RawQuery {
        self.pairs().into_iter().collect()
    }
}
