//! Query codec - transport input to [`ParameterSet`].
//!
//! Literal input is split, not percent-decoded: it is taken as the caller's
//! literal text. Transports that receive form-encoded data decode it first
//! and hand over a [`RawQuery::Structured`] map.

use crate::domain::error::{PlugError, PlugResult};
use crate::domain::params::{ParamValue, ParameterSet, RawQuery};
use tracing::trace;

/// Query string codec
pub struct QueryCodec;

impl QueryCodec {
    /// Decode transport input into a parameter set.
    ///
    /// Every value goes through [`ParamValue::decode`]. Fails only with
    /// [`PlugError::NoRequest`] for literal input without `?` or `&`.
    pub fn decode(raw: &RawQuery) -> PlugResult<ParameterSet> {
        let params: ParameterSet = match raw {
            RawQuery::Structured(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), ParamValue::decode(Some(v.clone()))))
                .collect(),
            RawQuery::Literal(query) => Self::split_literal(query)?
                .into_iter()
                .map(|(k, v)| (k, ParamValue::decode(v)))
                .collect(),
        };

        trace!(count = params.len(), "Decoded query parameters");
        Ok(params)
    }

    /// Split literal query text into `(key, value)` tokens.
    ///
    /// Takes the text after the last `?` (or the whole text when there is
    /// none but it contains `&`), splits on `&`, then each token on the
    /// first `=`. A token without `=` has no value.
    pub fn split_literal(query: &str) -> PlugResult<Vec<(String, Option<String>)>> {
        let body = match query.rfind('?') {
            Some(pos) => &query[pos + 1..],
            None if query.contains('&') => query,
            None => return Err(PlugError::NoRequest),
        };

        Ok(body
            .split('&')
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (token.to_string(), None),
            })
            .collect())
    }

    /// Render a parameter set back into literal query text using each
    /// value's raw form.
    pub fn encode(params: &ParameterSet) -> String {
        params
            .iter()
            .map(|(key, value)| match value.raw() {
                Some(raw) => format!("{}={}", key, raw),
                None => key.clone(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
