//! Parameter model: raw transport input and the decoded parameter set.

use indexmap::IndexMap;
use serde_json::Value;

/// Data payload handed to registered methods
pub type Payload = serde_json::Map<String, Value>;

/// Untyped transport input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawQuery {
    /// Already parsed key/value pairs (e.g. a form-decoded request)
    Structured(IndexMap<String, String>),
    /// Literal query text, `key=value&key=value...`
    Literal(String),
}

impl From<&str> for RawQuery {
    fn from(s: &str) -> Self {
        RawQuery::Literal(s.to_string())
    }
}

impl From<String> for RawQuery {
    fn from(s: String) -> Self {
        RawQuery::Literal(s)
    }
}

impl From<IndexMap<String, String>> for RawQuery {
    fn from(map: IndexMap<String, String>) -> Self {
        RawQuery::Structured(map)
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawQuery::Structured(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single decoded parameter value.
///
/// JSON-decoded values keep their raw text so reserved keys (method,
/// signature, callback) can be read back exactly as sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Key present without `=`
    Null,
    /// Raw string, either not JSON or JSON that decodes to a falsy value
    Text(String),
    /// Successfully upgraded JSON value
    Json { raw: String, value: Value },
}

impl ParamValue {
    /// Best-effort decoding of a raw transport value.
    ///
    /// A value that parses as JSON is upgraded, unless the parsed value is
    /// falsy (`false`, `0`, `0.0`, `""`, `"0"`, `[]`, `null`). Falsy values
    /// and parse failures keep the raw string. Never fails.
    pub fn decode(raw: Option<String>) -> Self {
        let Some(raw) = raw else {
            return ParamValue::Null;
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if !is_falsy(&value) => ParamValue::Json { raw, value },
            _ => ParamValue::Text(raw),
        }
    }

    /// Raw text as sent, `None` for [`ParamValue::Null`]
    pub fn raw(&self) -> Option<&str> {
        match self {
            ParamValue::Null => None,
            ParamValue::Text(raw) | ParamValue::Json { raw, .. } => Some(raw),
        }
    }

    /// Value as seen by handlers and the signature
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Null => Value::Null,
            ParamValue::Text(raw) => Value::String(raw.clone()),
            ParamValue::Json { value, .. } => value.clone(),
        }
    }

    /// Emptiness as used for the reserved keys: missing, `""` and `"0"`.
    ///
    /// Upgraded JSON values are never empty since falsy values are not
    /// upgraded.
    pub fn is_blank(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(raw) => raw.is_empty() || raw == "0",
            ParamValue::Json { .. } => false,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::decode(Some(s.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::decode(Some(s))
    }
}

/// Truthiness of a decoded JSON value in the reference encoding
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

/// Ordered, key-unique parameter mapping.
///
/// Re-inserting an existing key replaces its value but keeps its original
/// position, which the signature depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Remove a key, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Handler payload, in parameter order
    pub fn to_payload(&self) -> Payload {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, ParamValue);
    type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}
