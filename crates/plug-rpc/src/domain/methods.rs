//! Reserved introspection methods.
//!
//! These names are answered by the dispatcher itself and can never be
//! registered on a handler binding.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Protocol version reported by `_version`
pub const PROTOCOL_VERSION: f64 = 0.1;

/// Built-in method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedMethod {
    /// `_version` / `version`
    Version,
    /// `_listMethods` / `listMethods`
    ListMethods,
}

/// Every reserved name, aliases included
pub static RESERVED_METHODS: LazyLock<HashMap<&'static str, ReservedMethod>> =
    LazyLock::new(|| {
        [
            ("_version", ReservedMethod::Version),
            ("version", ReservedMethod::Version),
            ("_listMethods", ReservedMethod::ListMethods),
            ("listMethods", ReservedMethod::ListMethods),
        ]
        .into_iter()
        .collect()
    });

impl ReservedMethod {
    /// Resolve a requested method name
    pub fn resolve(name: &str) -> Option<Self> {
        RESERVED_METHODS.get(name).copied()
    }

    /// Check if a name is reserved
    pub fn is_reserved(name: &str) -> bool {
        RESERVED_METHODS.contains_key(name)
    }

    /// Canonical (underscore) name
    pub fn name(&self) -> &'static str {
        match self {
            ReservedMethod::Version => "_version",
            ReservedMethod::ListMethods => "_listMethods",
        }
    }
}
