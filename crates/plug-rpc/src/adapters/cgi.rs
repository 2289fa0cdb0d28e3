//! One-shot CGI adapter.
//!
//! Query from `QUERY_STRING`, response as header block, blank line and
//! body. The caller exits 0 whatever the envelope says.

use std::io::{self, Write};

use super::decode_form;
use crate::domain::envelope::PlugResponse;
use crate::domain::params::RawQuery;

/// CGI variable carrying the request query
pub const QUERY_STRING_VAR: &str = "QUERY_STRING";

/// Structured query from `QUERY_STRING` (empty when unset)
pub fn query_from_env() -> RawQuery {
    let text = std::env::var(QUERY_STRING_VAR).unwrap_or_default();
    query_from_str(&text)
}

/// Structured query from form-encoded text
pub fn query_from_str(text: &str) -> RawQuery {
    RawQuery::Structured(decode_form(text))
}

/// Write a CGI response
pub fn write_response<W: Write>(out: &mut W, response: &PlugResponse) -> io::Result<()> {
    write!(out, "Content-type: {}\n\n{}", response.content_type, response.body)?;
    out.flush()
}
