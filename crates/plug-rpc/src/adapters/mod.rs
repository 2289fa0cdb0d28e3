//! Transport adapters.
//!
//! Both adapters form-decode their input into a structured query before
//! handing it to the service, so percent-encoded values arrive decoded.

pub mod cgi;
#[cfg(feature = "http")]
pub mod http;

use indexmap::IndexMap;
use url::form_urlencoded;

/// Form-decode `application/x-www-form-urlencoded` text.
///
/// A repeated key keeps its first position and takes the last value.
pub fn decode_form(text: &str) -> IndexMap<String, String> {
    let mut pairs = IndexMap::new();
    extend_form(&mut pairs, text);
    pairs
}

/// Merge form-decoded pairs over existing ones
pub fn extend_form(pairs: &mut IndexMap<String, String>, text: &str) {
    for (key, value) in form_urlencoded::parse(text.as_bytes()) {
        pairs.insert(key.into_owned(), value.into_owned());
    }
}
