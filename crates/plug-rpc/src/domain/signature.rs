//! Request signatures.
//!
//! ```text
//! signature = md5_hex(secret + "&" + md5_hex(base64(php_serialize(data))))
//! ```
//!
//! `data` is the namespace-filtered parameter set with the reserved keys
//! removed, in request order.

use crate::codec::PhpCodec;
use crate::domain::params::ParameterSet;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Digest of the payload alone, before the secret is mixed in
pub fn payload_digest(data: &ParameterSet) -> String {
    let serialized = PhpCodec::serialize(data);
    md5_hex(STANDARD.encode(serialized.as_bytes()).as_bytes())
}

/// Expected signature for `data` under `secret`
pub fn sign(data: &ParameterSet, secret: &str) -> String {
    let keyed = format!("{}&{}", secret, payload_digest(data));
    md5_hex(keyed.as_bytes())
}

/// Check a caller-supplied signature (case-sensitive, constant time)
pub fn verify(signature: &str, data: &ParameterSet, secret: &str) -> bool {
    constant_time_compare(signature, &sign(data, secret))
}

fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// Constant-time string comparison.
///
/// Both inputs are padded to the longer length with different fill bytes so
/// the comparison never short-circuits on a length mismatch.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}
