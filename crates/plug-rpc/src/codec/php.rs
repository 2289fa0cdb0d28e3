//! PHP `serialize()` encoding.
//!
//! Signed clients compute their digest over the PHP serialization of the
//! decoded parameter array, so this encoding is a fixed wire contract:
//!
//! | value | encoding |
//! |-------|----------|
//! | null | `N;` |
//! | bool | `b:1;` / `b:0;` |
//! | integer in i64 range | `i:42;` |
//! | any other number | `d:0.5;`, `d:1.0E+25;` |
//! | string | `s:3:"foo";` (byte length) |
//! | JSON array | `a:2:{i:0;...i:1;...}` |
//! | JSON object | `O:8:"stdClass":1:{s:1:"k";...}` |
//!
//! The top-level parameter set is a PHP array whose keys are integers when
//! they are canonical decimal integers (`"5"` becomes `i:5;`), strings
//! otherwise.

use crate::domain::params::ParameterSet;
use serde_json::{Number, Value};
use std::fmt::Write;

/// Significant digits PHP uses before switching to exponent notation
const PHP_DOUBLE_PRECISION: i32 = 17;

/// PHP serialization codec
pub struct PhpCodec;

impl PhpCodec {
    /// Serialize a parameter set as a PHP array.
    pub fn serialize(params: &ParameterSet) -> String {
        let mut out = String::new();
        let _ = write!(out, "a:{}:{{", params.len());
        for (key, value) in params.iter() {
            write_array_key(&mut out, key);
            write_value(&mut out, &value.to_json());
        }
        out.push('}');
        out
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("N;"),
        Value::Bool(b) => {
            let _ = write!(out, "b:{};", u8::from(*b));
        }
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            let _ = write!(out, "a:{}:{{", items.len());
            for (index, item) in items.iter().enumerate() {
                let _ = write!(out, "i:{};", index);
                write_value(out, item);
            }
            out.push('}');
        }
        Value::Object(map) => {
            let _ = write!(out, "O:8:\"stdClass\":{}:{{", map.len());
            for (key, item) in map {
                write_string(out, key);
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "i:{};", i);
    } else if let Some(f) = n.as_f64() {
        // Integers beyond i64 are floats on the PHP side too
        let _ = write!(out, "d:{};", format_double(f));
    } else {
        out.push_str("N;");
    }
}

fn write_string(out: &mut String, s: &str) {
    let _ = write!(out, "s:{}:\"{}\";", s.len(), s);
}

fn write_array_key(out: &mut String, key: &str) {
    match canonical_int_key(key) {
        Some(index) => {
            let _ = write!(out, "i:{};", index);
        }
        None => write_string(out, key),
    }
}

/// PHP turns array keys that look like canonical decimal integers into
/// integer keys: no leading zeros, no `+`, no `-0`, within i64.
fn canonical_int_key(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if key == "-0" {
        return None;
    }
    key.parse::<i64>().ok()
}

/// Shortest round-trip digits, laid out the way PHP's `php_gcvt` does in
/// mode 0: plain notation while the decimal point position is within
/// `-3..=17`, `d.dddE+x` otherwise.
fn format_double(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f.is_sign_negative() { "-INF" } else { "INF" }.to_string();
    }

    let mut out = String::new();
    if f.is_sign_negative() {
        out.push('-');
    }
    if f == 0.0 {
        out.push('0');
        return out;
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.2345e3"
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let decpt = exponent + 1;

    if decpt < -3 || decpt > PHP_DOUBLE_PRECISION {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        let exp = decpt - 1;
        let _ = write!(out, "E{}{}", if exp < 0 { '-' } else { '+' }, exp.abs());
    } else if decpt <= 0 {
        out.push_str("0.");
        for _ in 0..(-decpt) {
            out.push('0');
        }
        out.push_str(&digits);
    } else {
        let point = decpt as usize;
        if digits.len() <= point {
            out.push_str(&digits);
            for _ in digits.len()..point {
                out.push('0');
            }
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }

    out
}
