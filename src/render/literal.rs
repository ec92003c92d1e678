//! Literal and identifier formatting.
//!
//! Rendering is total over every literal kind the IR defines; there is
//! no fallthrough for unrecognized values because the value enum is
//! closed.

use std::fmt::Write;

use chrono::Timelike;

use crate::dialect::Dialect;
use crate::ir::Value;

/// Render a literal value in the dialect's syntax.
pub fn literal(value: &Value, dialect: &Dialect) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => {
            if *b {
                dialect.bool_true.to_string()
            } else {
                dialect.bool_false.to_string()
            }
        }
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::String(s) => quote_string(s),
        Value::Bytes(b) => format!("{}{}{}", dialect.blob_open, hex(b), dialect.blob_close),
        Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Value::Time(t) => {
            // Drop fractional seconds when the pure time type cannot
            // carry them.
            if dialect.caps.fractional_seconds_in_time && t.nanosecond() > 0 {
                format!("'{}'", t.format("%H:%M:%S%.6f"))
            } else {
                format!("'{}'", t.format("%H:%M:%S"))
            }
        }
        Value::Timestamp(ts) => {
            if dialect.caps.fractional_seconds_in_timestamp && ts.nanosecond() > 0 {
                format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.6f"))
            } else {
                format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S"))
            }
        }
        Value::Uuid(u) => format!("'{}'", u),
        Value::Param(n) => (dialect.placeholder)(*n),
    }
}

/// Quote a string literal, escaping embedded quotes by doubling.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Deterministic big-endian uppercase hex of the raw bytes.
fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02X}", b);
    }
    out
}
