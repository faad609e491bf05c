//! Canonical serialization of transactions.
//!
//! The canonical form is compact JSON in which the keys of every object, at
//! every depth, appear in ascending byte order. Scalars are written the way
//! `serde_json` writes them: escaped strings and base-10 integers. Key order
//! is fixed here rather than left to the map type, so the output does not
//! depend on how `serde_json` was configured in the build.
//!
//! The signed part of a transaction is the object
//! `{"data": .., "sender": .., "ts": .., "type": ..}`.

use crate::kinds::TransactionKind;
use crate::types::Timestamp;
use serde_json::{json, Map, Value};

/// Writes `value` in canonical form.
pub fn write_canonical(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_scalar(out, &Value::String(key.clone()));
                out.push(b':');
                write_canonical(out, item);
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(out, item);
            }
            out.push(b']');
        }
        scalar => write_scalar(out, scalar),
    }
}

fn write_scalar(out: &mut Vec<u8>, value: &Value) {
    out.extend_from_slice(value.to_string().as_bytes());
}

/// Returns the canonical bytes of a JSON value.
pub fn to_canonical_vec(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    write_canonical(&mut out, value);
    out
}

/// Returns the canonical form of a JSON value as a string.
pub fn to_canonical_string(value: &Value) -> String {
    String::from_utf8_lossy(&to_canonical_vec(value)).into_owned()
}

/// Returns the bytes a transaction signature covers.
pub fn signing_bytes(
    kind: TransactionKind,
    data: &Map<String, Value>,
    sender: &str,
    ts: Timestamp,
) -> Vec<u8> {
    to_canonical_vec(&json!({
        "type": kind.code(),
        "data": Value::Object(data.clone()),
        "sender": sender,
        "ts": ts,
    }))
}
