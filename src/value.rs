//! Value model for remodel transformations
//!
//! Every transform operates on `serde_json::Value` trees. With the
//! `preserve_order` feature enabled, `serde_json::Map` keeps insertion order,
//! which gives records the ordered-unique-key semantics the transforms rely
//! on. This module provides the [`Record`] and [`Sequence`] aliases plus
//! checked accessors that turn shape mismatches into typed errors instead of
//! panics.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Ordered key/value container with unique keys (a row or object)
pub type Record = Map<String, Value>;

/// Ordered list of values
pub type Sequence = Vec<Value>;

/// Human-readable shape name for a value, used in diagnostics
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}

/// Borrow a value as a record, or fail with the value's actual shape
pub fn as_record(value: &Value) -> Result<&Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::UnexpectedValue {
            expected: "record",
            found: kind(other),
        }),
    }
}

/// Mutably borrow a value as a record
pub fn as_record_mut(value: &mut Value) -> Result<&mut Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::UnexpectedValue {
            expected: "record",
            found: kind(other),
        }),
    }
}

/// Borrow a value as a sequence
pub fn as_sequence(value: &Value) -> Result<&Sequence> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::UnexpectedValue {
            expected: "sequence",
            found: kind(other),
        }),
    }
}

/// Mutably borrow a value as a sequence
pub fn as_sequence_mut(value: &mut Value) -> Result<&mut Sequence> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::UnexpectedValue {
            expected: "sequence",
            found: kind(other),
        }),
    }
}

/// Take ownership of a value as a record
pub fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::UnexpectedValue {
            expected: "record",
            found: kind(&other),
        }),
    }
}

/// Take ownership of a value as a sequence
pub fn into_sequence(value: Value) -> Result<Sequence> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::UnexpectedValue {
            expected: "sequence",
            found: kind(&other),
        }),
    }
}
