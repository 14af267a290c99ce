//! Higher-order combinators
//!
//! Transforms that take another transformation handle as a bound argument and
//! apply it contextually: to every element of a sequence, to the value under
//! a named key, to a named key itself, or to every key of a record.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::function::Handle;
use crate::value::{self, Record};
use serde_json::Value;

/// Replace every element of a sequence with `f` applied to it.
///
/// Order and length are preserved; the first failing element aborts the whole
/// operation with no partial result.
pub fn map_each(f: &Handle, input: &Value) -> Result<Value> {
    let sequence = value::as_sequence(input)?;
    let mut output = Vec::with_capacity(sequence.len());
    for element in sequence {
        output.push(f.apply(element)?);
    }
    Ok(Value::Array(output))
}

/// In-place form of [`map_each`]: elements are rewritten where they sit.
pub fn map_each_in_place(f: &Handle, input: &mut Value) -> Result<()> {
    let sequence = value::as_sequence_mut(input)?;
    for element in sequence.iter_mut() {
        f.apply_in_place(element)?;
    }
    Ok(())
}

/// Replace the value under `key` with `f` applied to it; every other entry is
/// untouched. Fails with [`Error::MissingKey`] if `key` is absent.
pub fn map_value(key: &str, f: &Handle, input: &Value) -> Result<Value> {
    let record = value::as_record(input)?;
    let current = record.get(key).ok_or_else(|| Error::MissingKey {
        key: key.to_string(),
    })?;
    let replaced = f.apply(current)?;
    let mut output = record.clone();
    output.insert(key.to_string(), replaced);
    Ok(Value::Object(output))
}

/// In-place form of [`map_value`].
pub fn map_value_in_place(key: &str, f: &Handle, input: &mut Value) -> Result<()> {
    let record = value::as_record_mut(input)?;
    let slot = record.get_mut(key).ok_or_else(|| Error::MissingKey {
        key: key.to_string(),
    })?;
    f.apply_in_place(slot)
}

fn renamed_key(key: &str, f: &Handle) -> Result<String> {
    let renamed = f.apply(&Value::String(key.to_string()))?;
    match renamed {
        Value::String(new_key) => Ok(new_key),
        other => Err(Error::UnexpectedValue {
            expected: "string key",
            found: value::kind(&other),
        }),
    }
}

/// Rename `key` using `f` applied to the key itself, keeping the entry's
/// position. Fails with [`Error::MissingKey`] if `key` is absent and with
/// [`Error::KeyCollision`] if the new key already exists under a different
/// original key.
pub fn map_key(key: &str, f: &Handle, input: &Value) -> Result<Value> {
    let record = value::as_record(input)?;
    if !record.contains_key(key) {
        return Err(Error::MissingKey {
            key: key.to_string(),
        });
    }
    let new_key = renamed_key(key, f)?;
    if new_key != key && record.contains_key(&new_key) {
        return Err(Error::KeyCollision {
            from: key.to_string(),
            to: new_key,
        });
    }
    let mut output = Record::new();
    for (k, v) in record {
        if k.as_str() == key {
            output.insert(new_key.clone(), v.clone());
        } else {
            output.insert(k.clone(), v.clone());
        }
    }
    Ok(Value::Object(output))
}

/// In-place form of [`map_key`].
pub fn map_key_in_place(key: &str, f: &Handle, input: &mut Value) -> Result<()> {
    let record = value::as_record_mut(input)?;
    if !record.contains_key(key) {
        return Err(Error::MissingKey {
            key: key.to_string(),
        });
    }
    let new_key = renamed_key(key, f)?;
    if new_key == key {
        return Ok(());
    }
    if record.contains_key(&new_key) {
        return Err(Error::KeyCollision {
            from: key.to_string(),
            to: new_key,
        });
    }
    let taken = std::mem::take(record);
    for (k, v) in taken {
        if k == key {
            record.insert(new_key.clone(), v);
        } else {
            record.insert(k, v);
        }
    }
    Ok(())
}

/// Rename every key of a record using `f`. Fails with
/// [`Error::KeyCollision`] when two original keys map to the same output key.
pub fn map_keys(f: &Handle, input: &Value) -> Result<Value> {
    let record = value::as_record(input)?;
    let mut output = Record::new();
    for (k, v) in record {
        let new_key = renamed_key(k, f)?;
        if output.contains_key(&new_key) {
            return Err(Error::KeyCollision {
                from: k.clone(),
                to: new_key,
            });
        }
        output.insert(new_key, v.clone());
    }
    Ok(Value::Object(output))
}

/// In-place form of [`map_keys`].
pub fn map_keys_in_place(f: &Handle, input: &mut Value) -> Result<()> {
    let record = value::as_record_mut(input)?;
    let taken = std::mem::take(record);
    for (k, v) in taken {
        let new_key = renamed_key(&k, f)?;
        if record.contains_key(&new_key) {
            return Err(Error::KeyCollision { from: k, to: new_key });
        }
        record.insert(new_key, v);
    }
    Ok(())
}
