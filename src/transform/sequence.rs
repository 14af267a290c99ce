//! Sequence-level structural transforms
//!
//! `group` partitions a flat sequence of records by the identity of its
//! residual fields; `ungroup` flattens it back; `wrap` folds fields into a
//! sub-record on every element.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::transform::record;
use crate::value::{self, Record};
use serde_json::Value;

/// Apply [`record::nest`] to every element of a sequence of records.
pub fn wrap(target: &str, keys: &[String], input: &Value) -> Result<Value> {
    let sequence = value::as_sequence(input)?;
    let mut output = Vec::with_capacity(sequence.len());
    for element in sequence {
        output.push(record::nest(target, keys, element)?);
    }
    Ok(Value::Array(output))
}

/// In-place form of [`wrap`].
pub fn wrap_in_place(target: &str, keys: &[String], input: &mut Value) -> Result<()> {
    let sequence = value::as_sequence_mut(input)?;
    for element in sequence.iter_mut() {
        record::nest_in_place(target, keys, element)?;
    }
    Ok(())
}

/// Partition a sequence of records by their residual fields.
///
/// The residual of a record is everything except the `keys` fields and the
/// `target` key. Residual identity is full structural equality. Partitions
/// keep the order of first appearance; within a partition, sub-records keep
/// the original sequence order. Each partition emits one record holding the
/// residual fields plus `target` mapped to the sequence of sub-records, each
/// carrying the `keys` fields present in its source record.
///
/// A pre-existing `target` key holding a non-empty sequence of records is
/// regrouped: every existing sub-record is merged with the newly extracted
/// `keys` fields.
pub fn group(target: &str, keys: &[String], input: &Value) -> Result<Value> {
    let sequence = value::as_sequence(input)?;
    Ok(Value::Array(group_items(target, keys, sequence.clone())?))
}

/// In-place form of [`group`].
pub fn group_in_place(target: &str, keys: &[String], input: &mut Value) -> Result<()> {
    let sequence = value::as_sequence_mut(input)?;
    let grouped = group_items(target, keys, std::mem::take(sequence))?;
    *sequence = grouped;
    Ok(())
}

fn group_items(target: &str, keys: &[String], items: Vec<Value>) -> Result<Vec<Value>> {
    let mut partitions: Vec<(Record, Vec<Value>)> = Vec::new();
    for item in items {
        let mut record = value::into_record(item)?;
        let existing = match record.shift_remove(target) {
            Some(Value::Array(children)) if !children.is_empty() => children,
            _ => vec![Value::Object(Record::new())],
        };
        let mut picked = Record::new();
        let mut residual = Record::new();
        for (k, v) in record {
            if keys.contains(&k) {
                picked.insert(k, v);
            } else {
                residual.insert(k, v);
            }
        }
        let children: Vec<Value> = existing
            .into_iter()
            .map(|tuple| {
                let mut base = match tuple {
                    Value::Object(map) => map,
                    _ => Record::new(),
                };
                for (k, v) in &picked {
                    base.insert(k.clone(), v.clone());
                }
                Value::Object(base)
            })
            .collect();
        match partitions.iter().position(|(known, _)| known == &residual) {
            Some(index) => partitions[index].1.extend(children),
            None => partitions.push((residual, children)),
        }
    }
    Ok(partitions
        .into_iter()
        .map(|(mut residual, children)| {
            residual.insert(target.to_string(), Value::Array(children));
            Value::Object(residual)
        })
        .collect())
}

/// Flatten grouped records back out, the left inverse of [`group`].
///
/// Per input record: when `target` is absent the record passes through
/// unchanged; when present holding an empty sequence, only `target` is
/// removed; otherwise one output record is emitted per sub-record, equal to
/// the parent minus `target` merged with the sub-record's fields. Emission
/// follows parent order, then sub-record order.
pub fn ungroup(target: &str, keys: &[String], input: &Value) -> Result<Value> {
    let sequence = value::as_sequence(input)?;
    Ok(Value::Array(ungroup_items(target, keys, sequence.clone())?))
}

/// In-place form of [`ungroup`].
pub fn ungroup_in_place(target: &str, keys: &[String], input: &mut Value) -> Result<()> {
    let sequence = value::as_sequence_mut(input)?;
    let flattened = ungroup_items(target, keys, std::mem::take(sequence))?;
    *sequence = flattened;
    Ok(())
}

fn ungroup_items(target: &str, keys: &[String], items: Vec<Value>) -> Result<Vec<Value>> {
    let mut output = Vec::new();
    for item in items {
        let mut record = value::into_record(item)?;
        match record.shift_remove(target) {
            None => output.push(Value::Object(record)),
            Some(Value::Array(children)) if children.is_empty() => {
                output.push(Value::Object(record));
            }
            Some(Value::Array(children)) => {
                // group-key fields lingering on the parent are superseded by
                // the children's fields
                for key in keys {
                    record.shift_remove(key);
                }
                for child in children {
                    let child = value::into_record(child)?;
                    let mut merged = record.clone();
                    for (k, v) in child {
                        merged.insert(k, v);
                    }
                    output.push(Value::Object(merged));
                }
            }
            Some(other) => {
                return Err(Error::UnexpectedValue {
                    expected: "sequence",
                    found: value::kind(&other),
                });
            }
        }
    }
    Ok(output)
}
