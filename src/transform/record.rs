//! Record-level structural transforms
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::value::{self, Record};
use serde_json::Value;

/// Fold the listed keys of a record into a sub-record under `target`.
///
/// The folded keys keep their original values and relative order inside the
/// sub-record; unlisted keys pass through unchanged. The target key is
/// inserted at the position of the first folded key. When none of the listed
/// keys is present, `target` is appended holding an empty record.
pub fn nest(target: &str, keys: &[String], input: &Value) -> Result<Value> {
    let record = value::as_record(input)?;
    let mut output = Record::new();
    let mut folded = Record::new();
    let mut anchored = false;
    for (k, v) in record {
        if keys.contains(k) {
            if !anchored {
                // hold the target's slot at the first folded key's position
                output.insert(target.to_string(), Value::Null);
                anchored = true;
            }
            folded.insert(k.clone(), v.clone());
        } else {
            output.insert(k.clone(), v.clone());
        }
    }
    output.insert(target.to_string(), Value::Object(folded));
    Ok(Value::Object(output))
}

/// In-place form of [`nest`]: the container is rebuilt moving the existing
/// values instead of cloning them.
pub fn nest_in_place(target: &str, keys: &[String], input: &mut Value) -> Result<()> {
    let record = value::as_record_mut(input)?;
    let taken = std::mem::take(record);
    let mut folded = Record::new();
    let mut anchored = false;
    for (k, v) in taken {
        if keys.contains(&k) {
            if !anchored {
                record.insert(target.to_string(), Value::Null);
                anchored = true;
            }
            folded.insert(k, v);
        } else {
            record.insert(k, v);
        }
    }
    record.insert(target.to_string(), Value::Object(folded));
    Ok(())
}
