//! Deep merge of transport option records.
//!
//! Combines a base option record with a per-call patch. Nested records merge
//! recursively; arrays and primitive values replace the base value
//! wholesale; `null` patch entries are skipped so the base value survives.
//! Neither input is mutated.

use serde_json::{Map, Value};

/// Merge `patch` over `base`, returning a new record.
///
/// Per key present in `patch`:
///
/// - `null` is skipped and the base value survives unchanged. Clearing a
///   key is not supported.
/// - An array replaces the base value wholesale; arrays are never merged
///   element-wise.
/// - A record patching a record merges recursively.
/// - Anything else (primitive, type mismatch, or no base value) replaces
///   the base value wholesale.
///
/// Keys of `base` not mentioned in `patch` are preserved unchanged.
#[must_use]
pub fn merge(base: &Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut output = base.clone();

    for (key, patch_value) in patch {
        if patch_value.is_null() {
            continue;
        }

        match (output.get(key), patch_value) {
            (Some(Value::Object(base_record)), Value::Object(patch_record)) => {
                let merged = merge(base_record, patch_record);
                output.insert(key.clone(), Value::Object(merged));
            }
            _ => {
                output.insert(key.clone(), patch_value.clone());
            }
        }
    }

    output
}
