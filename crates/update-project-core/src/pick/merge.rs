//! Deep merge of picked fragments into an accumulated result

use super::path::slot_mut;
use serde_json::Value;

/// Merge every key (or index) of `source` into `target`.
///
/// Objects merge key-wise and lists index-wise. A list merged into an object
/// lands under its index keys. Keys that a list target cannot hold are dropped.
pub(crate) fn merge(target: &mut Value, source: Value) {
    match source {
        Value::Object(map) => {
            for (key, value) in map {
                merge_key(target, &key, value);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.into_iter().enumerate() {
                merge_key(target, &index.to_string(), value);
            }
        }
        _ => {}
    }
}

fn merge_key(target: &mut Value, key: &str, source: Value) {
    let existed = match target {
        Value::Object(map) => map.contains_key(key),
        _ => true,
    };
    let Some(slot) = slot_mut(target, key) else {
        return;
    };

    if !existed {
        *slot = source;
        return;
    }

    match source {
        Value::Array(_) if slot.is_array() => merge(slot, source),
        Value::Object(_) if slot.is_array() || slot.is_object() => merge(slot, source),
        other => *slot = other,
    }
}
