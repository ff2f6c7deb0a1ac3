//! Result picking
//!
//! Reshapes an arbitrary JSON value into the smaller shape described by a
//! [`PickTemplate`]. The source is never modified; `None` stands for
//! "nothing was picked" and callers treat it as an absent field.

mod merge;
mod path;
mod template;

pub use template::{PickField, PickTemplate, FLATTEN_MARKER};

use serde_json::{Map, Value};

/// Apply `template` to `output`
pub fn pick(output: &Value, template: &PickTemplate) -> Option<Value> {
    match template {
        PickTemplate::Leaf(source) => path::get(output, source).cloned(),
        PickTemplate::Object(entries) => pick_object(output, entries),
    }
}

/// Picked values gathered while walking an object template
struct Accumulator {
    value: Option<Value>,
    /// A key was assigned but its nested pick came back empty. It leaves no
    /// trace in the output yet still makes the accumulator non-empty.
    hollow_slots: bool,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            value: Some(Value::Object(Map::new())),
            hollow_slots: false,
        }
    }

    fn is_empty(&self) -> bool {
        match &self.value {
            None => true,
            Some(Value::Object(map)) => map.is_empty() && !self.hollow_slots,
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => true,
        }
    }

    /// A source value was missing: an empty accumulator collapses to nothing
    fn skip(&mut self) {
        if self.is_empty() {
            self.value = None;
            self.hollow_slots = false;
        }
    }

    /// Take over or merge a fragment produced from a mapped list
    fn absorb(&mut self, fragment: Value) {
        if self.is_empty() {
            self.value = Some(fragment);
            self.hollow_slots = false;
        } else if let Some(current) = &mut self.value {
            merge::merge(current, fragment);
        }
    }

    /// Store a nested pick under `key`. Only object accumulators hold keys.
    fn assign(&mut self, key: &str, picked: Option<Value>) {
        let Some(Value::Object(map)) = &mut self.value else {
            return;
        };
        match picked {
            Some(value) => {
                map.insert(key.to_string(), value);
            }
            None => {
                map.remove(key);
                self.hollow_slots = true;
            }
        }
    }

    /// Store a plain value at the dotted destination `key`
    fn set(&mut self, key: &str, value: Value) {
        if let Some(current) = &mut self.value {
            if current.is_object() {
                path::set(current, key, value);
            }
        }
    }
}

fn pick_object(output: &Value, entries: &[(String, PickField)]) -> Option<Value> {
    let mut acc = Accumulator::new();

    for (key, field) in entries {
        let Some(found) = path::get(output, field.source_path()) else {
            acc.skip();
            continue;
        };

        match field {
            PickField::Nested { fields, .. } => match found {
                Value::Array(items) => {
                    let picked: Vec<Value> =
                        items.iter().filter_map(|item| pick(item, fields)).collect();
                    let fragment = if key == FLATTEN_MARKER {
                        Value::Array(picked)
                    } else {
                        let mut wrapped = Map::new();
                        wrapped.insert(key.clone(), Value::Array(picked));
                        Value::Object(wrapped)
                    };
                    acc.absorb(fragment);
                }
                other => acc.assign(key, pick(other, fields)),
            },
            PickField::Path(_) => acc.set(key, found.clone()),
        }
    }

    acc.value
}
