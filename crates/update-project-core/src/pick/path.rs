//! Dotted path access into JSON values
//!
//! Paths look like `lead.name`, `components[0].name` or `a["b.c"]`. A path
//! that is itself an own key of the object being read is taken verbatim.

use serde_json::{Map, Value};

/// Split a path into its segments
pub(crate) fn segments(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    if path.starts_with('.') {
        out.push(String::new());
    }

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let quote = match chars.peek() {
                    Some(&q) if q == '"' || q == '\'' => {
                        chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut inner = String::new();
                while let Some(c) = chars.next() {
                    match quote {
                        Some(q) if c == q && chars.peek() == Some(&']') => {
                            chars.next();
                            break;
                        }
                        None if c == ']' => break,
                        _ => inner.push(c),
                    }
                }
                out.push(inner);
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn as_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    segment.parse().ok()
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => as_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Resolve `path` against `value`. `None` means the path does not exist;
/// a JSON `null` found on the way is returned as a value.
pub(crate) fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if let Value::Object(map) = value {
        if let Some(found) = map.get(path) {
            return Some(found);
        }
    }

    let segments = segments(path);
    if segments.is_empty() {
        return None;
    }

    segments
        .iter()
        .try_fold(value, |current, segment| child(current, segment))
}

/// Assign `new_value` at `path` inside `target`, creating intermediate
/// objects (or lists, when the next segment is an index) as needed.
/// Targets that are neither objects nor lists are left untouched.
pub(crate) fn set(target: &mut Value, path: &str, new_value: Value) {
    if let Value::Object(map) = target {
        if map.contains_key(path) {
            map.insert(path.to_string(), new_value);
            return;
        }
    }

    let segments = segments(path);
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = target;
    for (i, segment) in parents.iter().enumerate() {
        let next_is_index = as_index(&segments[i + 1]).is_some();
        let Some(slot) = slot_mut(current, segment) else {
            return;
        };
        if !slot.is_object() && !slot.is_array() {
            *slot = if next_is_index {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            };
        }
        current = slot;
    }

    if let Some(slot) = slot_mut(current, last) {
        *slot = new_value;
    }
}

/// Mutable slot for `segment`, inserting `null` when it does not exist yet.
/// Lists only accept index segments.
pub(crate) fn slot_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = as_index(segment)?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segments() {
        assert_eq!(segments("lead.name"), vec!["lead", "name"]);
        assert_eq!(segments("a[0].b"), vec!["a", "0", "b"]);
        assert_eq!(segments(r#"a["b.c"]"#), vec!["a", "b.c"]);
        assert_eq!(segments(".a"), vec!["", "a"]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_get_nested() {
        let value = json!({
            "lead": {"name": "bob"},
            "components": [{"name": "A"}, {"name": "B"}],
            "empty": null,
        });

        assert_eq!(get(&value, "lead.name"), Some(&json!("bob")));
        assert_eq!(get(&value, "components[1].name"), Some(&json!("B")));
        assert_eq!(get(&value, "components.0.name"), Some(&json!("A")));
        assert_eq!(get(&value, "empty"), Some(&json!(null)));
        assert_eq!(get(&value, "empty.name"), None);
        assert_eq!(get(&value, "lead.missing"), None);
        assert_eq!(get(&value, "lead.name.first"), None);
        assert_eq!(get(&value, ""), None);
    }

    #[test]
    fn test_get_prefers_literal_key() {
        let value = json!({"lead.name": "literal", "lead": {"name": "nested"}});
        assert_eq!(get(&value, "lead.name"), Some(&json!("literal")));
    }

    #[test]
    fn test_set_creates_intermediate_structure() {
        let mut value = json!({});
        set(&mut value, "lead.name", json!("bob"));
        set(&mut value, "items[1]", json!("second"));

        assert_eq!(
            value,
            json!({"lead": {"name": "bob"}, "items": [null, "second"]})
        );
    }

    #[test]
    fn test_set_replaces_scalar_parent() {
        let mut value = json!({"lead": 5});
        set(&mut value, "lead.name", json!("bob"));
        assert_eq!(value, json!({"lead": {"name": "bob"}}));
    }

    #[test]
    fn test_set_ignores_non_container_target() {
        let mut value = json!("text");
        set(&mut value, "a", json!(1));
        assert_eq!(value, json!("text"));

        let mut list = json!([]);
        set(&mut list, "name", json!(1));
        assert_eq!(list, json!([]));
    }
}
