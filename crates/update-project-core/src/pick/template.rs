//! Pick templates
//!
//! Templates are written in a small declarative JSON shape:
//!
//! ```json
//! {
//!     "id": "id",
//!     "lead": "lead.name",
//!     "component": { "keyName": "components", "fields": ["name"] }
//! }
//! ```
//!
//! A one-element array picks a single value; an object maps output keys to
//! source paths or to nested templates applied to the value found at
//! `keyName`.

use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Output key that replaces the whole result with a mapped list
pub const FLATTEN_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum PickTemplate {
    /// Pick the single value found at this path
    Leaf(String),
    /// Build an object, one output key per entry, in order
    Object(Vec<(String, PickField)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickField {
    Path(String),
    Nested {
        key_name: String,
        fields: Box<PickTemplate>,
    },
}

impl PickTemplate {
    pub fn leaf(path: impl Into<String>) -> Self {
        Self::Leaf(path.into())
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PickField)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, field)| (key.into(), field))
                .collect(),
        )
    }
}

impl PickField {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn nested(key_name: impl Into<String>, fields: PickTemplate) -> Self {
        Self::Nested {
            key_name: key_name.into(),
            fields: Box::new(fields),
        }
    }

    /// Source path this field reads from
    pub fn source_path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Nested { key_name, .. } => key_name,
        }
    }

    fn from_value(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(Self::path(path.as_str())),
            Value::Object(map) => {
                let key_name = map.get("keyName").and_then(Value::as_str).ok_or_else(|| {
                    Error::Template(format!("'{}' is missing a string keyName", key))
                })?;
                let fields = map
                    .get("fields")
                    .ok_or_else(|| Error::Template(format!("'{}' is missing fields", key)))?;
                Ok(Self::nested(key_name, PickTemplate::try_from(fields.clone())?))
            }
            other => Err(Error::Template(format!(
                "'{}' must be a path or a nested template, got {}",
                key, other
            ))),
        }
    }
}

impl TryFrom<Value> for PickTemplate {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let [entry] = items.as_slice() else {
                    return Err(Error::Template(format!(
                        "array templates pick exactly one value, got {} entries",
                        items.len()
                    )));
                };
                match entry {
                    Value::String(path) => Ok(Self::leaf(path.as_str())),
                    Value::Object(map) => map
                        .get("keyName")
                        .and_then(Value::as_str)
                        .map(Self::leaf)
                        .ok_or_else(|| {
                            Error::Template("array entry is missing a string keyName".to_string())
                        }),
                    other => Err(Error::Template(format!(
                        "array entry must be a path, got {}",
                        other
                    ))),
                }
            }
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    PickField::from_value(key, value).map(|field| (key.clone(), field))
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Object),
            other => Err(Error::Template(format!(
                "template must be an array or an object, got {}",
                other
            ))),
        }
    }
}

impl std::str::FromStr for PickTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(serde_json::from_str::<Value>(s)?)
    }
}
