//! Step host abstractions
//!
//! A step reads its inputs from the workflow that invokes it and its
//! connection settings from the surrounding environment. Both are modelled
//! here so the step itself never touches the process directly.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Named string values supplied by the host (credentials, endpoints, ...)
pub trait Environment {
    fn environment(&self, key: &str) -> Option<String>;

    /// Look up `key`, falling back to `default` when it is absent
    fn environment_or(&self, key: &str, default: &str) -> String {
        self.environment(key).unwrap_or_else(|| default.to_string())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn environment(&self, key: &str) -> Option<String> {
        (**self).environment(key)
    }
}

/// Environment backed by the process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn environment(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Build from a JSON object. Scalars are stringified, `null` is skipped.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::Validation(
                "Environment must be a JSON object".to_string(),
            ));
        };

        let mut env = Self::new();
        for (key, value) in map {
            match value {
                Value::Null => continue,
                Value::String(s) => env.insert(key, s),
                Value::Bool(_) | Value::Number(_) => env.insert(key, value.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::Validation(format!(
                        "Environment value '{}' must be a scalar",
                        key
                    )));
                }
            }
        }
        Ok(env)
    }

    /// Load from a JSON file containing a single object
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let env = Self::from_value(serde_json::from_str(&content)?)?;
        tracing::debug!("Loaded {} environment values from {}", env.len(), path.display());
        Ok(env)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Environment for MapEnvironment {
    fn environment(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Two environments stacked: `primary` wins, `fallback` fills the gaps
#[derive(Debug, Clone)]
pub struct LayeredEnvironment<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> LayeredEnvironment<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: Environment, B: Environment> Environment for LayeredEnvironment<A, B> {
    fn environment(&self, key: &str) -> Option<String> {
        self.primary
            .environment(key)
            .or_else(|| self.fallback.environment(key))
    }
}

/// Inputs bound to a single step invocation.
///
/// The platform delivers every input as a collection; most steps only care
/// about the first element, which is what [`StepInputs::first`] returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInputs {
    values: Map<String, Value>,
}

impl StepInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::new()),
            _ => Err(Error::Validation(
                "Step inputs must be a JSON object".to_string(),
            )),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let inputs = Self::from_value(serde_json::from_str(&content)?)?;
        tracing::debug!("Loaded {} step inputs from {}", inputs.values.len(), path.display());
        Ok(inputs)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// First value bound to `name`
    pub fn first(&self, name: &str) -> Option<&Value> {
        match self.values.get(name)? {
            Value::Array(items) => items.first(),
            value => Some(value),
        }
    }

    /// First value bound to `name` when it is truthy
    pub fn first_present(&self, name: &str) -> Option<&Value> {
        self.first(name).filter(|value| is_truthy(value))
    }
}

/// Loose truthiness as workflow inputs are judged: `null`, `false`, `0` and
/// `""` are falsy, everything else (empty lists and objects included) is not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && f.is_finite()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_first_value() {
        let inputs = StepInputs::from_value(json!({
            "list": ["a", "b"],
            "empty": [],
            "scalar": 10,
        }))
        .unwrap();

        assert_eq!(inputs.first("list"), Some(&json!("a")));
        assert_eq!(inputs.first("scalar"), Some(&json!(10)));
        assert_eq!(inputs.first("empty"), None);
        assert_eq!(inputs.first("missing"), None);
    }

    #[test]
    fn test_first_present_skips_falsy() {
        let inputs = StepInputs::new()
            .with("name", json!([""]))
            .with("url", "https://example.com");

        assert_eq!(inputs.first_present("name"), None);
        assert_eq!(
            inputs.first_present("url"),
            Some(&json!("https://example.com"))
        );
    }

    #[test]
    fn test_inputs_reject_non_object() {
        assert!(StepInputs::from_value(json!(["a"])).is_err());
        assert_eq!(StepInputs::from_value(json!(null)).unwrap(), StepInputs::new());
    }

    #[test]
    fn test_map_environment_from_value() {
        let env = MapEnvironment::from_value(json!({
            "jira_host": "jira.local",
            "jira_port": 8443,
            "jira_strictSSL": false,
            "jira_user": null,
        }))
        .unwrap();

        assert_eq!(env.len(), 3);
        assert_eq!(env.environment("jira_host").as_deref(), Some("jira.local"));
        assert_eq!(env.environment("jira_port").as_deref(), Some("8443"));
        assert_eq!(env.environment("jira_strictSSL").as_deref(), Some("false"));
        assert_eq!(env.environment("jira_user"), None);

        assert!(MapEnvironment::from_value(json!({"nested": {"a": 1}})).is_err());
    }

    #[test]
    fn test_map_environment_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jira_host": "jira.example.com"}}"#).unwrap();

        let env = MapEnvironment::load(file.path()).unwrap();
        assert_eq!(
            env.environment("jira_host").as_deref(),
            Some("jira.example.com")
        );
        assert_eq!(env.environment_or("jira_apiVers", "2"), "2");
    }

    #[test]
    #[serial]
    fn test_layered_environment() {
        unsafe {
            std::env::set_var("UPDATE_PROJECT_TEST_LAYERED", "from-process");
        }

        let layered = LayeredEnvironment::new(
            MapEnvironment::new().with("jira_host", "from-map"),
            ProcessEnvironment,
        );

        assert_eq!(layered.environment("jira_host").as_deref(), Some("from-map"));
        assert_eq!(
            layered
                .environment("UPDATE_PROJECT_TEST_LAYERED")
                .as_deref(),
            Some("from-process")
        );

        unsafe {
            std::env::remove_var("UPDATE_PROJECT_TEST_LAYERED");
        }
    }
}
