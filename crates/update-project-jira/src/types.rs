//! JIRA API types

use serde::Serialize;
use serde_json::{Map, Value};
use update_project_core::StepInputs;

/// Step inputs copied into the update request, in this order
pub const PROJECT_FIELDS: [&str; 5] = ["name", "description", "categoryId", "url", "lead"];

/// Body of `PUT /project/{projectIdOrKey}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UpdateProjectBody(Map<String, Value>);

impl UpdateProjectBody {
    /// Copy every project field whose first input value is present.
    /// Values are passed through as given.
    pub fn from_inputs(inputs: &StepInputs) -> Self {
        let mut body = Map::new();
        for field in PROJECT_FIELDS {
            if let Some(value) = inputs.first_present(field) {
                body.insert(field.to_string(), value.clone());
            }
        }
        Self(body)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub status: u16,
    pub body: Value,
}

impl Exchange {
    /// Decode a raw response body. Anything that is not JSON is kept as a
    /// string; an empty body becomes `null`.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_copies_present_fields_in_order() {
        let inputs = StepInputs::from_value(json!({
            "lead": ["fred"],
            "url": "",
            "name": ["Renamed", "ignored"],
            "categoryId": [10000],
            "projectIdOrKey": ["EX"],
        }))
        .unwrap();

        let body = UpdateProjectBody::from_inputs(&inputs);
        let fields: Vec<_> = body.fields().collect();
        assert_eq!(fields, vec!["name", "categoryId", "lead"]);
        assert_eq!(body.get("categoryId"), Some(&json!(10000)));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"name": "Renamed", "categoryId": 10000, "lead": "fred"})
        );
    }

    #[test]
    fn test_body_empty_when_no_fields() {
        let body = UpdateProjectBody::from_inputs(&StepInputs::new());
        assert!(body.is_empty());
        assert_eq!(serde_json::to_string(&body).unwrap(), "{}");
    }

    #[test]
    fn test_exchange_body_decoding() {
        assert_eq!(
            Exchange::from_text(201, r#"{"id": "1"}"#).body,
            json!({"id": "1"})
        );
        assert_eq!(Exchange::from_text(204, "").body, Value::Null);
        assert_eq!(
            Exchange::from_text(502, "Bad Gateway").body,
            json!("Bad Gateway")
        );
    }
}
