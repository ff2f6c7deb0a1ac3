//! Step entry point

use crate::client::JiraClient;
use crate::config::JiraConfig;
use crate::status::{interpret, project_result_template};
use crate::types::UpdateProjectBody;
use crate::{Error, Result};
use serde_json::Value;
use update_project_core::{Environment, PickTemplate, StepInputs};

const MISSING_PROJECT: &str = "A [projectIdOrKey] need for this module.";

/// Updates one Jira project per run
#[derive(Debug, Clone)]
pub struct UpdateProjectStep {
    template: PickTemplate,
}

impl UpdateProjectStep {
    pub fn new(template: PickTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &PickTemplate {
        &self.template
    }

    /// Run the step once. `Ok(None)` means the update succeeded but none
    /// of the result fields were present in the response.
    pub async fn run(&self, inputs: &StepInputs, env: &impl Environment) -> Result<Option<Value>> {
        let project = inputs.first_present("projectIdOrKey").map(render);
        let expand = inputs.first_present("expand").map(render);

        let config = JiraConfig::from_environment(env)?;
        let body = UpdateProjectBody::from_inputs(inputs);

        let Some(project) = project else {
            return Err(Error::MissingInput(MISSING_PROJECT.to_string()));
        };

        tracing::info!("Updating Jira project {} on {}", project, config.host);
        let client = JiraClient::new(&config)?;
        let outcome = client
            .update_project(&project, expand.as_deref(), &body)
            .await;

        let result = interpret(outcome, &self.template);
        match &result {
            Ok(_) => tracing::info!("Project {} updated", project),
            Err(e) => tracing::error!("Project {} update failed: {}", project, e),
        }
        result
    }
}

impl Default for UpdateProjectStep {
    fn default() -> Self {
        Self::new(project_result_template())
    }
}

/// Input values as they appear in a URI: strings verbatim, anything else as JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use update_project_core::MapEnvironment;

    #[test]
    fn test_render() {
        assert_eq!(render(&json!("EX")), "EX");
        assert_eq!(render(&json!(10000)), "10000");
    }

    #[tokio::test]
    async fn test_missing_environment_aborts_first() {
        let step = UpdateProjectStep::default();
        let err = step
            .run(&StepInputs::new(), &MapEnvironment::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_project() {
        let env = MapEnvironment::new()
            .with("jira_host", "jira.invalid")
            .with("jira_user", "admin")
            .with("jira_password", "secret");
        let inputs = StepInputs::new().with("name", json!(["Renamed"]));

        let err = UpdateProjectStep::default()
            .run(&inputs, &env)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "A [projectIdOrKey] need for this module.");
    }
}
