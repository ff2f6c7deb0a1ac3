//! Interpretation of the update response

use crate::types::Exchange;
use crate::{Error, Result};
use serde_json::Value;
use update_project_core::{pick, PickField, PickTemplate};

/// Status the update endpoint answers with on success
pub const UPDATED: u16 = 201;

/// Shape of a successful result: a handful of project fields plus the
/// names and descriptions of its components.
pub fn project_result_template() -> PickTemplate {
    PickTemplate::object([
        ("id", PickField::path("id")),
        ("self", PickField::path("self")),
        ("description", PickField::path("description")),
        ("lead", PickField::path("lead.name")),
        ("issueTypes", PickField::path("issueTypes")),
        (
            "component",
            PickField::nested("components", PickTemplate::leaf("name")),
        ),
        (
            "component_description",
            PickField::nested("components", PickTemplate::leaf("description")),
        ),
    ])
}

fn documented_failure(code: u16) -> Option<&'static str> {
    match code {
        400 => Some("Returned if the request is not valid and the project could not be updated."),
        401 => Some("Returned if the user is not logged in."),
        403 => Some("Returned if the user does not have rights to update projects."),
        404 => Some("Returned if the project does not exist."),
        _ => None,
    }
}

/// Turn the outcome of the update call into the step result
pub fn interpret(outcome: Result<Exchange>, template: &PickTemplate) -> Result<Option<Value>> {
    let exchange = outcome?;

    if let Some(message) = documented_failure(exchange.status) {
        return Err(Error::Status {
            code: exchange.status,
            message,
        });
    }

    if exchange.status == UPDATED {
        return Ok(pick(&exchange.body, template));
    }

    Err(Error::UnexpectedStatus(exchange.status))
}
