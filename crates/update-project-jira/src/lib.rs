//! Jira "update project" step
//!
//! Resolves Jira connection settings from the step environment, sends the
//! project update and reduces the response to a small result document.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod status;
pub mod step;
pub mod types;

pub use client::JiraClient;
pub use config::JiraConfig;
pub use error::{Error, Result};
pub use status::{interpret, project_result_template};
pub use step::UpdateProjectStep;
pub use types::*;
