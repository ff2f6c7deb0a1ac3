//! Error types for the Jira step
//!
//! Each variant renders as the single message reported when the step fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] update_project_core::Error),

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("{code}: {message}")]
    Status { code: u16, message: &'static str },

    #[error("{0}: Something happened.")]
    UnexpectedStatus(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
