//! Jira connection settings
//!
//! Settings come from the step environment:
//!
//! | key              | default | required |
//! |------------------|---------|----------|
//! | `jira_protocol`  | `https` |          |
//! | `jira_host`      |         | yes      |
//! | `jira_port`      | `443`   |          |
//! | `jira_user`      |         | yes      |
//! | `jira_password`  |         | yes      |
//! | `jira_apiVers`   | `2`     |          |
//! | `jira_strictSSL` | `true`  |          |

use crate::{Error, Result};
use update_project_core::Environment;

pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_API_VERSION: &str = "2";

const MISSING_ENVIRONMENT: &str = "A [jira_protocol, jira_port, jira_apiVers, *jira_host, *jira_user, *jira_password] environment has this module (* - required).";

#[derive(Clone, PartialEq)]
pub struct JiraConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub api_version: String,
    pub strict_ssl: bool,
}

impl JiraConfig {
    /// Resolve settings from `env`, applying defaults for optional keys
    pub fn from_environment(env: &impl Environment) -> Result<Self> {
        let required = |key: &str| env.environment(key).filter(|value| !value.is_empty());

        let (Some(host), Some(user), Some(password)) = (
            required("jira_host"),
            required("jira_user"),
            required("jira_password"),
        ) else {
            tracing::warn!("Jira environment is incomplete");
            return Err(Error::Config(MISSING_ENVIRONMENT.to_string()));
        };

        let port = match env.environment("jira_port") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                Error::Config(format!("Invalid jira_port '{}': expected a port number", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let strict_ssl = match env.environment("jira_strictSSL") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "Invalid jira_strictSSL '{}': expected true or false",
                    raw
                ))
            })?,
            None => true,
        };

        let config = Self {
            protocol: env.environment_or("jira_protocol", DEFAULT_PROTOCOL),
            host,
            port,
            user,
            password,
            api_version: env.environment_or("jira_apiVers", DEFAULT_API_VERSION),
            strict_ssl,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.protocol.as_str(), "http" | "https") {
            return Err(Error::Config(format!(
                "Invalid jira_protocol '{}'. Must be one of: http, https",
                self.protocol
            )));
        }

        if self.host.trim().is_empty() {
            return Err(Error::Config("Jira host cannot be empty".to_string()));
        }

        if self.api_version.trim().is_empty() {
            return Err(Error::Config("Jira API version cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Root of the REST API, always ending in `/`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/rest/api/{}/",
            self.protocol, self.host, self.port, self.api_version
        )
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("api_version", &self.api_version)
            .field("strict_ssl", &self.strict_ssl)
            .finish()
    }
}
