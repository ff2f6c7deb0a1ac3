//! JIRA REST client

use crate::auth::JiraAuth;
use crate::config::JiraConfig;
use crate::types::{Exchange, UpdateProjectBody};
use crate::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{ACCEPT, AUTHORIZATION};

/// Characters escaped in a single path segment
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%');

const MAX_REDIRECTS: usize = 10;

pub struct JiraClient {
    http: reqwest::Client,
    auth: JiraAuth,
    base_url: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.strict_ssl)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            http,
            auth: JiraAuth::from_config(config),
            base_url: config.base_url(),
        })
    }

    /// Absolute URI for a path below the REST API root
    pub fn make_uri(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `PUT /project/{projectIdOrKey}`. Every response that arrives is
    /// returned, whatever its status; only transport failures are errors.
    pub async fn update_project(
        &self,
        project_id_or_key: &str,
        expand: Option<&str>,
        body: &UpdateProjectBody,
    ) -> Result<Exchange> {
        let segment = utf8_percent_encode(project_id_or_key, PATH_SEGMENT_ENCODE_SET).to_string();
        let uri = self.make_uri(&format!("project/{}", segment));

        let mut request = self
            .http
            .put(&uri)
            .header(AUTHORIZATION, self.auth.to_basic_auth())
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(expand) = expand {
            request = request.query(&[("expand", expand)]);
        }

        tracing::info!("PUT {}", uri);
        tracing::debug!(
            "Updating fields: {}",
            body.fields().collect::<Vec<_>>().join(", ")
        );

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!("Jira responded with status {}", status);

        Ok(Exchange::from_text(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use update_project_core::MapEnvironment;

    fn client() -> JiraClient {
        let env = MapEnvironment::new()
            .with("jira_host", "jira.example.com")
            .with("jira_user", "admin")
            .with("jira_password", "secret");
        JiraClient::new(&JiraConfig::from_environment(&env).unwrap()).unwrap()
    }

    #[test]
    fn test_make_uri() {
        let client = client();
        assert_eq!(
            client.make_uri("/project/EX"),
            "https://jira.example.com:443/rest/api/2/project/EX"
        );
        assert_eq!(
            client.make_uri("project/EX"),
            "https://jira.example.com:443/rest/api/2/project/EX"
        );
    }

    #[test]
    fn test_segment_encoding() {
        let encoded = utf8_percent_encode("A B/C?", PATH_SEGMENT_ENCODE_SET).to_string();
        assert_eq!(encoded, "A%20B%2FC%3F");
    }
}
