//! JIRA authentication

use crate::config::JiraConfig;

pub struct JiraAuth {
    username: String,
    password: String,
}

impl JiraAuth {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn from_config(config: &JiraConfig) -> Self {
        Self::new(config.user.clone(), config.password.clone())
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
