//! GitHub App integration credentials.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Environment;

const DEFAULT_WEB_URL: &str = "https://github.com";
const DEFAULT_V3_API_URL: &str = "https://api.github.com/";
const DEFAULT_V4_API_URL: &str = "https://api.github.com/graphql";

/// Endpoints and credentials for talking to GitHub as an App.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubConfig {
    /// Web UI base URL (GITHUB_WEB_URL).
    pub web_url: String,
    /// REST API base URL (GITHUB_V3_API_URL).
    pub v3_api_url: String,
    /// GraphQL endpoint (GITHUB_V4_API_URL).
    pub v4_api_url: String,
    pub app: AppCredentials,
    pub oauth: OAuthCredentials,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AppCredentials {
    /// App ID (GITHUB_APP_INTEGRATION_ID), 0 when unset or not a number.
    pub integration_id: i64,
    #[serde(serialize_with = "redact")]
    pub webhook_secret: String,
    /// PEM-encoded private key.
    #[serde(serialize_with = "redact")]
    pub private_key: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct OAuthCredentials {
    pub client_id: String,
    #[serde(serialize_with = "redact")]
    pub client_secret: String,
}

impl GithubConfig {
    /// Populate from `{prefix}GITHUB_*` variables, falling back to defaults.
    ///
    /// Nothing is validated here; required values are checked by the loader.
    pub fn from_env(env: &Environment, prefix: &str) -> Self {
        let var = |name: &str| env.get(&format!("{prefix}{name}")).to_string();
        let or_default = |value: String, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };

        Self {
            web_url: or_default(var("GITHUB_WEB_URL"), DEFAULT_WEB_URL),
            v3_api_url: or_default(var("GITHUB_V3_API_URL"), DEFAULT_V3_API_URL),
            v4_api_url: or_default(var("GITHUB_V4_API_URL"), DEFAULT_V4_API_URL),
            app: AppCredentials {
                integration_id: var("GITHUB_APP_INTEGRATION_ID").parse().unwrap_or(0),
                webhook_secret: var("GITHUB_APP_WEBHOOK_SECRET"),
                private_key: var("GITHUB_APP_PRIVATE_KEY"),
            },
            oauth: OAuthCredentials {
                client_id: var("GITHUB_OAUTH_CLIENT_ID"),
                client_secret: var("GITHUB_OAUTH_CLIENT_SECRET"),
            },
        }
    }

    /// Replace the private key, e.g. with the contents of a key file.
    pub fn with_private_key(self, private_key: String) -> Self {
        Self {
            app: AppCredentials {
                private_key,
                ..self.app
            },
            ..self
        }
    }
}

fn redact<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(redacted(value))
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("integration_id", &self.integration_id)
            .field("webhook_secret", &redacted(&self.webhook_secret))
            .field("private_key", &redacted(&self.private_key))
            .finish()
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .finish()
    }
}
