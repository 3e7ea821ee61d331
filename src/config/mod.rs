//! Startup configuration for the review bot.
//!
//! Values come from environment variables, optionally seeded from a local
//! `.env` file, plus two files referenced by path: the GitHub App private key
//! and the review checklist. Loading happens once, before the server starts,
//! and any failure aborts startup.

mod env;
mod error;
mod github;

pub use env::Environment;
pub use error::ConfigError;
pub use github::GithubConfig;

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1";

pub const INTEGRATION_ID_VAR: &str = "GITHUB_APP_INTEGRATION_ID";
pub const WEBHOOK_SECRET_VAR: &str = "GITHUB_APP_WEBHOOK_SECRET";
pub const PRIVATE_KEY_PATH_VAR: &str = "PRIVATE_KEY_PATH";
pub const REVIEW_CHECKLIST_PATH_VAR: &str = "REVIEW_CHECKLIST_PATH";
pub const BOT_USER_LOGIN_VAR: &str = "BOT_USER_LOGIN";
pub const SERVER_ADDRESS_VAR: &str = "SERVER_ADDRESS";
pub const LOG_FILE_VAR: &str = "LOG_FILE";

/// Resolved configuration, read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    github: GithubConfig,
    bot_login: String,
    review_checklist: String,
    address: String,
    log_file: String,
}

impl Config {
    /// GitHub App endpoints and credentials, including the private key.
    pub fn github(&self) -> &GithubConfig {
        &self.github
    }

    /// Login of the bot account; may be empty.
    pub fn bot_login(&self) -> &str {
        &self.bot_login
    }

    /// Checklist text exactly as read from REVIEW_CHECKLIST_PATH.
    pub fn review_checklist(&self) -> &str {
        &self.review_checklist
    }

    /// Address the webhook server listens on.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Log file path; empty means log to stdout.
    pub fn log_file(&self) -> &str {
        &self.log_file
    }
}

/// Builds a [`Config`] from the environment and the files it points to.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_file: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
        }
    }

    /// Use a different env file than `.env` in the working directory.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Load configuration from the process environment.
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.load_from(Environment::from_process())
    }

    /// Load configuration from `env`, overlaid with the env file.
    ///
    /// Required variables are checked in a fixed order
    /// (GITHUB_APP_INTEGRATION_ID, GITHUB_APP_WEBHOOK_SECRET, PRIVATE_KEY_PATH,
    /// REVIEW_CHECKLIST_PATH) and only the first missing one is reported.
    pub fn load_from(&self, env: Environment) -> Result<Config, ConfigError> {
        let env = env.overlay_file(&self.env_file)?;

        let github = GithubConfig::from_env(&env, "");

        let integration_id = require(&env, INTEGRATION_ID_VAR)?;
        require(&env, WEBHOOK_SECRET_VAR)?;
        let private_key_path = require_path(&env, PRIVATE_KEY_PATH_VAR)?;
        let checklist_path = require_path(&env, REVIEW_CHECKLIST_PATH_VAR)?;

        if github.app.integration_id == 0 {
            warn!(
                name = INTEGRATION_ID_VAR,
                value = %integration_id,
                "Integration ID is not a valid App ID, using 0"
            );
        }

        let private_key = read_file("private key", private_key_path)?;
        let github = github.with_private_key(private_key);
        let review_checklist = read_file("review checklist", checklist_path)?;

        let address = match env.get(SERVER_ADDRESS_VAR) {
            "" => DEFAULT_SERVER_ADDRESS,
            addr => addr,
        };

        Ok(Config {
            github,
            bot_login: env.get(BOT_USER_LOGIN_VAR).to_string(),
            review_checklist,
            address: address.to_string(),
            log_file: env.get(LOG_FILE_VAR).to_string(),
        })
    }
}

fn require<'a>(env: &'a Environment, name: &'static str) -> Result<&'a str, ConfigError> {
    match env.get(name) {
        "" => Err(ConfigError::MissingRequired(name)),
        value => Ok(value),
    }
}

fn require_path<'a>(env: &'a Environment, name: &'static str) -> Result<&'a Path, ConfigError> {
    let path = env.path(name);
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingRequired(name));
    }
    Ok(path)
}

/// Read a referenced file as text, without trimming.
fn read_file(kind: &'static str, path: &Path) -> Result<String, ConfigError> {
    let content = fs::read(path)
        .and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .map_err(|source| ConfigError::ReadFile {
            kind,
            path: path.to_path_buf(),
            source,
        })?;

    debug!(kind, path = %path.display(), bytes = content.len(), "Read config file");
    Ok(content)
}
