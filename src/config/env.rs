//! Key-value source the loader reads from.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::Path;

use tracing::debug;

use super::ConfigError;

/// Snapshot of environment variables, optionally overlaid with a `.env` file.
///
/// An empty value and a missing key are treated the same way. Values are kept
/// as OS strings so paths that are not valid unicode still resolve.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, OsString>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Entries whose key is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v)))
            .collect();
        Self { vars }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Fill in variables from the env file at `path`, if it exists.
    ///
    /// Keys already present in the snapshot are left untouched.
    pub fn overlay_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Env file not found, skipping");
            return Ok(self);
        }

        let to_error = |source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };

        let mut applied = 0usize;
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            if !self.vars.contains_key(&key) {
                self.vars.insert(key, value.into());
                applied += 1;
            }
        }

        debug!(path = %path.display(), applied, "Env file applied");
        Ok(self)
    }

    /// Value of `key`, or `""` when unset or not valid unicode.
    pub fn get(&self, key: &str) -> &str {
        self.vars
            .get(key)
            .and_then(|v| v.to_str())
            .unwrap_or_default()
    }

    /// Value of `key` as a path; empty when unset.
    pub fn path(&self, key: &str) -> &Path {
        self.vars.get(key).map(Path::new).unwrap_or(Path::new(""))
    }
}
