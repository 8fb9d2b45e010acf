//! Client configuration read from the environment.

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL used when `API_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "API_URL";

/// Environment variable holding an optional request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Upper bound on a whole request/response exchange. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self { base_url, timeout })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
