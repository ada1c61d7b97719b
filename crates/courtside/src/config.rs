//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use courtside_session::SessionConfig;

use crate::CourtsideError;

/// Environment variable holding the backend base URL.
pub const ENV_BASE_URL: &str = "COURTSIDE_API_BASE_URL";
/// Environment variable holding a request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "COURTSIDE_TIMEOUT_SECS";
/// Environment variable holding the session file path.
pub const ENV_SESSION_FILE: &str = "COURTSIDE_SESSION_FILE";
/// Environment variable overriding the session storage key.
pub const ENV_SESSION_KEY: &str = "COURTSIDE_SESSION_KEY";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Settings for building an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root; request paths such as `/public/teams` are appended.
    pub base_url: String,

    /// Whole-request timeout. `None` (the default) leaves the HTTP
    /// client's own defaults in place.
    pub timeout: Option<Duration>,

    /// Where to persist the session. `None` keeps it in memory only, so
    /// it is gone when the process exits.
    pub session_file: Option<PathBuf>,

    /// Storage key and corrupt-session policy.
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            session_file: None,
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, CourtsideError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CourtsideError> {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_BASE_URL) {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = non_empty(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CourtsideError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(path) = non_empty(ENV_SESSION_FILE) {
            config.session_file = Some(PathBuf::from(path));
        }
        if let Some(key) = non_empty(ENV_SESSION_KEY) {
            config.session.storage_key = key;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.timeout.is_none());
        assert!(config.session_file.is_none());
        assert_eq!(config.session.storage_key, "busche_bb_auth");
    }

    #[test]
    fn test_from_lookup_without_vars_is_default() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://api.example.org"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_SESSION_FILE, "/tmp/courtside.json"),
            (ENV_SESSION_KEY, "alt_key"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.org");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/courtside.json"))
        );
        assert_eq!(config.session.storage_key, "alt_key");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).unwrap();
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, CourtsideError::Config(_)));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
