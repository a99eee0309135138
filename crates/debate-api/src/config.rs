use debate_client_core::ClientError;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const ENV_API_BASE_URL: &str = "DEBATE_API_BASE_URL";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

impl From<ConfigError> for ClientError {
    fn from(error: ConfigError) -> Self {
        Self::network(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ApiClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Environment override first, then the same-origin-style default the
    /// original front end proxied to.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (base_url, _source) = resolve_api_base_url()?;
        Ok(Self::new(base_url))
    }
}

pub fn resolve_api_base_url() -> Result<(String, &'static str), ConfigError> {
    if let Some(base_url) = env_non_empty(ENV_API_BASE_URL) {
        return normalize_base_url(&base_url).map(|normalized| (normalized, ENV_API_BASE_URL));
    }
    normalize_base_url(DEFAULT_API_BASE_URL).map(|normalized| (normalized, "default"))
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = std::env::var(ENV_API_BASE_URL).ok();
        if let Some(value) = value {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }

        let result = test();

        if let Some(value) = previous {
            unsafe { std::env::set_var(ENV_API_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_API_BASE_URL) };
        }

        result
    }

    #[test]
    fn normalize_trims_and_drops_trailing_slash() {
        let normalized = normalize_base_url(" https://debate.example.com/api/ ").expect("valid");
        assert_eq!(normalized, "https://debate.example.com/api");
    }

    #[test]
    fn normalize_requires_http_scheme() {
        assert_eq!(
            normalize_base_url("debate.example.com"),
            Err(ConfigError::InvalidBaseUrl)
        );
        assert_eq!(normalize_base_url("   "), Err(ConfigError::EmptyBaseUrl));
    }

    #[test]
    fn resolve_defaults_when_env_missing() {
        with_env(None, || {
            let (resolved, source) = resolve_api_base_url().expect("default");
            assert_eq!(resolved, DEFAULT_API_BASE_URL);
            assert_eq!(source, "default");
        });
    }

    #[test]
    fn resolve_prefers_env_override() {
        with_env(Some("https://staging.debate.example.com/api/"), || {
            let (resolved, source) = resolve_api_base_url().expect("env");
            assert_eq!(resolved, "https://staging.debate.example.com/api");
            assert_eq!(source, ENV_API_BASE_URL);
        });
    }
}
