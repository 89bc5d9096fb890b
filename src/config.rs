use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::spotify::{Credentials, Endpoints, DEFAULT_API_BASE, DEFAULT_TOKEN_URL};

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    /// Per-request upstream timeout. `None` leaves requests unbounded.
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parses configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8081);

        let client_id = required(&lookup, "SPOTIFY_CLIENT_ID")?;
        let client_secret = required(&lookup, "SPOTIFY_CLIENT_SECRET")?;

        let token_url = lookup("SPOTIFY_TOKEN_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let api_base = lookup("SPOTIFY_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            port,
            credentials: Credentials::new(client_id, client_secret),
            endpoints: Endpoints {
                token_url,
                api_base,
            },
            upstream_timeout,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AppError::Configuration(format!("{} is required", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_credentials() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.credentials.client_id(), "id");
        assert_eq!(config.endpoints.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.endpoints.api_base, DEFAULT_API_BASE);
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[("SPOTIFY_CLIENT_ID", "id")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(ref m) if m.contains("SPOTIFY_CLIENT_SECRET")));
    }

    #[test]
    fn test_blank_client_id_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "   "),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("PORT", "9000"),
            ("SPOTIFY_API_BASE", "http://localhost:4000/v1/"),
            ("SPOTIFY_TOKEN_URL", "http://localhost:4000/api/token"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.endpoints.api_base, "http://localhost:4000/v1");
        assert_eq!(config.endpoints.token_url, "http://localhost:4000/api/token");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_bad_port_and_zero_timeout_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("PORT", "not-a-port"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert!(config.upstream_timeout.is_none());
    }
}
