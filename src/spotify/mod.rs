//! Spotify Web API client.
//!
//! Uses Client Credentials flow for server-to-server authentication.

mod catalog;
mod models;
mod token;

use std::time::Duration;

use reqwest::Client;

use crate::error::AppError;

pub use catalog::{ProxyRequest, ProxyRequestBody, SEARCH_LIMIT};
pub use models::{Album, Artist, AudioFeatures, Image, Track};
pub use token::{AccessToken, Credentials, TokenProvider};

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Where the authorization server and the Web API live.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token_url: String,
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Spotify API client with token caching. Clones share the cache.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    tokens: TokenProvider,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials) -> Result<Self, AppError> {
        Self::with_endpoints(credentials, Endpoints::default(), None)
    }

    /// Fails with `Configuration` if the HTTP client cannot be built as configured.
    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
        timeout: Option<Duration>,
    ) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            tokens: TokenProvider::new(client.clone(), credentials, endpoints.token_url),
            client,
            api_base: endpoints.api_base,
        })
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }
}
