//! Catalog access used by the analyzer.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::error::AppError;
use crate::spotify::{AudioFeatures, SpotifyClient, Track};

/// Search and feature lookup as seen from the presentation layer.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Track>, AppError>;
    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, AppError>;
}

/// In-process variant: talks to Spotify directly with server-held credentials.
#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>, AppError> {
        SpotifyClient::search(self, query)
            .await
            .map_err(AppError::into_upstream)
    }

    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, AppError> {
        self.get_audio_features(track_id)
            .await
            .map_err(AppError::into_upstream)
    }
}

/// Client-side variant: calls the proxy server and never sees a secret.
#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: String,
}

impl ProxyClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8081`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/spotify", base_url.trim_end_matches('/')),
        }
    }

    async fn post<T>(&self, body: serde_json::Value) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("proxy request failed: {}", e)))?;

        let status = res.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(AppError::InvalidRequest("proxy rejected the request".into()));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::UpstreamFailure(format!(
                "proxy error {}: {}",
                status, body
            )));
        }

        res.json()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("proxy response parse failed: {}", e)))
    }
}

#[async_trait]
impl CatalogApi for ProxyClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidRequest("query cannot be empty".into()));
        }
        self.post(json!({ "query": query })).await
    }

    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, AppError> {
        if track_id.trim().is_empty() {
            return Err(AppError::InvalidRequest("track id cannot be empty".into()));
        }
        self.post(json!({ "trackId": track_id })).await
    }
}
