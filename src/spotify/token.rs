//! Client Credentials token exchange with an expiry-keyed cache.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};

use super::models::TokenResponse;
use crate::error::AppError;

/// Tokens are treated as expired this long before Spotify says they are.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Spotify application credentials. Read-only after startup.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn basic_auth(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret).as_bytes());
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token and the instant after which it must not be reused.
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_at: Instant,
}

impl AccessToken {
    pub fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now()
    }
}

/// Acquires bearer tokens and caches the latest one until it expires.
#[derive(Clone)]
pub struct TokenProvider {
    client: Client,
    credentials: Credentials,
    token_url: String,
    cached: Arc<RwLock<Option<AccessToken>>>,
    /// Held while exchanging, so concurrent callers share one exchange.
    refresh: Arc<Mutex<()>>,
}

impl TokenProvider {
    pub fn new(client: Client, credentials: Credentials, token_url: String) -> Self {
        Self {
            client,
            credentials,
            token_url,
            cached: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the cached token while unexpired, otherwise acquires a new one.
    pub async fn token(&self) -> Result<String, AppError> {
        if let Some(token) = self.cached_token().await {
            tracing::debug!("using cached access token");
            return Ok(token);
        }

        let _refresh = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(token) = self.cached_token().await {
            tracing::debug!("using access token refreshed by a concurrent caller");
            return Ok(token);
        }

        tracing::debug!("no fresh access token cached, requesting one");
        let token = self.acquire_token().await?;
        {
            let mut guard = self.cached.write().await;
            *guard = Some(token.clone());
        }
        Ok(token.access_token)
    }

    async fn cached_token(&self) -> Option<String> {
        let guard = self.cached.read().await;
        guard
            .as_ref()
            .filter(|t| t.is_fresh())
            .map(|t| t.access_token.clone())
    }

    /// Drops the cached token so the next call performs a fresh exchange.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Performs one Client Credentials exchange. Never consults the cache.
    pub async fn acquire_token(&self) -> Result<AccessToken, AppError> {
        let params = [("grant_type", "client_credentials")];

        let res = self
            .client
            .post(&self.token_url)
            .header("Authorization", self.credentials.basic_auth())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::TokenAcquisitionFailed(format!("token request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::TokenAcquisitionFailed(format!(
                "token request failed: {} - {}",
                status, body
            )));
        }

        let body: TokenResponse = res
            .json()
            .await
            .map_err(|e| AppError::TokenAcquisitionFailed(format!("token parse failed: {}", e)))?;

        if body.access_token.is_empty() {
            return Err(AppError::TokenAcquisitionFailed(
                "token response carried an empty access_token".into(),
            ));
        }

        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        tracing::info!("acquired access token valid for {}s", lifetime.as_secs());

        Ok(AccessToken {
            access_token: body.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
