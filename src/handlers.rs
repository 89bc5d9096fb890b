//! HTTP handlers for the token broker and catalog proxy.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::spotify::{ProxyRequest, ProxyRequestBody, SpotifyClient};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/token - Mint a bearer token with the server-held credentials.
pub async fn token(State(spotify): State<SpotifyClient>) -> Result<Json<TokenResponse>, AppError> {
    let token = spotify.tokens().token().await?;
    Ok(Json(TokenResponse {
        access_token: token,
    }))
}

/// POST /api/spotify - Search by `query` or look up features by `trackId`.
pub async fn proxy(
    State(spotify): State<SpotifyClient>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parsed regardless of content type; an empty or unreadable body has neither field.
    let body = serde_json::from_slice::<ProxyRequestBody>(&body).unwrap_or_default();

    match ProxyRequest::from_body(body)? {
        ProxyRequest::Search(query) => {
            let tracks = spotify.search(&query).await.map_err(AppError::into_upstream)?;
            Ok(Json(tracks).into_response())
        }
        ProxyRequest::AudioFeatures(track_id) => {
            let features = spotify
                .get_audio_features(&track_id)
                .await
                .map_err(AppError::into_upstream)?;
            Ok(Json(features).into_response())
        }
    }
}

/// Build the API router.
pub fn router() -> Router<SpotifyClient> {
    Router::new()
        .route("/health", get(health))
        .route("/api/token", get(token))
        .route("/api/spotify", post(proxy))
}
