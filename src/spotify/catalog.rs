//! Search and audio-feature lookups against the Web API.

use serde::Deserialize;

use super::models::{AudioFeatures, SearchResponse, Track};
use super::SpotifyClient;
use crate::error::AppError;

/// Maximum number of tracks returned by a search.
pub const SEARCH_LIMIT: usize = 10;

/// Inbound proxy request body. Either field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequestBody {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub track_id: Option<String>,
}

/// A resolved proxy call: exactly one of search or feature lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRequest {
    Search(String),
    AudioFeatures(String),
}

impl ProxyRequest {
    /// A non-empty query wins over a track id. Neither is `InvalidRequest`.
    pub fn from_body(body: ProxyRequestBody) -> Result<Self, AppError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(query) = non_empty(body.query) {
            return Ok(ProxyRequest::Search(query));
        }
        if let Some(id) = non_empty(body.track_id) {
            return Ok(ProxyRequest::AudioFeatures(id));
        }
        Err(AppError::InvalidRequest(
            "either 'query' or 'trackId' is required".into(),
        ))
    }
}

/// Spotify ids are base-62 strings.
fn validate_track_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidRequest("track id cannot be empty".into()));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidRequest(format!("malformed track id '{}'", id)));
    }
    Ok(id)
}

impl SpotifyClient {
    /// Search for tracks in the Spotify catalog. At most [`SEARCH_LIMIT`] are returned.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, AppError> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidRequest("query cannot be empty".into()));
        }

        let token = self.tokens.token().await.map_err(AppError::into_upstream)?;

        let url = format!(
            "{}/search?q={}&type=track&limit={}",
            self.api_base,
            urlencoding::encode(query),
            SEARCH_LIMIT,
        );

        let res = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("search request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::UpstreamFailure(format!(
                "Spotify API error {}: {}",
                status, body
            )));
        }

        let body: SearchResponse = res
            .json()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("search parse failed: {}", e)))?;

        let mut tracks = body.tracks.items;
        tracks.truncate(SEARCH_LIMIT);
        tracing::debug!("search '{}' returned {} tracks", query, tracks.len());
        Ok(tracks)
    }

    /// Fetch audio features for a single track.
    pub async fn get_audio_features(&self, track_id: &str) -> Result<AudioFeatures, AppError> {
        let track_id = validate_track_id(track_id)?;

        let token = self.tokens.token().await.map_err(AppError::into_upstream)?;
        let url = format!(
            "{}/audio-features/{}",
            self.api_base,
            urlencoding::encode(track_id)
        );

        let res = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamFailure(format!("audio-features request failed: {}", e))
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::UpstreamFailure(format!(
                "Spotify API error {}: {}",
                status, body
            )));
        }

        res.json()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("audio-features parse failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(query: Option<&str>, track_id: Option<&str>) -> ProxyRequestBody {
        ProxyRequestBody {
            query: query.map(String::from),
            track_id: track_id.map(String::from),
        }
    }

    #[test]
    fn test_query_wins_over_track_id() {
        let req = ProxyRequest::from_body(body(Some("daft punk"), Some("abc"))).unwrap();
        assert_eq!(req, ProxyRequest::Search("daft punk".into()));
    }

    #[test]
    fn test_track_id_when_query_blank() {
        let req = ProxyRequest::from_body(body(Some("  "), Some("abc"))).unwrap();
        assert_eq!(req, ProxyRequest::AudioFeatures("abc".into()));
    }

    #[test]
    fn test_neither_is_invalid() {
        assert!(matches!(
            ProxyRequest::from_body(body(None, None)),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            ProxyRequest::from_body(body(Some(""), Some(""))),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_track_id_validation() {
        assert_eq!(validate_track_id(" 4uLU6hMCjMI75M1A2tKUQC ").unwrap(), "4uLU6hMCjMI75M1A2tKUQC");
        assert!(validate_track_id("").is_err());
        assert!(validate_track_id("../search").is_err());
    }
}
