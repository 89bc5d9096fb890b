//! Record types for the Spotify Web API payloads we consume.
//!
//! Fields without a `default` are required; a payload missing them fails to
//! decode and is treated as an upstream failure.

use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: TracksPage,
}

#[derive(Deserialize)]
pub(crate) struct TracksPage {
    pub items: Vec<Track>,
}

/// A Spotify track (simplified).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
}

impl Track {
    /// Name of the first credited artist, if any.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Audio Features (GET /v1/audio-features/{id})
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AudioFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    pub tempo: f64,
    /// Pitch class 0-11, or -1 when no key was detected.
    pub key: i32,
    pub mode: i32,
}
