//! Test helper: a local stand-in for the Spotify accounts and Web API servers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};

use track_analyzer::spotify::{Credentials, Endpoints, SpotifyClient};

pub const CLIENT_ID: &str = "test-id";
pub const CLIENT_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct FakeState {
    pub token_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
    /// 0 means 200.
    pub token_status: AtomicU16,
    pub api_status: AtomicU16,
    pub expires_in: AtomicU64,
    /// Delay before answering catalog requests.
    pub api_delay_ms: AtomicU64,
    pub search_items: Mutex<Value>,
    pub features: Mutex<HashMap<String, Value>>,
    pub last_token_auth: Mutex<Option<String>>,
    pub last_token_form: Mutex<HashMap<String, String>>,
    pub last_api_auth: Mutex<Option<String>>,
    pub last_search_params: Mutex<HashMap<String, String>>,
}

pub struct FakeSpotify {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        state.expires_in.store(3600, Ordering::SeqCst);
        *state.search_items.lock().unwrap() = json!([]);

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/search", get(search))
            .route("/v1/audio-features/:id", get(audio_features))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            token_url: format!("{}/api/token", self.base_url),
            api_base: format!("{}/v1", self.base_url),
        }
    }

    pub fn client(&self) -> SpotifyClient {
        self.client_with_timeout(None)
    }

    pub fn client_with_timeout(&self, timeout: Option<Duration>) -> SpotifyClient {
        SpotifyClient::with_endpoints(
            Credentials::new(CLIENT_ID, CLIENT_SECRET),
            self.endpoints(),
            timeout,
        )
        .expect("HTTP client builds")
    }

    pub fn set_search_items(&self, items: Value) {
        *self.state.search_items.lock().unwrap() = items;
    }

    pub fn set_features(&self, id: &str, features: Value) {
        self.state
            .features
            .lock()
            .unwrap()
            .insert(id.to_string(), features);
    }

    pub fn fail_token(&self, status: u16) {
        self.state.token_status.store(status, Ordering::SeqCst);
    }

    pub fn fail_api(&self, status: u16) {
        self.state.api_status.store(status, Ordering::SeqCst);
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.state.search_calls.load(Ordering::SeqCst)
    }

    pub fn feature_calls(&self) -> usize {
        self.state.feature_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.token_calls() + self.search_calls() + self.feature_calls()
    }
}

pub fn track_json(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "name": artist }],
        "album": { "name": "Album", "images": [{ "url": format!("http://img/{}", id) }] }
    })
}

pub fn sample_features() -> Value {
    json!({
        "danceability": 0.8,
        "energy": 0.5,
        "acousticness": 0.1,
        "instrumentalness": 0.0,
        "liveness": 0.2,
        "speechiness": 0.05,
        "tempo": 120,
        "key": 0,
        "mode": 1
    })
}

fn failure(status: &AtomicU16) -> Option<Response> {
    match status.load(Ordering::SeqCst) {
        0 => None,
        code => {
            let code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Some((code, Json(json!({ "error": "simulated" }))).into_response())
        }
    }
}

async fn token(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let n = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    *state.last_token_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    *state.last_token_form.lock().unwrap() = form;

    if let Some(res) = failure(&state.token_status) {
        return res;
    }
    Json(json!({
        "access_token": format!("fake-token-{}", n),
        "token_type": "Bearer",
        "expires_in": state.expires_in.load(Ordering::SeqCst)
    }))
    .into_response()
}

async fn search(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.search_calls.fetch_add(1, Ordering::SeqCst);
    let delay = state.api_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    *state.last_api_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    *state.last_search_params.lock().unwrap() = params;

    if let Some(res) = failure(&state.api_status) {
        return res;
    }
    let items = state.search_items.lock().unwrap().clone();
    Json(json!({ "tracks": { "items": items, "total": 1, "limit": 10, "offset": 0 } }))
        .into_response()
}

async fn audio_features(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.feature_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_api_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    if let Some(res) = failure(&state.api_status) {
        return res;
    }
    match state.features.lock().unwrap().get(&id) {
        Some(features) => Json(features.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}
