use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use track_analyzer::config::Config;
use track_analyzer::handlers::router;
use track_analyzer::spotify::SpotifyClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "using client id {} against {}",
        config.credentials.client_id(),
        config.endpoints.api_base
    );
    let spotify = SpotifyClient::with_endpoints(
        config.credentials,
        config.endpoints,
        config.upstream_timeout,
    )?;

    let app = router()
        .layer(TraceLayer::new_for_http())
        .with_state(spotify);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
