//! # Skywatch
//!
//! Thin proxy in front of the OpenSky Network API.
//!
//! The frontend talks to this service instead of OpenSky directly. The
//! one real job here is `/flights`: forward an optional bounding box to
//! OpenSky's `states/all` endpoint and normalize its positional state
//! arrays into named records. `/threats` and `/analyze` are fixtures
//! kept until the analysis side exists.
//!
//! # Proxy
//!
//! OpenSky could be queried from the browser, but the proxy keeps the
//! upstream URL and response-shape handling in one place: the
//! positional arrays OpenSky returns are awkward to consume directly,
//! and normalizing them server-side means every client sees one stable
//! record shape. The extra hop runs on the same network path the
//! frontend already uses, so the added latency is the upstream round
//! trip we would pay anyway.
//!
//! # Setup
//!
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Configuration is environment-driven; see [`config::Config`].
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod models;
pub mod opensky;
pub mod routes;
pub mod state;

use routes::{analyze_handler, flights_handler, health_handler, root_handler, threats_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .map_err(|_| warn!("Ignoring invalid CORS origin: {origin}"))
                .ok()
        })
        .collect();

    // Credentialed CORS forbids wildcards, so methods and headers are
    // mirrored from the request instead of set to Any.
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/flights", get(flights_handler))
        .route("/threats", get(threats_handler))
        .route("/analyze", post(analyze_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
