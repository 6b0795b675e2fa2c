//! ecare-server library crate
//!
//! Exposes `build_app`, the application state and the pluggable clients for
//! integration tests. The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
pub mod db;
mod error;
mod middleware;
pub mod ocr;
mod routes;
pub mod state;

use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_mw,
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
pub use middleware::REQUEST_ID_HEADER;
pub use routes::root::{ENDPOINTS, SERVICE_NAME};
pub use state::AppState;

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// with stub clients and without binding to a TCP port.
pub fn build_app(state: AppState, config: &Config) -> Router {
    // Create rate limiter
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Gateway routes (rate limited, uploads allowed up to the configured size)
    let api_routes = Router::new()
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic. The second install is
    // silently ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // Service routes
    let public_routes = Router::new()
        .route("/", get(routes::root::get))
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    // Build application
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}

/// Build the CORS layer. Credentials are only allowed for explicit origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
