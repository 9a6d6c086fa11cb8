use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{
    address_summary_handler, latest_transactions_handler, preflight_handler, proxy_handler,
    stats_handler, transaction_handler,
};
use crate::api::SharedProxy;
use crate::config::ProxyConfig;
use crate::proxy::BlockchairProxy;
use crate::telemetry::{init_tracing, TelemetryConfig};

pub const CORS_ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOWED_HEADERS),
    );
    response
}

/// Build the router around an existing proxy
pub fn router(proxy: SharedProxy) -> Router {
    Router::new()
        // Raw proxy endpoint, also mounted under the function name
        .route("/", post(proxy_handler).options(preflight_handler))
        .route("/blockchair", post(proxy_handler).options(preflight_handler))
        // Typed dashboard endpoints
        .route(
            "/v1/{chain}/address/{address}",
            get(address_summary_handler).options(preflight_handler),
        )
        .route(
            "/v1/{chain}/address/{address}/transactions",
            get(latest_transactions_handler).options(preflight_handler),
        )
        .route(
            "/v1/{chain}/transaction/{tx_hash}",
            get(transaction_handler).options(preflight_handler),
        )
        .route("/v1/{chain}/stats", get(stats_handler).options(preflight_handler))
        .route("/health", get(health_check))
        .with_state(proxy)
        .layer(middleware::map_response(with_cors_headers))
        .layer(TraceLayer::new_for_http())
}

pub fn create_app_with_config(config: ProxyConfig) -> Router {
    if config.api_key.is_none() {
        tracing::warn!("BLOCKCHAIR_API_KEY is not set, every proxy request will fail");
    }
    info!(base_url = %config.base_url, "Using Blockchair provider");
    router(Arc::new(BlockchairProxy::with_http_client(config)))
}

pub async fn create_app() -> Result<Router, Box<dyn std::error::Error>> {
    let config = crate::secrets::load_config().await?;
    Ok(create_app_with_config(config))
}

async fn health_check() -> &'static str {
    "OK"
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&TelemetryConfig::from_env());

    info!("Starting Blockchair proxy server");

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down gracefully...");
        }
    };

    let config = crate::secrets::load_config().await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_app_with_config(config);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
